//! Committee name resolution from clerk-authored referral text.
//!
//! Raw committee tokens arrive as abbreviated codes, prose fragments
//! ("referred to the committee on..."), or strings contaminated with inline
//! sponsor names. The resolver is total: it always returns a committee
//! string, with "Unassigned" as the bottom default.

use std::sync::OnceLock;

use regex::Regex;

use crate::tables::{house_committee_codes, senate_committee_codes, SPONSOR_SURNAMES};
use crate::types::{Chamber, UNASSIGNED};

fn referral_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)referred to (?:the )?(?:committee\s+(?:on|for)\s+)?(.+)$").unwrap()
    })
}

fn parenthetical_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\([^)]*\)").unwrap())
}

fn committee_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bcommittee(?:\s+(?:for|on))?\b").unwrap())
}

/// Title-case each whitespace-separated word, preserving punctuation
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// True for the bottom default and the post-flip "chamber-unassigned" values
pub fn is_unassigned(committee: &str) -> bool {
    committee.trim().is_empty() || committee.trim().ends_with(UNASSIGNED)
}

/// Prefix the acting chamber's name unless a chamber name is already present
pub fn ensure_chamber_prefix(name: &str, chamber: Chamber) -> String {
    let trimmed = name.trim();
    if trimmed.starts_with("House") || trimmed.starts_with("Senate") {
        trimmed.to_string()
    } else {
        format!("{} {}", chamber.name(), trimmed)
    }
}

/// Extract the committee phrase from a "referred to ..." event description.
/// The captured phrase is title-cased and chamber-prefixed.
pub fn extract_referral(description: &str, chamber: Chamber) -> Option<String> {
    let caps = referral_regex().captures(description)?;
    let phrase = caps.get(1)?.as_str().trim();
    if phrase.is_empty() {
        return None;
    }
    Some(ensure_chamber_prefix(&title_case(phrase), chamber))
}

/// Split a description on the literal "sub:" marker; returns the text
/// before and after the marker when present
pub fn split_subcommittee(description: &str) -> Option<(&str, &str)> {
    let lower = description.to_lowercase();
    let pos = lower.find("sub:")?;
    Some((&description[..pos], &description[pos + "sub:".len()..]))
}

fn strip_sponsors(name: &str) -> String {
    name.split_whitespace()
        .filter(|word| {
            let bare: String = word.chars().filter(|c| c.is_alphabetic()).collect();
            !SPONSOR_SURNAMES
                .iter()
                .any(|surname| surname.eq_ignore_ascii_case(&bare))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Second-pass resolution of a fold-produced committee string: exact
/// two-character code lookup per chamber, otherwise light cleanup (sponsor
/// surnames, parenthetical annotations, literal "Committee For/On"), always
/// ending chamber-prefixed. Total: blanks resolve to "Unassigned".
pub fn finalize_committee(resolved: &str, chamber: Chamber) -> String {
    let trimmed = resolved.trim();
    if trimmed.is_empty() {
        return UNASSIGNED.to_string();
    }
    if is_unassigned(trimmed) {
        return trimmed.to_string();
    }

    let code_table = match chamber {
        Chamber::House => house_committee_codes(),
        Chamber::Senate => senate_committee_codes(),
    };
    if let Some(name) = code_table.get(trimmed) {
        return ensure_chamber_prefix(name, chamber);
    }

    let without_parens = parenthetical_regex().replace_all(trimmed, " ");
    let without_committee = committee_word_regex().replace_all(&without_parens, " ");
    let cleaned = strip_sponsors(&without_committee);
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return UNASSIGNED.to_string();
    }
    ensure_chamber_prefix(&collapsed, chamber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_referral_prose_forms() {
        assert_eq!(
            extract_referral("H Referred to Courts of Justice", Chamber::House),
            Some("House Courts Of Justice".to_string())
        );
        assert_eq!(
            extract_referral("Referred to the Committee on Education", Chamber::Senate),
            Some("Senate Education".to_string())
        );
        assert_eq!(
            extract_referral("Referred to committee for Courts of Justice", Chamber::House),
            Some("House Courts Of Justice".to_string())
        );
        assert_eq!(extract_referral("Reported from committee", Chamber::House), None);
    }

    #[test]
    fn test_extract_referral_keeps_existing_chamber_prefix() {
        assert_eq!(
            extract_referral("Referred to Senate Finance", Chamber::House),
            Some("Senate Finance".to_string())
        );
    }

    #[test]
    fn test_split_subcommittee() {
        let (before, after) = split_subcommittee("H Assigned Courts Sub: Criminal Law").unwrap();
        assert_eq!(before, "H Assigned Courts ");
        assert_eq!(after, " Criminal Law");
        assert!(split_subcommittee("H Reported from Committee").is_none());
    }

    #[test]
    fn test_finalize_committee_code_lookup() {
        assert_eq!(
            finalize_committee("04", Chamber::House),
            "House Courts of Justice"
        );
        assert_eq!(
            finalize_committee("05", Chamber::Senate),
            "Senate Finance and Appropriations"
        );
    }

    #[test]
    fn test_finalize_committee_cleanup() {
        assert_eq!(
            finalize_committee("Committee on Finance (Subcommittee #2)", Chamber::House),
            "House Finance"
        );
        assert_eq!(
            finalize_committee("Education Surovell", Chamber::Senate),
            "Senate Education"
        );
    }

    #[test]
    fn test_finalize_committee_total() {
        assert_eq!(finalize_committee("", Chamber::House), UNASSIGNED);
        assert_eq!(finalize_committee("  ", Chamber::House), UNASSIGNED);
        assert_eq!(finalize_committee("(pending)", Chamber::House), UNASSIGNED);
        assert_eq!(
            finalize_committee("House Unassigned", Chamber::Senate),
            "House Unassigned"
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("courts of justice"), "Courts Of Justice");
        assert_eq!(title_case("CRIMINAL LAW"), "Criminal Law");
    }
}

//! Lifecycle phase classification.
//!
//! A priority-ordered table of (predicate, phase) rules evaluated by a
//! generic first-match engine. Enacted/vetoed/awaiting-signature rules sit
//! above dead-keyword matching: enrolled bills often carry words from the
//! dead set ("continued") in unrelated clauses, and must short-circuit
//! before rule 5 sees them.

use crate::committee::is_unassigned;
use crate::tables::{
    contains_any, AGREEMENT_KEYWORDS, AWAITING_SIGNATURE_KEYWORDS, CLERICAL_STATUS_KEYWORDS,
    DEAD_KEYWORDS, ENACTED_KEYWORDS, FLOOR_KEYWORDS, MAJOR_ACTION_KEYWORDS,
};
use crate::types::{BillPrefix, LifecyclePhase, MISSING_FIELD};

/// Everything the classifier looks at for one bill, lowercased once
#[derive(Debug, Clone)]
pub struct Evidence {
    /// Effective latest status text (post clerical override)
    pub status: String,
    /// Concatenation of all chronology descriptions
    pub chronology: String,
    /// Resolved committee
    pub committee: String,
    pub prefix: BillPrefix,
}

impl Evidence {
    pub fn new(status: &str, chronology: &str, committee: &str, prefix: BillPrefix) -> Self {
        Evidence {
            status: status.to_lowercase(),
            chronology: chronology.to_lowercase(),
            committee: committee.to_string(),
            prefix,
        }
    }

    fn anywhere(&self, keywords: &[&str]) -> bool {
        contains_any(&self.status, keywords) || contains_any(&self.chronology, keywords)
    }
}

/// One entry in the ordered cascade; first match wins
struct Rule {
    phase: LifecyclePhase,
    applies: fn(&Evidence) -> bool,
}

fn signed_enacted(e: &Evidence) -> bool {
    e.anywhere(ENACTED_KEYWORDS)
}

fn vetoed(e: &Evidence) -> bool {
    e.anywhere(&["vetoed"])
}

fn passed_resolution(e: &Evidence) -> bool {
    e.prefix.is_resolution() && e.anywhere(AGREEMENT_KEYWORDS)
}

fn awaiting_signature(e: &Evidence) -> bool {
    e.anywhere(AWAITING_SIGNATURE_KEYWORDS)
}

fn dead_tabled(e: &Evidence) -> bool {
    let dead_in_status = contains_any(&e.status, DEAD_KEYWORDS) && !e.status.contains("recommend");
    let dead_in_chronology = contains_any(&e.chronology, DEAD_KEYWORDS)
        && !e.chronology.contains("amendment")
        && !e.chronology.contains("recommend");
    dead_in_status || dead_in_chronology
}

fn out_of_committee(e: &Evidence) -> bool {
    contains_any(&e.status, FLOOR_KEYWORDS) && !e.status.contains("recommends reporting")
}

fn in_committee(e: &Evidence) -> bool {
    let referred = e.status.contains("referred to") && !e.status.contains("governor");
    let pending = e.status.contains("pending") || e.status.contains("prefiled");
    let committee = e.committee.trim();
    let committee_non_trivial =
        !is_unassigned(committee) && committee != MISSING_FIELD && committee.len() > 2;
    referred || pending || committee_non_trivial
}

/// Priority order is load-bearing; see the module comment
const RULES: &[Rule] = &[
    Rule { phase: LifecyclePhase::SignedEnacted, applies: signed_enacted },
    Rule { phase: LifecyclePhase::Vetoed, applies: vetoed },
    Rule { phase: LifecyclePhase::PassedResolution, applies: passed_resolution },
    Rule { phase: LifecyclePhase::AwaitingSignature, applies: awaiting_signature },
    Rule { phase: LifecyclePhase::DeadTabled, applies: dead_tabled },
    Rule { phase: LifecyclePhase::OutOfCommittee, applies: out_of_committee },
    Rule { phase: LifecyclePhase::InCommittee, applies: in_committee },
];

/// Classify one bill from its current evidence. Total: falls back to
/// `InCommittee` when no rule matches.
pub fn classify(evidence: &Evidence) -> LifecyclePhase {
    RULES
        .iter()
        .find(|rule| (rule.applies)(evidence))
        .map(|rule| rule.phase)
        .unwrap_or(LifecyclePhase::InCommittee)
}

/// The latest status text, unless it is stale clerk noise (printed/fiscal/
/// assigned/...) and a major action exists to stand in for it.
pub fn effective_status<'a>(status: &'a str, last_major_action: Option<&'a str>) -> &'a str {
    let clerical = contains_any(status, CLERICAL_STATUS_KEYWORDS)
        && !contains_any(status, MAJOR_ACTION_KEYWORDS);
    match last_major_action {
        Some(major) if clerical => major,
        _ => status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UNASSIGNED;

    fn evidence(status: &str, chronology: &str, committee: &str, prefix: BillPrefix) -> Evidence {
        Evidence::new(status, chronology, committee, prefix)
    }

    #[test]
    fn test_enrolled_chapter_never_dead() {
        // Chronology carries "continued" in an unrelated clause
        let e = evidence(
            "Enrolled, Chapter 14",
            "read third time continued on the calendar enrolled",
            "House Courts Of Justice",
            BillPrefix::HB,
        );
        let phase = classify(&e);
        assert!(
            phase == LifecyclePhase::SignedEnacted || phase == LifecyclePhase::AwaitingSignature,
            "got {:?}",
            phase
        );
        assert_ne!(phase, LifecyclePhase::DeadTabled);
    }

    #[test]
    fn test_approved_by_governor() {
        let e = evidence("Approved by Governor - Acts of Assembly", "", UNASSIGNED, BillPrefix::SB);
        assert_eq!(classify(&e), LifecyclePhase::SignedEnacted);
    }

    #[test]
    fn test_vetoed() {
        let e = evidence("Vetoed by Governor", "", UNASSIGNED, BillPrefix::HB);
        assert_eq!(classify(&e), LifecyclePhase::Vetoed);
    }

    #[test]
    fn test_resolution_agreement() {
        let e = evidence("Agreed to by Senate by voice vote", "", UNASSIGNED, BillPrefix::SJ);
        assert_eq!(classify(&e), LifecyclePhase::PassedResolution);
        // Same status on a bill-type prefix falls through to floor action
        let e = evidence("Agreed to by Senate by voice vote", "", UNASSIGNED, BillPrefix::SB);
        assert_eq!(classify(&e), LifecyclePhase::OutOfCommittee);
    }

    #[test]
    fn test_communicated_to_governor_awaits_signature() {
        let e = evidence("Communicated to Governor", "", UNASSIGNED, BillPrefix::HB);
        assert_eq!(classify(&e), LifecyclePhase::AwaitingSignature);
    }

    #[test]
    fn test_dead_in_status() {
        let e = evidence("Left in Appropriations", "", "House Appropriations", BillPrefix::HB);
        assert_eq!(classify(&e), LifecyclePhase::DeadTabled);
    }

    #[test]
    fn test_recommend_excludes_dead() {
        let e = evidence(
            "Passed by indefinitely in Senate (Recommend)",
            "",
            UNASSIGNED,
            BillPrefix::SB,
        );
        let phase = classify(&e);
        assert_ne!(phase, LifecyclePhase::DeadTabled);
        assert!(
            phase == LifecyclePhase::InCommittee || phase == LifecyclePhase::OutOfCommittee,
            "got {:?}",
            phase
        );
    }

    #[test]
    fn test_amendment_excludes_dead_in_chronology() {
        let e = evidence(
            "Read second time",
            "house amendment rejected tabled in committee",
            UNASSIGNED,
            BillPrefix::HB,
        );
        assert_eq!(classify(&e), LifecyclePhase::OutOfCommittee);
    }

    #[test]
    fn test_recommends_reporting_is_not_floor_action() {
        let e = evidence(
            "Subcommittee recommends reporting",
            "",
            "House Courts Of Justice",
            BillPrefix::HB,
        );
        assert_eq!(classify(&e), LifecyclePhase::InCommittee);
    }

    #[test]
    fn test_referred_status_in_committee() {
        let e = evidence("Referred to Courts of Justice", "", UNASSIGNED, BillPrefix::HB);
        assert_eq!(classify(&e), LifecyclePhase::InCommittee);
    }

    #[test]
    fn test_nontrivial_committee_in_committee() {
        let e = evidence("-", "", "Senate Education and Health", BillPrefix::SB);
        assert_eq!(classify(&e), LifecyclePhase::InCommittee);
    }

    #[test]
    fn test_default_in_committee() {
        let e = evidence("-", "", UNASSIGNED, BillPrefix::HB);
        assert_eq!(classify(&e), LifecyclePhase::InCommittee);
    }

    #[test]
    fn test_effective_status_override() {
        assert_eq!(
            effective_status("Printed as introduced", Some("Passed House (99-Y 0-N)")),
            "Passed House (99-Y 0-N)"
        );
        // Major-action words in the status keep it authoritative
        assert_eq!(
            effective_status("Passed by indefinitely (Recommend)", Some("Reported")),
            "Passed by indefinitely (Recommend)"
        );
        // No major action: clerical status stands
        assert_eq!(effective_status("Printed as introduced", None), "Printed as introduced");
    }
}

//! Chamber and committee context tracking over one bill's chronology.
//!
//! The fold walks the ordered event sequence and maintains which chamber
//! currently holds the bill. Clerical events (fiscal notes, impact
//! statements, printing notices) never flip chamber context; events
//! matching the major-action keyword set are captured regardless, since a
//! stale clerical status line is later overridden by the last major action.

use chrono::NaiveDate;

use crate::committee;
use crate::tables::{
    contains_any, CLERICAL_PHRASES, MAJOR_ACTION_KEYWORDS, SUBCOMMITTEE_CLEARING_KEYWORDS,
};
use crate::types::{ActionEvent, BillKey, Chamber, NO_SUBCOMMITTEE, UNASSIGNED};

/// Fold state for one bill. Each step consumes a state and returns the
/// next, so individual transition rules are unit-testable without
/// replaying whole chronologies.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerState {
    pub current_chamber: Chamber,
    pub current_committee: String,
    pub current_subcommittee: String,
    /// Most recent event description matching the major-action keyword set
    pub last_major_action: Option<String>,
    pub last_major_action_date: Option<NaiveDate>,
}

impl TrackerState {
    /// Seed the fold from the bill's own prefix, the anchor of last resort
    /// when no event carries a reliable marker
    pub fn seeded_from(key: &BillKey) -> Self {
        TrackerState {
            current_chamber: key.prefix.origin_chamber(),
            current_committee: UNASSIGNED.to_string(),
            current_subcommittee: NO_SUBCOMMITTEE.to_string(),
            last_major_action: None,
            last_major_action_date: None,
        }
    }

    /// Apply one event. Pure: returns the successor state.
    pub fn step(mut self, event: &ActionEvent) -> Self {
        let lower = event.description.to_lowercase();
        let clerical = contains_any(&event.description, CLERICAL_PHRASES);

        // Major actions are captured even on clerical events
        if contains_any(&event.description, MAJOR_ACTION_KEYWORDS) {
            self.last_major_action = Some(event.description.clone());
            self.last_major_action_date = event.date;
        }

        if !clerical {
            if let Some(marker) = event.raw_chamber_marker {
                if marker != self.current_chamber {
                    // A new chamber restarts committee assignment
                    self.current_chamber = marker;
                    self.current_committee = format!("{} {}", marker.name(), UNASSIGNED);
                    self.current_subcommittee = NO_SUBCOMMITTEE.to_string();
                }
            }
        }

        if lower.contains("referred to") {
            // Re-referral resets subcommittee context
            self.current_subcommittee = NO_SUBCOMMITTEE.to_string();
            if let Some(name) =
                committee::extract_referral(&event.description, self.current_chamber)
            {
                self.current_committee = name;
            }
        }

        if let Some((before, after)) = committee::split_subcommittee(&event.description) {
            self.current_subcommittee = committee::title_case(after.trim());
            if committee::is_unassigned(&self.current_committee) {
                // No committee resolved yet: the text before the marker
                // names it, minus the clerk's "assigned" verb and the
                // leading chamber tag
                let before = match event.raw_chamber_marker {
                    Some(_) => &before[2..],
                    None => before,
                };
                let fallback = before
                    .replace("Assigned", " ")
                    .replace("assigned", " ")
                    .trim()
                    .to_string();
                if !fallback.is_empty() {
                    self.current_committee = committee::ensure_chamber_prefix(
                        &committee::title_case(&fallback),
                        self.current_chamber,
                    );
                }
            }
        }

        // Subcommittee context does not survive past the floor
        if contains_any(&event.description, SUBCOMMITTEE_CLEARING_KEYWORDS) {
            self.current_subcommittee = NO_SUBCOMMITTEE.to_string();
        }

        self
    }

    /// Fold a whole chronology
    pub fn run(key: &BillKey, events: &[ActionEvent]) -> Self {
        events
            .iter()
            .fold(TrackerState::seeded_from(key), |state, event| state.step(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chronology::leading_chamber_marker;

    fn event(description: &str, date: Option<NaiveDate>) -> ActionEvent {
        ActionEvent {
            date,
            raw_chamber_marker: leading_chamber_marker(description),
            description: description.to_string(),
        }
    }

    fn key(raw: &str) -> BillKey {
        BillKey::parse(raw).unwrap()
    }

    #[test]
    fn test_seed_from_prefix() {
        assert_eq!(
            TrackerState::seeded_from(&key("HB1")).current_chamber,
            Chamber::House
        );
        assert_eq!(
            TrackerState::seeded_from(&key("SJ2")).current_chamber,
            Chamber::Senate
        );
    }

    #[test]
    fn test_marker_flips_chamber_and_resets_committee() {
        let state = TrackerState::seeded_from(&key("HB1"))
            .step(&event("H Referred to Courts of Justice", None))
            .step(&event("S Referred to Judiciary", None));
        assert_eq!(state.current_chamber, Chamber::Senate);
        assert_eq!(state.current_committee, "Senate Judiciary");
    }

    #[test]
    fn test_flip_without_referral_leaves_chamber_unassigned() {
        let state = TrackerState::seeded_from(&key("HB1"))
            .step(&event("H Referred to Courts of Justice", None))
            .step(&event("S Read first time", None));
        assert_eq!(state.current_chamber, Chamber::Senate);
        assert_eq!(state.current_committee, "Senate Unassigned");
    }

    #[test]
    fn test_clerical_event_never_flips_chamber() {
        // Contains "H " inside, but the clerical phrase suppresses tracking
        let state = TrackerState::seeded_from(&key("SB1"))
            .step(&event("Fiscal impact statement from H Finance", None));
        assert_eq!(state.current_chamber, Chamber::Senate);
        assert_eq!(state.current_committee, UNASSIGNED);
    }

    #[test]
    fn test_major_action_captured_on_clerical_event() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 1);
        let state = TrackerState::seeded_from(&key("HB1"))
            .step(&event("Substitute printed and passed by for the day", date));
        assert_eq!(
            state.last_major_action.as_deref(),
            Some("Substitute printed and passed by for the day")
        );
        assert_eq!(state.last_major_action_date, date);
        // still clerical: committee context untouched
        assert_eq!(state.current_committee, UNASSIGNED);
    }

    #[test]
    fn test_subcommittee_assignment_and_reset() {
        let state = TrackerState::seeded_from(&key("HB1"))
            .step(&event("H Referred to Courts of Justice", None))
            .step(&event("H Sub: Criminal Law", None));
        assert_eq!(state.current_committee, "House Courts Of Justice");
        assert_eq!(state.current_subcommittee, "Criminal Law");

        let state = state.step(&event("H Read third time", None));
        assert_eq!(state.current_subcommittee, NO_SUBCOMMITTEE);
    }

    #[test]
    fn test_sub_marker_names_committee_when_none_resolved() {
        let state = TrackerState::seeded_from(&key("HB1"))
            .step(&event("Assigned Courts Sub: Constitutional Law", None));
        assert_eq!(state.current_committee, "House Courts");
        assert_eq!(state.current_subcommittee, "Constitutional Law");
    }

    #[test]
    fn test_referral_resets_subcommittee() {
        let state = TrackerState::seeded_from(&key("HB1"))
            .step(&event("H Referred to Courts of Justice", None))
            .step(&event("H Sub: Criminal Law", None))
            .step(&event("H Referred to Appropriations", None));
        assert_eq!(state.current_committee, "House Appropriations");
        assert_eq!(state.current_subcommittee, NO_SUBCOMMITTEE);
    }
}

//! Orders a bill's raw history rows into a chronological event sequence.

use chrono::NaiveDate;
use serde_json::Value;

use crate::feed::{probe_str, HISTORY_DATE_COLUMNS, HISTORY_DESCRIPTION_COLUMNS};
use crate::types::{ActionEvent, Chamber, MISSING_FIELD};

/// Accepted date formats, checked in order. Clerk-entered dates drift
/// between vintages of the same feed.
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%m/%d/%y", "%Y-%m-%d", "%B %d, %Y", "%b %d, %Y"];

/// Parse a feed date string against the accepted format ladder.
///
/// Returns None when no format matches; the caller keeps the row and lets
/// the None sort before every real date.
pub fn parse_feed_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Leading chamber tag ("H " / "S ") embedded in a description, if any
pub fn leading_chamber_marker(description: &str) -> Option<Chamber> {
    if description.starts_with("H ") {
        Some(Chamber::House)
    } else if description.starts_with("S ") {
        Some(Chamber::Senate)
    } else {
        None
    }
}

/// Build the time-ordered event sequence for one bill from its raw history
/// rows. No row is dropped: missing descriptions degrade to the field
/// sentinel and unparseable dates to the sort-first sentinel. Ties preserve
/// original feed order.
pub fn build_chronology(rows: &[&Value]) -> Vec<ActionEvent> {
    let mut events: Vec<ActionEvent> = rows
        .iter()
        .map(|row| {
            let description = probe_str(row, HISTORY_DESCRIPTION_COLUMNS)
                .unwrap_or(MISSING_FIELD)
                .to_string();
            let date = probe_str(row, HISTORY_DATE_COLUMNS).and_then(parse_feed_date);
            let raw_chamber_marker = leading_chamber_marker(&description);
            ActionEvent {
                date,
                description,
                raw_chamber_marker,
            }
        })
        .collect();
    // Stable sort: None (unparseable) orders before every real date
    events.sort_by_key(|event| event.date);
    events
}

/// Concatenated lowercase description text, the keyword-search blob the
/// lifecycle classifier consumes
pub fn chronology_blob(events: &[ActionEvent]) -> String {
    events
        .iter()
        .map(|e| e.description.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

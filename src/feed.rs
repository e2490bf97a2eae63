//! Already-parsed tabular feed snapshots and column probing.
//!
//! Column names vary across feed vintages, so every field is located by
//! probing a small ordered list of candidate names and taking the first
//! present. The engine performs no retrieval or caching of its own; the
//! snapshot is handed over fully materialized by upstream collaborators.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::normalize_label;

/// Candidate identifier columns, checked in priority order
pub const BILL_ID_COLUMNS: &[&str] = &["bill_id", "bill_number", "bill", "legislation"];

/// Candidate history description columns
pub const HISTORY_DESCRIPTION_COLUMNS: &[&str] =
    &["history_description", "description", "action"];

/// Candidate history date columns
pub const HISTORY_DATE_COLUMNS: &[&str] = &["history_date", "action_date", "date"];

/// Candidate docket committee-label columns
pub const DOCKET_COMMITTEE_COLUMNS: &[&str] =
    &["committee_description", "committee", "docket_committee"];

/// Candidate docket meeting-date columns
pub const DOCKET_DATE_COLUMNS: &[&str] = &["meeting_date", "docket_date", "date"];

/// Candidate bill title columns on the master feed
pub const TITLE_COLUMNS: &[&str] = &["bill_description", "title", "summary"];

/// Candidate last-action text columns on the master feed, per chamber
pub const LAST_HOUSE_ACTION_COLUMNS: &[&str] = &["last_house_action", "house_action"];
pub const LAST_SENATE_ACTION_COLUMNS: &[&str] = &["last_senate_action", "senate_action"];

/// Candidate last-action date columns on the master feed, per chamber
pub const LAST_HOUSE_ACTION_DATE_COLUMNS: &[&str] =
    &["last_house_action_date", "house_action_date"];
pub const LAST_SENATE_ACTION_DATE_COLUMNS: &[&str] =
    &["last_senate_action_date", "senate_action_date"];

/// Probe a row for the first present candidate column with a string value
pub fn probe_str<'a>(row: &'a Value, candidates: &[&str]) -> Option<&'a str> {
    candidates
        .iter()
        .find_map(|col| row.get(col).and_then(|v| v.as_str()))
}

/// Scraped meeting times: date -> loosely normalized committee key -> time
/// string. Supplied as an opaque dictionary by the HTML-scraping collaborator.
pub type MeetingTimeMap = HashMap<NaiveDate, HashMap<String, String>>;

/// One run's worth of already-fetched tabular data
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub master: Vec<Value>,
    pub history: Vec<Value>,
    pub dockets: Vec<Value>,
    pub meeting_times: MeetingTimeMap,
}

impl FeedSnapshot {
    /// Load a snapshot from JSON files produced by the retrieval
    /// collaborators. Docket and meeting-time files are optional; absent
    /// files degrade to empty tables.
    pub fn load(
        master: &Path,
        history: &Path,
        dockets: Option<&Path>,
        meeting_times: Option<&Path>,
    ) -> Result<Self> {
        let master: Vec<Value> = serde_json::from_str(&std::fs::read_to_string(master)?)?;
        let history: Vec<Value> = serde_json::from_str(&std::fs::read_to_string(history)?)?;
        let dockets = match dockets {
            Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None => Vec::new(),
        };
        let meeting_times = match meeting_times {
            Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None => MeetingTimeMap::new(),
        };
        Ok(Self {
            master,
            history,
            dockets,
            meeting_times,
        })
    }
}

/// Locate the identifier column for a feed table.
///
/// An empty table is a degradation case (`Ok(None)`, every requested bill
/// goes unmatched); a non-empty table with no recognizable identifier
/// column means the feed schema changed incompatibly and is the one fatal
/// condition in the taxonomy.
pub fn locate_bill_id_column(rows: &[Value], feed_name: &str) -> Result<Option<&'static str>> {
    if rows.is_empty() {
        return Ok(None);
    }
    for candidate in BILL_ID_COLUMNS.iter().copied() {
        if rows.iter().any(|row| row.get(candidate).is_some()) {
            return Ok(Some(candidate));
        }
    }
    Err(Error::Schema(format!(
        "no bill identifier column found in non-empty {} feed (tried {:?})",
        feed_name, BILL_ID_COLUMNS
    )))
}

/// All rows whose identifier normalizes to `key`. Rows with unparseable
/// identifiers normalize to the empty string and never join.
pub fn rows_for_bill<'a>(rows: &'a [Value], id_column: &str, key: &str) -> Vec<&'a Value> {
    rows.iter()
        .filter(|row| {
            row.get(id_column)
                .and_then(|v| v.as_str())
                .map(|raw| normalize_label(raw) == key)
                .unwrap_or(false)
        })
        .collect()
}

//! Per-bill state reconstruction over one feed snapshot.
//!
//! Bills are independent: each reconstruction is a pure function of that
//! bill's own rows, so the whole batch recomputes fresh on every run and
//! re-running with a refreshed snapshot is always safe. The engine never
//! drops a requested bill — keys absent from the master feed yield a
//! "Not Found" state.

use async_stream::stream;
use futures::Stream;
use serde_json::Value;
use tracing::warn;

use crate::category::best_category;
use crate::chamber::TrackerState;
use crate::chronology::{build_chronology, chronology_blob, parse_feed_date};
use crate::committee::finalize_committee;
use crate::config::Config;
use crate::error::Result;
use crate::feed::{
    locate_bill_id_column, probe_str, rows_for_bill, FeedSnapshot, LAST_HOUSE_ACTION_COLUMNS,
    LAST_HOUSE_ACTION_DATE_COLUMNS, LAST_SENATE_ACTION_COLUMNS, LAST_SENATE_ACTION_DATE_COLUMNS,
    TITLE_COLUMNS,
};
use crate::lifecycle::{classify, effective_status, Evidence};
use crate::meetings::match_meetings;
use crate::types::{
    normalize_label, BillKey, BillState, LifecyclePhase, MISSING_FIELD, NOT_FOUND_STATUS,
    NO_SUBCOMMITTEE, UNASSIGNED, UNKNOWN_TITLE,
};

/// Identifier columns located once per feed table
struct FeedColumns {
    master: Option<&'static str>,
    history: Option<&'static str>,
    dockets: Option<&'static str>,
}

/// Main engine: reconstructs a normalized BillState per tracked bill
pub struct ReconstructionEngine {
    config: Config,
}

impl ReconstructionEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Reconstruct every tracked bill synchronously.
    ///
    /// The only error is structural: a non-empty feed whose identifier
    /// column cannot be located (the schema changed incompatibly). All
    /// per-row mismatches degrade to sentinels.
    pub fn reconstruct_all(&self, snapshot: &FeedSnapshot) -> Result<Vec<BillState>> {
        let columns = FeedColumns {
            master: locate_bill_id_column(&snapshot.master, "master")?,
            history: locate_bill_id_column(&snapshot.history, "history")?,
            dockets: locate_bill_id_column(&snapshot.dockets, "docket")?,
        };
        if columns.master.is_none() {
            warn!("master feed is empty; every tracked bill will be Not Found");
        }

        let keys: Vec<&String> = match self.config.limit {
            Some(limit) => self.config.tracked_bills.iter().take(limit).collect(),
            None => self.config.tracked_bills.iter().collect(),
        };

        Ok(keys
            .into_iter()
            .filter_map(|key_str| {
                let Some(key) = BillKey::parse(key_str) else {
                    warn!(key = key_str.as_str(), "skipping unparseable tracked key");
                    return None;
                };
                Some(self.reconstruct_bill(snapshot, &columns, &key))
            })
            .collect())
    }

    /// Process tracked bills and return a reactive stream of bill states
    pub fn process(&self, snapshot: FeedSnapshot) -> impl Stream<Item = Result<BillState>> {
        let engine = ReconstructionEngine::new(self.config.clone());
        Box::pin(stream! {
            match engine.reconstruct_all(&snapshot) {
                Ok(states) => {
                    for state in states {
                        yield Ok(state);
                    }
                }
                Err(e) => {
                    yield Err(e);
                }
            }
        })
    }

    fn reconstruct_bill(
        &self,
        snapshot: &FeedSnapshot,
        columns: &FeedColumns,
        key: &BillKey,
    ) -> BillState {
        let key_str = key.to_string();
        let master_row = columns.master.and_then(|col| {
            snapshot.master.iter().find(|row| {
                row.get(col)
                    .and_then(|v| v.as_str())
                    .map(|raw| normalize_label(raw) == key_str)
                    .unwrap_or(false)
            })
        });

        let Some(master_row) = master_row else {
            return Self::not_found_state(&key_str);
        };

        let title = probe_str(master_row, TITLE_COLUMNS)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(UNKNOWN_TITLE)
            .to_string();
        let status = Self::latest_status(master_row);

        let history_rows = match columns.history {
            Some(col) => rows_for_bill(&snapshot.history, col, &key_str),
            None => Vec::new(),
        };
        let events = build_chronology(&history_rows);
        let tracker = TrackerState::run(key, &events);

        let committee = finalize_committee(&tracker.current_committee, tracker.current_chamber);
        let subcommittee = tracker.current_subcommittee.clone();
        let display_committee = if subcommittee == NO_SUBCOMMITTEE {
            committee.clone()
        } else {
            format!("{} (Sub: {})", committee, subcommittee)
        };

        let blob = chronology_blob(&events);
        let status_text = effective_status(&status, tracker.last_major_action.as_deref());
        let evidence = Evidence::new(status_text, &blob, &committee, key.prefix);
        let lifecycle = classify(&evidence);

        let docket_rows = match columns.dockets {
            Some(col) => rows_for_bill(&snapshot.dockets, col, &key_str),
            None => Vec::new(),
        };
        let upcoming_meetings =
            match_meetings(&docket_rows, &snapshot.meeting_times, self.config.as_of);

        let category = best_category(&self.config.categories, &format!("{} {}", title, blob));

        let mut ordered_history = events;
        ordered_history.reverse();

        BillState {
            key: key_str,
            title,
            latest_status_text: status_text.to_string(),
            lifecycle,
            display_committee,
            current_committee: committee,
            current_subcommittee: subcommittee,
            category,
            ordered_history,
            upcoming_meetings,
        }
    }

    /// The most recent of the two per-chamber action columns; ties and
    /// missing dates keep the House column
    fn latest_status(row: &Value) -> String {
        let house = probe_str(row, LAST_HOUSE_ACTION_COLUMNS).filter(|s| !s.trim().is_empty());
        let senate = probe_str(row, LAST_SENATE_ACTION_COLUMNS).filter(|s| !s.trim().is_empty());
        let house_date = probe_str(row, LAST_HOUSE_ACTION_DATE_COLUMNS).and_then(parse_feed_date);
        let senate_date = probe_str(row, LAST_SENATE_ACTION_DATE_COLUMNS).and_then(parse_feed_date);

        let chosen = match (house, senate) {
            (Some(h), Some(s)) => match (house_date, senate_date) {
                (Some(hd), Some(sd)) if sd > hd => s,
                (None, Some(_)) => s,
                _ => h,
            },
            (Some(h), None) => h,
            (None, Some(s)) => s,
            (None, None) => MISSING_FIELD,
        };
        chosen.trim().to_string()
    }

    fn not_found_state(key: &str) -> BillState {
        BillState {
            key: key.to_string(),
            title: UNKNOWN_TITLE.to_string(),
            latest_status_text: NOT_FOUND_STATUS.to_string(),
            lifecycle: LifecyclePhase::InCommittee,
            display_committee: UNASSIGNED.to_string(),
            current_committee: UNASSIGNED.to_string(),
            current_subcommittee: NO_SUBCOMMITTEE.to_string(),
            category: None,
            ordered_history: Vec::new(),
            upcoming_meetings: Vec::new(),
        }
    }
}

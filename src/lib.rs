//! A type-safe library for reconstructing state-legislature bill states.
//!
//! This library ingests already-parsed LIS feed snapshots (bill master,
//! action history, committee dockets, scraped meeting times) and
//! deterministically reconstructs a normalized state per tracked bill:
//! custodial committee and subcommittee, lifecycle phase, topical category,
//! and upcoming meetings.

pub mod category;
pub mod chamber;
pub mod chronology;
pub mod committee;
pub mod config;
pub mod engine;
pub mod error;
pub mod feed;
pub mod lifecycle;
pub mod meetings;
pub mod tables;
pub mod types;

pub use category::CategoryDefinition;
pub use chamber::TrackerState;
pub use config::{Config, ConfigBuilder};
pub use engine::ReconstructionEngine;
pub use error::{Error, Result};
pub use feed::{FeedSnapshot, MeetingTimeMap};
pub use types::{
    normalize_label, ActionEvent, BillKey, BillPrefix, BillState, Chamber, LifecyclePhase,
    ScheduledMeeting,
};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{Config, ConfigBuilder};
    pub use crate::engine::ReconstructionEngine;
    pub use crate::error::{Error, Result};
    pub use crate::feed::FeedSnapshot;
    pub use crate::types::{BillKey, BillState, LifecyclePhase};
    pub use futures::StreamExt;
}

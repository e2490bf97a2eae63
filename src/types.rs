use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Committee bottom default when no referral has been resolved
pub const UNASSIGNED: &str = "Unassigned";
/// Subcommittee sentinel when no subcommittee assignment is active
pub const NO_SUBCOMMITTEE: &str = "none";
/// Sentinel for any absent column/value
pub const MISSING_FIELD: &str = "-";
/// Title sentinel for bills missing from the master feed
pub const UNKNOWN_TITLE: &str = "Unknown";
/// Status sentinel for bills missing from the master feed
pub const NOT_FOUND_STATUS: &str = "Not Found";

/// Legislative chamber currently holding a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Chamber {
    House,
    Senate,
}

impl Chamber {
    /// The one-letter tag clerks prefix onto action descriptions ("H ", "S ")
    pub fn marker(self) -> &'static str {
        match self {
            Chamber::House => "H",
            Chamber::Senate => "S",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Chamber::House => "House",
            Chamber::Senate => "Senate",
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bill/resolution type prefixes recognized by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillPrefix {
    /// House bill
    HB,
    /// Senate bill
    SB,
    /// House joint resolution
    HJ,
    /// Senate joint resolution
    SJ,
    /// House resolution
    HR,
    /// Senate resolution
    SR,
}

impl BillPrefix {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "HB" => Some(BillPrefix::HB),
            "SB" => Some(BillPrefix::SB),
            "HJ" => Some(BillPrefix::HJ),
            "SJ" => Some(BillPrefix::SJ),
            "HR" => Some(BillPrefix::HR),
            "SR" => Some(BillPrefix::SR),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BillPrefix::HB => "HB",
            BillPrefix::SB => "SB",
            BillPrefix::HJ => "HJ",
            BillPrefix::SJ => "SJ",
            BillPrefix::HR => "HR",
            BillPrefix::SR => "SR",
        }
    }

    /// Resolutions pass by agreement rather than enactment
    pub fn is_resolution(self) -> bool {
        matches!(
            self,
            BillPrefix::HJ | BillPrefix::SJ | BillPrefix::HR | BillPrefix::SR
        )
    }

    /// Chamber of origin, the anchor of last resort for chamber tracking
    pub fn origin_chamber(self) -> Chamber {
        match self {
            BillPrefix::HB | BillPrefix::HJ | BillPrefix::HR => Chamber::House,
            BillPrefix::SB | BillPrefix::SJ | BillPrefix::SR => Chamber::Senate,
        }
    }
}

/// Canonical bill identifier: prefix plus numeric id with leading zeros stripped.
/// Two raw labels that normalize to the same key are the same bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillKey {
    pub prefix: BillPrefix,
    pub number: u32,
}

fn label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Z]+)0*(\d+)$").unwrap())
}

impl BillKey {
    /// Parse an arbitrary raw label (any spacing/casing, optional leading
    /// zeros) into a key. Returns None for labels outside the recognized
    /// prefix set, which callers must treat as unmatched.
    pub fn parse(raw: &str) -> Option<Self> {
        let compact: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        let caps = label_regex().captures(&compact)?;
        let prefix = BillPrefix::parse(caps.get(1)?.as_str())?;
        let number: u32 = caps.get(2)?.as_str().parse().ok()?;
        Some(BillKey { prefix, number })
    }
}

impl fmt::Display for BillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix.as_str(), self.number)
    }
}

/// Canonicalize a raw bill label into its join-key string.
///
/// Idempotent; unparseable or empty input yields an empty string, which
/// downstream joins exclude.
pub fn normalize_label(raw: &str) -> String {
    BillKey::parse(raw).map(|k| k.to_string()).unwrap_or_default()
}

/// One clerical/parliamentary record from the action-history feed.
///
/// `date` is None when the clerk's date string failed every accepted format;
/// such events sort before all real dates and are never used for
/// happened-today comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub date: Option<NaiveDate>,
    pub description: String,
    /// Leading chamber tag embedded in the description, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_chamber_marker: Option<Chamber>,
}

/// Coarse procedural state of a bill, recomputed fresh from current
/// evidence on every run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecyclePhase {
    Introduced,
    InCommittee,
    OutOfCommittee,
    PassedResolution,
    AwaitingSignature,
    SignedEnacted,
    DeadTabled,
    Vetoed,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LifecyclePhase::Introduced => "Introduced",
            LifecyclePhase::InCommittee => "In Committee",
            LifecyclePhase::OutOfCommittee => "Out of Committee",
            LifecyclePhase::PassedResolution => "Passed (Resolution)",
            LifecyclePhase::AwaitingSignature => "Awaiting Signature",
            LifecyclePhase::SignedEnacted => "Signed / Enacted",
            LifecyclePhase::DeadTabled => "Dead / Tabled",
            LifecyclePhase::Vetoed => "Vetoed",
        };
        f.write_str(label)
    }
}

/// An upcoming committee meeting matched from the docket feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledMeeting {
    pub date: NaiveDate,
    pub committee_display_name: String,
    /// Display time from the scraped meeting-time page, or "Time TBA"
    pub time_display: String,
    /// Sortable time-of-day: 0-24 for explicit times, fixed mid-day rank for
    /// "after adjournment/recess" slots, 99.0 for TBA
    pub rank_time: f64,
}

/// Normalized state of one tracked bill, owned solely by the run that
/// produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillState {
    pub key: String,
    pub title: String,
    pub latest_status_text: String,
    pub lifecycle: LifecyclePhase,
    /// Committee plus subcommittee annotation, ready for rendering
    pub display_committee: String,
    pub current_committee: String,
    pub current_subcommittee: String,
    /// Best-scoring topical category from the watchlist, if any cleared
    /// the threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Most recent first
    pub ordered_history: Vec<ActionEvent>,
    pub upcoming_meetings: Vec<ScheduledMeeting>,
}

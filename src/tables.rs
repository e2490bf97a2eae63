/// Static lookup tables for the reconstruction heuristics.
///
/// These are configuration data, not logic: keyword sets the folds and the
/// classifier search for, the historical committee-code maps, and the
/// sponsor-surname strip list. All matching is lowercase substring unless a
/// table says otherwise.
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Administrative notices that must never flip chamber/committee context
pub const CLERICAL_PHRASES: &[&str] = &[
    "fiscal impact",
    "impact statement",
    "fiscal note",
    "note filed",
    "substitute printed",
    "communication",
];

/// Terminal/near-terminal keywords; events matching these become the
/// last major action even when the event is otherwise clerical
pub const MAJOR_ACTION_KEYWORDS: &[&str] = &[
    "reported",
    "passed",
    "defeated",
    "failed",
    "stricken",
    "continued to",
    "incorporated",
    "approved",
    "enacted",
    "vetoed",
];

/// Status text matching only these is stale clerk noise; the last major
/// action stands in for it when one exists
pub const CLERICAL_STATUS_KEYWORDS: &[&str] = &[
    "printed",
    "fiscal",
    "statement",
    "assigned",
    "docketed",
    "prefiled",
    "recommend",
    "introduced",
];

/// Governor-signature / enactment evidence
pub const ENACTED_KEYWORDS: &[&str] = &[
    "approved by governor",
    "signed by governor",
    "acts of assembly",
    "chapter",
    "enacted",
];

/// Chamber-specific resolution agreement evidence
pub const AGREEMENT_KEYWORDS: &[&str] = &["agreed to by house", "agreed to by senate"];

/// Enrollment / communicated-to-governor evidence
pub const AWAITING_SIGNATURE_KEYWORDS: &[&str] = &[
    "enrolled",
    "communicated to governor",
    "bill text as passed",
    "governor's action deadline",
];

/// Dead/tabled evidence
pub const DEAD_KEYWORDS: &[&str] = &[
    "passed by indefinitely",
    "tabled",
    "stricken",
    "defeated",
    "failed",
    "left in",
    "died",
    "continued to next session",
    "incorporated into",
];

/// Floor-action evidence for out-of-committee classification
pub const FLOOR_KEYWORDS: &[&str] = &[
    "reported",
    "passed",
    "agreed",
    "engrossed",
    "communicated",
    "reading waived",
    "read second",
    "read third",
    "read first",
];

/// Floor-level events that clear subcommittee context; subcommittee
/// assignment does not survive past the floor
pub const SUBCOMMITTEE_CLEARING_KEYWORDS: &[&str] = &[
    "reported",
    "passed",
    "failed",
    "stricken",
    "defeated",
    "read first",
    "read second",
    "read third",
];

/// Surnames the clerks embed inline into committee referral strings
pub const SPONSOR_SURNAMES: &[&str] = &[
    "Bulova",
    "Carter",
    "Deeds",
    "Herring",
    "Hope",
    "Keam",
    "Lopez",
    "McClellan",
    "Simon",
    "Surovell",
    "Watts",
];

/// Words carrying no committee identity, stripped when building the
/// loosely-normalized meeting-time keys
pub const SCHEDULE_STOPWORDS: &[&str] = &[
    "house",
    "senate",
    "committee",
    "subcommittee",
    "the",
    "of",
    "and",
    "on",
    "for",
];

/// Historical two-character committee codes, House side
pub const HOUSE_COMMITTEE_CODES: &[(&str, &str)] = &[
    ("01", "Agriculture, Chesapeake and Natural Resources"),
    ("02", "Appropriations"),
    ("03", "Counties, Cities and Towns"),
    ("04", "Courts of Justice"),
    ("05", "Education"),
    ("06", "Finance"),
    ("07", "General Laws"),
    ("08", "Health, Welfare and Institutions"),
    ("09", "Labor and Commerce"),
    ("10", "Militia, Police and Public Safety"),
    ("11", "Privileges and Elections"),
    ("12", "Public Safety"),
    ("13", "Rules"),
    ("14", "Transportation"),
    ("15", "Communications, Technology and Innovation"),
];

/// Historical two-character committee codes, Senate side
pub const SENATE_COMMITTEE_CODES: &[(&str, &str)] = &[
    ("01", "Agriculture, Conservation and Natural Resources"),
    ("02", "Commerce and Labor"),
    ("03", "Courts of Justice"),
    ("04", "Education and Health"),
    ("05", "Finance and Appropriations"),
    ("06", "General Laws and Technology"),
    ("07", "Local Government"),
    ("08", "Privileges and Elections"),
    ("09", "Rehabilitation and Social Services"),
    ("10", "Rules"),
    ("11", "Transportation"),
    ("12", "Judiciary"),
];

/// Get the House code map, initializing it on first use
pub fn house_committee_codes() -> &'static HashMap<&'static str, &'static str> {
    static CODES: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    CODES.get_or_init(|| HOUSE_COMMITTEE_CODES.iter().copied().collect())
}

/// Get the Senate code map, initializing it on first use
pub fn senate_committee_codes() -> &'static HashMap<&'static str, &'static str> {
    static CODES: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    CODES.get_or_init(|| SENATE_COMMITTEE_CODES.iter().copied().collect())
}

/// Get the schedule stopword set, initializing it on first use
pub fn schedule_stopwords() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| SCHEDULE_STOPWORDS.iter().copied().collect())
}

/// True when any phrase from `set` occurs in the lowercased `text`
pub fn contains_any(text: &str, set: &[&str]) -> bool {
    let lower = text.to_lowercase();
    set.iter().any(|kw| lower.contains(kw))
}

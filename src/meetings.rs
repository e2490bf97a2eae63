//! Correlates docket rows with scraped meeting-time pages.
//!
//! Scrape keys are loosely normalized committee names (stopwords and
//! chamber words stripped, lowercased, spaces removed); a docket row
//! matches a key when every significant word of the docket's committee
//! label appears in the key, and never across chambers.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;

use crate::chronology::parse_feed_date;
use crate::committee::title_case;
use crate::feed::{probe_str, MeetingTimeMap, DOCKET_COMMITTEE_COLUMNS, DOCKET_DATE_COLUMNS};
use crate::tables::schedule_stopwords;
use crate::types::{Chamber, ScheduledMeeting};

/// Display string when no scraped time matches
pub const TIME_TBA: &str = "Time TBA";

/// Rank for the symbolic "after floor session / after recess" slots
const AFTER_SESSION_RANK: f64 = 13.0;
/// Rank that sorts TBA meetings last
const TBA_RANK: f64 = 99.0;

fn clock_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,2}):(\d{2})\s*([AaPp])?").unwrap())
}

/// Lowercased words of a committee label with stopwords and chamber words
/// removed
fn label_words(label: &str) -> Vec<String> {
    let stopwords = schedule_stopwords();
    label
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !stopwords.contains(w))
        .map(|w| w.to_string())
        .collect()
}

/// Loosely normalized scrape-map key for a committee label
pub fn normalize_schedule_key(label: &str) -> String {
    label_words(label).concat()
}

/// Chamber named in a docket committee label, if any
fn label_chamber(label: &str) -> Option<Chamber> {
    let lower = label.to_lowercase();
    if lower.contains("house") {
        Some(Chamber::House)
    } else if lower.contains("senate") {
        Some(Chamber::Senate)
    } else {
        None
    }
}

/// Time-of-day rank for a scraped time string: explicit HH:MM maps to a
/// 0-24 float (PM-adjusted), "after adjournment/recess" to a fixed mid-day
/// rank, everything else sorts last
pub fn rank_time(time: &str) -> f64 {
    let lower = time.to_lowercase();
    if lower.contains("adjourn") || lower.contains("recess") {
        return AFTER_SESSION_RANK;
    }
    if let Some(caps) = clock_regex().captures(time) {
        let hour: f64 = caps[1].parse().unwrap_or(0.0);
        let minute: f64 = caps[2].parse().unwrap_or(0.0);
        let mut rank = hour + minute / 60.0;
        match caps.get(3).map(|m| m.as_str().to_lowercase()) {
            Some(ref p) if p == "p" && hour < 12.0 => rank += 12.0,
            Some(ref a) if a == "a" && hour >= 12.0 => rank -= 12.0,
            _ => {}
        }
        return rank;
    }
    TBA_RANK
}

/// Find the scraped time for one docket entry. The scrape key must contain
/// every significant word (length > 3) of the docket label, and a
/// House-labeled committee never matches a Senate-keyed scrape or vice
/// versa. Keys are tried in sorted order so the first match is
/// deterministic.
fn lookup_time(
    times: &MeetingTimeMap,
    date: NaiveDate,
    docket_label: &str,
) -> Option<String> {
    let by_key = times.get(&date)?;
    let significant: Vec<String> = label_words(docket_label)
        .into_iter()
        .filter(|w| w.len() > 3)
        .collect();
    if significant.is_empty() {
        return None;
    }
    let chamber = label_chamber(docket_label);

    let mut keys: Vec<&String> = by_key.keys().collect();
    keys.sort();
    for key in keys {
        match chamber {
            Some(Chamber::House) if key.contains("senate") => continue,
            Some(Chamber::Senate) if key.contains("house") => continue,
            _ => {}
        }
        if significant.iter().all(|word| key.contains(word.as_str())) {
            return Some(by_key[key].clone());
        }
    }
    None
}

/// Produce the ordered upcoming meetings for one bill from its docket rows.
///
/// Rows with unparseable dates are dropped here (a meeting without a date
/// cannot be scheduled); `as_of`, when given, filters out meetings already
/// past. Output is ordered by date, then time rank.
pub fn match_meetings(
    docket_rows: &[&Value],
    times: &MeetingTimeMap,
    as_of: Option<NaiveDate>,
) -> Vec<ScheduledMeeting> {
    let mut meetings: Vec<ScheduledMeeting> = docket_rows
        .iter()
        .filter_map(|row| {
            let date = probe_str(row, DOCKET_DATE_COLUMNS).and_then(parse_feed_date)?;
            if let Some(cutoff) = as_of {
                if date < cutoff {
                    return None;
                }
            }
            let label = probe_str(row, DOCKET_COMMITTEE_COLUMNS).unwrap_or_default();
            let time_display =
                lookup_time(times, date, label).unwrap_or_else(|| TIME_TBA.to_string());
            let rank = rank_time(&time_display);
            Some(ScheduledMeeting {
                date,
                committee_display_name: title_case(label),
                time_display,
                rank_time: rank,
            })
        })
        .collect();
    meetings.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then(a.rank_time.partial_cmp(&b.rank_time).unwrap_or(std::cmp::Ordering::Equal))
    });
    meetings
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn scrape_map(date: NaiveDate, entries: &[(&str, &str)]) -> MeetingTimeMap {
        let mut by_key = HashMap::new();
        for (key, time) in entries {
            by_key.insert(key.to_string(), time.to_string());
        }
        let mut map = MeetingTimeMap::new();
        map.insert(date, by_key);
        map
    }

    #[test]
    fn test_normalize_schedule_key() {
        assert_eq!(normalize_schedule_key("House Committee on Education"), "education");
        assert_eq!(
            normalize_schedule_key("Senate Finance and Appropriations"),
            "financeappropriations"
        );
    }

    #[test]
    fn test_rank_time() {
        assert!((rank_time("9:00 AM") - 9.0).abs() < f64::EPSILON);
        assert!((rank_time("2:30 PM") - 14.5).abs() < f64::EPSILON);
        assert!((rank_time("12:00 PM") - 12.0).abs() < f64::EPSILON);
        assert!((rank_time("12:15 AM") - 0.25).abs() < f64::EPSILON);
        assert_eq!(rank_time("1/2 hour after adjournment"), 13.0);
        assert_eq!(rank_time("Upon recess of the floor session"), 13.0);
        assert_eq!(rank_time(TIME_TBA), 99.0);
    }

    #[test]
    fn test_docket_row_matches_scrape_key() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
        let times = scrape_map(date, &[("education", "9:00 AM")]);
        let rows = vec![json!({"committee": "House Education", "meeting_date": "01/14/2026"})];
        let refs: Vec<&serde_json::Value> = rows.iter().collect();
        let meetings = match_meetings(&refs, &times, None);
        assert_eq!(meetings.len(), 1);
        assert_eq!(meetings[0].time_display, "9:00 AM");
        assert!((meetings[0].rank_time - 9.0).abs() < f64::EPSILON);
        assert_eq!(meetings[0].committee_display_name, "House Education");
    }

    #[test]
    fn test_chamber_exclusive_matching() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
        let times = scrape_map(date, &[("houseeducation", "9:00 AM")]);
        let rows = vec![json!({"committee": "Senate Education", "meeting_date": "01/14/2026"})];
        let refs: Vec<&serde_json::Value> = rows.iter().collect();
        let meetings = match_meetings(&refs, &times, None);
        assert_eq!(meetings[0].time_display, TIME_TBA);
    }

    #[test]
    fn test_unmatched_docket_gets_tba() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
        let times = scrape_map(date, &[("transportation", "10:00 AM")]);
        let rows = vec![json!({"committee": "House Education", "meeting_date": "01/14/2026"})];
        let refs: Vec<&serde_json::Value> = rows.iter().collect();
        let meetings = match_meetings(&refs, &times, None);
        assert_eq!(meetings[0].time_display, TIME_TBA);
        assert_eq!(meetings[0].rank_time, 99.0);
    }

    #[test]
    fn test_as_of_filters_past_meetings() {
        let times = MeetingTimeMap::new();
        let rows = vec![
            json!({"committee": "House Education", "meeting_date": "01/10/2026"}),
            json!({"committee": "House Education", "meeting_date": "01/20/2026"}),
        ];
        let refs: Vec<&serde_json::Value> = rows.iter().collect();
        let cutoff = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
        let meetings = match_meetings(&refs, &times, Some(cutoff));
        assert_eq!(meetings.len(), 1);
        assert_eq!(meetings[0].date, NaiveDate::from_ymd_opt(2026, 1, 20).unwrap());
    }

    #[test]
    fn test_meetings_ordered_by_date_then_rank() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
        let times = scrape_map(date, &[("education", "2:00 PM"), ("finance", "8:30 AM")]);
        let rows = vec![
            json!({"committee": "House Education", "meeting_date": "01/14/2026"}),
            json!({"committee": "House Finance", "meeting_date": "01/14/2026"}),
        ];
        let refs: Vec<&serde_json::Value> = rows.iter().collect();
        let meetings = match_meetings(&refs, &times, None);
        assert_eq!(meetings[0].time_display, "8:30 AM");
        assert_eq!(meetings[1].time_display, "2:00 PM");
    }
}

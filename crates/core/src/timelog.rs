//! Time-entry duration rules.
//!
//! The `started_at`/`ended_at` range is the authoritative record; the
//! stored minute count must agree with it. A caller-supplied duration
//! that disagrees with the span by more than one minute is rejected
//! instead of silently trusted.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Shortest loggable duration in minutes.
pub const MIN_DURATION_MINUTES: i32 = 1;
/// Longest loggable duration in minutes (24 hours).
pub const MAX_DURATION_MINUTES: i32 = 1440;

/// Minutes spanned by the range, rounded to the nearest minute.
pub fn span_minutes(started_at: Timestamp, ended_at: Timestamp) -> i32 {
    let millis = (ended_at - started_at).num_milliseconds();
    ((millis as f64) / 60_000.0).round() as i32
}

/// Validate the time range and resolve the duration to persist.
///
/// - `ended_at` must be strictly after `started_at`.
/// - A supplied duration must be within `1..=1440` and may differ from
///   the computed span by at most one minute.
/// - With no supplied duration, the computed span is used and must
///   itself be within range.
pub fn resolve_duration(
    supplied: Option<i32>,
    started_at: Timestamp,
    ended_at: Timestamp,
) -> Result<i32, CoreError> {
    if ended_at <= started_at {
        return Err(CoreError::Invariant(
            "end time must be after start time".into(),
        ));
    }

    let computed = span_minutes(started_at, ended_at);
    let duration = match supplied {
        Some(minutes) => {
            if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
                return Err(CoreError::Validation(format!(
                    "duration must be between {MIN_DURATION_MINUTES} and {MAX_DURATION_MINUTES} minutes"
                )));
            }
            if (minutes - computed).abs() > 1 {
                return Err(CoreError::Invariant(format!(
                    "duration {minutes}m does not match the {computed}m time range"
                )));
            }
            minutes
        }
        None => computed,
    };

    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration) {
        return Err(CoreError::Validation(format!(
            "time range spans {duration} minutes; must be between {MIN_DURATION_MINUTES} and {MAX_DURATION_MINUTES}"
        )));
    }

    Ok(duration)
}

/// Sum of durations across a set of entries, for list totals.
pub fn total_minutes<I: IntoIterator<Item = i32>>(durations: I) -> i64 {
    durations.into_iter().map(i64::from).sum()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 1, h, m, s).unwrap()
    }

    #[test]
    fn forty_five_minute_span() {
        assert_eq!(span_minutes(at(10, 0, 0), at(10, 45, 0)), 45);
        assert_eq!(resolve_duration(None, at(10, 0, 0), at(10, 45, 0)).unwrap(), 45);
    }

    #[test]
    fn end_before_start_rejected() {
        assert_matches!(
            resolve_duration(None, at(10, 0, 0), at(9, 0, 0)),
            Err(CoreError::Invariant(_))
        );
        assert_matches!(
            resolve_duration(None, at(10, 0, 0), at(10, 0, 0)),
            Err(CoreError::Invariant(_))
        );
    }

    #[test]
    fn out_of_range_duration_rejected() {
        assert_matches!(
            resolve_duration(Some(0), at(10, 0, 0), at(10, 45, 0)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            resolve_duration(Some(1441), at(10, 0, 0), at(10, 45, 0)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn disagreeing_duration_rejected() {
        // Caller claims 30 minutes over a 45-minute range.
        assert_matches!(
            resolve_duration(Some(30), at(10, 0, 0), at(10, 45, 0)),
            Err(CoreError::Invariant(_))
        );
    }

    #[test]
    fn one_minute_rounding_slack_accepted() {
        // 44m30s rounds to 45; 44 is within the slack.
        assert_eq!(
            resolve_duration(Some(44), at(10, 0, 0), at(10, 44, 30)).unwrap(),
            44
        );
        assert_eq!(
            resolve_duration(Some(45), at(10, 0, 0), at(10, 45, 0)).unwrap(),
            45
        );
    }

    #[test]
    fn overlong_range_rejected_without_supplied_duration() {
        assert_matches!(
            resolve_duration(None, at(0, 0, 0), Utc.with_ymd_and_hms(2025, 6, 3, 0, 0, 0).unwrap()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn totals_sum_durations() {
        assert_eq!(total_minutes([45, 30, 15]), 90);
        assert_eq!(total_minutes([]), 0);
    }
}

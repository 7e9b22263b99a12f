//! Time helpers

use chrono::{DateTime, Duration, Utc};

/// Calendar-day bounds `[startOfDay(now), startOfDay(now) + 1d)` in UTC.
///
/// Used by order numbering (per-day sequence) and the daily order count.
pub fn day_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc();
    (start, start + Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn day_bounds_cover_exactly_one_day() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap();
        let (start, end) = day_bounds(now);
        assert_eq!(start.to_rfc3339(), "2025-03-14T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-03-15T00:00:00+00:00");
        assert!(start <= now && now < end);
    }
}

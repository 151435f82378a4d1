use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::error::AppError;

/// Symmetric two-interval overlap test on half-open [start, end) windows.
/// Back-to-back slots (one ending exactly when the next starts) do not
/// overlap.
pub fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Calendar-day bounds: 00:00:00.000 through 23:59:59.999.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("end of day is always valid");
    (Utc.from_utc_datetime(&start), Utc.from_utc_datetime(&end))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))
}

pub fn parse_date_time(raw: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::Validation("Invalid date format".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 15, hour, 0, 0).unwrap()
    }

    #[test]
    fn overlapping_windows_are_detected_both_ways() {
        // new window starts inside an existing one
        assert!(intervals_overlap(at(10), at(11), at(9), at(12)));
        // existing window starts inside the new one
        assert!(intervals_overlap(at(9), at(12), at(10), at(11)));
        // partial overlap at either edge
        assert!(intervals_overlap(at(9), at(11), at(10), at(12)));
        assert!(intervals_overlap(at(10), at(12), at(9), at(11)));
    }

    #[test]
    fn touching_windows_do_not_overlap() {
        assert!(!intervals_overlap(at(9), at(10), at(10), at(11)));
        assert!(!intervals_overlap(at(10), at(11), at(9), at(10)));
        assert!(!intervals_overlap(at(9), at(10), at(14), at(15)));
    }

    #[test]
    fn day_bounds_cover_the_whole_day() {
        let date = NaiveDate::from_ymd_opt(2030, 6, 15).unwrap();
        let (start, end) = day_bounds(date);
        assert_eq!(start.to_rfc3339(), "2030-06-15T00:00:00+00:00");
        assert!(end - start < Duration::days(1));
        assert!(end - start > Duration::hours(23) + Duration::minutes(59));
    }

    #[test]
    fn date_parsing_rejects_garbage() {
        assert!(parse_date("2030-06-15").is_ok());
        assert!(parse_date("15.06.2030").is_err());
        assert!(parse_date_time("2030-06-15T10:00:00Z").is_ok());
        assert!(parse_date_time("tomorrow at ten").is_err());
    }
}

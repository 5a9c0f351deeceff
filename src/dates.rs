use chrono::{Datelike, Duration, NaiveDate};

/// Weekday names, Sunday first; indexed by `num_days_from_sunday`.
pub const WEEKDAY_NAMES: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Try parsing a date string with several common formats.
///
/// Returns `None` for anything unparseable; callers drop such records
/// rather than erroring.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Signed whole-day difference `b - a`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Roll back to the most recent Sunday (identity on Sundays).
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// 1-based week-of-month, where weeks break on Sundays and the week
/// containing day 1 is week 1.
pub fn week_of_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    let offset = first.weekday().num_days_from_sunday();
    (date.day0() + offset) / 7 + 1
}

/// Weekday name for day-block sub-labels.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parse_accepts_common_formats() {
        assert_eq!(parse_date("2025-03-15"), Some(d(2025, 3, 15)));
        assert_eq!(parse_date("2025/03/15"), Some(d(2025, 3, 15)));
        assert_eq!(parse_date(" 15/03/2025 "), Some(d(2025, 3, 15)));
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2025-13-40"), None);
    }

    #[test]
    fn format_is_iso() {
        assert_eq!(format_date(d(2025, 3, 5)), "2025-03-05");
    }

    #[test]
    fn days_between_is_signed() {
        assert_eq!(days_between(d(2025, 1, 1), d(2025, 1, 8)), 7);
        assert_eq!(days_between(d(2025, 1, 8), d(2025, 1, 1)), -7);
        assert_eq!(days_between(d(2025, 1, 1), d(2025, 1, 1)), 0);
    }

    #[test]
    fn start_of_week_rolls_back_to_sunday() {
        // 2025-01-08 is a Wednesday; its week starts 2025-01-05.
        assert_eq!(start_of_week(d(2025, 1, 8)), d(2025, 1, 5));
        // A Sunday maps to itself.
        assert_eq!(start_of_week(d(2025, 1, 5)), d(2025, 1, 5));
        // Rolling back can cross a month boundary.
        assert_eq!(start_of_week(d(2025, 1, 1)), d(2024, 12, 29));
    }

    #[test]
    fn week_of_month_breaks_on_sundays() {
        // January 2025 starts on a Wednesday, so the 5th opens week 2.
        assert_eq!(week_of_month(d(2025, 1, 1)), 1);
        assert_eq!(week_of_month(d(2025, 1, 4)), 1);
        assert_eq!(week_of_month(d(2025, 1, 5)), 2);
        // December 2024 starts on a Sunday.
        assert_eq!(week_of_month(d(2024, 12, 1)), 1);
        assert_eq!(week_of_month(d(2024, 12, 29)), 5);
    }

    #[test]
    fn weekday_names_follow_sunday_index() {
        assert_eq!(weekday_name(d(2025, 1, 5)), "일");
        assert_eq!(weekday_name(d(2025, 1, 8)), "수");
        assert_eq!(weekday_name(d(2025, 1, 11)), "토");
    }
}

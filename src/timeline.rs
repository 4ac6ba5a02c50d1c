//! Month arithmetic for chart timelines.

use chrono::{DateTime, Datelike, Utc};

const MONTHS: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Number of months between two dates, inclusive of both endpoints.
///
/// Order insensitive: `month_span(a, b) == month_span(b, a)`.
pub fn month_span(a: DateTime<Utc>, b: DateTime<Utc>) -> usize {
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    ((b.year() - a.year()) * 12 + b.month() as i32 - a.month() as i32) as usize + 1
}

/// Zero-based month offset of `d` from `origin`.
pub fn month_index(origin: DateTime<Utc>, d: DateTime<Utc>) -> usize {
    month_span(origin, d) - 1
}

/// One label per month from `a` to `b`, oldest first, `YYYY-Mon` form.
pub fn month_labels(a: DateTime<Utc>, b: DateTime<Utc>) -> Vec<String> {
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    let mut labels = Vec::with_capacity(month_span(a, b));
    let (mut year, mut month) = (a.year(), a.month());
    loop {
        labels.push(format!("{}-{}", year, MONTHS[(month - 1) as usize]));
        if year == b.year() && month == b.month() {
            break;
        }
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_month_span_same_year() {
        assert_eq!(month_span(date(2023, 1, 1), date(2023, 1, 31)), 1);
        assert_eq!(month_span(date(2023, 1, 15), date(2023, 4, 2)), 4);
    }

    #[test]
    fn test_month_span_across_years() {
        assert_eq!(month_span(date(2022, 11, 1), date(2023, 2, 1)), 4);
        assert_eq!(month_span(date(2020, 6, 1), date(2023, 6, 1)), 37);
    }

    #[test]
    fn test_month_span_order_insensitive() {
        assert_eq!(
            month_span(date(2023, 5, 1), date(2021, 2, 1)),
            month_span(date(2021, 2, 1), date(2023, 5, 1))
        );
    }

    #[test]
    fn test_month_index() {
        let origin = date(2023, 1, 1);
        assert_eq!(month_index(origin, date(2023, 1, 20)), 0);
        assert_eq!(month_index(origin, date(2023, 3, 5)), 2);
        assert_eq!(month_index(origin, date(2024, 1, 1)), 12);
    }

    #[test]
    fn test_month_labels() {
        let labels = month_labels(date(2022, 11, 3), date(2023, 2, 14));
        assert_eq!(labels, vec!["2022-Nov", "2022-Dec", "2023-Jan", "2023-Feb"]);
    }

    #[test]
    fn test_month_labels_single_month() {
        assert_eq!(month_labels(date(2023, 7, 1), date(2023, 7, 31)), vec!["2023-Jul"]);
    }
}

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("check-out {check_out} falls before check-in {check_in}")]
    Inverted {
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    },
}

/// Long-form date for list rows and detail panes, "March 20, 2025".
/// Missing values render as the "N/A" sentinel rather than a blank cell.
pub fn format_date(value: Option<NaiveDate>) -> String {
    match value {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => "N/A".to_string(),
    }
}

/// Time-of-day for event rows, "6:30 PM".
pub fn format_time(value: NaiveTime) -> String {
    value.format("%-I:%M %p").to_string()
}

/// Number of nights between check-in and check-out, the ceiling of the
/// elapsed time in days. Same-instant ranges are zero nights; an inverted
/// range is a validation error, never a negative count.
pub fn nights_between(
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
) -> Result<i64, DateRangeError> {
    if check_out < check_in {
        return Err(DateRangeError::Inverted {
            check_in,
            check_out,
        });
    }
    let millis = (check_out - check_in).num_milliseconds();
    Ok((millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY)
}

/// `days_from` anchored at the current day.
pub fn days_from_now(date: NaiveDate) -> String {
    days_from(date, Utc::now().date_naive())
}

/// Human phrase for status-banner subtext: "in 3 days", "2 days ago",
/// "today" for the same-day case.
pub fn days_from(date: NaiveDate, reference: NaiveDate) -> String {
    let delta = (date - reference).num_days();
    match delta {
        0 => "today".to_string(),
        1 => "in 1 day".to_string(),
        -1 => "1 day ago".to_string(),
        n if n > 0 => format!("in {} days", n),
        n => format!("{} days ago", -n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_date_long_form() {
        assert_eq!(format_date(Some(date(2025, 3, 20))), "March 20, 2025");
        assert_eq!(format_date(Some(date(2024, 12, 1))), "December 1, 2024");
    }

    #[test]
    fn test_format_date_sentinel() {
        assert_eq!(format_date(None), "N/A");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(
            format_time(NaiveTime::from_hms_opt(18, 30, 0).unwrap()),
            "6:30 PM"
        );
        assert_eq!(
            format_time(NaiveTime::from_hms_opt(9, 5, 0).unwrap()),
            "9:05 AM"
        );
    }

    #[test]
    fn test_nights_between_whole_days() {
        let check_in = Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2025, 3, 25, 0, 0, 0).unwrap();
        assert_eq!(nights_between(check_in, check_out).unwrap(), 5);
    }

    #[test]
    fn test_nights_between_rounds_up_partial_days() {
        let check_in = Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2025, 3, 21, 11, 0, 0).unwrap();
        assert_eq!(nights_between(check_in, check_out).unwrap(), 1);
    }

    #[test]
    fn test_nights_between_same_instant_is_zero() {
        let moment = Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap();
        assert_eq!(nights_between(moment, moment).unwrap(), 0);
    }

    #[test]
    fn test_nights_between_rejects_inverted_range() {
        let check_in = Utc.with_ymd_and_hms(2025, 3, 25, 0, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap();
        assert!(nights_between(check_in, check_out).is_err());
    }

    #[test]
    fn test_days_from_phrases() {
        let today = date(2025, 3, 20);
        assert_eq!(days_from(date(2025, 3, 23), today), "in 3 days");
        assert_eq!(days_from(date(2025, 3, 18), today), "2 days ago");
        assert_eq!(days_from(date(2025, 3, 21), today), "in 1 day");
        assert_eq!(days_from(date(2025, 3, 19), today), "1 day ago");
        assert_eq!(days_from(today, today), "today");
    }
}

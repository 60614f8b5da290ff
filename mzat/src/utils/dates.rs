use chrono::DateTime;

/// Formats a timestamp as a human-readable date, e.g. "January 15, 2024".
pub fn format_long_date<Tz: chrono::TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn formats_full_month_name() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_long_date(&date), "January 15, 2024");
    }

    #[test]
    fn no_leading_zero_on_day() {
        let date = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(format_long_date(&date), "June 1, 2023");
    }

    #[test]
    fn end_of_year() {
        let date = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(format_long_date(&date), "December 31, 2025");
    }
}

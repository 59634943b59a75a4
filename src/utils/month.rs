use chrono::{Datelike, NaiveDate};

use crate::error::ApiError;

/// Parse a `YYYY-MM` month string into the first day of that month.
pub fn parse_month(value: &str) -> Result<NaiveDate, ApiError> {
    let invalid = || ApiError::validation("month must be in YYYY-MM format");

    let (year, month) = value.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
}

/// First day of the month containing `date`.
pub fn month_key(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .unwrap_or(date)
}

/// Half-open range [first day of month, first day of next month).
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = month_key(date);
    let end = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    }
    .unwrap_or(start);

    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_year_month() {
        assert_eq!(parse_month("2024-01").unwrap(), date(2024, 1, 1));
        assert_eq!(parse_month("2024-1").unwrap(), date(2024, 1, 1));
    }

    #[test]
    fn rejects_malformed_months() {
        assert!(parse_month("2024").is_err());
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("2024-00").is_err());
        assert!(parse_month("march").is_err());
        assert!(parse_month("2024-1-5").is_err());
    }

    #[test]
    fn month_key_pins_first_day() {
        assert_eq!(month_key(date(2024, 3, 17)), date(2024, 3, 1));
        assert_eq!(month_key(date(2024, 3, 1)), date(2024, 3, 1));
    }

    #[test]
    fn bounds_are_half_open() {
        assert_eq!(
            month_bounds(date(2024, 4, 15)),
            (date(2024, 4, 1), date(2024, 5, 1))
        );
    }

    #[test]
    fn december_rolls_into_next_year() {
        assert_eq!(
            month_bounds(date(2024, 12, 31)),
            (date(2024, 12, 1), date(2025, 1, 1))
        );
    }
}

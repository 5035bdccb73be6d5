use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::JpkError;

/// A calendar month the report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportingPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportingPeriod {
    /// The calendar month containing `date`.
    pub fn containing(date: NaiveDate) -> Result<Self, JpkError> {
        let start = date
            .with_day(1)
            .ok_or_else(|| JpkError::InvalidDate(format!("{date} has no first day")))?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| JpkError::InvalidDate(format!("month of {date} has no last day")))?;
        Ok(Self { start, end })
    }

    /// Parse a `YYYY-MM-DD` reference date and return the month containing it.
    pub fn parse(reference: &str) -> Result<Self, JpkError> {
        let date = NaiveDate::parse_from_str(reference.trim(), "%Y-%m-%d")
            .map_err(|e| JpkError::InvalidDate(format!("'{reference}': {e}")))?;
        Self::containing(date)
    }

    /// First day of the month.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the month.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn mid_month_reference() {
        let p = ReportingPeriod::containing(date(2021, 3, 15)).unwrap();
        assert_eq!(p.start(), date(2021, 3, 1));
        assert_eq!(p.end(), date(2021, 3, 31));
    }

    #[test]
    fn leap_february() {
        let p = ReportingPeriod::containing(date(2024, 2, 1)).unwrap();
        assert_eq!(p.end(), date(2024, 2, 29));
        let p = ReportingPeriod::containing(date(2023, 2, 28)).unwrap();
        assert_eq!(p.end(), date(2023, 2, 28));
    }

    #[test]
    fn december_rolls_into_next_year() {
        let p = ReportingPeriod::containing(date(2020, 12, 31)).unwrap();
        assert_eq!(p.start(), date(2020, 12, 1));
        assert_eq!(p.end(), date(2020, 12, 31));
    }

    #[test]
    fn contains_bounds() {
        let p = ReportingPeriod::containing(date(2021, 4, 10)).unwrap();
        assert!(p.contains(date(2021, 4, 1)));
        assert!(p.contains(date(2021, 4, 30)));
        assert!(!p.contains(date(2021, 3, 31)));
        assert!(!p.contains(date(2021, 5, 1)));
    }

    #[test]
    fn parse_reference() {
        let p = ReportingPeriod::parse("2021-03-15").unwrap();
        assert_eq!(p.to_string(), "2021-03-01..2021-03-31");
    }

    #[test]
    fn parse_rejects_invalid_dates() {
        assert!(matches!(
            ReportingPeriod::parse("2021-02-30"),
            Err(JpkError::InvalidDate(_))
        ));
        assert!(matches!(
            ReportingPeriod::parse("15.03.2021"),
            Err(JpkError::InvalidDate(_))
        ));
        assert!(ReportingPeriod::parse("").is_err());
    }
}

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::transaction::TxnRecord;
use crate::errors::{BooksError, Result};

/// Relative reporting windows. Each is resolved against the caller-supplied
/// reference date on every call; nothing caches "now".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    Today,
    ThisWeek,
    ThisMonth,
    LastThreeMonths,
    LastSixMonths,
    ThisYear,
    #[default]
    AllTime,
}

impl DateRange {
    /// Inclusive `(start, end)` bounds, or `None` for the all-time identity
    /// filter.
    pub fn bounds(&self, reference: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let start = match self {
            DateRange::Today => reference,
            DateRange::ThisWeek => week_start(reference),
            DateRange::ThisMonth => reference.with_day(1).unwrap_or(reference),
            DateRange::LastThreeMonths => shift_month(reference, -3),
            DateRange::LastSixMonths => shift_month(reference, -6),
            DateRange::ThisYear => {
                NaiveDate::from_ymd_opt(reference.year(), 1, 1).unwrap_or(reference)
            }
            DateRange::AllTime => return None,
        };
        Some((start, reference))
    }

    pub fn contains(&self, date: NaiveDate, reference: NaiveDate) -> bool {
        match self.bounds(reference) {
            Some((start, end)) => date >= start && date <= end,
            None => true,
        }
    }

    /// Parses the wire/UI names for a range. Unknown names are a call-contract
    /// failure.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(DateRange::Today),
            "this-week" | "week" => Ok(DateRange::ThisWeek),
            "this-month" | "month" => Ok(DateRange::ThisMonth),
            "last-3-months" | "quarter" => Ok(DateRange::LastThreeMonths),
            "last-6-months" | "half-year" => Ok(DateRange::LastSixMonths),
            "this-year" | "year" => Ok(DateRange::ThisYear),
            "all-time" | "all" => Ok(DateRange::AllTime),
            other => Err(BooksError::InvalidInput(format!(
                "unknown date range `{}`",
                other
            ))),
        }
    }
}

/// Keeps only the records inside the window. All-time passes everything
/// through unchanged, so the filter is idempotent.
pub fn filter_range(
    records: Vec<TxnRecord>,
    range: DateRange,
    reference: NaiveDate,
) -> Vec<TxnRecord> {
    match range.bounds(reference) {
        None => records,
        Some((start, end)) => records
            .into_iter()
            .filter(|record| record.date >= start && record.date <= end)
            .collect(),
    }
}

/// Sunday-aligned start of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Shifts a date by whole months, clamping the day to the target month's
/// length.
pub(crate) fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_start_is_sunday_aligned() {
        // 2024-06-05 is a Wednesday; its week starts Sunday 2024-06-02.
        assert_eq!(week_start(date(2024, 6, 5)), date(2024, 6, 2));
        // A Sunday starts its own week.
        assert_eq!(week_start(date(2024, 6, 2)), date(2024, 6, 2));
    }

    #[test]
    fn shift_month_clamps_short_months() {
        assert_eq!(shift_month(date(2024, 3, 31), -1), date(2024, 2, 29));
        assert_eq!(shift_month(date(2023, 1, 30), 1), date(2023, 2, 28));
    }

    #[test]
    fn bounds_cover_the_documented_ranges() {
        let reference = date(2024, 6, 15);
        assert_eq!(
            DateRange::Today.bounds(reference),
            Some((reference, reference))
        );
        assert_eq!(
            DateRange::ThisMonth.bounds(reference),
            Some((date(2024, 6, 1), reference))
        );
        assert_eq!(
            DateRange::LastThreeMonths.bounds(reference),
            Some((date(2024, 3, 15), reference))
        );
        assert_eq!(
            DateRange::ThisYear.bounds(reference),
            Some((date(2024, 1, 1), reference))
        );
        assert_eq!(DateRange::AllTime.bounds(reference), None);
    }

    #[test]
    fn parse_rejects_unknown_ranges() {
        assert!(DateRange::parse("this-month").is_ok());
        let err = DateRange::parse("fortnight").unwrap_err();
        assert!(matches!(err, BooksError::InvalidInput(_)));
    }
}

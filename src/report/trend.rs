use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::date_range::week_start;
use super::transaction::{Direction, TxnRecord};
use crate::errors::{BooksError, Result};

/// Bucket widths for trend series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Granularity {
    /// Parses the wire/UI names for a granularity. Unknown names are a
    /// call-contract failure, not a data fallback.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(Granularity::Day),
            "week" | "weekly" => Ok(Granularity::Week),
            "month" | "monthly" => Ok(Granularity::Month),
            "quarter" | "quarterly" => Ok(Granularity::Quarter),
            "year" | "yearly" => Ok(Granularity::Year),
            other => Err(BooksError::InvalidInput(format!(
                "unknown granularity `{}`",
                other
            ))),
        }
    }

    /// Start date of the bucket containing `date`; the comparable period key.
    /// Weeks are Sunday-aligned, quarters are calendar 3-month blocks.
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Week => week_start(date),
            Granularity::Month => date.with_day(1).unwrap_or(date),
            Granularity::Quarter => {
                let month = (date.month0() / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap_or(date)
            }
            Granularity::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        }
    }

    /// Display label for the bucket starting at `start`.
    pub fn label(&self, start: NaiveDate) -> String {
        match self {
            Granularity::Day => start.format("%Y-%m-%d").to_string(),
            Granularity::Week => format!("Week of {}", start.format("%Y-%m-%d")),
            Granularity::Month => start.format("%b %Y").to_string(),
            Granularity::Quarter => format!("Q{} {}", start.month0() / 3 + 1, start.year()),
            Granularity::Year => start.format("%Y").to_string(),
        }
    }
}

/// One period of a trend series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendBucket {
    /// Period start date; the sort key. Never sort on the label.
    pub start: NaiveDate,
    pub label: String,
    pub income: f64,
    pub expense: f64,
}

impl TrendBucket {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Buckets `records` by period, ascending on the period start date. Every
/// record lands in exactly one bucket. When `keep_last` is given, only the
/// most recent N buckets survive, for rolling dashboard views.
pub fn trend_series(
    records: &[TxnRecord],
    granularity: Granularity,
    keep_last: Option<usize>,
) -> Vec<TrendBucket> {
    let mut by_period: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for record in records {
        let start = granularity.bucket_start(record.date);
        let slot = by_period.entry(start).or_insert((0.0, 0.0));
        match record.direction {
            Direction::Income => slot.0 += record.amount,
            Direction::Expense => slot.1 += record.amount,
        }
    }

    let mut buckets: Vec<TrendBucket> = by_period
        .into_iter()
        .map(|(start, (income, expense))| TrendBucket {
            start,
            label: granularity.label(start),
            income,
            expense,
        })
        .collect();

    if let Some(limit) = keep_last {
        if buckets.len() > limit {
            buckets.drain(..buckets.len() - limit);
        }
    }
    buckets
}

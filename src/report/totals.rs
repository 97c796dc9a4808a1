use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::transaction::{Direction, TxnRecord};
use crate::domain::common::{EXPENSE_SITE_FALLBACK, INCOME_SITE_FALLBACK};

/// Expense volume for one category with its share of total expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    /// Share of total expense in percent; 0 when there is no expense at all.
    pub percent: f64,
}

/// Income and expense attributed to one resolved site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteTotal {
    pub site: String,
    pub income: f64,
    pub expense: f64,
}

impl SiteTotal {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Headline figures for a filtered transaction set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReportTotals {
    pub income: f64,
    pub expense: f64,
    /// Income minus expense; negative means a loss.
    pub net: f64,
    /// Expense still due out (`is_paid == false`).
    pub unpaid: f64,
}

/// Sums income, expense, net, and the outstanding figure. Accrual basis:
/// unpaid expenses still count toward `expense`; `unpaid` is the separate
/// cash-due-out view. Pure summation, independent of input order.
pub fn summarize(records: &[TxnRecord]) -> ReportTotals {
    let mut totals = ReportTotals::default();
    for record in records {
        match record.direction {
            Direction::Income => totals.income += record.amount,
            Direction::Expense => {
                totals.expense += record.amount;
                if !record.is_paid {
                    totals.unpaid += record.amount;
                }
            }
        }
    }
    totals.net = totals.income - totals.expense;
    totals
}

/// Expense totals grouped by category, largest first (name as tiebreaker).
pub fn category_totals(records: &[TxnRecord]) -> Vec<CategoryTotal> {
    let mut by_category: HashMap<&str, f64> = HashMap::new();
    let mut total_expense = 0.0;
    for record in records {
        if record.direction != Direction::Expense {
            continue;
        }
        *by_category.entry(record.category.as_str()).or_insert(0.0) += record.amount;
        total_expense += record.amount;
    }

    let mut totals: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
            percent: if total_expense > 0.0 {
                (total / total_expense) * 100.0
            } else {
                0.0
            },
        })
        .collect();
    totals.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });
    totals
}

/// Income and expense grouped by resolved site name, sorted by name. Records
/// without a site land under "General/Other" (income) or "Office/Admin"
/// (expense).
pub fn site_totals(records: &[TxnRecord]) -> Vec<SiteTotal> {
    let mut by_site: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for record in records {
        let fallback = match record.direction {
            Direction::Income => INCOME_SITE_FALLBACK,
            Direction::Expense => EXPENSE_SITE_FALLBACK,
        };
        let site = record
            .site
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(fallback)
            .to_string();
        let slot = by_site.entry(site).or_insert((0.0, 0.0));
        match record.direction {
            Direction::Income => slot.0 += record.amount,
            Direction::Expense => slot.1 += record.amount,
        }
    }
    by_site
        .into_iter()
        .map(|(site, (income, expense))| SiteTotal {
            site,
            income,
            expense,
        })
        .collect()
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    common::{
        DIRECT_INCOME_CATEGORY, GENERAL_LEDGER_CATEGORY, LABOR_CATEGORY_FALLBACK,
        OFFICE_CATEGORY_FALLBACK, SITE_COLLECTION_CATEGORY,
    },
    CompanyBooks, EntryKind,
};

/// Direction of a unified transaction record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Income,
    Expense,
}

/// One row of the unified transaction view. Every monetary collection maps
/// into this shape during [`unify`], so downstream totals and trends never
/// reason about per-collection sign conventions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxnRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub direction: Direction,
    pub category: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    pub is_paid: bool,
    /// Source project, kept for ledger-view filtering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
    /// Source vendor, kept for ledger-view filtering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<Uuid>,
    /// Unification order; the stable tiebreaker for same-date sorting.
    pub seq: usize,
}

impl TxnRecord {
    /// Amount with the direction sign applied: income positive, expense
    /// negative.
    pub fn signed_amount(&self) -> f64 {
        match self.direction {
            Direction::Income => self.amount,
            Direction::Expense => -self.amount,
        }
    }
}

/// Maps every monetary collection of `books` into one unified list.
///
/// Translation rules:
/// - Ledger entries: credit is income, debit is expense; the category is the
///   attached vendor's category when one resolves, otherwise "Direct Income"
///   for credits and "General Ledger" for debits; always paid.
/// - Office expenses: always expense; own category ("Office" fallback is
///   applied later, at grouping, via the stored category); paid per flag.
/// - Labor expenses: always expense; category falls back to "Labor"; paid per
///   flag.
/// - Labor payments received: always income under "Site Collection"; paid.
///
/// Missing categories, sites, and counterparties resolve to fallbacks; no
/// record is ever dropped. The output order is the unification order, which
/// `seq` preserves for deterministic same-date sorting.
pub fn unify(books: &CompanyBooks) -> Vec<TxnRecord> {
    let mut records = Vec::with_capacity(
        books.entries.len()
            + books.office_expenses.len()
            + books.labor_expenses.len()
            + books.labor_payments.len(),
    );

    for entry in &books.entries {
        let vendor = entry.vendor_id.and_then(|id| books.vendor(id));
        let direction = match entry.kind {
            EntryKind::Credit => Direction::Income,
            EntryKind::Debit => Direction::Expense,
        };
        let category = vendor
            .and_then(|vendor| vendor.category.clone())
            .unwrap_or_else(|| match entry.kind {
                EntryKind::Credit => DIRECT_INCOME_CATEGORY.to_string(),
                EntryKind::Debit => GENERAL_LEDGER_CATEGORY.to_string(),
            });
        let counterparty = vendor.map(|vendor| vendor.name.clone()).or_else(|| {
            entry
                .client_id
                .and_then(|id| books.client(id))
                .map(|client| client.name.clone())
        });
        let site = books.project(entry.project_id).map(|p| p.name.clone());
        let seq = records.len();
        records.push(TxnRecord {
            id: entry.id,
            date: entry.date,
            amount: entry.amount,
            direction,
            category,
            description: entry.description.clone(),
            counterparty,
            site,
            is_paid: true,
            project_id: Some(entry.project_id),
            vendor_id: entry.vendor_id,
            seq,
        });
    }

    for expense in &books.office_expenses {
        let seq = records.len();
        records.push(TxnRecord {
            id: expense.id,
            date: expense.date,
            amount: expense.amount,
            direction: Direction::Expense,
            category: clean_category(expense.category.as_deref())
                .unwrap_or_else(|| OFFICE_CATEGORY_FALLBACK.to_string()),
            description: expense.description.clone(),
            counterparty: None,
            site: None,
            is_paid: expense.is_paid,
            project_id: None,
            vendor_id: None,
            seq,
        });
    }

    for expense in &books.labor_expenses {
        let vendor = expense.vendor_id.and_then(|id| books.vendor(id));
        let site = expense
            .site_id
            .and_then(|id| books.project(id))
            .map(|p| p.name.clone());
        let seq = records.len();
        records.push(TxnRecord {
            id: expense.id,
            date: expense.date,
            amount: expense.amount,
            direction: Direction::Expense,
            category: clean_category(expense.category.as_deref())
                .unwrap_or_else(|| LABOR_CATEGORY_FALLBACK.to_string()),
            description: expense.description.clone(),
            counterparty: vendor.map(|vendor| vendor.name.clone()),
            site,
            is_paid: expense.is_paid,
            project_id: expense.site_id,
            vendor_id: expense.vendor_id,
            seq,
        });
    }

    for payment in &books.labor_payments {
        let site = payment
            .project_id
            .and_then(|id| books.project(id))
            .map(|p| p.name.clone());
        let counterparty = payment
            .client_id
            .and_then(|id| books.client(id))
            .map(|client| client.name.clone());
        let seq = records.len();
        records.push(TxnRecord {
            id: payment.id,
            date: payment.date,
            amount: payment.amount,
            direction: Direction::Income,
            category: SITE_COLLECTION_CATEGORY.to_string(),
            description: payment.description.clone(),
            counterparty,
            site,
            is_paid: true,
            project_id: payment.project_id,
            vendor_id: None,
            seq,
        });
    }

    records
}

/// Newest first, for display lists. Same-date rows keep unification order.
pub fn sort_for_display(records: &mut [TxnRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date).then(a.seq.cmp(&b.seq)));
}

/// Oldest first, for running balances. Same-date rows break on unification
/// order so repeated computation is deterministic.
pub fn sort_for_balance(records: &mut [TxnRecord]) {
    records.sort_by(|a, b| a.date.cmp(&b.date).then(a.seq.cmp(&b.seq)));
}

fn clean_category(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

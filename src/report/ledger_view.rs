use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::balance::{with_running_balance, BalancedTxn};
use super::totals::{summarize, ReportTotals};
use super::transaction::{unify, Direction};
use crate::domain::{CompanyBooks, ProjectStatus};
use crate::errors::{BooksError, Result};

/// Ledger rows and identifying metadata for one project: every ledger entry
/// on the project plus labor expenses and labor payments attributed to its
/// site, oldest first, with running balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectLedgerView {
    pub project_id: Uuid,
    pub name: String,
    pub status: ProjectStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    pub rows: Vec<BalancedTxn>,
    pub totals: ReportTotals,
    /// Balance after the last row; 0 for an empty ledger.
    pub closing_balance: f64,
}

/// Ledger rows and identifying metadata for one vendor. The vendor side has
/// no credit stream, so the running balance is a cumulative outflow and the
/// closing balance is never positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorLedgerView {
    pub vendor_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub rows: Vec<BalancedTxn>,
    pub total_paid: f64,
    pub outstanding: f64,
    pub closing_balance: f64,
}

/// Builds the running-balance ledger for one project. Unknown ids are a
/// call-contract failure.
pub fn project_ledger(books: &CompanyBooks, project_id: Uuid) -> Result<ProjectLedgerView> {
    let project = books
        .project(project_id)
        .ok_or_else(|| BooksError::ProjectNotFound(project_id.to_string()))?;

    let records: Vec<_> = unify(books)
        .into_iter()
        .filter(|record| record.project_id == Some(project_id))
        .collect();
    let totals = summarize(&records);
    let rows = with_running_balance(records);
    let closing_balance = rows.last().map(|row| row.balance).unwrap_or(0.0);

    Ok(ProjectLedgerView {
        project_id,
        name: project.name.clone(),
        status: project.status,
        client_name: books.client(project.client_id).map(|c| c.name.clone()),
        rows,
        totals,
        closing_balance,
    })
}

/// Builds the running-balance ledger for one vendor: the vendor's project
/// ledger debits and labor expenses. Unknown ids are a call-contract failure.
pub fn vendor_ledger(books: &CompanyBooks, vendor_id: Uuid) -> Result<VendorLedgerView> {
    let vendor = books
        .vendor(vendor_id)
        .ok_or_else(|| BooksError::VendorNotFound(vendor_id.to_string()))?;

    let records: Vec<_> = unify(books)
        .into_iter()
        .filter(|record| {
            record.vendor_id == Some(vendor_id) && record.direction == Direction::Expense
        })
        .collect();
    let totals = summarize(&records);
    let rows = with_running_balance(records);
    let closing_balance = rows.last().map(|row| row.balance).unwrap_or(0.0);

    Ok(VendorLedgerView {
        vendor_id,
        name: vendor.name.clone(),
        phone: vendor.phone.clone(),
        category: vendor.category.clone(),
        rows,
        total_paid: totals.expense - totals.unpaid,
        outstanding: totals.unpaid,
        closing_balance,
    })
}

//! Read-side façade over the aggregation engine. Every screen goes through
//! these helpers with explicit range and reference-date parameters; the
//! service keeps no state between calls.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::CompanyBooks;
use crate::report::{
    category_totals, filter_range, project_ledger, site_totals, sort_for_display, summarize,
    trend_series, unify, vendor_ledger, CategoryTotal, DateRange, Granularity, ProjectLedgerView,
    ReportTotals, SiteTotal, TrendBucket, TxnRecord, VendorLedgerView,
};

/// Months retained by the dashboard trend.
const DASHBOARD_MONTHS: usize = 12;
/// Days retained by the daily report trend.
const DAILY_REPORT_DAYS: usize = 15;

/// Everything the dashboard screen needs, computed fresh per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub totals: ReportTotals,
    pub categories: Vec<CategoryTotal>,
    pub sites: Vec<SiteTotal>,
    pub monthly_trend: Vec<TrendBucket>,
}

pub struct ReportService;

impl ReportService {
    /// Unified transactions inside the window, newest first.
    pub fn transactions(
        books: &CompanyBooks,
        range: DateRange,
        reference: NaiveDate,
    ) -> Vec<TxnRecord> {
        let mut records = filter_range(unify(books), range, reference);
        sort_for_display(&mut records);
        records
    }

    /// Headline totals, category and site breakdowns, and the rolling
    /// 12-month trend for the dashboard.
    pub fn dashboard(
        books: &CompanyBooks,
        range: DateRange,
        reference: NaiveDate,
    ) -> DashboardSummary {
        let records = filter_range(unify(books), range, reference);
        DashboardSummary {
            totals: summarize(&records),
            categories: category_totals(&records),
            sites: site_totals(&records),
            monthly_trend: trend_series(&records, Granularity::Month, Some(DASHBOARD_MONTHS)),
        }
    }

    /// Day-by-day income/expense for the daily work report, most recent 15
    /// days with activity.
    pub fn daily_report(
        books: &CompanyBooks,
        range: DateRange,
        reference: NaiveDate,
    ) -> Vec<TrendBucket> {
        let records = filter_range(unify(books), range, reference);
        trend_series(&records, Granularity::Day, Some(DAILY_REPORT_DAYS))
    }

    /// Expense totals grouped by category inside the window, largest first.
    pub fn category_breakdown(
        books: &CompanyBooks,
        range: DateRange,
        reference: NaiveDate,
    ) -> Vec<CategoryTotal> {
        let records = filter_range(unify(books), range, reference);
        category_totals(&records)
    }

    /// Income and expense grouped by resolved site inside the window.
    pub fn site_totals(
        books: &CompanyBooks,
        range: DateRange,
        reference: NaiveDate,
    ) -> Vec<SiteTotal> {
        let records = filter_range(unify(books), range, reference);
        site_totals(&records)
    }

    /// Uncapped trend series at an arbitrary granularity.
    pub fn trend(
        books: &CompanyBooks,
        range: DateRange,
        reference: NaiveDate,
        granularity: Granularity,
    ) -> Vec<TrendBucket> {
        let records = filter_range(unify(books), range, reference);
        trend_series(&records, granularity, None)
    }

    pub fn project_ledger(
        books: &CompanyBooks,
        project_id: Uuid,
    ) -> ServiceResult<ProjectLedgerView> {
        project_ledger(books, project_id).map_err(ServiceError::from)
    }

    pub fn vendor_ledger(books: &CompanyBooks, vendor_id: Uuid) -> ServiceResult<VendorLedgerView> {
        vendor_ledger(books, vendor_id).map_err(ServiceError::from)
    }
}

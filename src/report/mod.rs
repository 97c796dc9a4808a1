//! Pure aggregation over one company's books: the unified transaction view,
//! running balances, grouped totals, and trend series behind every reporting
//! screen.
//!
//! Everything here is stateless and side-effect free. Callers pass the books
//! snapshot, a date range, and the reference date explicitly on every call;
//! nothing is cached between calls, and running balances are always
//! recomputed from scratch.

pub mod balance;
pub mod date_range;
pub mod ledger_view;
pub mod totals;
pub mod transaction;
pub mod trend;

pub use balance::{with_running_balance, BalancedTxn};
pub use date_range::{filter_range, week_start, DateRange};
pub use ledger_view::{project_ledger, vendor_ledger, ProjectLedgerView, VendorLedgerView};
pub use totals::{category_totals, site_totals, summarize, CategoryTotal, ReportTotals, SiteTotal};
pub use transaction::{sort_for_balance, sort_for_display, unify, Direction, TxnRecord};
pub use trend::{trend_series, Granularity, TrendBucket};

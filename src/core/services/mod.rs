pub mod entry_service;
pub mod expense_service;
pub mod report_service;

pub use entry_service::EntryService;
pub use expense_service::ExpenseService;
pub use report_service::{DashboardSummary, ReportService};

use crate::errors::BooksError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Books(#[from] BooksError),
    #[error("{0}")]
    Invalid(String),
}

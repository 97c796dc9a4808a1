pub mod client;
pub mod common;
pub mod company;
pub mod entry;
pub mod expense;
pub mod payment;
pub mod project;
pub mod vendor;

pub use client::Client;
pub use company::CompanyBooks;
pub use entry::{EntryKind, LedgerEntry};
pub use expense::{LaborExpense, OfficeExpense};
pub use payment::LaborPaymentReceived;
pub use project::{Project, ProjectStatus};
pub use vendor::Vendor;

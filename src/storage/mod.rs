pub mod json_backend;

use std::path::Path;

use crate::{domain::CompanyBooks, errors::BooksError};

pub type Result<T> = std::result::Result<T, BooksError>;

/// Abstraction over persistence backends capable of storing company books
/// and snapshots. The backend hands out one tenant's books per call; keeping
/// companies in separate files is what upholds the no-cross-tenant-read
/// invariant the aggregation engine assumes.
pub trait StorageBackend: Send + Sync {
    fn save(&self, books: &CompanyBooks, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<CompanyBooks>;
    fn list_backups(&self, name: &str) -> Result<Vec<String>>;
    fn backup(&self, books: &CompanyBooks, name: &str, note: Option<&str>) -> Result<()>;
    fn restore(&self, name: &str, backup_name: &str) -> Result<CompanyBooks>;

    /// Optional helpers for ad-hoc file operations. Default implementations
    /// forward to managed storage when not overridden.
    fn save_to_path(&self, books: &CompanyBooks, path: &Path) -> Result<()> {
        json_backend::save_books_to_path(books, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<CompanyBooks> {
        json_backend::load_books_from_path(path)
    }
}

pub use json_backend::{books_warnings, JsonStorage};

//! Business logic helpers for managing project ledger entries.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::{CompanyBooks, LedgerEntry};
use crate::errors::BooksError;

/// Provides validated CRUD helpers for project ledger entries.
pub struct EntryService;

impl EntryService {
    /// Adds a new entry after checking its references, returning its id.
    pub fn add(books: &mut CompanyBooks, entry: LedgerEntry) -> ServiceResult<Uuid> {
        Self::validate(books, &entry)?;
        Ok(books.add_entry(entry))
    }

    /// Applies `mutator` to a copy of the entry, re-validates, then commits.
    /// A failing validation leaves the stored entry untouched.
    pub fn update<F>(books: &mut CompanyBooks, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut LedgerEntry),
    {
        let mut candidate = books
            .entry(id)
            .cloned()
            .ok_or_else(|| ServiceError::Invalid("Entry not found".into()))?;
        mutator(&mut candidate);
        Self::validate(books, &candidate)?;
        if let Some(entry) = books.entry_mut(id) {
            *entry = candidate;
        }
        books.touch();
        Ok(())
    }

    /// Removes the entry, returning the removed instance. Deletion is
    /// permanent; reports recompute from live data on the next read.
    pub fn remove(books: &mut CompanyBooks, id: Uuid) -> ServiceResult<LedgerEntry> {
        books
            .remove_entry(id)
            .ok_or_else(|| ServiceError::Invalid("Entry not found".into()))
    }

    /// Returns a snapshot of the company's ledger entries.
    pub fn list(books: &CompanyBooks) -> Vec<&LedgerEntry> {
        books.entries.iter().collect()
    }

    fn validate(books: &CompanyBooks, entry: &LedgerEntry) -> ServiceResult<()> {
        if !entry.amount.is_finite() || entry.amount < 0.0 {
            return Err(ServiceError::Invalid(
                "Amount must be a non-negative number".into(),
            ));
        }
        if books.project(entry.project_id).is_none() {
            return Err(ServiceError::Books(BooksError::ProjectNotFound(
                entry.project_id.to_string(),
            )));
        }
        if let Some(vendor_id) = entry.vendor_id {
            if books.vendor(vendor_id).is_none() {
                return Err(ServiceError::Books(BooksError::VendorNotFound(
                    vendor_id.to_string(),
                )));
            }
        }
        if let Some(client_id) = entry.client_id {
            if books.client(client_id).is_none() {
                return Err(ServiceError::Books(BooksError::ClientNotFound(
                    client_id.to_string(),
                )));
            }
        }
        Ok(())
    }
}

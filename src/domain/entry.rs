use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{lenient_amount, parse_attachments};

/// Direction of a project ledger movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    Credit,
    Debit,
}

/// One settled money movement on a project ledger. A credit raises the
/// project balance, a debit lowers it. Ledger entries represent cash that
/// already moved, never accruals, so they are always treated as paid.
/// Deletion is permanent; reports recompute from live data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub kind: EntryKind,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    pub project_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_by: Option<String>,
    /// Serialized attachment references; read through [`LedgerEntry::attachments`].
    #[serde(default)]
    pub attachment_refs: String,
}

impl LedgerEntry {
    pub fn new(
        kind: EntryKind,
        amount: f64,
        description: impl Into<String>,
        date: NaiveDate,
        project_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            description: description.into(),
            date,
            project_id,
            client_id: None,
            vendor_id: None,
            payment_method: None,
            transaction_ref: None,
            received_by: None,
            attachment_refs: String::new(),
        }
    }

    pub fn with_vendor(mut self, vendor_id: Uuid) -> Self {
        self.vendor_id = Some(vendor_id);
        self
    }

    pub fn with_client(mut self, client_id: Uuid) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Attachment references with the lenient list fallback applied.
    pub fn attachments(&self) -> Vec<String> {
        parse_attachments(&self.attachment_refs)
    }
}

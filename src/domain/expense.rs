use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{lenient_amount, parse_attachments};

/// A company-level overhead expense, not tied to any site. Always an
/// outflow; `is_paid == false` marks an outstanding liability that stays in
/// accrual totals but also shows up in the unpaid figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficeExpense {
    pub id: Uuid,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub attachment_refs: String,
}

impl OfficeExpense {
    /// Creates a paid expense; use [`OfficeExpense::unpaid`] for dues.
    pub fn new(description: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            category: None,
            amount,
            date,
            is_paid: true,
            payment_date: Some(date),
            attachment_refs: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn unpaid(mut self) -> Self {
        self.is_paid = false;
        self.payment_date = None;
        self
    }

    pub fn mark_paid(&mut self, date: NaiveDate) {
        self.is_paid = true;
        self.payment_date = Some(date);
    }

    pub fn attachments(&self) -> Vec<String> {
        parse_attachments(&self.attachment_refs)
    }
}

/// Money paid out to a vendor or crew for work on a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaborExpense {
    pub id: Uuid,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    pub date: NaiveDate,
    /// Project the work was performed on, when attributable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<Uuid>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub attachment_refs: String,
}

impl LaborExpense {
    pub fn new(description: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            category: None,
            amount,
            date,
            site_id: None,
            vendor_id: None,
            is_paid: true,
            payment_date: Some(date),
            attachment_refs: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn on_site(mut self, site_id: Uuid) -> Self {
        self.site_id = Some(site_id);
        self
    }

    pub fn for_vendor(mut self, vendor_id: Uuid) -> Self {
        self.vendor_id = Some(vendor_id);
        self
    }

    pub fn unpaid(mut self) -> Self {
        self.is_paid = false;
        self.payment_date = None;
        self
    }

    pub fn mark_paid(&mut self, date: NaiveDate) {
        self.is_paid = true;
        self.payment_date = Some(date);
    }

    pub fn attachments(&self) -> Vec<String> {
        parse_attachments(&self.attachment_refs)
    }
}

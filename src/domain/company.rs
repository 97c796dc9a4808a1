use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    client::Client,
    entry::LedgerEntry,
    expense::{LaborExpense, OfficeExpense},
    payment::LaborPaymentReceived,
    project::Project,
    vendor::Vendor,
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// All books for one company. Every collection inside is scoped to this
/// tenant by construction: the aggregation engine only ever receives a single
/// `CompanyBooks` value, so cross-tenant reads cannot happen downstream of a
/// correct load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyBooks {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub vendors: Vec<Vendor>,
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
    #[serde(default)]
    pub office_expenses: Vec<OfficeExpense>,
    #[serde(default)]
    pub labor_expenses: Vec<LaborExpense>,
    #[serde(default)]
    pub labor_payments: Vec<LaborPaymentReceived>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "CompanyBooks::schema_version_default")]
    pub schema_version: u8,
}

impl CompanyBooks {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            clients: Vec::new(),
            projects: Vec::new(),
            vendors: Vec::new(),
            entries: Vec::new(),
            office_expenses: Vec::new(),
            labor_expenses: Vec::new(),
            labor_payments: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_client(&mut self, client: Client) -> Uuid {
        let id = client.id;
        self.clients.push(client);
        self.touch();
        id
    }

    pub fn add_project(&mut self, project: Project) -> Uuid {
        let id = project.id;
        self.projects.push(project);
        self.touch();
        id
    }

    pub fn add_vendor(&mut self, vendor: Vendor) -> Uuid {
        let id = vendor.id;
        self.vendors.push(vendor);
        self.touch();
        id
    }

    pub fn add_entry(&mut self, entry: LedgerEntry) -> Uuid {
        let id = entry.id;
        self.entries.push(entry);
        self.touch();
        id
    }

    pub fn add_office_expense(&mut self, expense: OfficeExpense) -> Uuid {
        let id = expense.id;
        self.office_expenses.push(expense);
        self.touch();
        id
    }

    pub fn add_labor_expense(&mut self, expense: LaborExpense) -> Uuid {
        let id = expense.id;
        self.labor_expenses.push(expense);
        self.touch();
        id
    }

    pub fn add_labor_payment(&mut self, payment: LaborPaymentReceived) -> Uuid {
        let id = payment.id;
        self.labor_payments.push(payment);
        self.touch();
        id
    }

    pub fn client(&self, id: Uuid) -> Option<&Client> {
        self.clients.iter().find(|client| client.id == id)
    }

    pub fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn vendor(&self, id: Uuid) -> Option<&Vendor> {
        self.vendors.iter().find(|vendor| vendor.id == id)
    }

    pub fn entry(&self, id: Uuid) -> Option<&LedgerEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entry_mut(&mut self, id: Uuid) -> Option<&mut LedgerEntry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }

    pub fn remove_entry(&mut self, id: Uuid) -> Option<LedgerEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        let removed = self.entries.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn office_expense_mut(&mut self, id: Uuid) -> Option<&mut OfficeExpense> {
        self.office_expenses.iter_mut().find(|e| e.id == id)
    }

    pub fn remove_office_expense(&mut self, id: Uuid) -> Option<OfficeExpense> {
        let index = self.office_expenses.iter().position(|e| e.id == id)?;
        let removed = self.office_expenses.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn labor_expense_mut(&mut self, id: Uuid) -> Option<&mut LaborExpense> {
        self.labor_expenses.iter_mut().find(|e| e.id == id)
    }

    pub fn remove_labor_expense(&mut self, id: Uuid) -> Option<LaborExpense> {
        let index = self.labor_expenses.iter().position(|e| e.id == id)?;
        let removed = self.labor_expenses.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn remove_labor_payment(&mut self, id: Uuid) -> Option<LaborPaymentReceived> {
        let index = self.labor_payments.iter().position(|p| p.id == id)?;
        let removed = self.labor_payments.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

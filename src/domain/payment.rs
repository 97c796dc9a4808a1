use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{lenient_amount, parse_attachments};

/// Money received from a client earmarked for labor cost recovery. Tracked
/// apart from the project credit stream, but always income in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaborPaymentReceived {
    pub id: Uuid,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub attachment_refs: String,
}

impl LaborPaymentReceived {
    pub fn new(amount: f64, description: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            date,
            client_id: None,
            project_id: None,
            description: description.into(),
            payment_method: None,
            attachment_refs: String::new(),
        }
    }

    pub fn from_client(mut self, client_id: Uuid) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn for_project(mut self, project_id: Uuid) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn attachments(&self) -> Vec<String> {
        parse_attachments(&self.attachment_refs)
    }
}

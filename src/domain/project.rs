use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A construction site commissioned by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub client_id: Uuid,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    OnHold,
}

impl Project {
    pub fn new(name: impl Into<String>, client_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            client_id,
            status: ProjectStatus::Active,
            location: None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, ProjectStatus::Active)
    }
}

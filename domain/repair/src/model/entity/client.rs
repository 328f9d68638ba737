use chrono::{DateTime, Utc};
use database_model::client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::vo::{canonical_phone, non_blank, ClientDraft};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    /// Canonical form, see [`canonical_phone`]
    pub phone: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// `None` when the draft phone has no digits.
    pub fn from_draft(draft: &ClientDraft, now: DateTime<Utc>) -> Option<Self> {
        Some(Self {
            id: Uuid::new_v4(),
            first_name: draft.first_name.trim().to_string(),
            last_name: non_blank(&draft.last_name),
            phone: canonical_phone(&draft.phone)?,
            email: non_blank(&draft.email),
            created_at: now,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name.as_deref().unwrap_or_default())
            .trim()
            .to_string()
    }
}

impl From<client::Model> for Client {
    fn from(model: client::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            phone: model.phone,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

impl From<Client> for client::Model {
    fn from(value: Client) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            phone: value.phone,
            email: value.email,
            created_at: value.created_at,
        }
    }
}

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use database_model::request_status_history;
use num_traits::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::vo::RequestStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Append-only audit record of one status change
pub struct StatusHistoryEntry {
    pub id: Uuid,
    pub request_id: Uuid,
    /// `None` only for the entry written at creation
    pub old_status: Option<RequestStatus>,
    pub new_status: RequestStatus,
    /// `None` means the system did it
    pub changed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl StatusHistoryEntry {
    pub fn initial(request_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            request_id,
            old_status: None,
            new_status: RequestStatus::New,
            changed_by: None,
            created_at: now,
        }
    }

    pub fn changed(
        request_id: Uuid,
        old_status: RequestStatus,
        new_status: RequestStatus,
        changed_by: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            request_id,
            old_status: Some(old_status),
            new_status,
            changed_by,
            created_at: now,
        }
    }
}

impl TryFrom<request_status_history::Model> for StatusHistoryEntry {
    type Error = anyhow::Error;

    fn try_from(model: request_status_history::Model) -> Result<Self, Self::Error> {
        let old_status = match model.old_status {
            Some(el) => Some(
                RequestStatus::from_i32(el)
                    .ok_or(anyhow!("Unknown old status {el} in history {}", model.id))?,
            ),
            None => None,
        };
        Ok(Self {
            id: model.id,
            request_id: model.request_id,
            old_status,
            new_status: RequestStatus::from_i32(model.new_status).ok_or(anyhow!(
                "Unknown new status {} in history {}",
                model.new_status,
                model.id
            ))?,
            changed_by: model.changed_by,
            created_at: model.created_at,
        })
    }
}

impl TryFrom<StatusHistoryEntry> for request_status_history::Model {
    type Error = anyhow::Error;

    fn try_from(value: StatusHistoryEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            request_id: value.request_id,
            old_status: value.old_status.and_then(|el| el.to_i32()),
            new_status: value.new_status.to_i32().ok_or(anyhow!("Status out of range"))?,
            changed_by: value.changed_by,
            created_at: value.created_at,
        })
    }
}

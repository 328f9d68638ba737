use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::model::entity::{Client, ServiceRequest, StatusHistoryEntry, Vehicle, WorkItem};

use super::{PaymentStatus, RequestStatus};

/// Name shown for history entries nobody signed.
pub const SYSTEM_ACTOR: &str = "System";

/// Staff view of one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDetail {
    pub id: Uuid,
    pub request_number: String,
    pub tracking_token: String,
    pub status: RequestStatus,
    pub progress_percentage: i32,
    pub description: String,
    pub assigned_master: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub payment_status: PaymentStatus,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub client: Client,
    pub vehicle: Vehicle,
    /// Oldest first
    pub works: Vec<WorkItem>,
    /// Newest first
    pub status_history: Vec<HistoryLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryLine {
    pub id: Uuid,
    pub old_status: Option<RequestStatus>,
    pub new_status: RequestStatus,
    /// Full name of the acting user
    pub changed_by: String,
    pub created_at: DateTime<Utc>,
}

impl RequestDetail {
    /// `names` maps user ids to full names; unknown or missing actors show as [`SYSTEM_ACTOR`].
    pub fn new(
        request: ServiceRequest,
        client: Client,
        vehicle: Vehicle,
        mut works: Vec<WorkItem>,
        mut history: Vec<StatusHistoryEntry>,
        names: &HashMap<Uuid, String>,
    ) -> Self {
        works.sort_by_key(|el| el.created_at);
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self {
            id: request.id,
            request_number: request.request_number,
            tracking_token: request.tracking_token,
            status: request.status,
            progress_percentage: request.progress_percentage,
            description: request.description,
            assigned_master: request.assigned_master,
            total_amount: request.total_amount,
            payment_status: request.payment_status,
            estimated_completion: request.estimated_completion,
            created_at: request.created_at,
            updated_at: request.updated_at,
            client,
            vehicle,
            works,
            status_history: history
                .into_iter()
                .map(|el| HistoryLine {
                    id: el.id,
                    old_status: el.old_status,
                    new_status: el.new_status,
                    changed_by: el
                        .changed_by
                        .and_then(|id| names.get(&id).cloned())
                        .unwrap_or_else(|| SYSTEM_ACTOR.to_string()),
                    created_at: el.created_at,
                })
                .collect(),
        }
    }
}

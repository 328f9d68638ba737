use anyhow::anyhow;
use chrono::{DateTime, Utc};
use database_model::service_request;
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exception::{RepairException, RepairResult};
use crate::model::entity::{work_item::MONEY_LIMIT, StatusHistoryEntry, WorkItem};
use crate::model::vo::{PaymentStatus, RequestStatus};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// # Service request
/// One repair job of one vehicle, tracked from submission to completion.
pub struct ServiceRequest {
    pub id: Uuid,
    /// Six digits, unique, shown to the customer
    pub request_number: String,
    /// 32 lowercase hex chars, unique, grants read access to the public view
    pub tracking_token: String,
    pub client_id: Uuid,
    pub vehicle_id: Uuid,
    pub status: RequestStatus,
    /// 0..=100
    pub progress_percentage: i32,
    pub description: String,
    /// Free text display name, not tied to any staff record
    pub assigned_master: Option<String>,
    /// Sum of the work items' total prices
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub payment_status: PaymentStatus,
    pub estimated_completion: Option<DateTime<Utc>>,
    /// Optimistic lock counter; storage only accepts an update carrying the current value.
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceRequest {
    /// A freshly submitted request: new, nothing done, nothing billed.
    pub fn submitted(
        request_number: String,
        tracking_token: String,
        client_id: Uuid,
        vehicle_id: Uuid,
        description: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            request_number,
            tracking_token,
            client_id,
            vehicle_id,
            status: RequestStatus::New,
            progress_percentage: 0,
            description,
            assigned_master: None,
            total_amount: Decimal::ZERO,
            payment_status: PaymentStatus::Unpaid,
            estimated_completion: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves the request along the lifecycle and returns the audit entry for it.
    pub fn change_status(
        &mut self,
        next: RequestStatus,
        changed_by: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> RepairResult<StatusHistoryEntry> {
        if !self.status.can_transition_to(next) {
            return Err(RepairException::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        let entry = StatusHistoryEntry::changed(self.id, self.status, next, changed_by, now);
        self.status = next;
        self.updated_at = now;
        Ok(entry)
    }

    pub fn set_progress(&mut self, percentage: i32, now: DateTime<Utc>) -> RepairResult<()> {
        if !(0..=100).contains(&percentage) {
            return Err(RepairException::validation(
                "progress",
                "Progress must be between 0 and 100",
            ));
        }
        self.progress_percentage = percentage;
        self.updated_at = now;
        Ok(())
    }

    pub fn assign_master(&mut self, master_name: &str, now: DateTime<Utc>) -> RepairResult<()> {
        let master_name = master_name.trim();
        if master_name.is_empty() {
            return Err(RepairException::validation("masterName", "Master name is required"));
        }
        self.assigned_master = Some(master_name.to_string());
        self.updated_at = now;
        Ok(())
    }

    /// Not tied to the total, a request may be paid while nothing is billed yet.
    pub fn set_payment_status(&mut self, payment_status: PaymentStatus, now: DateTime<Utc>) {
        self.payment_status = payment_status;
        self.updated_at = now;
    }

    /// Recomputes the total from scratch over all items of this request.
    ///
    /// Fails and leaves the request untouched when the sum would not fit the stored total.
    pub fn recompute_total(&mut self, items: &[WorkItem], now: DateTime<Utc>) -> RepairResult<()> {
        let total = items
            .iter()
            .filter(|el| el.request_id == self.id)
            .try_fold(Decimal::ZERO, |acc, el| acc.checked_add(el.total_price))
            .filter(|el| *el < MONEY_LIMIT)
            .ok_or_else(|| {
                RepairException::validation("quantity", "Request total must be below 10000000000")
            })?;
        self.total_amount = total;
        self.updated_at = now;
        Ok(())
    }
}

impl TryFrom<service_request::Model> for ServiceRequest {
    type Error = anyhow::Error;

    fn try_from(model: service_request::Model) -> Result<Self, Self::Error> {
        let service_request::Model {
            id,
            request_number,
            tracking_token,
            client_id,
            vehicle_id,
            status,
            progress_percentage,
            description,
            assigned_master,
            total_amount,
            payment_status,
            estimated_completion,
            version,
            created_at,
            updated_at,
        } = model;
        Ok(Self {
            id,
            request_number,
            tracking_token,
            client_id,
            vehicle_id,
            status: RequestStatus::from_i32(status)
                .ok_or(anyhow!("Unknown request status {status} in request {id}"))?,
            progress_percentage,
            description,
            assigned_master,
            total_amount,
            payment_status: PaymentStatus::from_i32(payment_status)
                .ok_or(anyhow!("Unknown payment status {payment_status} in request {id}"))?,
            estimated_completion,
            version,
            created_at,
            updated_at,
        })
    }
}

impl TryFrom<ServiceRequest> for service_request::Model {
    type Error = anyhow::Error;

    fn try_from(value: ServiceRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            request_number: value.request_number,
            tracking_token: value.tracking_token,
            client_id: value.client_id,
            vehicle_id: value.vehicle_id,
            status: value.status.to_i32().ok_or(anyhow!("Status out of range"))?,
            progress_percentage: value.progress_percentage,
            description: value.description,
            assigned_master: value.assigned_master,
            total_amount: value.total_amount,
            payment_status: value
                .payment_status
                .to_i32()
                .ok_or(anyhow!("Payment status out of range"))?,
            estimated_completion: value.estimated_completion,
            version: value.version,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

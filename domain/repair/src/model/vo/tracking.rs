use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::model::entity::{Client, ServiceRequest, StatusHistoryEntry, Vehicle, WorkItem};

use super::{PaymentStatus, RequestStatus};

/// What an unauthenticated customer may see of a request.
///
/// Internal ids, the tracking token and client email never leave through here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicRequestView {
    pub request_number: String,
    pub status: RequestStatus,
    pub progress_percentage: i32,
    pub description: String,
    pub assigned_master: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub payment_status: PaymentStatus,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub client: PublicClient,
    pub vehicle: PublicVehicle,
    pub works: Vec<PublicWork>,
    /// Newest first
    pub status_history: Vec<PublicStatusChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicClient {
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicVehicle {
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub license_plate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicWork {
    pub id: Uuid,
    pub work_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStatusChange {
    pub old_status: Option<RequestStatus>,
    pub new_status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl PublicRequestView {
    pub fn new(
        request: ServiceRequest,
        client: Client,
        vehicle: Vehicle,
        mut works: Vec<WorkItem>,
        mut history: Vec<StatusHistoryEntry>,
    ) -> Self {
        works.sort_by_key(|el| el.created_at);
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self {
            request_number: request.request_number,
            status: request.status,
            progress_percentage: request.progress_percentage,
            description: request.description,
            assigned_master: request.assigned_master,
            total_amount: request.total_amount,
            payment_status: request.payment_status,
            estimated_completion: request.estimated_completion,
            created_at: request.created_at,
            client: PublicClient {
                first_name: client.first_name,
                last_name: client.last_name,
                phone: client.phone,
            },
            vehicle: PublicVehicle {
                brand: vehicle.brand,
                model: vehicle.model,
                year: vehicle.year,
                license_plate: vehicle.license_plate,
            },
            works: works
                .into_iter()
                .map(|el| PublicWork {
                    id: el.id,
                    work_name: el.work_name,
                    quantity: el.quantity,
                    unit_price: el.unit_price,
                    total_price: el.total_price,
                })
                .collect(),
            status_history: history
                .into_iter()
                .map(|el| PublicStatusChange {
                    old_status: el.old_status,
                    new_status: el.new_status,
                    created_at: el.created_at,
                })
                .collect(),
        }
    }
}

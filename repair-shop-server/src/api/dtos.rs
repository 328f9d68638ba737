use chrono::{DateTime, Utc};
use domain_repair::model::{
    entity::{Client, Vehicle},
    vo::{
        LedgerChange, PaginationResult, PaymentStatus, PublicRequestView, RequestDetail,
        RequestStatus, RequestSummary, SubmissionReceipt,
    },
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ListRequestsQuery {
    /// A status name, `all` or nothing for every status
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
pub struct UpdateStatusDto {
    pub status: RequestStatus,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignMasterDto {
    #[serde(default)]
    pub master_name: String,
}

#[derive(Deserialize)]
pub struct UpdateProgressDto {
    pub progress: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentDto {
    pub payment_status: PaymentStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRequestDto {
    pub success: bool,
    #[serde(flatten)]
    pub receipt: SubmissionReceipt,
    pub message: String,
}

impl From<SubmissionReceipt> for CreatedRequestDto {
    fn from(receipt: SubmissionReceipt) -> Self {
        let message = format!(
            "Request {} accepted. Keep the tracking link to follow the repair.",
            receipt.request_number
        );
        Self {
            success: true,
            receipt,
            message,
        }
    }
}

#[derive(Serialize)]
pub struct TrackedRequestDto {
    pub request: PublicRequestView,
}

#[derive(Serialize)]
pub struct RequestDetailDto {
    pub request: RequestDetail,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClientDto {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: String,
    pub email: Option<String>,
}

impl From<Client> for ListClientDto {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            first_name: client.first_name,
            last_name: client.last_name,
            phone: client.phone,
            email: client.email,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListVehicleDto {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub license_plate: Option<String>,
}

impl From<Vehicle> for ListVehicleDto {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            license_plate: vehicle.license_plate,
        }
    }
}

/// One row of the staff list, no tracking token.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSummaryDto {
    pub id: Uuid,
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
    pub updated_at: DateTime<Utc>,
    pub client: ListClientDto,
    pub vehicle: ListVehicleDto,
    pub works_count: u64,
}

impl From<RequestSummary> for RequestSummaryDto {
    fn from(summary: RequestSummary) -> Self {
        let RequestSummary {
            request,
            client,
            vehicle,
            works_count,
        } = summary;
        Self {
            id: request.id,
            request_number: request.request_number,
            status: request.status,
            progress_percentage: request.progress_percentage,
            description: request.description,
            assigned_master: request.assigned_master,
            total_amount: request.total_amount,
            payment_status: request.payment_status,
            estimated_completion: request.estimated_completion,
            created_at: request.created_at,
            updated_at: request.updated_at,
            client: client.into(),
            vehicle: vehicle.into(),
            works_count,
        }
    }
}

#[derive(Serialize)]
pub struct PaginationDto {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

#[derive(Serialize)]
pub struct RequestListDto {
    pub requests: Vec<RequestSummaryDto>,
    pub pagination: PaginationDto,
}

impl From<PaginationResult<RequestSummary>> for RequestListDto {
    fn from(result: PaginationResult<RequestSummary>) -> Self {
        Self {
            requests: result.items.into_iter().map(Into::into).collect(),
            pagination: PaginationDto {
                page: result.page,
                limit: result.limit,
                total: result.total,
                pages: result.pages,
            },
        }
    }
}

/// The single field a staff update touched.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangedField {
    Status(RequestStatus),
    AssignedMaster(Option<String>),
    ProgressPercentage(i32),
    PaymentStatus(PaymentStatus),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedRequestDto {
    pub id: Uuid,
    #[serde(flatten)]
    pub field: ChangedField,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct RequestChangeDto {
    pub success: bool,
    pub request: ChangedRequestDto,
}

impl RequestChangeDto {
    pub fn new(id: Uuid, field: ChangedField, updated_at: DateTime<Utc>) -> Self {
        Self {
            success: true,
            request: ChangedRequestDto {
                id,
                field,
                updated_at,
            },
        }
    }
}

#[derive(Serialize)]
pub struct LedgerChangeDto {
    pub success: bool,
    #[serde(flatten)]
    pub change: LedgerChange,
}

impl From<LedgerChange> for LedgerChangeDto {
    fn from(change: LedgerChange) -> Self {
        Self {
            success: true,
            change,
        }
    }
}

#[derive(Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct RouteNotFoundDto {
    pub error: &'static str,
}

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::model::entity::{Client, ServiceRequest, Vehicle};

use super::{PaymentStatus, RequestStatus};

/// Half open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// The calendar day containing `now` in the given timezone.
    pub fn day_of(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        let local_midnight = now.with_timezone(&offset).date_naive().and_time(NaiveTime::MIN);
        let start = Utc.from_utc_datetime(
            &(local_midnight - Duration::seconds(offset.local_minus_utc() as i64)),
        );
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.start <= time && time < self.end
    }
}

/// Conjunction of conditions over service requests, empty means everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCriteria {
    /// Any of these, empty means any status
    pub statuses: Vec<RequestStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub created_within: Option<TimeRange>,
    pub updated_within: Option<TimeRange>,
}

impl RequestCriteria {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_status(status: RequestStatus) -> Self {
        Self {
            statuses: vec![status],
            ..Default::default()
        }
    }

    pub fn matches(&self, request: &ServiceRequest) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&request.status))
            && self.payment_status.map_or(true, |el| el == request.payment_status)
            && self.created_within.map_or(true, |el| el.contains(request.created_at))
            && self.updated_within.map_or(true, |el| el.contains(request.updated_at))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub new: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub cancelled: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_requests: u64,
    pub requests_by_status: StatusCounts,
    pub today_requests: u64,
    /// Completed requests touched today, an approximation of money earned today
    #[serde(with = "rust_decimal::serde::float")]
    pub today_revenue: Decimal,
    /// New or in progress and unpaid
    pub pending_requests: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentRequest {
    pub id: Uuid,
    pub request_number: String,
    pub status: RequestStatus,
    pub client_name: String,
    pub vehicle: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl RecentRequest {
    pub fn new(request: &ServiceRequest, client: &Client, vehicle: &Vehicle) -> Self {
        Self {
            id: request.id,
            request_number: request.request_number.clone(),
            status: request.status,
            client_name: client.full_name(),
            vehicle: vehicle.summary(),
            total_amount: request.total_amount,
            created_at: request.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent_requests: Vec<RecentRequest>,
}

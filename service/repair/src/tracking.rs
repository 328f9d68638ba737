use std::sync::Arc;

use async_trait::async_trait;
use domain_repair::{
    exception::{RepairException, RepairResult},
    model::{entity::ServiceRequest, vo::PublicRequestView},
    repository::{ClientRepo, ServiceRequestRepo, StatusHistoryRepo, VehicleRepo, WorkItemRepo},
    service::TrackingService,
};
use typed_builder::TypedBuilder;

use crate::parts::load_parts;

/// Lookups for customers without an account. Holding the token or number is the only check.
#[derive(TypedBuilder)]
pub struct TrackingServiceImpl {
    request_repo: Arc<dyn ServiceRequestRepo>,
    client_repo: Arc<dyn ClientRepo>,
    vehicle_repo: Arc<dyn VehicleRepo>,
    work_item_repo: Arc<dyn WorkItemRepo>,
    history_repo: Arc<dyn StatusHistoryRepo>,
}

#[async_trait]
impl TrackingService for TrackingServiceImpl {
    async fn get_by_token(&self, token: &str) -> RepairResult<PublicRequestView> {
        let request = self
            .request_repo
            .get_by_tracking_token(token)
            .await?
            .ok_or_else(|| RepairException::TrackingNotFound {
                key: "tracking token".to_string(),
            })?;
        self.view(request).await
    }

    async fn get_by_number(&self, request_number: &str) -> RepairResult<PublicRequestView> {
        let request = self
            .request_repo
            .get_by_request_number(request_number)
            .await?
            .ok_or_else(|| RepairException::TrackingNotFound {
                key: format!("request number {request_number}"),
            })?;
        self.view(request).await
    }
}

impl TrackingServiceImpl {
    async fn view(&self, request: ServiceRequest) -> RepairResult<PublicRequestView> {
        let parts = load_parts(
            &request,
            &self.client_repo,
            &self.vehicle_repo,
            &self.work_item_repo,
            &self.history_repo,
        )
        .await?;
        Ok(PublicRequestView::new(
            request,
            parts.client,
            parts.vehicle,
            parts.works,
            parts.history,
        ))
    }
}

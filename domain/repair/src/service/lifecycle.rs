use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    exception::RepairResult,
    model::{
        entity::ServiceRequest,
        vo::{
            NewRequestSubmission, Pagination, PaginationResult, PaymentStatus, RequestDetail,
            RequestFilter, RequestStatus, RequestSummary, SubmissionReceipt,
        },
    },
};

/// Mutations return the request as stored after the change.
#[async_trait]
pub trait RequestLifecycleService: Send + Sync {
    async fn create(&self, submission: NewRequestSubmission) -> RepairResult<SubmissionReceipt>;

    async fn update_status(
        &self,
        request_id: Uuid,
        status: RequestStatus,
        changed_by: Option<Uuid>,
    ) -> RepairResult<ServiceRequest>;

    async fn assign_master(
        &self,
        request_id: Uuid,
        master_name: &str,
    ) -> RepairResult<ServiceRequest>;

    async fn update_progress(
        &self,
        request_id: Uuid,
        percentage: i32,
    ) -> RepairResult<ServiceRequest>;

    async fn update_payment_status(
        &self,
        request_id: Uuid,
        payment_status: PaymentStatus,
    ) -> RepairResult<ServiceRequest>;

    async fn list(
        &self,
        filter: RequestFilter,
        pagination: Pagination,
    ) -> RepairResult<PaginationResult<RequestSummary>>;

    async fn get_detail(&self, request_id: Uuid) -> RepairResult<RequestDetail>;
}

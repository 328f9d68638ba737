use async_trait::async_trait;

use crate::{exception::RepairResult, model::vo::PublicRequestView};

#[async_trait]
pub trait TrackingService: Send + Sync {
    async fn get_by_token(&self, token: &str) -> RepairResult<PublicRequestView>;

    async fn get_by_number(&self, request_number: &str) -> RepairResult<PublicRequestView>;
}

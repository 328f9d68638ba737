use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use super::DBRepository;
use crate::model::entity::WorkItem;

#[async_trait]
pub trait WorkItemRepo: DBRepository<WorkItem> + Send + Sync {
    /// Ordered by creation time, oldest first.
    async fn get_all_by_request(&self, request_id: Uuid) -> anyhow::Result<Vec<WorkItem>>;

    /// Item count per request, requests without items are absent.
    async fn count_by_requests(&self, request_ids: &[Uuid]) -> anyhow::Result<HashMap<Uuid, u64>>;
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    exception::RepairResult,
    model::vo::{LedgerChange, WorkItemDraft},
};

/// Item changes and the recomputed request total are stored together or not at all.
#[async_trait]
pub trait WorkLedgerService: Send + Sync {
    async fn add_work_item(
        &self,
        request_id: Uuid,
        draft: WorkItemDraft,
    ) -> RepairResult<LedgerChange>;

    /// Fails with not found when the item belongs to another request.
    async fn remove_work_item(&self, request_id: Uuid, work_id: Uuid)
        -> RepairResult<LedgerChange>;
}

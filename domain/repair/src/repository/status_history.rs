use async_trait::async_trait;
use uuid::Uuid;

use crate::model::entity::StatusHistoryEntry;

/// History is append only, so there is no update or delete.
#[async_trait]
pub trait StatusHistoryRepo: Send + Sync {
    /// Staged with the rest of the unit of work.
    async fn append(&self, entry: &StatusHistoryEntry) -> anyhow::Result<()>;

    async fn get_all_by_request(&self, request_id: Uuid) -> anyhow::Result<Vec<StatusHistoryEntry>>;
}

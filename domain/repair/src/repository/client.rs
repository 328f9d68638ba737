use async_trait::async_trait;
use uuid::Uuid;

use super::DBRepository;
use crate::model::entity::Client;

#[async_trait]
pub trait ClientRepo: DBRepository<Client> + Send + Sync {
    /// Looks up by the canonical phone.
    async fn get_by_phone(&self, phone: &str) -> anyhow::Result<Option<Client>>;

    async fn get_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Client>>;
}

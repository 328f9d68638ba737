use async_trait::async_trait;
use uuid::Uuid;

use super::DBRepository;
use crate::model::entity::Vehicle;

#[async_trait]
pub trait VehicleRepo: DBRepository<Vehicle> + Send + Sync {
    async fn get_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Vehicle>>;
}

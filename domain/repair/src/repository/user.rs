use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use super::ReadOnlyRepository;
use crate::model::entity::User;

#[async_trait]
pub trait UserRepo: ReadOnlyRepository<User> + Send + Sync {
    async fn get_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    /// Full names of the users that exist among `ids`.
    async fn get_full_names(&self, ids: &[Uuid]) -> anyhow::Result<HashMap<Uuid, String>>;
}

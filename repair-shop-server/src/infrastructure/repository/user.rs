use std::collections::HashMap;

use async_trait::async_trait;
use database_model::prelude::*;
use domain_repair::{
    model::entity::User,
    repository::{ReadOnlyRepository, UserRepo},
};
use sea_orm::prelude::*;

use crate::infrastructure::database::OrmRepo;

#[async_trait]
impl ReadOnlyRepository<User> for OrmRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(UserEntity::find_by_id(id).one(self.db.get_connection()).await?.map(User::from))
    }
}

#[async_trait]
impl UserRepo for OrmRepo {
    async fn get_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(UserEntity::find()
            .filter(UserColumn::Email.eq(email))
            .one(self.db.get_connection())
            .await?
            .map(User::from))
    }

    async fn get_full_names(&self, ids: &[Uuid]) -> anyhow::Result<HashMap<Uuid, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(UserEntity::find()
            .filter(UserColumn::Id.is_in(ids.iter().copied()))
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(|el| (el.id, el.full_name))
            .collect())
    }
}

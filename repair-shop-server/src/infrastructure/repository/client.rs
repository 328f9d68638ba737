use async_trait::async_trait;
use database_model::prelude::*;
use domain_repair::{
    model::entity::Client,
    repository::{ClientRepo, DBRepository, MutableRepository, ReadOnlyRepository},
};
use sea_orm::prelude::*;
use sea_orm::QueryTrait;

use crate::infrastructure::database::OrmRepo;

#[async_trait]
impl ReadOnlyRepository<Client> for OrmRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Client>> {
        Ok(ClientEntity::find_by_id(id).one(self.db.get_connection()).await?.map(Client::from))
    }
}

#[async_trait]
impl MutableRepository<Client> for OrmRepo {
    async fn insert(&self, entity: &Client) -> anyhow::Result<Uuid> {
        let active_model = ClientActiveModel::from(ClientModel::from(entity.to_owned())).reset_all();
        // A racing submission with the same phone trips the unique index and the create retries.
        let stmt = ClientEntity::insert(active_model).build(self.backend());
        self.stage(stmt).await;
        Ok(entity.id)
    }

    async fn update(&self, entity: &Client) -> anyhow::Result<()> {
        let active_model = ClientActiveModel::from(ClientModel::from(entity.to_owned())).reset_all();
        let stmt = ClientEntity::update(active_model).build(self.backend());
        self.stage_guarded(stmt).await;
        Ok(())
    }

    async fn save_changed(&self) -> anyhow::Result<bool> {
        self.save_changed().await
    }
}

impl DBRepository<Client> for OrmRepo {}

#[async_trait]
impl ClientRepo for OrmRepo {
    async fn get_by_phone(&self, phone: &str) -> anyhow::Result<Option<Client>> {
        Ok(ClientEntity::find()
            .filter(ClientColumn::Phone.eq(phone))
            .one(self.db.get_connection())
            .await?
            .map(Client::from))
    }

    async fn get_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Client>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        Ok(ClientEntity::find()
            .filter(ClientColumn::Id.is_in(ids.iter().copied()))
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(Client::from)
            .collect())
    }
}

use async_trait::async_trait;
use database_model::prelude::*;
use domain_repair::{
    model::entity::Vehicle,
    repository::{DBRepository, MutableRepository, ReadOnlyRepository, VehicleRepo},
};
use sea_orm::prelude::*;
use sea_orm::QueryTrait;

use crate::infrastructure::database::OrmRepo;

#[async_trait]
impl ReadOnlyRepository<Vehicle> for OrmRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Vehicle>> {
        Ok(VehicleEntity::find_by_id(id).one(self.db.get_connection()).await?.map(Vehicle::from))
    }
}

#[async_trait]
impl MutableRepository<Vehicle> for OrmRepo {
    async fn insert(&self, entity: &Vehicle) -> anyhow::Result<Uuid> {
        let active_model =
            VehicleActiveModel::from(VehicleModel::from(entity.to_owned())).reset_all();
        let stmt = VehicleEntity::insert(active_model).build(self.backend());
        self.stage(stmt).await;
        Ok(entity.id)
    }

    async fn update(&self, entity: &Vehicle) -> anyhow::Result<()> {
        let active_model =
            VehicleActiveModel::from(VehicleModel::from(entity.to_owned())).reset_all();
        let stmt = VehicleEntity::update(active_model).build(self.backend());
        self.stage_guarded(stmt).await;
        Ok(())
    }

    async fn save_changed(&self) -> anyhow::Result<bool> {
        self.save_changed().await
    }
}

impl DBRepository<Vehicle> for OrmRepo {}

#[async_trait]
impl VehicleRepo for OrmRepo {
    async fn get_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Vehicle>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        Ok(VehicleEntity::find()
            .filter(VehicleColumn::Id.is_in(ids.iter().copied()))
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(Vehicle::from)
            .collect())
    }
}

use std::collections::HashMap;

use async_trait::async_trait;
use database_model::prelude::*;
use domain_repair::{
    model::entity::WorkItem,
    repository::{DBRepository, MutableRepository, ReadOnlyRepository, WorkItemRepo},
};
use sea_orm::prelude::*;
use sea_orm::{QueryOrder, QuerySelect, QueryTrait};

use crate::infrastructure::database::OrmRepo;

#[async_trait]
impl ReadOnlyRepository<WorkItem> for OrmRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<WorkItem>> {
        Ok(RequestWorkEntity::find_by_id(id)
            .one(self.db.get_connection())
            .await?
            .map(WorkItem::from))
    }
}

#[async_trait]
impl MutableRepository<WorkItem> for OrmRepo {
    async fn insert(&self, entity: &WorkItem) -> anyhow::Result<Uuid> {
        let active_model =
            RequestWorkActiveModel::from(RequestWorkModel::from(entity.to_owned())).reset_all();
        let stmt = RequestWorkEntity::insert(active_model).build(self.backend());
        self.stage(stmt).await;
        Ok(entity.id)
    }

    async fn update(&self, entity: &WorkItem) -> anyhow::Result<()> {
        let active_model =
            RequestWorkActiveModel::from(RequestWorkModel::from(entity.to_owned())).reset_all();
        let stmt = RequestWorkEntity::update(active_model).build(self.backend());
        self.stage_guarded(stmt).await;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<()> {
        // Zero rows means a concurrent removal won, the whole edit starts over.
        let stmt = RequestWorkEntity::delete_by_id(id).build(self.backend());
        self.stage_guarded(stmt).await;
        Ok(())
    }

    async fn save_changed(&self) -> anyhow::Result<bool> {
        self.save_changed().await
    }
}

impl DBRepository<WorkItem> for OrmRepo {}

#[async_trait]
impl WorkItemRepo for OrmRepo {
    async fn get_all_by_request(&self, request_id: Uuid) -> anyhow::Result<Vec<WorkItem>> {
        Ok(RequestWorkEntity::find()
            .filter(RequestWorkColumn::RequestId.eq(request_id))
            .order_by_asc(RequestWorkColumn::CreatedAt)
            .order_by_asc(RequestWorkColumn::Id)
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(WorkItem::from)
            .collect())
    }

    async fn count_by_requests(&self, request_ids: &[Uuid]) -> anyhow::Result<HashMap<Uuid, u64>> {
        if request_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = RequestWorkEntity::find()
            .select_only()
            .column(RequestWorkColumn::RequestId)
            .column_as(RequestWorkColumn::Id.count(), "count")
            .filter(RequestWorkColumn::RequestId.is_in(request_ids.iter().copied()))
            .group_by(RequestWorkColumn::RequestId)
            .into_tuple::<(Uuid, i64)>()
            .all(self.db.get_connection())
            .await?;
        Ok(rows.into_iter().map(|(id, count)| (id, count.max(0) as u64)).collect())
    }
}

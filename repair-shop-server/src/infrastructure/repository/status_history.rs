use async_trait::async_trait;
use database_model::prelude::*;
use domain_repair::{model::entity::StatusHistoryEntry, repository::StatusHistoryRepo};
use sea_orm::prelude::*;
use sea_orm::{QueryOrder, QueryTrait};

use crate::infrastructure::database::OrmRepo;

#[async_trait]
impl StatusHistoryRepo for OrmRepo {
    async fn append(&self, entry: &StatusHistoryEntry) -> anyhow::Result<()> {
        let model = RequestStatusHistoryModel::try_from(entry.to_owned())?;
        let active_model = RequestStatusHistoryActiveModel::from(model).reset_all();
        let stmt = RequestStatusHistoryEntity::insert(active_model).build(self.backend());
        self.stage(stmt).await;
        Ok(())
    }

    async fn get_all_by_request(&self, request_id: Uuid) -> anyhow::Result<Vec<StatusHistoryEntry>> {
        RequestStatusHistoryEntity::find()
            .filter(RequestStatusHistoryColumn::RequestId.eq(request_id))
            .order_by_desc(RequestStatusHistoryColumn::CreatedAt)
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(StatusHistoryEntry::try_from)
            .collect()
    }
}

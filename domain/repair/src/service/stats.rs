use async_trait::async_trait;

use crate::{exception::RepairResult, model::vo::Dashboard};

#[async_trait]
pub trait StatsService: Send + Sync {
    async fn get_dashboard(&self) -> RepairResult<Dashboard>;
}

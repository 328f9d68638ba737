use async_trait::async_trait;
use rust_decimal::Decimal;

use super::DBRepository;
use crate::model::{
    entity::ServiceRequest,
    vo::{Pagination, RequestCriteria, RequestFilter},
};

/// `update` only succeeds against the version the entity was read with and bumps it.
#[async_trait]
pub trait ServiceRequestRepo: DBRepository<ServiceRequest> + Send + Sync {
    async fn get_by_request_number(
        &self,
        request_number: &str,
    ) -> anyhow::Result<Option<ServiceRequest>>;

    async fn get_by_tracking_token(
        &self,
        tracking_token: &str,
    ) -> anyhow::Result<Option<ServiceRequest>>;

    async fn request_number_exists(&self, request_number: &str) -> anyhow::Result<bool>;

    /// One page newest first, with the number of matches over all pages.
    async fn list(
        &self,
        filter: &RequestFilter,
        pagination: Pagination,
    ) -> anyhow::Result<(Vec<ServiceRequest>, u64)>;

    async fn count(&self, criteria: &RequestCriteria) -> anyhow::Result<u64>;

    async fn sum_total_amount(&self, criteria: &RequestCriteria) -> anyhow::Result<Decimal>;

    /// Newest first.
    async fn recent(&self, limit: u64) -> anyhow::Result<Vec<ServiceRequest>>;
}

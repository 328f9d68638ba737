use anyhow::Context;
use async_trait::async_trait;
use database_model::prelude::*;
use domain_repair::{
    model::{
        entity::ServiceRequest,
        vo::{Pagination, RequestCriteria, RequestFilter},
    },
    repository::{DBRepository, MutableRepository, ReadOnlyRepository, ServiceRequestRepo},
};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::prelude::*;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    Condition, DbBackend, JoinType, PaginatorTrait, QueryOrder, QuerySelect, QueryTrait, Select,
    Set, Statement,
};

use crate::infrastructure::database::OrmRepo;

fn to_i32<T: ToPrimitive + std::fmt::Display>(value: T) -> anyhow::Result<i32> {
    value.to_i32().with_context(|| format!("{value} does not fit a status column"))
}

fn criteria_condition(criteria: &RequestCriteria) -> anyhow::Result<Condition> {
    let mut condition = Condition::all();
    if !criteria.statuses.is_empty() {
        let statuses = criteria
            .statuses
            .iter()
            .map(|el| to_i32(*el))
            .collect::<anyhow::Result<Vec<_>>>()?;
        condition = condition.add(ServiceRequestColumn::Status.is_in(statuses));
    }
    if let Some(payment_status) = criteria.payment_status {
        condition = condition.add(ServiceRequestColumn::PaymentStatus.eq(to_i32(payment_status)?));
    }
    if let Some(range) = criteria.created_within {
        condition = condition
            .add(ServiceRequestColumn::CreatedAt.gte(range.start))
            .add(ServiceRequestColumn::CreatedAt.lt(range.end));
    }
    if let Some(range) = criteria.updated_within {
        condition = condition
            .add(ServiceRequestColumn::UpdatedAt.gte(range.start))
            .add(ServiceRequestColumn::UpdatedAt.lt(range.end));
    }
    Ok(condition)
}

/// `%term%` with LIKE wildcards in the term taken literally.
fn contains_pattern(term: &str) -> LikeExpr {
    let escaped = term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    LikeExpr::new(format!("%{escaped}%")).escape('\\')
}

fn filtered(filter: &RequestFilter) -> anyhow::Result<Select<ServiceRequestEntity>> {
    let mut query = ServiceRequestEntity::find();
    if let Some(status) = filter.status {
        query = query.filter(ServiceRequestColumn::Status.eq(to_i32(status)?));
    }
    if let Some(term) = filter.search_term() {
        let lower =
            |column: ClientColumn| Expr::expr(Func::lower(Expr::col((ClientEntity, column))));
        let number = Expr::col((ServiceRequestEntity, ServiceRequestColumn::RequestNumber));
        query = query.join(JoinType::InnerJoin, ServiceRequestRelation::Client.def()).filter(
            Condition::any()
                .add(number.like(contains_pattern(&term)))
                .add(lower(ClientColumn::FirstName).like(contains_pattern(&term)))
                .add(lower(ClientColumn::LastName).like(contains_pattern(&term))),
        );
    }
    Ok(query)
}

/// Sets every column and bumps the version, matching only the version `entity` was read with.
fn guarded_update(entity: &ServiceRequest, backend: DbBackend) -> anyhow::Result<Statement> {
    let model = ServiceRequestModel::try_from(entity.to_owned())?;
    let mut active_model = ServiceRequestActiveModel::from(model).reset_all();
    active_model.version = Set(entity.version + 1);
    Ok(ServiceRequestEntity::update(active_model)
        .filter(ServiceRequestColumn::Version.eq(entity.version))
        .build(backend))
}

fn into_entities(models: Vec<ServiceRequestModel>) -> anyhow::Result<Vec<ServiceRequest>> {
    models.into_iter().map(ServiceRequest::try_from).collect()
}

#[async_trait]
impl ReadOnlyRepository<ServiceRequest> for OrmRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<ServiceRequest>> {
        ServiceRequestEntity::find_by_id(id)
            .one(self.db.get_connection())
            .await?
            .map(ServiceRequest::try_from)
            .transpose()
    }
}

#[async_trait]
impl MutableRepository<ServiceRequest> for OrmRepo {
    async fn insert(&self, entity: &ServiceRequest) -> anyhow::Result<Uuid> {
        let model = ServiceRequestModel::try_from(entity.to_owned())?;
        let active_model = ServiceRequestActiveModel::from(model).reset_all();
        let stmt = ServiceRequestEntity::insert(active_model).build(self.backend());
        self.stage(stmt).await;
        Ok(entity.id)
    }

    async fn update(&self, entity: &ServiceRequest) -> anyhow::Result<()> {
        let stmt = guarded_update(entity, self.backend())?;
        self.stage_guarded(stmt).await;
        Ok(())
    }

    async fn save_changed(&self) -> anyhow::Result<bool> {
        self.save_changed().await
    }
}

impl DBRepository<ServiceRequest> for OrmRepo {}

#[async_trait]
impl ServiceRequestRepo for OrmRepo {
    async fn get_by_request_number(
        &self,
        request_number: &str,
    ) -> anyhow::Result<Option<ServiceRequest>> {
        ServiceRequestEntity::find()
            .filter(ServiceRequestColumn::RequestNumber.eq(request_number))
            .one(self.db.get_connection())
            .await?
            .map(ServiceRequest::try_from)
            .transpose()
    }

    async fn get_by_tracking_token(
        &self,
        tracking_token: &str,
    ) -> anyhow::Result<Option<ServiceRequest>> {
        ServiceRequestEntity::find()
            .filter(ServiceRequestColumn::TrackingToken.eq(tracking_token))
            .one(self.db.get_connection())
            .await?
            .map(ServiceRequest::try_from)
            .transpose()
    }

    async fn request_number_exists(&self, request_number: &str) -> anyhow::Result<bool> {
        let count = ServiceRequestEntity::find()
            .filter(ServiceRequestColumn::RequestNumber.eq(request_number))
            .count(self.db.get_connection())
            .await?;
        Ok(count > 0)
    }

    async fn list(
        &self,
        filter: &RequestFilter,
        pagination: Pagination,
    ) -> anyhow::Result<(Vec<ServiceRequest>, u64)> {
        let query = filtered(filter)?;
        let total = query.clone().count(self.db.get_connection()).await?;
        let models = query
            .order_by_desc(ServiceRequestColumn::CreatedAt)
            .offset(pagination.offset())
            .limit(pagination.limit)
            .all(self.db.get_connection())
            .await?;
        Ok((into_entities(models)?, total))
    }

    async fn count(&self, criteria: &RequestCriteria) -> anyhow::Result<u64> {
        Ok(ServiceRequestEntity::find()
            .filter(criteria_condition(criteria)?)
            .count(self.db.get_connection())
            .await?)
    }

    async fn sum_total_amount(&self, criteria: &RequestCriteria) -> anyhow::Result<Decimal> {
        let sum = ServiceRequestEntity::find()
            .select_only()
            .column_as(ServiceRequestColumn::TotalAmount.sum(), "sum")
            .filter(criteria_condition(criteria)?)
            .into_tuple::<Option<Decimal>>()
            .one(self.db.get_connection())
            .await?;
        Ok(sum.flatten().unwrap_or_default())
    }

    async fn recent(&self, limit: u64) -> anyhow::Result<Vec<ServiceRequest>> {
        let models = ServiceRequestEntity::find()
            .order_by_desc(ServiceRequestColumn::CreatedAt)
            .limit(limit)
            .all(self.db.get_connection())
            .await?;
        into_entities(models)
    }
}

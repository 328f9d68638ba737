//! Repair job
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "service_request")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub request_number: String,
    #[sea_orm(unique)]
    pub tracking_token: String,
    pub client_id: Uuid,
    pub vehicle_id: Uuid,
    pub status: i32,
    pub progress_percentage: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub assigned_master: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_amount: Decimal,
    pub payment_status: i32,
    pub estimated_completion: Option<DateTimeUtc>,
    /// Optimistic lock counter, bumped by every update.
    pub version: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::VehicleId",
        to = "super::vehicle::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Vehicle,
    #[sea_orm(has_many = "super::request_work::Entity")]
    RequestWork,
    #[sea_orm(has_many = "super::request_status_history::Entity")]
    RequestStatusHistory,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl Related<super::request_work::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RequestWork.def()
    }
}

impl Related<super::request_status_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RequestStatusHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

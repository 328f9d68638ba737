//! CRM staff account
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::request_status_history::Entity")]
    RequestStatusHistory,
}

impl Related<super::request_status_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RequestStatusHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

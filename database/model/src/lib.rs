pub use sea_orm;

pub mod client;
pub mod request_status_history;
pub mod request_work;
pub mod service_request;
pub mod user;
pub mod vehicle;

pub mod prelude {
    pub use super::{
        client::{
            ActiveModel as ClientActiveModel, Column as ClientColumn, Entity as ClientEntity,
            Model as ClientModel, PrimaryKey as ClientPrimaryKey, Relation as ClientRelation,
        },
        request_status_history::{
            ActiveModel as RequestStatusHistoryActiveModel, Column as RequestStatusHistoryColumn,
            Entity as RequestStatusHistoryEntity, Model as RequestStatusHistoryModel,
            PrimaryKey as RequestStatusHistoryPrimaryKey,
            Relation as RequestStatusHistoryRelation,
        },
        request_work::{
            ActiveModel as RequestWorkActiveModel, Column as RequestWorkColumn,
            Entity as RequestWorkEntity, Model as RequestWorkModel,
            PrimaryKey as RequestWorkPrimaryKey, Relation as RequestWorkRelation,
        },
        service_request::{
            ActiveModel as ServiceRequestActiveModel, Column as ServiceRequestColumn,
            Entity as ServiceRequestEntity, Model as ServiceRequestModel,
            PrimaryKey as ServiceRequestPrimaryKey, Relation as ServiceRequestRelation,
        },
        user::{
            ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity,
            Model as UserModel, PrimaryKey as UserPrimaryKey, Relation as UserRelation,
        },
        vehicle::{
            ActiveModel as VehicleActiveModel, Column as VehicleColumn, Entity as VehicleEntity,
            Model as VehicleModel, PrimaryKey as VehiclePrimaryKey, Relation as VehicleRelation,
        },
    };
}

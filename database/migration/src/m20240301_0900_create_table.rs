use database_model::prelude::*;
use sea_orm_migration::{
    prelude::*,
    sea_orm::{DbBackend, EntityTrait, Schema},
};

pub struct Migration;

fn get_seaorm_create_stmt<E: EntityTrait>(e: E) -> TableCreateStatement {
    let schema = Schema::new(DbBackend::Postgres);
    schema.create_table_from_entity(e).if_not_exists().to_owned()
}

fn get_seaorm_drop_stmt<E: EntityTrait>(e: E) -> TableDropStatement {
    Table::drop().table(e).if_exists().to_owned()
}

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20240301_0900_create_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Parents first, foreign keys come from the entity relations.
        let stmts = vec![
            get_seaorm_create_stmt(UserEntity),
            get_seaorm_create_stmt(ClientEntity),
            get_seaorm_create_stmt(VehicleEntity),
            get_seaorm_create_stmt(ServiceRequestEntity),
            get_seaorm_create_stmt(RequestWorkEntity),
            get_seaorm_create_stmt(RequestStatusHistoryEntity),
        ];
        for stmt in stmts {
            manager.create_table(stmt.to_owned()).await?;
        }

        let indexes = vec![
            Index::create()
                .name("IDX_ServiceRequest_CreatedAt")
                .table(ServiceRequestEntity)
                .col(ServiceRequestColumn::CreatedAt)
                .to_owned(),
            Index::create()
                .name("IDX_ServiceRequest_Status")
                .table(ServiceRequestEntity)
                .col(ServiceRequestColumn::Status)
                .to_owned(),
            Index::create()
                .name("IDX_RequestWork_RequestId")
                .table(RequestWorkEntity)
                .col(RequestWorkColumn::RequestId)
                .to_owned(),
            Index::create()
                .name("IDX_RequestStatusHistory_RequestId")
                .table(RequestStatusHistoryEntity)
                .col(RequestStatusHistoryColumn::RequestId)
                .to_owned(),
        ];
        for index in indexes {
            manager.create_index(index).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let stmts = vec![
            get_seaorm_drop_stmt(RequestStatusHistoryEntity),
            get_seaorm_drop_stmt(RequestWorkEntity),
            get_seaorm_drop_stmt(ServiceRequestEntity),
            get_seaorm_drop_stmt(VehicleEntity),
            get_seaorm_drop_stmt(ClientEntity),
            get_seaorm_drop_stmt(UserEntity),
        ];

        for stmt in stmts {
            manager.drop_table(stmt.to_owned()).await?;
        }

        Ok(())
    }
}

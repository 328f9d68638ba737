use std::collections::HashMap;

use async_trait::async_trait;
use mockall::mock;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    model::{
        entity::{Client, ServiceRequest, StatusHistoryEntry, User, Vehicle, WorkItem},
        vo::{Pagination, RequestCriteria, RequestFilter},
    },
    repository::{
        ClientRepo, DBRepository, MutableRepository, ReadOnlyRepository, ServiceRequestRepo,
        StatusHistoryRepo, UserRepo, VehicleRepo, WorkItemRepo,
    },
    service::IdentifierService,
};

mock! {
    pub ServiceRequestRepo {}
    #[async_trait]
    impl ServiceRequestRepo for ServiceRequestRepo {
        async fn get_by_request_number(&self, request_number: &str) -> anyhow::Result<Option<ServiceRequest>>;
        async fn get_by_tracking_token(&self, tracking_token: &str) -> anyhow::Result<Option<ServiceRequest>>;
        async fn request_number_exists(&self, request_number: &str) -> anyhow::Result<bool>;
        async fn list(&self, filter: &RequestFilter, pagination: Pagination) -> anyhow::Result<(Vec<ServiceRequest>, u64)>;
        async fn count(&self, criteria: &RequestCriteria) -> anyhow::Result<u64>;
        async fn sum_total_amount(&self, criteria: &RequestCriteria) -> anyhow::Result<Decimal>;
        async fn recent(&self, limit: u64) -> anyhow::Result<Vec<ServiceRequest>>;
    }
    #[async_trait]
    impl ReadOnlyRepository<ServiceRequest> for ServiceRequestRepo {
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<ServiceRequest>>;
    }
    #[async_trait]
    impl MutableRepository<ServiceRequest> for ServiceRequestRepo {
        async fn insert(&self, entity: &ServiceRequest) -> anyhow::Result<Uuid>;
        async fn update(&self, entity: &ServiceRequest) -> anyhow::Result<()>;
        async fn save_changed(&self) -> anyhow::Result<bool>;
    }
    impl DBRepository<ServiceRequest> for ServiceRequestRepo {}
}

mock! {
    pub WorkItemRepo {}
    #[async_trait]
    impl WorkItemRepo for WorkItemRepo {
        async fn get_all_by_request(&self, request_id: Uuid) -> anyhow::Result<Vec<WorkItem>>;
        async fn count_by_requests(&self, request_ids: &[Uuid]) -> anyhow::Result<HashMap<Uuid, u64>>;
    }
    #[async_trait]
    impl ReadOnlyRepository<WorkItem> for WorkItemRepo {
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<WorkItem>>;
    }
    #[async_trait]
    impl MutableRepository<WorkItem> for WorkItemRepo {
        async fn insert(&self, entity: &WorkItem) -> anyhow::Result<Uuid>;
        async fn update(&self, entity: &WorkItem) -> anyhow::Result<()>;
        async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<()>;
        async fn save_changed(&self) -> anyhow::Result<bool>;
    }
    impl DBRepository<WorkItem> for WorkItemRepo {}
}

mock! {
    pub StatusHistoryRepo {}
    #[async_trait]
    impl StatusHistoryRepo for StatusHistoryRepo {
        async fn append(&self, entry: &StatusHistoryEntry) -> anyhow::Result<()>;
        async fn get_all_by_request(&self, request_id: Uuid) -> anyhow::Result<Vec<StatusHistoryEntry>>;
    }
}

mock! {
    pub ClientRepo {}
    #[async_trait]
    impl ClientRepo for ClientRepo {
        async fn get_by_phone(&self, phone: &str) -> anyhow::Result<Option<Client>>;
        async fn get_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Client>>;
    }
    #[async_trait]
    impl ReadOnlyRepository<Client> for ClientRepo {
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Client>>;
    }
    #[async_trait]
    impl MutableRepository<Client> for ClientRepo {
        async fn insert(&self, entity: &Client) -> anyhow::Result<Uuid>;
        async fn update(&self, entity: &Client) -> anyhow::Result<()>;
        async fn save_changed(&self) -> anyhow::Result<bool>;
    }
    impl DBRepository<Client> for ClientRepo {}
}

mock! {
    pub VehicleRepo {}
    #[async_trait]
    impl VehicleRepo for VehicleRepo {
        async fn get_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Vehicle>>;
    }
    #[async_trait]
    impl ReadOnlyRepository<Vehicle> for VehicleRepo {
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Vehicle>>;
    }
    #[async_trait]
    impl MutableRepository<Vehicle> for VehicleRepo {
        async fn insert(&self, entity: &Vehicle) -> anyhow::Result<Uuid>;
        async fn update(&self, entity: &Vehicle) -> anyhow::Result<()>;
        async fn save_changed(&self) -> anyhow::Result<bool>;
    }
    impl DBRepository<Vehicle> for VehicleRepo {}
}

mock! {
    pub UserRepo {}
    #[async_trait]
    impl UserRepo for UserRepo {
        async fn get_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
        async fn get_full_names(&self, ids: &[Uuid]) -> anyhow::Result<HashMap<Uuid, String>>;
    }
    #[async_trait]
    impl ReadOnlyRepository<User> for UserRepo {
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    }
}

mock! {
    pub IdentifierService {}
    impl IdentifierService for IdentifierService {
        fn request_number(&self) -> String;
        fn tracking_token(&self) -> String;
    }
}

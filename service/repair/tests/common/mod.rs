use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use domain_repair::{
    model::{
        entity::{Client, ServiceRequest, StatusHistoryEntry, User, Vehicle, WorkItem},
        vo::{Pagination, RequestCriteria, RequestFilter},
    },
    repository::{
        ClientRepo, DBRepository, MutableRepository, ReadOnlyRepository, ServiceRequestRepo,
        StaleWrite, StatusHistoryRepo, UserRepo, VehicleRepo, WorkItemRepo,
    },
    service::IdentifierService,
};
use rust_decimal::Decimal;
use service_repair::{
    RandomIdentifierService, RequestLifecycleServiceImpl, StatsServiceImpl, TrackingServiceImpl,
    WorkLedgerServiceImpl,
};
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct Tables {
    pub requests: HashMap<Uuid, ServiceRequest>,
    pub clients: HashMap<Uuid, Client>,
    pub vehicles: HashMap<Uuid, Vehicle>,
    pub works: HashMap<Uuid, WorkItem>,
    pub history: Vec<StatusHistoryEntry>,
    pub users: HashMap<Uuid, User>,
}

enum Staged {
    InsertRequest(ServiceRequest),
    UpdateRequest(ServiceRequest),
    InsertClient(Client),
    UpdateClient(Client),
    InsertVehicle(Vehicle),
    UpdateVehicle(Vehicle),
    InsertWork(WorkItem),
    UpdateWork(WorkItem),
    DeleteWork(Uuid),
    AppendHistory(StatusHistoryEntry),
}

/// In memory stand in for the database, one instance per unit of work.
///
/// Enforces the same unique keys and version checks as the schema.
pub struct MemoryRepo {
    tables: Arc<Mutex<Tables>>,
    staged: Mutex<Vec<Staged>>,
}

impl MemoryRepo {
    fn stage(&self, op: Staged) {
        self.staged.lock().unwrap().push(op);
    }

    fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> R {
        f(&self.tables.lock().unwrap())
    }

    fn apply(tables: &mut Tables, op: Staged) -> Result<(), StaleWrite> {
        match op {
            Staged::InsertRequest(request) => {
                if tables.requests.values().any(|el| {
                    el.id == request.id
                        || el.request_number == request.request_number
                        || el.tracking_token == request.tracking_token
                }) {
                    return Err(StaleWrite("service request unique key taken".to_string()));
                }
                tables.requests.insert(request.id, request);
            }
            Staged::UpdateRequest(mut request) => {
                match tables.requests.get(&request.id) {
                    Some(stored) if stored.version == request.version => {}
                    _ => return Err(StaleWrite(format!("request {} moved on", request.id))),
                }
                request.version += 1;
                tables.requests.insert(request.id, request);
            }
            Staged::InsertClient(client) => {
                if tables.clients.values().any(|el| el.id == client.id || el.phone == client.phone) {
                    return Err(StaleWrite("client phone taken".to_string()));
                }
                tables.clients.insert(client.id, client);
            }
            Staged::UpdateClient(client) => {
                tables.clients.insert(client.id, client);
            }
            Staged::InsertVehicle(vehicle) => {
                tables.vehicles.insert(vehicle.id, vehicle);
            }
            Staged::UpdateVehicle(vehicle) => {
                tables.vehicles.insert(vehicle.id, vehicle);
            }
            Staged::InsertWork(work) => {
                if tables.works.contains_key(&work.id) {
                    return Err(StaleWrite("work item id taken".to_string()));
                }
                tables.works.insert(work.id, work);
            }
            Staged::UpdateWork(work) => {
                tables.works.insert(work.id, work);
            }
            Staged::DeleteWork(id) => {
                if tables.works.remove(&id).is_none() {
                    return Err(StaleWrite(format!("work item {id} already gone")));
                }
            }
            Staged::AppendHistory(entry) => tables.history.push(entry),
        }
        Ok(())
    }
}

/// Shared storage handing out fresh units of work.
#[derive(Clone, Default)]
pub struct Shop {
    pub tables: Arc<Mutex<Tables>>,
}

impl Shop {
    pub fn session(&self) -> Arc<MemoryRepo> {
        Arc::new(MemoryRepo {
            tables: self.tables.clone(),
            staged: Mutex::new(vec![]),
        })
    }

    pub fn snapshot(&self) -> Tables {
        self.tables.lock().unwrap().clone()
    }

    pub fn lifecycle(&self) -> RequestLifecycleServiceImpl {
        self.lifecycle_with(Arc::new(RandomIdentifierService), 16)
    }

    pub fn lifecycle_with(
        &self,
        identifier_service: Arc<dyn IdentifierService>,
        retry_limit: usize,
    ) -> RequestLifecycleServiceImpl {
        let repo = self.session();
        RequestLifecycleServiceImpl::builder()
            .request_repo(repo.clone())
            .client_repo(repo.clone())
            .vehicle_repo(repo.clone())
            .work_item_repo(repo.clone())
            .history_repo(repo.clone())
            .user_repo(repo)
            .identifier_service(identifier_service)
            .frontend_url("http://localhost:5173")
            .retry_limit(retry_limit)
            .build()
    }

    pub fn ledger(&self) -> WorkLedgerServiceImpl {
        let repo = self.session();
        WorkLedgerServiceImpl::builder()
            .request_repo(repo.clone())
            .work_item_repo(repo)
            .build()
    }

    pub fn tracking(&self) -> TrackingServiceImpl {
        let repo = self.session();
        TrackingServiceImpl::builder()
            .request_repo(repo.clone())
            .client_repo(repo.clone())
            .vehicle_repo(repo.clone())
            .work_item_repo(repo.clone())
            .history_repo(repo)
            .build()
    }

    pub fn stats(&self) -> StatsServiceImpl {
        let repo = self.session();
        StatsServiceImpl::builder()
            .request_repo(repo.clone())
            .client_repo(repo.clone())
            .vehicle_repo(repo)
            .build()
    }
}

#[async_trait]
impl ReadOnlyRepository<ServiceRequest> for MemoryRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<ServiceRequest>> {
        Ok(self.read(|t| t.requests.get(&id).cloned()))
    }
}

#[async_trait]
impl MutableRepository<ServiceRequest> for MemoryRepo {
    async fn insert(&self, entity: &ServiceRequest) -> anyhow::Result<Uuid> {
        self.stage(Staged::InsertRequest(entity.clone()));
        Ok(entity.id)
    }

    async fn update(&self, entity: &ServiceRequest) -> anyhow::Result<()> {
        self.stage(Staged::UpdateRequest(entity.clone()));
        Ok(())
    }

    async fn save_changed(&self) -> anyhow::Result<bool> {
        let staged = std::mem::take(&mut *self.staged.lock().unwrap());
        if staged.is_empty() {
            return Ok(false);
        }
        let mut tables = self.tables.lock().unwrap();
        let mut working = tables.clone();
        for op in staged {
            Self::apply(&mut working, op)?;
        }
        *tables = working;
        Ok(true)
    }
}

impl DBRepository<ServiceRequest> for MemoryRepo {}

#[async_trait]
impl ServiceRequestRepo for MemoryRepo {
    async fn get_by_request_number(
        &self,
        request_number: &str,
    ) -> anyhow::Result<Option<ServiceRequest>> {
        Ok(self.read(|t| {
            t.requests.values().find(|el| el.request_number == request_number).cloned()
        }))
    }

    async fn get_by_tracking_token(
        &self,
        tracking_token: &str,
    ) -> anyhow::Result<Option<ServiceRequest>> {
        Ok(self.read(|t| {
            t.requests.values().find(|el| el.tracking_token == tracking_token).cloned()
        }))
    }

    async fn request_number_exists(&self, request_number: &str) -> anyhow::Result<bool> {
        Ok(self.read(|t| t.requests.values().any(|el| el.request_number == request_number)))
    }

    async fn list(
        &self,
        filter: &RequestFilter,
        pagination: Pagination,
    ) -> anyhow::Result<(Vec<ServiceRequest>, u64)> {
        Ok(self.read(|t| {
            let mut matched = t
                .requests
                .values()
                .filter(|el| t.clients.get(&el.client_id).is_some_and(|c| filter.matches(el, c)))
                .cloned()
                .collect::<Vec<_>>();
            matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let total = matched.len() as u64;
            let page = matched
                .into_iter()
                .skip(pagination.offset() as usize)
                .take(pagination.limit as usize)
                .collect();
            (page, total)
        }))
    }

    async fn count(&self, criteria: &RequestCriteria) -> anyhow::Result<u64> {
        Ok(self.read(|t| t.requests.values().filter(|el| criteria.matches(el)).count() as u64))
    }

    async fn sum_total_amount(&self, criteria: &RequestCriteria) -> anyhow::Result<Decimal> {
        Ok(self.read(|t| {
            t.requests.values().filter(|el| criteria.matches(el)).map(|el| el.total_amount).sum()
        }))
    }

    async fn recent(&self, limit: u64) -> anyhow::Result<Vec<ServiceRequest>> {
        Ok(self.read(|t| {
            let mut all = t.requests.values().cloned().collect::<Vec<_>>();
            all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            all.truncate(limit as usize);
            all
        }))
    }
}

#[async_trait]
impl ReadOnlyRepository<Client> for MemoryRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Client>> {
        Ok(self.read(|t| t.clients.get(&id).cloned()))
    }
}

#[async_trait]
impl MutableRepository<Client> for MemoryRepo {
    async fn insert(&self, entity: &Client) -> anyhow::Result<Uuid> {
        self.stage(Staged::InsertClient(entity.clone()));
        Ok(entity.id)
    }

    async fn update(&self, entity: &Client) -> anyhow::Result<()> {
        self.stage(Staged::UpdateClient(entity.clone()));
        Ok(())
    }

    async fn save_changed(&self) -> anyhow::Result<bool> {
        MutableRepository::<ServiceRequest>::save_changed(self).await
    }
}

impl DBRepository<Client> for MemoryRepo {}

#[async_trait]
impl ClientRepo for MemoryRepo {
    async fn get_by_phone(&self, phone: &str) -> anyhow::Result<Option<Client>> {
        Ok(self.read(|t| t.clients.values().find(|el| el.phone == phone).cloned()))
    }

    async fn get_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Client>> {
        Ok(self.read(|t| ids.iter().filter_map(|id| t.clients.get(id).cloned()).collect()))
    }
}

#[async_trait]
impl ReadOnlyRepository<Vehicle> for MemoryRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Vehicle>> {
        Ok(self.read(|t| t.vehicles.get(&id).cloned()))
    }
}

#[async_trait]
impl MutableRepository<Vehicle> for MemoryRepo {
    async fn insert(&self, entity: &Vehicle) -> anyhow::Result<Uuid> {
        self.stage(Staged::InsertVehicle(entity.clone()));
        Ok(entity.id)
    }

    async fn update(&self, entity: &Vehicle) -> anyhow::Result<()> {
        self.stage(Staged::UpdateVehicle(entity.clone()));
        Ok(())
    }

    async fn save_changed(&self) -> anyhow::Result<bool> {
        MutableRepository::<ServiceRequest>::save_changed(self).await
    }
}

impl DBRepository<Vehicle> for MemoryRepo {}

#[async_trait]
impl VehicleRepo for MemoryRepo {
    async fn get_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Vehicle>> {
        Ok(self.read(|t| ids.iter().filter_map(|id| t.vehicles.get(id).cloned()).collect()))
    }
}

#[async_trait]
impl ReadOnlyRepository<WorkItem> for MemoryRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<WorkItem>> {
        Ok(self.read(|t| t.works.get(&id).cloned()))
    }
}

#[async_trait]
impl MutableRepository<WorkItem> for MemoryRepo {
    async fn insert(&self, entity: &WorkItem) -> anyhow::Result<Uuid> {
        self.stage(Staged::InsertWork(entity.clone()));
        Ok(entity.id)
    }

    async fn update(&self, entity: &WorkItem) -> anyhow::Result<()> {
        self.stage(Staged::UpdateWork(entity.clone()));
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<()> {
        self.stage(Staged::DeleteWork(id));
        Ok(())
    }

    async fn save_changed(&self) -> anyhow::Result<bool> {
        MutableRepository::<ServiceRequest>::save_changed(self).await
    }
}

impl DBRepository<WorkItem> for MemoryRepo {}

#[async_trait]
impl WorkItemRepo for MemoryRepo {
    async fn get_all_by_request(&self, request_id: Uuid) -> anyhow::Result<Vec<WorkItem>> {
        Ok(self.read(|t| {
            let mut works = t
                .works
                .values()
                .filter(|el| el.request_id == request_id)
                .cloned()
                .collect::<Vec<_>>();
            works.sort_by_key(|el| el.created_at);
            works
        }))
    }

    async fn count_by_requests(&self, request_ids: &[Uuid]) -> anyhow::Result<HashMap<Uuid, u64>> {
        Ok(self.read(|t| {
            let mut counts = HashMap::new();
            for work in t.works.values().filter(|el| request_ids.contains(&el.request_id)) {
                *counts.entry(work.request_id).or_insert(0) += 1;
            }
            counts
        }))
    }
}

#[async_trait]
impl StatusHistoryRepo for MemoryRepo {
    async fn append(&self, entry: &StatusHistoryEntry) -> anyhow::Result<()> {
        self.stage(Staged::AppendHistory(entry.clone()));
        Ok(())
    }

    async fn get_all_by_request(&self, request_id: Uuid) -> anyhow::Result<Vec<StatusHistoryEntry>> {
        Ok(self.read(|t| {
            t.history.iter().filter(|el| el.request_id == request_id).cloned().collect()
        }))
    }
}

#[async_trait]
impl ReadOnlyRepository<User> for MemoryRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.read(|t| t.users.get(&id).cloned()))
    }
}

#[async_trait]
impl UserRepo for MemoryRepo {
    async fn get_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.read(|t| t.users.values().find(|el| el.email == email).cloned()))
    }

    async fn get_full_names(&self, ids: &[Uuid]) -> anyhow::Result<HashMap<Uuid, String>> {
        Ok(self.read(|t| {
            ids.iter()
                .filter_map(|id| t.users.get(id).map(|u| (u.id, u.full_name.clone())))
                .collect()
        }))
    }
}

/// Hands out the given request numbers in order, then repeats the last one.
pub struct ScriptedIdentifiers {
    numbers: Mutex<Vec<String>>,
}

impl ScriptedIdentifiers {
    pub fn new(numbers: &[&str]) -> Self {
        Self {
            numbers: Mutex::new(numbers.iter().rev().map(|el| el.to_string()).collect()),
        }
    }
}

impl IdentifierService for ScriptedIdentifiers {
    fn request_number(&self) -> String {
        let mut numbers = self.numbers.lock().unwrap();
        if numbers.len() > 1 {
            numbers.pop().unwrap()
        } else {
            numbers[0].clone()
        }
    }

    fn tracking_token(&self) -> String {
        RandomIdentifierService.tracking_token()
    }
}

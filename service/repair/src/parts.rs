use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::Context;
use domain_repair::{
    model::entity::{Client, ServiceRequest, StatusHistoryEntry, Vehicle, WorkItem},
    repository::{ClientRepo, StatusHistoryRepo, VehicleRepo, WorkItemRepo},
};
use uuid::Uuid;

/// Everything hanging off one request.
pub(crate) struct RequestParts {
    pub client: Client,
    pub vehicle: Vehicle,
    pub works: Vec<WorkItem>,
    pub history: Vec<StatusHistoryEntry>,
}

pub(crate) async fn load_parts(
    request: &ServiceRequest,
    client_repo: &Arc<dyn ClientRepo>,
    vehicle_repo: &Arc<dyn VehicleRepo>,
    work_item_repo: &Arc<dyn WorkItemRepo>,
    history_repo: &Arc<dyn StatusHistoryRepo>,
) -> anyhow::Result<RequestParts> {
    let (client, vehicle, works, history) = futures::try_join!(
        client_repo.get_by_id(request.client_id),
        vehicle_repo.get_by_id(request.vehicle_id),
        work_item_repo.get_all_by_request(request.id),
        history_repo.get_all_by_request(request.id),
    )?;
    Ok(RequestParts {
        client: client.with_context(|| {
            format!("Client: {} of request: {} is missing.", request.client_id, request.id)
        })?,
        vehicle: vehicle.with_context(|| {
            format!("Vehicle: {} of request: {} is missing.", request.vehicle_id, request.id)
        })?,
        works,
        history,
    })
}

/// Clients and vehicles of many requests, keyed by id.
pub(crate) async fn load_owners(
    requests: &[ServiceRequest],
    client_repo: &Arc<dyn ClientRepo>,
    vehicle_repo: &Arc<dyn VehicleRepo>,
) -> anyhow::Result<(HashMap<Uuid, Client>, HashMap<Uuid, Vehicle>)> {
    let client_ids = requests.iter().map(|el| el.client_id).collect::<HashSet<_>>();
    let vehicle_ids = requests.iter().map(|el| el.vehicle_id).collect::<HashSet<_>>();
    let client_ids = client_ids.into_iter().collect::<Vec<_>>();
    let vehicle_ids = vehicle_ids.into_iter().collect::<Vec<_>>();
    let (clients, vehicles) = futures::try_join!(
        client_repo.get_by_ids(&client_ids),
        vehicle_repo.get_by_ids(&vehicle_ids),
    )?;
    Ok((
        clients.into_iter().map(|el| (el.id, el)).collect(),
        vehicles.into_iter().map(|el| (el.id, el)).collect(),
    ))
}

/// Pairs each request with its client and vehicle, failing on dangling references.
pub(crate) fn owners_of<'a>(
    request: &ServiceRequest,
    clients: &'a HashMap<Uuid, Client>,
    vehicles: &'a HashMap<Uuid, Vehicle>,
) -> anyhow::Result<(&'a Client, &'a Vehicle)> {
    let client = clients
        .get(&request.client_id)
        .with_context(|| format!("Client of request: {} is missing.", request.id))?;
    let vehicle = vehicles
        .get(&request.vehicle_id)
        .with_context(|| format!("Vehicle of request: {} is missing.", request.id))?;
    Ok((client, vehicle))
}

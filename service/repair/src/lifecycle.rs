use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_repair::{
    exception::{RepairException, RepairResult},
    model::{
        entity::{Client, ServiceRequest, StatusHistoryEntry, Vehicle},
        vo::{
            canonical_phone, NewRequestSubmission, Pagination, PaginationResult, PaymentStatus,
            RequestDetail, RequestFilter, RequestStatus, RequestSummary, SubmissionReceipt,
        },
    },
    repository::{
        is_stale_write, ClientRepo, ServiceRequestRepo, StaleWrite, StatusHistoryRepo, UserRepo,
        VehicleRepo, WorkItemRepo,
    },
    service::{IdentifierService, RequestLifecycleService},
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::parts::{load_owners, load_parts, owners_of};

#[derive(TypedBuilder)]
pub struct RequestLifecycleServiceImpl {
    request_repo: Arc<dyn ServiceRequestRepo>,
    client_repo: Arc<dyn ClientRepo>,
    vehicle_repo: Arc<dyn VehicleRepo>,
    work_item_repo: Arc<dyn WorkItemRepo>,
    history_repo: Arc<dyn StatusHistoryRepo>,
    user_repo: Arc<dyn UserRepo>,
    identifier_service: Arc<dyn IdentifierService>,
    /// Base of the customer facing tracking page
    #[builder(setter(into))]
    frontend_url: String,
    /// Attempts at identifier races and version conflicts
    #[builder(default = 16)]
    retry_limit: usize,
}

#[async_trait]
impl RequestLifecycleService for RequestLifecycleServiceImpl {
    async fn create(&self, submission: NewRequestSubmission) -> RepairResult<SubmissionReceipt> {
        submission.validate()?;
        for attempt in 1..=self.retry_limit {
            match self.try_create(&submission).await {
                Ok(receipt) => return Ok(receipt),
                Err(e) if is_stale_write(&e) => {
                    tracing::warn!("Creating service request, attempt {attempt} lost a race: {e}");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(RepairException::IdentifierExhausted {
            attempts: self.retry_limit,
        })
    }

    async fn update_status(
        &self,
        request_id: Uuid,
        status: RequestStatus,
        changed_by: Option<Uuid>,
    ) -> RepairResult<ServiceRequest> {
        let updated = self
            .modify(request_id, |request, now| {
                request.change_status(status, changed_by, now).map(Some)
            })
            .await?;
        tracing::info!("Service request: {request_id} is now {status}.");
        Ok(updated)
    }

    async fn assign_master(
        &self,
        request_id: Uuid,
        master_name: &str,
    ) -> RepairResult<ServiceRequest> {
        self.modify(request_id, |request, now| {
            request.assign_master(master_name, now).map(|_| None)
        })
        .await
    }

    async fn update_progress(
        &self,
        request_id: Uuid,
        percentage: i32,
    ) -> RepairResult<ServiceRequest> {
        self.modify(request_id, |request, now| {
            request.set_progress(percentage, now).map(|_| None)
        })
        .await
    }

    async fn update_payment_status(
        &self,
        request_id: Uuid,
        payment_status: PaymentStatus,
    ) -> RepairResult<ServiceRequest> {
        self.modify(request_id, |request, now| {
            request.set_payment_status(payment_status, now);
            Ok(None)
        })
        .await
    }

    async fn list(
        &self,
        filter: RequestFilter,
        pagination: Pagination,
    ) -> RepairResult<PaginationResult<RequestSummary>> {
        let (requests, total) = self.request_repo.list(&filter, pagination).await?;
        let request_ids = requests.iter().map(|el| el.id).collect::<Vec<_>>();
        let ((clients, vehicles), counts) = futures::try_join!(
            load_owners(&requests, &self.client_repo, &self.vehicle_repo),
            self.work_item_repo.count_by_requests(&request_ids),
        )?;
        let items = requests
            .into_iter()
            .map(|request| {
                let (client, vehicle) = owners_of(&request, &clients, &vehicles)?;
                Ok(RequestSummary {
                    client: client.to_owned(),
                    vehicle: vehicle.to_owned(),
                    works_count: counts.get(&request.id).copied().unwrap_or_default(),
                    request,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(PaginationResult::new(items, pagination, total))
    }

    async fn get_detail(&self, request_id: Uuid) -> RepairResult<RequestDetail> {
        let request = self
            .request_repo
            .get_by_id(request_id)
            .await?
            .ok_or(RepairException::RequestNotFound { id: request_id })?;
        let parts = load_parts(
            &request,
            &self.client_repo,
            &self.vehicle_repo,
            &self.work_item_repo,
            &self.history_repo,
        )
        .await?;
        let actors = parts
            .history
            .iter()
            .filter_map(|el| el.changed_by)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();
        let names = if actors.is_empty() {
            Default::default()
        } else {
            self.user_repo.get_full_names(&actors).await?
        };
        Ok(RequestDetail::new(
            request,
            parts.client,
            parts.vehicle,
            parts.works,
            parts.history,
            &names,
        ))
    }
}

impl RequestLifecycleServiceImpl {
    /// One attempt with one request number candidate. A taken number or unique key counts as a lost race.
    async fn try_create(
        &self,
        submission: &NewRequestSubmission,
    ) -> anyhow::Result<SubmissionReceipt> {
        let request_number = self.identifier_service.request_number();
        if self.request_repo.request_number_exists(&request_number).await? {
            return Err(StaleWrite(format!("request number {request_number} is taken")).into());
        }
        let tracking_token = self.identifier_service.tracking_token();
        let now = Utc::now();

        let phone = canonical_phone(&submission.client.phone).context("Phone has no digits.")?;
        let client = match self.client_repo.get_by_phone(&phone).await? {
            Some(client) => client,
            None => {
                let client = Client::from_draft(&submission.client, now)
                    .context("Phone has no digits.")?;
                self.client_repo.insert(&client).await?;
                client
            }
        };
        let vehicle = Vehicle::from_draft(client.id, &submission.vehicle, now);
        self.vehicle_repo.insert(&vehicle).await?;

        let request = ServiceRequest::submitted(
            request_number,
            tracking_token,
            client.id,
            vehicle.id,
            submission.description.trim().to_string(),
            now,
        );
        self.request_repo.insert(&request).await?;
        self.history_repo.append(&StatusHistoryEntry::initial(request.id, now)).await?;
        self.request_repo.save_changed().await?;

        tracing::info!(
            "Service request: {} created with number {} for client: {}.",
            request.id,
            request.request_number,
            client.id
        );
        Ok(SubmissionReceipt {
            tracking_url: format!(
                "{}/track/{}",
                self.frontend_url.trim_end_matches('/'),
                request.tracking_token
            ),
            request_number: request.request_number,
            tracking_token: request.tracking_token,
        })
    }

    /// Read, mutate and write back under the version check, retrying lost races.
    async fn modify<F>(&self, request_id: Uuid, mutate: F) -> RepairResult<ServiceRequest>
    where
        F: Fn(&mut ServiceRequest, DateTime<Utc>) -> RepairResult<Option<StatusHistoryEntry>>
            + Send
            + Sync,
    {
        for attempt in 1..=self.retry_limit {
            let mut request = self
                .request_repo
                .get_by_id(request_id)
                .await?
                .ok_or(RepairException::RequestNotFound { id: request_id })?;
            let entry = mutate(&mut request, Utc::now())?;
            self.request_repo.update(&request).await?;
            if let Some(entry) = entry {
                self.history_repo.append(&entry).await?;
            }
            match self.request_repo.save_changed().await {
                Ok(_) => {
                    request.version += 1;
                    return Ok(request);
                }
                Err(e) if is_stale_write(&e) => {
                    tracing::warn!(
                        "Updating service request: {request_id}, attempt {attempt} lost a race: {e}"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(RepairException::ConcurrentModification {
            id: request_id,
            attempts: self.retry_limit,
        })
    }
}

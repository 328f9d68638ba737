use std::sync::Arc;

use async_trait::async_trait;
use chrono::{FixedOffset, Offset, Utc};
use domain_repair::{
    exception::RepairResult,
    model::vo::{
        Dashboard, DashboardStats, PaymentStatus, RecentRequest, RequestCriteria, RequestStatus,
        StatusCounts, TimeRange,
    },
    repository::{ClientRepo, ServiceRequestRepo, VehicleRepo},
    service::StatsService,
};
use typed_builder::TypedBuilder;

use crate::parts::{load_owners, owners_of};

const RECENT_REQUESTS: u64 = 10;

#[derive(TypedBuilder)]
pub struct StatsServiceImpl {
    request_repo: Arc<dyn ServiceRequestRepo>,
    client_repo: Arc<dyn ClientRepo>,
    vehicle_repo: Arc<dyn VehicleRepo>,
    /// Timezone deciding where "today" starts
    #[builder(default = Utc.fix())]
    utc_offset: FixedOffset,
}

#[async_trait]
impl StatsService for StatsServiceImpl {
    async fn get_dashboard(&self) -> RepairResult<Dashboard> {
        let today = TimeRange::day_of(Utc::now(), self.utc_offset);
        let all = RequestCriteria::all();
        let new = RequestCriteria::with_status(RequestStatus::New);
        let in_progress = RequestCriteria::with_status(RequestStatus::InProgress);
        let completed = RequestCriteria::with_status(RequestStatus::Completed);
        let cancelled = RequestCriteria::with_status(RequestStatus::Cancelled);
        let created_today = RequestCriteria {
            created_within: Some(today),
            ..Default::default()
        };
        let completed_today = RequestCriteria {
            statuses: vec![RequestStatus::Completed],
            updated_within: Some(today),
            ..Default::default()
        };
        let pending = RequestCriteria {
            statuses: vec![RequestStatus::New, RequestStatus::InProgress],
            payment_status: Some(PaymentStatus::Unpaid),
            ..Default::default()
        };
        let repo = &self.request_repo;

        // Independent reads, nothing here writes.
        let (
            total_requests,
            new,
            in_progress,
            completed,
            cancelled,
            today_requests,
            today_revenue,
            pending_requests,
            recent,
        ) = futures::try_join!(
            repo.count(&all),
            repo.count(&new),
            repo.count(&in_progress),
            repo.count(&completed),
            repo.count(&cancelled),
            repo.count(&created_today),
            repo.sum_total_amount(&completed_today),
            repo.count(&pending),
            repo.recent(RECENT_REQUESTS),
        )?;

        let (clients, vehicles) =
            load_owners(&recent, &self.client_repo, &self.vehicle_repo).await?;
        let recent_requests = recent
            .iter()
            .map(|request| {
                let (client, vehicle) = owners_of(request, &clients, &vehicles)?;
                Ok(RecentRequest::new(request, client, vehicle))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Dashboard {
            stats: DashboardStats {
                total_requests,
                requests_by_status: StatusCounts {
                    new,
                    in_progress,
                    completed,
                    cancelled,
                },
                today_requests,
                today_revenue,
                pending_requests,
            },
            recent_requests,
        })
    }
}

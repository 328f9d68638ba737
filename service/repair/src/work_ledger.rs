use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use domain_repair::{
    exception::{RepairException, RepairResult},
    model::{
        entity::{ServiceRequest, WorkItem},
        vo::{LedgerChange, WorkItemDraft},
    },
    repository::{is_stale_write, ServiceRequestRepo, WorkItemRepo},
    service::WorkLedgerService,
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

#[derive(TypedBuilder)]
pub struct WorkLedgerServiceImpl {
    request_repo: Arc<dyn ServiceRequestRepo>,
    work_item_repo: Arc<dyn WorkItemRepo>,
    #[builder(default = 16)]
    retry_limit: usize,
}

/// What to do with the item list inside one attempt.
enum Edit {
    Add(WorkItem),
    Remove(Uuid),
}

#[async_trait]
impl WorkLedgerService for WorkLedgerServiceImpl {
    async fn add_work_item(
        &self,
        request_id: Uuid,
        draft: WorkItemDraft,
    ) -> RepairResult<LedgerChange> {
        let item = WorkItem::new(
            request_id,
            &draft.work_name,
            draft.quantity,
            draft.unit_price,
            Utc::now(),
        )?;
        let change = self.apply(request_id, Edit::Add(item)).await?;
        tracing::info!(
            "Work item added to service request: {request_id}, total is now {}.",
            change.total_amount
        );
        Ok(change)
    }

    async fn remove_work_item(
        &self,
        request_id: Uuid,
        work_id: Uuid,
    ) -> RepairResult<LedgerChange> {
        let change = self.apply(request_id, Edit::Remove(work_id)).await?;
        tracing::info!(
            "Work item: {work_id} removed from service request: {request_id}, total is now {}.",
            change.total_amount
        );
        Ok(change)
    }
}

impl WorkLedgerServiceImpl {
    /// Stages the item change together with the recomputed total behind the request's
    /// version check, so concurrent edits of one request serialize on it.
    async fn apply(&self, request_id: Uuid, edit: Edit) -> RepairResult<LedgerChange> {
        for attempt in 1..=self.retry_limit {
            let mut request = self.load_request(request_id).await?;
            let mut items = self.work_item_repo.get_all_by_request(request_id).await?;
            let now = Utc::now();
            match &edit {
                Edit::Add(item) => items.push(item.clone()),
                Edit::Remove(work_id) => {
                    let position = items.iter().position(|el| el.id == *work_id).ok_or(
                        RepairException::WorkItemNotFound {
                            request_id,
                            work_id: *work_id,
                        },
                    )?;
                    items.remove(position);
                }
            };
            request.recompute_total(&items, now)?;
            let added = match &edit {
                Edit::Add(item) => {
                    self.work_item_repo.insert(item).await?;
                    Some(item.clone())
                }
                Edit::Remove(work_id) => {
                    self.work_item_repo.delete_by_id(*work_id).await?;
                    None
                }
            };
            self.request_repo.update(&request).await?;
            match self.request_repo.save_changed().await {
                Ok(_) => {
                    return Ok(LedgerChange {
                        work: added,
                        total_amount: request.total_amount,
                    })
                }
                Err(e) if is_stale_write(&e) => {
                    tracing::warn!(
                        "Work ledger of service request: {request_id}, attempt {attempt} lost a race: {e}"
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

    async fn load_request(&self, request_id: Uuid) -> RepairResult<ServiceRequest> {
        self.request_repo
            .get_by_id(request_id)
            .await?
            .ok_or(RepairException::RequestNotFound { id: request_id })
    }
}

#[cfg(test)]
mod tests {
    use domain_repair::mock::{MockServiceRequestRepo, MockWorkItemRepo};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    fn stored_request() -> ServiceRequest {
        ServiceRequest::submitted(
            "123456".to_string(),
            "0123456789abcdef0123456789abcdef".to_string(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            "noise".to_string(),
            Utc::now(),
        )
    }

    fn draft(name: &str, quantity: Decimal, unit_price: Decimal) -> WorkItemDraft {
        WorkItemDraft {
            work_name: name.to_string(),
            quantity,
            unit_price,
        }
    }

    #[tokio::test]
    async fn invalid_draft_touches_nothing() {
        let mut request_repo = MockServiceRequestRepo::new();
        request_repo.expect_get_by_id().never();
        let service = WorkLedgerServiceImpl::builder()
            .request_repo(Arc::new(request_repo))
            .work_item_repo(Arc::new(MockWorkItemRepo::new()))
            .build();
        let id = Uuid::new_v4();
        assert!(service.add_work_item(id, draft("Oil", dec!(0), dec!(10))).await.is_err());
        assert!(service.add_work_item(id, draft("Oil", dec!(1), dec!(-1))).await.is_err());
    }

    #[tokio::test]
    async fn foreign_item_is_not_found() {
        let stored = stored_request();
        let request_id = stored.id;
        let foreign =
            WorkItem::new(Uuid::new_v4(), "Elsewhere", dec!(1), dec!(10), Utc::now()).unwrap();
        let foreign_id = foreign.id;
        let mut request_repo = MockServiceRequestRepo::new();
        request_repo.expect_get_by_id().returning(move |_| Ok(Some(stored.clone())));
        request_repo.expect_update().never();
        let mut work_item_repo = MockWorkItemRepo::new();
        work_item_repo.expect_get_all_by_request().returning(|_| Ok(vec![]));
        work_item_repo.expect_delete_by_id().never();
        let service = WorkLedgerServiceImpl::builder()
            .request_repo(Arc::new(request_repo))
            .work_item_repo(Arc::new(work_item_repo))
            .build();
        let err = service.remove_work_item(request_id, foreign_id).await.unwrap_err();
        assert!(matches!(
            err,
            RepairException::WorkItemNotFound { work_id, .. } if work_id == foreign_id
        ));
    }

    #[tokio::test]
    async fn overflowing_total_stages_nothing() {
        let stored = stored_request();
        let request_id = stored.id;
        let existing =
            WorkItem::new(request_id, "Engine", dec!(1), dec!(9000000000), Utc::now()).unwrap();
        let mut request_repo = MockServiceRequestRepo::new();
        request_repo.expect_get_by_id().returning(move |_| Ok(Some(stored.clone())));
        request_repo.expect_update().never();
        request_repo.expect_save_changed().never();
        let mut work_item_repo = MockWorkItemRepo::new();
        work_item_repo
            .expect_get_all_by_request()
            .returning(move |_| Ok(vec![existing.clone()]));
        work_item_repo.expect_insert().never();
        let service = WorkLedgerServiceImpl::builder()
            .request_repo(Arc::new(request_repo))
            .work_item_repo(Arc::new(work_item_repo))
            .build();
        let err = service
            .add_work_item(request_id, draft("Gearbox", dec!(1), dec!(1000000000)))
            .await
            .unwrap_err();
        assert_eq!(err.field_errors()[0].field, "quantity");
    }

    #[tokio::test]
    async fn total_is_staged_with_new_item() {
        let stored = stored_request();
        let request_id = stored.id;
        let existing =
            WorkItem::new(request_id, "Oil change", dec!(1), dec!(1500), Utc::now()).unwrap();
        let mut request_repo = MockServiceRequestRepo::new();
        request_repo.expect_get_by_id().returning(move |_| Ok(Some(stored.clone())));
        request_repo
            .expect_update()
            .withf(|r| r.total_amount == dec!(2300))
            .times(1)
            .returning(|_| Ok(()));
        request_repo.expect_save_changed().times(1).returning(|| Ok(true));
        let mut work_item_repo = MockWorkItemRepo::new();
        work_item_repo
            .expect_get_all_by_request()
            .returning(move |_| Ok(vec![existing.clone()]));
        work_item_repo
            .expect_insert()
            .withf(|w| w.total_price == dec!(800))
            .times(1)
            .returning(|w| Ok(w.id));
        let service = WorkLedgerServiceImpl::builder()
            .request_repo(Arc::new(request_repo))
            .work_item_repo(Arc::new(work_item_repo))
            .build();
        let change = service
            .add_work_item(request_id, draft("Filter", dec!(2), dec!(400)))
            .await
            .unwrap();
        assert_eq!(change.total_amount, dec!(2300));
        assert_eq!(change.work.unwrap().work_name, "Filter");
    }
}

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use common::{ScriptedIdentifiers, Shop};
use domain_repair::{
    exception::RepairException,
    model::{
        entity::User,
        vo::{
            ClientDraft, NewRequestSubmission, Pagination, PaymentStatus, RequestFilter,
            RequestStatus, SubmissionReceipt, VehicleDraft, WorkItemDraft,
        },
    },
    service::{RequestLifecycleService, StatsService, TrackingService, WorkLedgerService},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn submission(first_name: &str, phone: &str) -> NewRequestSubmission {
    NewRequestSubmission {
        client: ClientDraft {
            first_name: first_name.to_string(),
            last_name: None,
            phone: phone.to_string(),
            email: None,
        },
        vehicle: VehicleDraft {
            brand: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: None,
            vin: None,
            license_plate: None,
        },
        description: "noise".to_string(),
    }
}

fn work(name: &str, quantity: Decimal, unit_price: Decimal) -> WorkItemDraft {
    WorkItemDraft {
        work_name: name.to_string(),
        quantity,
        unit_price,
    }
}

async fn create(shop: &Shop) -> (SubmissionReceipt, Uuid) {
    let receipt = shop.lifecycle().create(submission("Ivan", "+70000000001")).await.unwrap();
    let id = shop
        .snapshot()
        .requests
        .values()
        .find(|el| el.request_number == receipt.request_number)
        .unwrap()
        .id;
    (receipt, id)
}

#[tokio::test]
async fn created_request_starts_clean() {
    let shop = Shop::default();
    let (receipt, id) = create(&shop).await;

    assert_eq!(receipt.request_number.len(), 6);
    assert!(receipt.request_number.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(receipt.tracking_token.len(), 32);
    assert_eq!(
        receipt.tracking_url,
        format!("http://localhost:5173/track/{}", receipt.tracking_token)
    );

    let tables = shop.snapshot();
    let request = &tables.requests[&id];
    assert_eq!(request.status, RequestStatus::New);
    assert_eq!(request.progress_percentage, 0);
    assert_eq!(request.total_amount, Decimal::ZERO);
    assert_eq!(request.payment_status, PaymentStatus::Unpaid);
    let history = tables.history.iter().filter(|el| el.request_id == id).collect::<Vec<_>>();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].old_status, None);
    assert_eq!(history[0].new_status, RequestStatus::New);
    assert_eq!(history[0].changed_by, None);
}

#[tokio::test]
async fn invalid_submission_stores_nothing() {
    let shop = Shop::default();
    let mut bad = submission("Ivan", "+70000000001");
    bad.description = "  ".to_string();
    let err = shop.lifecycle().create(bad).await.unwrap_err();
    assert!(matches!(err, RepairException::Validation { .. }));
    assert!(shop.snapshot().requests.is_empty());
    assert!(shop.snapshot().clients.is_empty());
}

#[tokio::test]
async fn client_is_found_by_canonical_phone() {
    let shop = Shop::default();
    shop.lifecycle().create(submission("Ivan", "+7 (000) 000-00-01")).await.unwrap();
    shop.lifecycle().create(submission("Vanya", "+70000000001")).await.unwrap();
    let tables = shop.snapshot();
    assert_eq!(tables.clients.len(), 1);
    assert_eq!(tables.clients.values().next().unwrap().first_name, "Ivan");
    // vehicles are never deduplicated
    assert_eq!(tables.vehicles.len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_numbers() {
    let shop = Shop::default();
    let handles = (0..50)
        .map(|i| {
            let shop = shop.clone();
            tokio::spawn(async move {
                shop.lifecycle()
                    .create(submission("Ivan", &format!("+7900{i:07}")))
                    .await
                    .unwrap()
            })
        })
        .collect::<Vec<_>>();
    let mut numbers = HashSet::new();
    for handle in handles {
        numbers.insert(handle.await.unwrap().request_number);
    }
    assert_eq!(numbers.len(), 50);
    assert_eq!(shop.snapshot().requests.len(), 50);
}

#[tokio::test]
async fn taken_number_is_retried() {
    let shop = Shop::default();
    let identifiers = Arc::new(ScriptedIdentifiers::new(&["100000", "100000", "100001"]));
    let lifecycle = shop.lifecycle_with(identifiers.clone(), 16);
    let first = lifecycle.create(submission("Ivan", "+70000000001")).await.unwrap();
    let lifecycle = shop.lifecycle_with(identifiers, 16);
    let second = lifecycle.create(submission("Petr", "+70000000002")).await.unwrap();
    assert_eq!(first.request_number, "100000");
    assert_eq!(second.request_number, "100001");
}

#[tokio::test]
async fn identifier_retries_are_bounded() {
    let shop = Shop::default();
    let identifiers = Arc::new(ScriptedIdentifiers::new(&["100000"]));
    shop.lifecycle_with(identifiers.clone(), 4)
        .create(submission("Ivan", "+70000000001"))
        .await
        .unwrap();
    let err = shop
        .lifecycle_with(identifiers, 4)
        .create(submission("Petr", "+70000000002"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepairException::IdentifierExhausted { attempts: 4 }));
}

#[tokio::test]
async fn status_update_appends_one_entry_with_prior_status() {
    let shop = Shop::default();
    let (_, id) = create(&shop).await;
    let user = Uuid::new_v4();

    shop.lifecycle().update_status(id, RequestStatus::InProgress, Some(user)).await.unwrap();
    shop.lifecycle().update_status(id, RequestStatus::Completed, Some(user)).await.unwrap();

    let tables = shop.snapshot();
    let mut history = tables.history.iter().filter(|el| el.request_id == id).collect::<Vec<_>>();
    history.sort_by_key(|el| el.created_at);
    assert_eq!(history.len(), 3);
    assert_eq!(history[1].old_status, Some(RequestStatus::New));
    assert_eq!(history[2].old_status, Some(RequestStatus::InProgress));
    assert_eq!(history[2].new_status, RequestStatus::Completed);
    assert_eq!(history[2].changed_by, Some(user));
    // completing does not touch progress
    assert_eq!(tables.requests[&id].progress_percentage, 0);

    let err = shop.lifecycle().update_status(id, RequestStatus::New, None).await.unwrap_err();
    assert!(matches!(err, RepairException::InvalidTransition { .. }));
    assert_eq!(shop.snapshot().history.len(), 3);
}

#[tokio::test]
async fn progress_bounds() {
    let shop = Shop::default();
    let (_, id) = create(&shop).await;
    let lifecycle = shop.lifecycle();
    assert!(lifecycle.update_progress(id, -1).await.is_err());
    assert!(lifecycle.update_progress(id, 101).await.is_err());
    assert_eq!(lifecycle.update_progress(id, 0).await.unwrap().progress_percentage, 0);
    assert_eq!(lifecycle.update_progress(id, 100).await.unwrap().progress_percentage, 100);
}

#[tokio::test]
async fn payment_is_independent_of_total() {
    let shop = Shop::default();
    let (_, id) = create(&shop).await;
    let updated = shop.lifecycle().update_payment_status(id, PaymentStatus::Paid).await.unwrap();
    assert_eq!(updated.payment_status, PaymentStatus::Paid);
    assert_eq!(updated.total_amount, Decimal::ZERO);
}

#[tokio::test]
async fn ledger_scenario() {
    let shop = Shop::default();
    let (_, id) = create(&shop).await;
    let ledger = shop.ledger();

    let oil = ledger.add_work_item(id, work("Oil change", dec!(1), dec!(1500))).await.unwrap();
    assert_eq!(oil.total_amount, dec!(1500));
    let filter = ledger.add_work_item(id, work("Filter", dec!(2), dec!(400))).await.unwrap();
    assert_eq!(filter.total_amount, dec!(2300));

    let filter_id = filter.work.unwrap().id;
    let removed = ledger.remove_work_item(id, filter_id).await.unwrap();
    assert_eq!(removed.total_amount, dec!(1500));
    assert_eq!(shop.snapshot().requests[&id].total_amount, dec!(1500));
}

#[tokio::test]
async fn ledger_boundaries() {
    let shop = Shop::default();
    let (_, id) = create(&shop).await;
    let ledger = shop.ledger();
    assert!(ledger.add_work_item(id, work("x", dec!(0), dec!(10))).await.is_err());
    assert!(ledger.add_work_item(id, work("x", dec!(1), dec!(-1))).await.is_err());
    let change = ledger.add_work_item(id, work("x", dec!(0.01), dec!(0))).await.unwrap();
    assert_eq!(change.total_amount, Decimal::ZERO);
}

#[tokio::test]
async fn total_always_matches_remaining_items() {
    let shop = Shop::default();
    let (_, id) = create(&shop).await;
    let ledger = shop.ledger();
    let prices = [dec!(0.33), dec!(1999.99), dec!(12.5), dec!(0), dec!(700)];
    let mut ids = vec![];
    for (i, price) in prices.iter().enumerate() {
        let change = ledger
            .add_work_item(id, work("part", Decimal::from(i as u32 + 1) / dec!(4), *price))
            .await
            .unwrap();
        ids.push(change.work.unwrap().id);
        assert_total_is_sum(&shop, id);
    }
    for work_id in ids.into_iter().step_by(2) {
        ledger.remove_work_item(id, work_id).await.unwrap();
        assert_total_is_sum(&shop, id);
    }
}

fn assert_total_is_sum(shop: &Shop, id: Uuid) {
    let tables = shop.snapshot();
    let sum: Decimal =
        tables.works.values().filter(|el| el.request_id == id).map(|el| el.total_price).sum();
    assert_eq!(tables.requests[&id].total_amount, sum);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_ledger_edits_keep_total_exact() {
    let shop = Shop::default();
    let (_, id) = create(&shop).await;
    let handles = (0..10)
        .map(|_| {
            let shop = shop.clone();
            tokio::spawn(async move {
                shop.ledger().add_work_item(id, work("Bolt", dec!(1), dec!(100))).await.unwrap()
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(shop.snapshot().requests[&id].total_amount, dec!(1000));
    assert_total_is_sum(&shop, id);
}

#[tokio::test]
async fn removing_foreign_item_is_not_found() {
    let shop = Shop::default();
    let (_, first) = create(&shop).await;
    let second = shop
        .lifecycle()
        .create(submission("Petr", "+70000000002"))
        .await
        .unwrap();
    let second = shop.tracking().get_by_number(&second.request_number).await.unwrap();
    assert_eq!(second.client.first_name, "Petr");

    let change = shop.ledger().add_work_item(first, work("Oil", dec!(1), dec!(10))).await.unwrap();
    let work_id = change.work.unwrap().id;
    let other = shop
        .snapshot()
        .requests
        .values()
        .find(|el| el.id != first)
        .unwrap()
        .id;
    let err = shop.ledger().remove_work_item(other, work_id).await.unwrap_err();
    assert!(matches!(err, RepairException::WorkItemNotFound { .. }));
    assert!(shop.snapshot().works.contains_key(&work_id));
}

#[tokio::test]
async fn token_and_number_views_are_identical() {
    let shop = Shop::default();
    let (receipt, id) = create(&shop).await;
    shop.ledger().add_work_item(id, work("Oil", dec!(1), dec!(1500))).await.unwrap();
    shop.lifecycle().update_status(id, RequestStatus::InProgress, None).await.unwrap();

    let tracking = shop.tracking();
    let by_token = tracking.get_by_token(&receipt.tracking_token).await.unwrap();
    let by_number = tracking.get_by_number(&receipt.request_number).await.unwrap();
    assert_eq!(by_token, by_number);
    assert_eq!(by_token.status_history[0].new_status, RequestStatus::InProgress);
    assert_eq!(by_token.works.len(), 1);

    let json = serde_json::to_value(&by_token).unwrap();
    assert!(json.get("trackingToken").is_none());
    assert!(json.get("id").is_none());
    assert!(json["client"].get("email").is_none());

    assert!(matches!(
        tracking.get_by_token("0".repeat(32).as_str()).await.unwrap_err(),
        RepairException::TrackingNotFound { .. }
    ));
}

#[tokio::test]
async fn detail_resolves_actor_names() {
    let shop = Shop::default();
    let (_, id) = create(&shop).await;
    let user = User {
        id: Uuid::new_v4(),
        email: "master@autoservice.local".to_string(),
        password_hash: String::new(),
        full_name: "Sergey Ivanov".to_string(),
        role: "admin".to_string(),
        created_at: Utc::now(),
    };
    shop.tables.lock().unwrap().users.insert(user.id, user.clone());
    shop.lifecycle().update_status(id, RequestStatus::InProgress, Some(user.id)).await.unwrap();

    let detail = shop.lifecycle().get_detail(id).await.unwrap();
    assert_eq!(detail.status_history.len(), 2);
    assert_eq!(detail.status_history[0].changed_by, "Sergey Ivanov");
    assert_eq!(detail.status_history[1].changed_by, "System");
}

#[tokio::test]
async fn list_filters_and_paginates() {
    let shop = Shop::default();
    for i in 0..5 {
        shop.lifecycle()
            .create(submission(if i % 2 == 0 { "Ivan" } else { "Petr" }, &format!("+7100000000{i}")))
            .await
            .unwrap();
    }
    let (_, cancelled) = create(&shop).await;
    shop.lifecycle().update_status(cancelled, RequestStatus::Cancelled, None).await.unwrap();

    let lifecycle = shop.lifecycle();
    let all = lifecycle.list(RequestFilter::default(), Pagination::new(Some(1), Some(4))).await.unwrap();
    assert_eq!(all.total, 6);
    assert_eq!(all.pages, 2);
    assert_eq!(all.items.len(), 4);
    assert!(all.items.windows(2).all(|w| w[0].request.created_at >= w[1].request.created_at));

    let petr = RequestFilter {
        status: None,
        search: Some("petr".to_string()),
    };
    assert_eq!(lifecycle.list(petr, Pagination::default()).await.unwrap().total, 2);

    let only_cancelled = RequestFilter {
        status: Some(RequestStatus::Cancelled),
        search: None,
    };
    let page = lifecycle.list(only_cancelled, Pagination::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].request.id, cancelled);
}

#[tokio::test]
async fn empty_dashboard() {
    let shop = Shop::default();
    let dashboard = shop.stats().get_dashboard().await.unwrap();
    assert_eq!(dashboard.stats.total_requests, 0);
    assert_eq!(dashboard.stats.requests_by_status.new, 0);
    assert_eq!(dashboard.stats.requests_by_status.in_progress, 0);
    assert_eq!(dashboard.stats.requests_by_status.completed, 0);
    assert_eq!(dashboard.stats.requests_by_status.cancelled, 0);
    assert_eq!(dashboard.stats.today_revenue, Decimal::ZERO);
    assert!(dashboard.recent_requests.is_empty());
}

#[tokio::test]
async fn dashboard_counts_today() {
    let shop = Shop::default();
    let (_, done) = create(&shop).await;
    let (_, open) = create_other(&shop, "+70000000002").await;
    shop.ledger().add_work_item(done, work("Engine", dec!(1), dec!(5000))).await.unwrap();
    shop.ledger().add_work_item(open, work("Oil", dec!(1), dec!(900))).await.unwrap();
    let lifecycle = shop.lifecycle();
    lifecycle.update_status(done, RequestStatus::InProgress, None).await.unwrap();
    lifecycle.update_status(done, RequestStatus::Completed, None).await.unwrap();

    let dashboard = shop.stats().get_dashboard().await.unwrap();
    let stats = dashboard.stats;
    assert_eq!(stats.total_requests, 2);
    assert_eq!(stats.requests_by_status.new, 1);
    assert_eq!(stats.requests_by_status.completed, 1);
    assert_eq!(stats.today_requests, 2);
    assert_eq!(stats.today_revenue, dec!(5000));
    assert_eq!(stats.pending_requests, 1);
    assert_eq!(dashboard.recent_requests.len(), 2);
    assert_eq!(dashboard.recent_requests[0].vehicle, "Toyota Camry");
}

async fn create_other(shop: &Shop, phone: &str) -> (SubmissionReceipt, Uuid) {
    let receipt = shop.lifecycle().create(submission("Petr", phone)).await.unwrap();
    let id = shop
        .snapshot()
        .requests
        .values()
        .find(|el| el.request_number == receipt.request_number)
        .unwrap()
        .id;
    (receipt, id)
}

pub mod client;
pub mod service_request;
pub mod status_history;
pub mod user;
pub mod vehicle;
pub mod work_item;

#[rustfmt::skip]
pub use {
    client::Client,
    service_request::ServiceRequest,
    status_history::StatusHistoryEntry,
    user::User,
    vehicle::Vehicle,
    work_item::WorkItem,
};

mod client;
mod service_request;
mod status_history;
mod user;
mod vehicle;
mod work_item;

pub mod config;
mod database;
pub mod error;
pub mod middleware;
mod repository;
mod service_provider;
pub mod telemetry;

pub use database::OrmRepo;
pub use service_provider::ServiceProvider;

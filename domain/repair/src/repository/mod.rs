mod client;
mod service_request;
mod status_history;
mod user;
mod vehicle;
mod work_item;

#[rustfmt::skip]
pub use {
    client::ClientRepo,
    service_request::ServiceRequestRepo,
    status_history::StatusHistoryRepo,
    user::UserRepo,
    vehicle::VehicleRepo,
    work_item::WorkItemRepo,
};

use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ReadOnlyRepository<T>: Send + Sync {
    /// `None` when nothing has this id.
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<T>>;
}

/// Writes are staged and only reach storage on [`MutableRepository::save_changed`].
#[async_trait]
pub trait MutableRepository<T>: Send + Sync {
    async fn insert(&self, entity: &T) -> anyhow::Result<Uuid>;

    async fn update(&self, entity: &T) -> anyhow::Result<()>;

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<()> {
        anyhow::bail!("Deleting by id: {id} is not supported here.")
    }

    /// Runs every staged write in one transaction. `Ok(false)` when nothing was staged.
    ///
    /// Fails with [`StaleWrite`] when a unique key is taken or a guarded update matched no row;
    /// nothing is written in that case.
    async fn save_changed(&self) -> anyhow::Result<bool>;
}

pub trait DBRepository<T>: ReadOnlyRepository<T> + MutableRepository<T> {}

/// A unit of work lost a race against another writer and can be retried from scratch.
#[derive(Debug, thiserror::Error)]
#[error("Stale write: {0}")]
pub struct StaleWrite(pub String);

pub fn is_stale_write(e: &anyhow::Error) -> bool {
    e.downcast_ref::<StaleWrite>().is_some()
}

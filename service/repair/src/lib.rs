mod auth;
mod identifier;
mod lifecycle;
mod parts;
mod stats;
mod tracking;
mod work_ledger;

pub use auth::{AuthServiceImpl, JwtSettings};
pub use identifier::RandomIdentifierService;
pub use lifecycle::RequestLifecycleServiceImpl;
pub use stats::StatsServiceImpl;
pub use tracking::TrackingServiceImpl;
pub use work_ledger::WorkLedgerServiceImpl;

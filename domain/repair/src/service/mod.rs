mod auth;
mod identifier;
mod lifecycle;
mod stats;
mod tracking;
mod work_ledger;

#[rustfmt::skip]
pub use {
    auth::AuthService,
    identifier::IdentifierService,
    lifecycle::RequestLifecycleService,
    stats::StatsService,
    tracking::TrackingService,
    work_ledger::WorkLedgerService,
};

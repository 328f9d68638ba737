pub mod auth;
pub mod dashboard;
pub mod detail;
pub mod ledger;
pub mod listing;
pub mod phone;
pub mod status;
pub mod submission;
pub mod tracking;

#[rustfmt::skip]
pub use {
    auth::{LoginForm, LoginOutcome, UserInfo, UserProfile},
    dashboard::{Dashboard, DashboardStats, RecentRequest, RequestCriteria, StatusCounts, TimeRange},
    detail::{HistoryLine, RequestDetail},
    ledger::{LedgerChange, WorkItemDraft},
    listing::{Pagination, PaginationResult, RequestFilter, RequestSummary},
    phone::canonical_phone,
    status::{PaymentStatus, RequestStatus},
    submission::{non_blank, ClientDraft, NewRequestSubmission, SubmissionReceipt, VehicleDraft},
    tracking::PublicRequestView,
};

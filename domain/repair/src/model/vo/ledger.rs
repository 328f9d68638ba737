use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::entity::WorkItem;

/// Body of a new work line. Numbers may come as JSON numbers or strings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemDraft {
    #[serde(default)]
    pub work_name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

/// Outcome of a ledger mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerChange {
    /// The added item, `None` after a removal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work: Option<WorkItem>,
    /// Request total after the change
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

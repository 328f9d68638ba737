use chrono::{DateTime, Utc};
use database_model::request_work;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exception::{RepairException, RepairResult, Validator};

/// Max fractional digits accepted for a quantity.
pub const QUANTITY_SCALE: u32 = 3;
/// Max fractional digits of money.
pub const MONEY_SCALE: u32 = 2;
/// Exclusive bound of a quantity, `numeric(12, 3)` holds nine integer digits.
pub const QUANTITY_LIMIT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);
/// Exclusive bound of any money value, `numeric(12, 2)` holds ten integer digits.
pub const MONEY_LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// One billable labor or part line of a request
pub struct WorkItem {
    pub id: Uuid,
    pub request_id: Uuid,
    pub work_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// quantity × unit_price, fixed at creation
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl WorkItem {
    pub fn new(
        request_id: Uuid,
        work_name: &str,
        quantity: Decimal,
        unit_price: Decimal,
        now: DateTime<Utc>,
    ) -> RepairResult<Self> {
        Validator::default()
            .require(work_name, "workName", "Work name is required")
            .check(quantity > Decimal::ZERO, "quantity", "Quantity must be positive")
            .check(
                quantity.normalize().scale() <= QUANTITY_SCALE,
                "quantity",
                "Quantity allows at most 3 decimal places",
            )
            .check(quantity < QUANTITY_LIMIT, "quantity", "Quantity must be below 1000000000")
            .check(
                unit_price >= Decimal::ZERO,
                "unitPrice",
                "Unit price must not be negative",
            )
            .check(
                unit_price.normalize().scale() <= MONEY_SCALE,
                "unitPrice",
                "Unit price allows at most 2 decimal places",
            )
            .check(unit_price < MONEY_LIMIT, "unitPrice", "Unit price must be below 10000000000")
            .finish()?;
        let total_price = line_total(quantity, unit_price)
            .filter(|el| *el < MONEY_LIMIT)
            .ok_or_else(|| {
                RepairException::validation("quantity", "Line total must be below 10000000000")
            })?;
        Ok(Self {
            id: Uuid::new_v4(),
            request_id,
            work_name: work_name.trim().to_string(),
            quantity,
            unit_price,
            total_price,
            created_at: now,
        })
    }
}

/// Exact product rounded half away from zero to whole kopecks, `None` on overflow.
pub fn line_total(quantity: Decimal, unit_price: Decimal) -> Option<Decimal> {
    quantity
        .checked_mul(unit_price)
        .map(|el| el.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero))
}

impl From<request_work::Model> for WorkItem {
    fn from(model: request_work::Model) -> Self {
        Self {
            id: model.id,
            request_id: model.request_id,
            work_name: model.work_name,
            quantity: model.quantity,
            unit_price: model.unit_price,
            total_price: model.total_price,
            created_at: model.created_at,
        }
    }
}

impl From<WorkItem> for request_work::Model {
    fn from(value: WorkItem) -> Self {
        Self {
            id: value.id,
            request_id: value.request_id,
            work_name: value.work_name,
            quantity: value.quantity,
            unit_price: value.unit_price,
            total_price: value.total_price,
            created_at: value.created_at,
        }
    }
}

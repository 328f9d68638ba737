use chrono::{DateTime, Utc};
use database_model::vehicle;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::vo::{non_blank, VehicleDraft};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub client_id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub vin: Option<String>,
    pub license_plate: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn from_draft(client_id: Uuid, draft: &VehicleDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            brand: draft.brand.trim().to_string(),
            model: draft.model.trim().to_string(),
            year: draft.year,
            vin: non_blank(&draft.vin),
            license_plate: non_blank(&draft.license_plate),
            created_at: now,
        }
    }

    /// `brand model`, as shown in lists
    pub fn summary(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

impl From<vehicle::Model> for Vehicle {
    fn from(model: vehicle::Model) -> Self {
        Self {
            id: model.id,
            client_id: model.client_id,
            brand: model.brand,
            model: model.model,
            year: model.year,
            vin: model.vin,
            license_plate: model.license_plate,
            created_at: model.created_at,
        }
    }
}

impl From<Vehicle> for vehicle::Model {
    fn from(value: Vehicle) -> Self {
        Self {
            id: value.id,
            client_id: value.client_id,
            brand: value.brand,
            model: value.model,
            year: value.year,
            vin: value.vin,
            license_plate: value.license_plate,
            created_at: value.created_at,
        }
    }
}

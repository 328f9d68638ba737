use serde::{Deserialize, Serialize};

use crate::exception::{RepairResult, Validator};

use super::canonical_phone;

/// Body of a public request submitted from the landing page.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewRequestSubmission {
    pub client: ClientDraft,
    pub vehicle: VehicleDraft,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientDraft {
    #[serde(default)]
    pub first_name: String,
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDraft {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    pub year: Option<i32>,
    pub vin: Option<String>,
    pub license_plate: Option<String>,
}

impl NewRequestSubmission {
    pub fn validate(&self) -> RepairResult<()> {
        let mut validator = Validator::default();
        validator
            .require(&self.client.first_name, "client.firstName", "First name is required")
            .require(&self.client.phone, "client.phone", "Phone is required");
        if !self.client.phone.trim().is_empty() {
            validator.check(
                canonical_phone(&self.client.phone).is_some(),
                "client.phone",
                "Phone must contain digits",
            );
        }
        validator
            .require(&self.vehicle.brand, "vehicle.brand", "Vehicle brand is required")
            .require(&self.vehicle.model, "vehicle.model", "Vehicle model is required")
            .check(
                self.vehicle.year.map_or(true, |y| (1900..=2100).contains(&y)),
                "vehicle.year",
                "Vehicle year is out of range",
            )
            .require(&self.description, "description", "Description is required")
            .finish()
    }
}

/// Empty strings coming from web forms mean "not provided".
pub fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().map(|v| v.trim()).filter(|v| !v.is_empty()).map(str::to_owned)
}

/// What the submitter gets back to follow the request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub request_number: String,
    pub tracking_token: String,
    pub tracking_url: String,
}

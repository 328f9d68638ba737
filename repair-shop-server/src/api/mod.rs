use std::str::FromStr;

use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::infrastructure::error::{ApiError, ApiResult};

pub mod auth;
pub mod dashboard;
pub mod dtos;
pub mod public;
pub mod requests;

fn extract_uuid(s: &str) -> ApiResult<Uuid> {
    Uuid::from_str(s)
        .map_err(|e| ApiError::invalid("id", format!(r#"error when parse uuid from "{s}": {e}"#)))
}

/// Turns malformed JSON bodies into the same 400 shape as other input errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|e, _| ApiError::invalid("body", e.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|e, _| ApiError::invalid("query", e.to_string()).into())
}

#[get("/health")]
pub async fn health() -> web::Json<dtos::HealthDto> {
    web::Json(dtos::HealthDto {
        status: "ok",
        timestamp: Utc::now(),
    })
}

pub async fn route_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(dtos::RouteNotFoundDto {
        error: "Route not found",
    })
}

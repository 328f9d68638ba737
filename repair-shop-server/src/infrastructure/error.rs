use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use domain_repair::exception::{ErrorKind, FieldError, RepairException};
use serde::Serialize;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub RepairException);

impl ApiError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self(RepairException::validation(field, message))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self(e.into())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self.0.kind() {
            ErrorKind::Internal => {
                tracing::error!("{:?}", self.0);
                "Internal server error".to_string()
            }
            ErrorKind::Unavailable => {
                tracing::error!("{}", self.0);
                self.0.to_string()
            }
            _ => self.0.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error,
            errors: self.0.field_errors(),
        })
    }
}

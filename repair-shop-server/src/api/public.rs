use actix_web::{get, post, web, HttpResponse};
use domain_repair::model::vo::NewRequestSubmission;

use super::dtos::{CreatedRequestDto, TrackedRequestDto};
use crate::infrastructure::{error::ApiResult, ServiceProvider};

#[post("public/requests")]
pub async fn create_request(
    sp: web::Data<ServiceProvider>,
    submission: web::Json<NewRequestSubmission>,
) -> ApiResult<HttpResponse> {
    let receipt = sp.scoped().lifecycle_service().create(submission.into_inner()).await?;
    Ok(HttpResponse::Created().json(CreatedRequestDto::from(receipt)))
}

#[get("public/track/number/{request_number}")]
pub async fn track_by_number(
    sp: web::Data<ServiceProvider>,
    request_number: web::Path<String>,
) -> ApiResult<web::Json<TrackedRequestDto>> {
    let request = sp.scoped().tracking_service().get_by_number(&request_number).await?;
    Ok(web::Json(TrackedRequestDto { request }))
}

#[get("public/track/{token}")]
pub async fn track_by_token(
    sp: web::Data<ServiceProvider>,
    token: web::Path<String>,
) -> ApiResult<web::Json<TrackedRequestDto>> {
    let request = sp.scoped().tracking_service().get_by_token(&token).await?;
    Ok(web::Json(TrackedRequestDto { request }))
}

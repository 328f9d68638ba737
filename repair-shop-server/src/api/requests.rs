use std::str::FromStr;

use actix_web::{delete, get, patch, post, web, HttpResponse};
use domain_repair::model::vo::{
    Pagination, RequestFilter, RequestStatus, UserInfo, WorkItemDraft,
};

use super::{
    dtos::{
        AssignMasterDto, ChangedField, LedgerChangeDto, ListRequestsQuery, RequestChangeDto,
        RequestDetailDto, RequestListDto, UpdatePaymentDto, UpdateProgressDto, UpdateStatusDto,
    },
    extract_uuid,
};
use crate::infrastructure::{
    error::{ApiError, ApiResult},
    ServiceProvider,
};

fn status_filter(status: Option<&str>) -> ApiResult<Option<RequestStatus>> {
    match status.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(status) => RequestStatus::from_str(status)
            .map(Some)
            .map_err(|e| ApiError::invalid("status", e.to_string())),
    }
}

#[get("requests")]
pub async fn list_requests(
    sp: web::Data<ServiceProvider>,
    query: web::Query<ListRequestsQuery>,
) -> ApiResult<web::Json<RequestListDto>> {
    let query = query.into_inner();
    let filter = RequestFilter {
        status: status_filter(query.status.as_deref())?,
        search: query.search,
    };
    let pagination = Pagination::new(query.page, query.limit);
    let result = sp.scoped().lifecycle_service().list(filter, pagination).await?;
    Ok(web::Json(result.into()))
}

#[get("requests/{id}")]
pub async fn get_request(
    sp: web::Data<ServiceProvider>,
    id: web::Path<String>,
) -> ApiResult<web::Json<RequestDetailDto>> {
    let id = extract_uuid(&id)?;
    let request = sp.scoped().lifecycle_service().get_detail(id).await?;
    Ok(web::Json(RequestDetailDto { request }))
}

#[patch("requests/{id}/status")]
pub async fn update_status(
    sp: web::Data<ServiceProvider>,
    user: web::ReqData<UserInfo>,
    id: web::Path<String>,
    body: web::Json<UpdateStatusDto>,
) -> ApiResult<web::Json<RequestChangeDto>> {
    let id = extract_uuid(&id)?;
    let request =
        sp.scoped().lifecycle_service().update_status(id, body.status, Some(user.id)).await?;
    Ok(web::Json(RequestChangeDto::new(
        request.id,
        ChangedField::Status(request.status),
        request.updated_at,
    )))
}

#[patch("requests/{id}/assign")]
pub async fn assign_master(
    sp: web::Data<ServiceProvider>,
    id: web::Path<String>,
    body: web::Json<AssignMasterDto>,
) -> ApiResult<web::Json<RequestChangeDto>> {
    let id = extract_uuid(&id)?;
    let request = sp.scoped().lifecycle_service().assign_master(id, &body.master_name).await?;
    Ok(web::Json(RequestChangeDto::new(
        request.id,
        ChangedField::AssignedMaster(request.assigned_master),
        request.updated_at,
    )))
}

#[patch("requests/{id}/progress")]
pub async fn update_progress(
    sp: web::Data<ServiceProvider>,
    id: web::Path<String>,
    body: web::Json<UpdateProgressDto>,
) -> ApiResult<web::Json<RequestChangeDto>> {
    let id = extract_uuid(&id)?;
    let request = sp.scoped().lifecycle_service().update_progress(id, body.progress).await?;
    Ok(web::Json(RequestChangeDto::new(
        request.id,
        ChangedField::ProgressPercentage(request.progress_percentage),
        request.updated_at,
    )))
}

#[patch("requests/{id}/payment")]
pub async fn update_payment(
    sp: web::Data<ServiceProvider>,
    id: web::Path<String>,
    body: web::Json<UpdatePaymentDto>,
) -> ApiResult<web::Json<RequestChangeDto>> {
    let id = extract_uuid(&id)?;
    let request =
        sp.scoped().lifecycle_service().update_payment_status(id, body.payment_status).await?;
    Ok(web::Json(RequestChangeDto::new(
        request.id,
        ChangedField::PaymentStatus(request.payment_status),
        request.updated_at,
    )))
}

#[post("requests/{id}/works")]
pub async fn add_work(
    sp: web::Data<ServiceProvider>,
    id: web::Path<String>,
    draft: web::Json<WorkItemDraft>,
) -> ApiResult<HttpResponse> {
    let id = extract_uuid(&id)?;
    let change = sp.scoped().work_ledger_service().add_work_item(id, draft.into_inner()).await?;
    Ok(HttpResponse::Created().json(LedgerChangeDto::from(change)))
}

#[delete("requests/{id}/works/{work_id}")]
pub async fn delete_work(
    sp: web::Data<ServiceProvider>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<LedgerChangeDto>> {
    let (id, work_id) = path.into_inner();
    let (id, work_id) = (extract_uuid(&id)?, extract_uuid(&work_id)?);
    let change = sp.scoped().work_ledger_service().remove_work_item(id, work_id).await?;
    Ok(web::Json(change.into()))
}

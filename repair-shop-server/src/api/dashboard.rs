use actix_web::{get, web};
use domain_repair::model::vo::Dashboard;

use crate::infrastructure::{error::ApiResult, ServiceProvider};

#[get("dashboard/stats")]
pub async fn get_stats(sp: web::Data<ServiceProvider>) -> ApiResult<web::Json<Dashboard>> {
    let dashboard = sp.scoped().stats_service().get_dashboard().await?;
    Ok(web::Json(dashboard))
}

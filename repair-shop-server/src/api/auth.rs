use actix_web::{post, web};
use domain_repair::model::vo::{LoginForm, LoginOutcome};

use crate::infrastructure::{error::ApiResult, ServiceProvider};

#[post("auth/login")]
pub async fn login(
    sp: web::Data<ServiceProvider>,
    form: web::Json<LoginForm>,
) -> ApiResult<web::Json<LoginOutcome>> {
    let outcome = sp.auth_service().login(form.into_inner()).await?;
    Ok(web::Json(outcome))
}

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use domain_repair::{
    exception::{RepairException, RepairResult},
    model::vo::UserInfo,
    service::AuthService,
};
use futures::future::LocalBoxFuture;

use crate::infrastructure::error::ApiError;

/// Rejects requests without a valid bearer token and puts the caller's [`UserInfo`]
/// into the request extensions.
pub struct JwtValidationMiddleware {
    auth_service: Arc<dyn AuthService>,
}

impl JwtValidationMiddleware {
    pub fn new(auth_service: Arc<dyn AuthService>) -> Self {
        Self { auth_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtValidationMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtValidation<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtValidation {
            service: Rc::new(service),
            auth_service: self.auth_service.clone(),
        }))
    }
}

pub struct JwtValidation<S> {
    service: Rc<S>,
    auth_service: Arc<dyn AuthService>,
}

impl<S, B> Service<ServiceRequest> for JwtValidation<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let user_info = req
            .headers()
            .get("Authorization")
            .map(|el| el.to_str().unwrap_or_default())
            .ok_or_else(|| unauthorized("No token."))
            .and_then(bearer_token)
            .and_then(|token| self.auth_service.verify(token));
        Box::pin(async move {
            match user_info {
                Ok(user_info) => {
                    req.extensions_mut().insert(user_info);
                    service.call(req).await
                }
                Err(e) => {
                    tracing::debug!("{} {} rejected: {e}", req.method(), req.path());
                    Err(ApiError(e).into())
                }
            }
        })
    }
}

fn unauthorized(reason: &str) -> RepairException {
    RepairException::Unauthorized {
        reason: reason.to_string(),
    }
}

fn bearer_token(authorization: &str) -> RepairResult<&str> {
    match authorization.split_whitespace().collect::<Vec<&str>>()[..] {
        ["Bearer", token] => Ok(token),
        _ => Err(unauthorized("Not Bearer Token.")),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{
        http::{header, StatusCode},
        test, web, App, HttpResponse,
    };
    use uuid::Uuid;

    use super::*;

    struct FixedTokens;

    #[async_trait::async_trait]
    impl AuthService for FixedTokens {
        async fn login(
            &self,
            _form: domain_repair::model::vo::LoginForm,
        ) -> RepairResult<domain_repair::model::vo::LoginOutcome> {
            unreachable!()
        }

        fn verify(&self, token: &str) -> RepairResult<UserInfo> {
            match token {
                "good" => Ok(UserInfo {
                    id: Uuid::nil(),
                    email: "admin@autoservice.local".to_string(),
                    role: "admin".to_string(),
                }),
                _ => Err(unauthorized("bad signature")),
            }
        }
    }

    async fn whoami(user: web::ReqData<UserInfo>) -> HttpResponse {
        HttpResponse::Ok().body(user.email.clone())
    }

    async fn status_of(authorization: Option<&str>) -> StatusCode {
        let app = test::init_service(
            App::new().service(
                web::scope("/api")
                    .wrap(JwtValidationMiddleware::new(Arc::new(FixedTokens)))
                    .route("/me", web::get().to(whoami)),
            ),
        )
        .await;
        let mut req = test::TestRequest::get().uri("/api/me");
        if let Some(value) = authorization {
            req = req.insert_header((header::AUTHORIZATION, value));
        }
        match test::try_call_service(&app, req.to_request()).await {
            Ok(res) => res.status(),
            Err(e) => e.as_response_error().status_code(),
        }
    }

    #[actix_web::test]
    async fn valid_bearer_reaches_the_handler() {
        assert_eq!(status_of(Some("Bearer good")).await, StatusCode::OK);
    }

    #[actix_web::test]
    async fn anything_else_is_unauthorized() {
        for header in [None, Some("Bearer bad"), Some("good"), Some("Basic good")] {
            assert_eq!(status_of(header).await, StatusCode::UNAUTHORIZED, "{header:?}");
        }
    }
}

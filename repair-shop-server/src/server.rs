use std::sync::Arc;

use actix_web::web;
use colored::Colorize;
use tracing::{error, info};

use crate::api;
use crate::infrastructure::config::{build_config, ShopConfig};
use crate::infrastructure::middleware::authorization::JwtValidationMiddleware;
use crate::infrastructure::telemetry::initialize_telemetry;
use crate::infrastructure::ServiceProvider;

pub fn run() {
    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build runtime".red(), e);
        }
    };
    runtime.block_on(async_run());
}

pub async fn async_run() {
    let config = match build_config().and_then(|x| Ok(x.try_deserialize::<ShopConfig>()?)) {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build config".red(), e);
        }
    };
    if let Err(e) = initialize_telemetry(config.common().telemetry()) {
        return eprintln!("{}: {}", "Cannot build logger".red(), e);
    };
    let service_provider = match ServiceProvider::build(config).await {
        Ok(x) => Arc::new(x),
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build Service Provider".red(), e);
        }
    };
    tokio::select! {
        _ = initialize_web_host(service_provider) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Stopping Services (ctrl-c handling).");
        }
    }
}

fn cors(allowed_origins: &[String]) -> actix_cors::Cors {
    let cors = actix_cors::Cors::default().allow_any_header().allow_any_method().max_age(86400);
    if allowed_origins.is_empty() {
        return cors.allow_any_origin();
    }
    allowed_origins
        .iter()
        .fold(cors.supports_credentials(), |cors, origin| cors.allowed_origin(origin))
}

pub async fn initialize_web_host(sp: Arc<ServiceProvider>) {
    let host = sp.config().common().host().clone();
    let allowed_origins = sp.config().cors().allowed_origins().clone();
    info!(
        "Listening on {}:{}, tracking links point at {}",
        host.bind_address(),
        host.bind_port(),
        sp.config().frontend_url()
    );
    let server = actix_web::HttpServer::new(move || {
        actix_web::App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(cors(&allowed_origins))
            .app_data(api::json_config())
            .app_data(api::query_config())
            .app_data(web::Data::from(sp.clone()))
            .service(api::health)
            .service(
                web::scope("/api")
                    .service(api::auth::login)
                    .service(api::public::create_request)
                    .service(api::public::track_by_number)
                    .service(api::public::track_by_token)
                    .service(
                        web::scope("")
                            .wrap(JwtValidationMiddleware::new(sp.auth_service()))
                            .service(api::requests::list_requests)
                            .service(api::requests::get_request)
                            .service(api::requests::update_status)
                            .service(api::requests::assign_master)
                            .service(api::requests::update_progress)
                            .service(api::requests::update_payment)
                            .service(api::requests::add_work)
                            .service(api::requests::delete_work)
                            .service(api::dashboard::get_stats),
                    ),
            )
            .default_service(web::to(api::route_not_found))
    })
    .bind((host.bind_address().to_owned(), *host.bind_port()));
    let server = match server {
        Ok(x) => x,
        Err(e) => {
            return error!("Cannot bind {}:{}: {}", host.bind_address(), host.bind_port(), e);
        }
    };
    match server.disable_signals().run().await {
        Ok(_) => info!("Web server stopped successfully."),
        Err(e) => error!("Web server into error: {}", e),
    }
}

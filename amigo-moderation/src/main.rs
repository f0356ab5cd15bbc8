use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod events;
mod models;
mod routes;
mod schema;
mod services;

use amigo_shared::clients::db::{create_pool, DbPool};
use amigo_shared::clients::email::EmailClient;
use amigo_shared::clients::push::PushClient;
use amigo_shared::clients::rabbitmq::RabbitMqClient;
use config::AppConfig;

pub struct AppState {
    pub db: DbPool,
    pub config: AppConfig,
    pub rabbitmq: RabbitMqClient,
    pub email: EmailClient,
    pub push: PushClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    amigo_shared::middleware::init_tracing("amigo-moderation");

    let config = AppConfig::load()?;
    let port = config.port;

    let db = create_pool(&config.database_url)?;
    let rabbitmq = RabbitMqClient::connect(&config.rabbitmq_url).await?;
    let email = EmailClient::new(&config.resend_api_key, &config.email_from, &config.email_from_name);
    let push = PushClient::new();

    let state = Arc::new(AppState { db, config, rabbitmq, email, push });

    let admin_routes = Router::new()
        .route("/reports", get(routes::admin_routes::list_reports))
        .route("/reports/:id", get(routes::admin_routes::get_report))
        .route("/reports/:id/resolve", put(routes::admin_routes::resolve_report))
        .route("/registrations", get(routes::admin_routes::list_pending_registrations))
        .route("/registrations/:id", put(routes::admin_routes::review_registration))
        .route("/providers/:id/reports", get(routes::admin_routes::get_provider_reports))
        .route("/stats", get(routes::admin_routes::get_stats))
        .route("/audit-log", get(routes::admin_routes::get_audit_log));

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/report", post(routes::user_routes::create_report))
        .nest("/admin", admin_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, "amigo-moderation starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

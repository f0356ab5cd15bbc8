use axum::Json;
use amigo_shared::types::api::HealthResponse;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy("amigo-moderation", env!("CARGO_PKG_VERSION")))
}

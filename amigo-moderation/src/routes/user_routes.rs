use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use amigo_shared::errors::{AppError, AppResult, ErrorCode};
use amigo_shared::types::api::ApiResponse;
use amigo_shared::types::auth::AuthUser;

use crate::events::publisher;
use crate::models::{NewReport, Report};
use crate::schema::reports;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    pub provider_id: Uuid,
    pub reason: String,
    pub description: String,
}

pub async fn create_report(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<CreateReportRequest>,
) -> AppResult<Json<ApiResponse<Report>>> {
    // Cannot report self
    if auth.id == body.provider_id {
        return Err(AppError::new(ErrorCode::CannotReportSelf, "you cannot report yourself"));
    }

    if body.reason.trim().is_empty() {
        return Err(AppError::new(ErrorCode::ValidationError, "reason is required"));
    }

    let mut conn = state.db.get()
        .map_err(|e| AppError::internal(format!("db pool error: {e}")))?;

    // Check for duplicate pending report from same reporter against same provider
    let existing: i64 = reports::table
        .filter(reports::reporter_id.eq(auth.id))
        .filter(reports::provider_id.eq(body.provider_id))
        .filter(reports::status.eq("pending"))
        .count()
        .get_result(&mut conn)
        .map_err(|e| AppError::internal(format!("db error: {e}")))?;

    if existing > 0 {
        return Err(AppError::new(
            ErrorCode::DuplicateReport,
            "you already have a pending report against this provider",
        ));
    }

    let new_report = NewReport {
        reporter_id: auth.id,
        provider_id: body.provider_id,
        reason: body.reason,
        description: body.description,
    };

    let report: Report = diesel::insert_into(reports::table)
        .values(&new_report)
        .get_result(&mut conn)
        .map_err(|e| AppError::internal(format!("failed to create report: {e}")))?;

    publisher::publish_report_filed(
        &state.rabbitmq,
        report.id,
        report.reporter_id,
        report.provider_id,
        &report.reason,
    )
    .await;

    Ok(Json(ApiResponse::ok(report)))
}

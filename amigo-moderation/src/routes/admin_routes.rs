use axum::extract::{Path, Query, State};
use axum::Json;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use amigo_shared::errors::{AppError, AppResult, ErrorCode};
use amigo_shared::middleware::AdminUser;
use amigo_shared::types::api::ApiResponse;
use amigo_shared::types::pagination::{Paginated, PaginationParams};

use crate::models::{AdminAction, NewAdminAction, Provider, Report};
use crate::schema::{admin_actions, providers, reports};
use crate::services::{notify, sanction};
use crate::AppState;

// --- Request / Response types ---

#[derive(Debug, Deserialize)]
pub struct ReportFilterParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    pub status: Option<String>,
}

fn default_page() -> u64 { 1 }
fn default_per_page() -> u64 { 20 }

impl ReportFilterParams {
    fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// What the back-office needs to know about the accused alongside a report.
#[derive(Debug, Serialize)]
pub struct AccusedSummary {
    pub name: String,
    pub photo_url: Option<String>,
    pub infraction_count: i32,
}

impl AccusedSummary {
    fn deleted() -> Self {
        Self {
            name: "Deleted user".to_string(),
            photo_url: None,
            infraction_count: 0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportWithAccused {
    #[serde(flatten)]
    pub report: Report,
    pub accused: AccusedSummary,
}

#[derive(Debug, Deserialize)]
pub struct ResolveReportRequest {
    pub action: sanction::RequestedAction,
}

#[derive(Debug, Serialize)]
pub struct ResolveReportResponse {
    pub applied_action: String,
    pub infraction_count: i32,
    pub report: Report,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationDecision {
    Accept,
    Reject,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRegistrationRequest {
    pub decision: RegistrationDecision,
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub active_providers: i64,
    pub blocked_providers: i64,
    pub pending_reports: i64,
    pub pending_registrations: i64,
}

// --- List reports (paginated, optional status filter, accused summary) ---

pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(params): Query<ReportFilterParams>,
) -> AppResult<Json<ApiResponse<Paginated<ReportWithAccused>>>> {
    let mut conn = state.db.get()
        .map_err(|e| AppError::internal(format!("db pool error: {e}")))?;

    let pagination = params.pagination();
    let offset = pagination.offset() as i64;
    let limit = pagination.limit() as i64;

    let (items, total): (Vec<Report>, i64) = if let Some(ref status) = params.status {
        let items = reports::table
            .filter(reports::status.eq(status))
            .order(reports::created_at.desc())
            .offset(offset)
            .limit(limit)
            .load::<Report>(&mut conn)
            .map_err(|e| AppError::internal(format!("db error: {e}")))?;

        let total: i64 = reports::table
            .filter(reports::status.eq(status))
            .count()
            .get_result(&mut conn)
            .map_err(|e| AppError::internal(format!("db error: {e}")))?;

        (items, total)
    } else {
        let items = reports::table
            .order(reports::created_at.desc())
            .offset(offset)
            .limit(limit)
            .load::<Report>(&mut conn)
            .map_err(|e| AppError::internal(format!("db error: {e}")))?;

        let total: i64 = reports::table
            .count()
            .get_result(&mut conn)
            .map_err(|e| AppError::internal(format!("db error: {e}")))?;

        (items, total)
    };

    // Attach the accused provider summary; a deleted provider gets a placeholder
    let provider_ids: Vec<Uuid> = items.iter().map(|r| r.provider_id).collect();
    let accused: HashMap<Uuid, Provider> = providers::table
        .filter(providers::id.eq_any(&provider_ids))
        .load::<Provider>(&mut conn)
        .map_err(|e| AppError::internal(format!("db error: {e}")))?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let items: Vec<ReportWithAccused> = items
        .into_iter()
        .map(|report| {
            let summary = accused
                .get(&report.provider_id)
                .map(|p| AccusedSummary {
                    name: p.name.clone(),
                    photo_url: p.photo_url.clone(),
                    infraction_count: p.infraction_count,
                })
                .unwrap_or_else(AccusedSummary::deleted);
            ReportWithAccused { report, accused: summary }
        })
        .collect();

    let paginated = Paginated::new(items, total as u64, &pagination);
    Ok(Json(ApiResponse::ok(paginated)))
}

// --- Get report details ---

pub async fn get_report(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(report_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Report>>> {
    let mut conn = state.db.get()
        .map_err(|e| AppError::internal(format!("db pool error: {e}")))?;

    let report = reports::table
        .find(report_id)
        .first::<Report>(&mut conn)
        .optional()
        .map_err(|e| AppError::internal(format!("db error: {e}")))?
        .ok_or_else(|| AppError::new(ErrorCode::ReportNotFound, "report not found"))?;

    Ok(Json(ApiResponse::ok(report)))
}

// --- Resolve report (strike or ban, with auto-escalation) ---

pub async fn resolve_report(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
    Path(report_id): Path<Uuid>,
    Json(body): Json<ResolveReportRequest>,
) -> AppResult<Json<ApiResponse<ResolveReportResponse>>> {
    let resolution = sanction::resolve_report(&state.db, report_id, admin.0.id, body.action)?;

    tracing::info!(
        report_id = %report_id,
        provider_id = %resolution.provider.id,
        requested = resolution.requested.as_str(),
        applied = resolution.decision.applied_action(),
        infraction_count = resolution.decision.infraction_count(),
        "report resolved"
    );

    notify::spawn_resolution_effects(state.clone(), &resolution);

    Ok(Json(ApiResponse::ok(ResolveReportResponse {
        applied_action: resolution.decision.applied_action().to_string(),
        infraction_count: resolution.decision.infraction_count(),
        report: resolution.report,
    })))
}

// --- List pending registrations ---

pub async fn list_pending_registrations(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<Paginated<Provider>>>> {
    let mut conn = state.db.get()
        .map_err(|e| AppError::internal(format!("db pool error: {e}")))?;

    let offset = params.offset() as i64;
    let limit = params.limit() as i64;

    let items = providers::table
        .filter(providers::account_status.eq("pending"))
        .order(providers::created_at.asc())
        .offset(offset)
        .limit(limit)
        .load::<Provider>(&mut conn)
        .map_err(|e| AppError::internal(format!("db error: {e}")))?;

    let total: i64 = providers::table
        .filter(providers::account_status.eq("pending"))
        .count()
        .get_result(&mut conn)
        .map_err(|e| AppError::internal(format!("db error: {e}")))?;

    let paginated = Paginated::new(items, total as u64, &params);
    Ok(Json(ApiResponse::ok(paginated)))
}

// --- Review registration (accept / reject) ---

pub async fn review_registration(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
    Path(provider_id): Path<Uuid>,
    Json(body): Json<ReviewRegistrationRequest>,
) -> AppResult<Json<ApiResponse<Provider>>> {
    let mut conn = state.db.get()
        .map_err(|e| AppError::internal(format!("db pool error: {e}")))?;

    let provider = providers::table
        .find(provider_id)
        .first::<Provider>(&mut conn)
        .optional()
        .map_err(|e| AppError::internal(format!("db error: {e}")))?
        .ok_or_else(|| AppError::new(ErrorCode::ProviderNotFound, "provider not found"))?;

    if provider.account_status != "pending" {
        return Err(AppError::new(
            ErrorCode::RegistrationAlreadyDecided,
            "this registration has already been decided",
        ));
    }

    let accepted = matches!(body.decision, RegistrationDecision::Accept);
    let new_status = if accepted { "accepted" } else { "rejected" };

    let provider: Provider = diesel::update(providers::table.find(provider_id))
        .set((
            providers::is_active.eq(accepted),
            providers::account_status.eq(new_status),
        ))
        .get_result(&mut conn)
        .map_err(|e| AppError::internal(format!("failed to update provider: {e}")))?;

    let admin_action = NewAdminAction {
        admin_id: admin.0.id,
        action: format!("review_registration_{new_status}"),
        target_provider_id: Some(provider_id),
        details: None,
    };

    diesel::insert_into(admin_actions::table)
        .values(&admin_action)
        .execute(&mut conn)
        .map_err(|e| AppError::internal(format!("failed to log admin action: {e}")))?;

    notify::spawn_registration_effects(state.clone(), provider.clone(), accepted);

    Ok(Json(ApiResponse::ok(provider)))
}

// --- Report history for one provider ---

pub async fn get_provider_reports(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(provider_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<Report>>>> {
    let mut conn = state.db.get()
        .map_err(|e| AppError::internal(format!("db pool error: {e}")))?;

    let history = reports::table
        .filter(reports::provider_id.eq(provider_id))
        .order(reports::created_at.desc())
        .load::<Report>(&mut conn)
        .map_err(|e| AppError::internal(format!("db error: {e}")))?;

    Ok(Json(ApiResponse::ok(history)))
}

// --- Dashboard stats ---

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let mut conn = state.db.get()
        .map_err(|e| AppError::internal(format!("db pool error: {e}")))?;

    let active_providers: i64 = providers::table
        .filter(providers::is_active.eq(true))
        .count()
        .get_result(&mut conn)
        .map_err(|e| AppError::internal(format!("db error: {e}")))?;

    let blocked_providers: i64 = providers::table
        .filter(providers::account_status.eq("blocked"))
        .count()
        .get_result(&mut conn)
        .map_err(|e| AppError::internal(format!("db error: {e}")))?;

    let pending_reports: i64 = reports::table
        .filter(reports::status.eq("pending"))
        .count()
        .get_result(&mut conn)
        .map_err(|e| AppError::internal(format!("db error: {e}")))?;

    let pending_registrations: i64 = providers::table
        .filter(providers::account_status.eq("pending"))
        .count()
        .get_result(&mut conn)
        .map_err(|e| AppError::internal(format!("db error: {e}")))?;

    Ok(Json(ApiResponse::ok(DashboardStats {
        active_providers,
        blocked_providers,
        pending_reports,
        pending_registrations,
    })))
}

// --- Audit log (paginated admin actions) ---

pub async fn get_audit_log(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<Paginated<AdminAction>>>> {
    let mut conn = state.db.get()
        .map_err(|e| AppError::internal(format!("db pool error: {e}")))?;

    let offset = params.offset() as i64;
    let limit = params.limit() as i64;

    let items = admin_actions::table
        .order(admin_actions::created_at.desc())
        .offset(offset)
        .limit(limit)
        .load::<AdminAction>(&mut conn)
        .map_err(|e| AppError::internal(format!("db error: {e}")))?;

    let total: i64 = admin_actions::table
        .count()
        .get_result(&mut conn)
        .map_err(|e| AppError::internal(format!("db error: {e}")))?;

    let paginated = Paginated::new(items, total as u64, &params);
    Ok(Json(ApiResponse::ok(paginated)))
}

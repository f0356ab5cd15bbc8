use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::schema::{admin_actions, providers, reports};

// --- Report ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = reports)]
pub struct Report {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub provider_id: Uuid,
    pub reason: String,
    pub description: String,
    pub status: String,
    pub action_taken: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = reports)]
pub struct NewReport {
    pub reporter_id: Uuid,
    pub provider_id: Uuid,
    pub reason: String,
    pub description: String,
}

// --- Provider ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = providers)]
pub struct Provider {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub push_token: Option<String>,
    pub infraction_count: i32,
    pub is_active: bool,
    pub account_status: String,
    pub created_at: DateTime<Utc>,
}

// --- AdminAction ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = admin_actions)]
pub struct AdminAction {
    pub id: Uuid,
    pub admin_id: Uuid,
    pub action: String,
    pub target_provider_id: Option<Uuid>,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = admin_actions)]
pub struct NewAdminAction {
    pub admin_id: Uuid,
    pub action: String,
    pub target_provider_id: Option<Uuid>,
    pub details: Option<serde_json::Value>,
}

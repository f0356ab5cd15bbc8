use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use amigo_shared::clients::db::DbPool;
use amigo_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::{NewAdminAction, Provider, Report};
use crate::schema::{admin_actions, providers, reports};

/// Number of recorded infractions at which an account is suspended.
pub const INFRACTION_LIMIT: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestedAction {
    Strike,
    Ban,
}

impl RequestedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strike => "strike",
            Self::Ban => "ban",
        }
    }
}

/// Effective outcome of a moderation decision.
///
/// The requested action is not always the applied one: a strike that lands on
/// the infraction limit escalates into a ban. A direct ban is a separate
/// severity tier and leaves the counter untouched, so a blocked provider can
/// legitimately carry fewer than `INFRACTION_LIMIT` infractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Strike { count: i32 },
    AutoEscalatedBan { count: i32 },
    DirectBan { count: i32 },
}

impl Decision {
    pub fn decide(requested: RequestedAction, infraction_count: i32) -> Self {
        match requested {
            RequestedAction::Strike => {
                let count = infraction_count + 1;
                if count >= INFRACTION_LIMIT {
                    Self::AutoEscalatedBan { count }
                } else {
                    Self::Strike { count }
                }
            }
            RequestedAction::Ban => Self::DirectBan { count: infraction_count },
        }
    }

    pub fn is_ban(&self) -> bool {
        !matches!(self, Self::Strike { .. })
    }

    /// The action recorded on the report ("strike" or "ban").
    pub fn applied_action(&self) -> &'static str {
        if self.is_ban() { "ban" } else { "strike" }
    }

    pub fn infraction_count(&self) -> i32 {
        match self {
            Self::Strike { count }
            | Self::AutoEscalatedBan { count }
            | Self::DirectBan { count } => *count,
        }
    }
}

/// Resolution is only valid against a pending report; a reviewed report is
/// terminal and re-resolving it would double-count a strike.
fn ensure_pending(report: &Report) -> AppResult<()> {
    if report.status != "pending" {
        return Err(AppError::new(
            ErrorCode::ReportAlreadyReviewed,
            "this report has already been reviewed",
        ));
    }
    Ok(())
}

#[derive(Debug)]
pub struct Resolution {
    pub report: Report,
    pub provider: Provider,
    pub requested: RequestedAction,
    pub decision: Decision,
}

/// Resolve a pending report against its accused provider.
///
/// Report load, provider lock, decision, and both writes run in one
/// transaction so concurrent resolutions against the same provider serialize
/// on the row lock and the counter cannot lose updates. Reaching the
/// infraction limit therefore always coincides with the account being
/// blocked.
pub fn resolve_report(
    pool: &DbPool,
    report_id: Uuid,
    admin_id: Uuid,
    requested: RequestedAction,
) -> AppResult<Resolution> {
    let mut conn = pool
        .get()
        .map_err(|e| AppError::internal(format!("db pool error: {e}")))?;

    conn.transaction::<_, AppError, _>(|conn| {
        let report = reports::table
            .find(report_id)
            .first::<Report>(conn)
            .optional()?
            .ok_or_else(|| AppError::new(ErrorCode::ReportNotFound, "report not found"))?;

        ensure_pending(&report)?;

        let provider = providers::table
            .find(report.provider_id)
            .for_update()
            .first::<Provider>(conn)
            .optional()?
            .ok_or_else(|| AppError::new(ErrorCode::ProviderNotFound, "accused provider not found"))?;

        let decision = Decision::decide(requested, provider.infraction_count);

        let report: Report = diesel::update(reports::table.find(report_id))
            .set((
                reports::status.eq("reviewed"),
                reports::action_taken.eq(decision.applied_action()),
                reports::reviewed_by.eq(admin_id),
                reports::reviewed_at.eq(Utc::now()),
            ))
            .get_result(conn)?;

        let provider: Provider = if decision.is_ban() {
            diesel::update(providers::table.find(provider.id))
                .set((
                    providers::infraction_count.eq(decision.infraction_count()),
                    providers::is_active.eq(false),
                    providers::account_status.eq("blocked"),
                ))
                .get_result(conn)?
        } else {
            diesel::update(providers::table.find(provider.id))
                .set(providers::infraction_count.eq(decision.infraction_count()))
                .get_result(conn)?
        };

        let admin_action = NewAdminAction {
            admin_id,
            action: format!("resolve_report_{}", decision.applied_action()),
            target_provider_id: Some(provider.id),
            details: Some(serde_json::json!({
                "report_id": report_id,
                "requested_action": requested.as_str(),
                "applied_action": decision.applied_action(),
                "infraction_count": decision.infraction_count(),
            })),
        };

        diesel::insert_into(admin_actions::table)
            .values(&admin_action)
            .execute(conn)?;

        Ok(Resolution {
            report,
            provider,
            requested,
            decision,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strike_below_limit_stays_a_strike() {
        assert_eq!(
            Decision::decide(RequestedAction::Strike, 0),
            Decision::Strike { count: 1 }
        );
        assert_eq!(
            Decision::decide(RequestedAction::Strike, 1),
            Decision::Strike { count: 2 }
        );
    }

    #[test]
    fn third_strike_escalates_into_a_ban() {
        let decision = Decision::decide(RequestedAction::Strike, 2);
        assert_eq!(decision, Decision::AutoEscalatedBan { count: 3 });
        assert!(decision.is_ban());
        assert_eq!(decision.applied_action(), "ban");
        assert_eq!(decision.infraction_count(), 3);
    }

    #[test]
    fn strike_beyond_limit_still_bans() {
        // Counter already at the limit (e.g. data predating the escalation rule)
        let decision = Decision::decide(RequestedAction::Strike, 5);
        assert_eq!(decision, Decision::AutoEscalatedBan { count: 6 });
    }

    #[test]
    fn direct_ban_does_not_touch_the_counter() {
        for count in [0, 1, 2] {
            let decision = Decision::decide(RequestedAction::Ban, count);
            assert_eq!(decision, Decision::DirectBan { count });
            assert!(decision.is_ban());
            assert_eq!(decision.infraction_count(), count);
        }
    }

    fn sample_report(status: &str) -> Report {
        Report {
            id: Uuid::now_v7(),
            reporter_id: Uuid::now_v7(),
            provider_id: Uuid::now_v7(),
            reason: "harassment".to_string(),
            description: "details".to_string(),
            status: status.to_string(),
            action_taken: None,
            reviewed_by: None,
            reviewed_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn resolving_a_reviewed_report_is_rejected() {
        let err = ensure_pending(&sample_report("reviewed")).unwrap_err();
        match err {
            AppError::Known { code, .. } => assert_eq!(code, ErrorCode::ReportAlreadyReviewed),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn pending_report_passes_the_precondition() {
        assert!(ensure_pending(&sample_report("pending")).is_ok());
    }

    #[test]
    fn strike_is_not_a_ban() {
        let decision = Decision::decide(RequestedAction::Strike, 0);
        assert!(!decision.is_ban());
        assert_eq!(decision.applied_action(), "strike");
    }
}

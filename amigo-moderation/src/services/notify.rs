use std::sync::Arc;

use crate::events::publisher;
use crate::models::Provider;
use crate::services::sanction::{Decision, Resolution, INFRACTION_LIMIT};
use crate::AppState;

/// Push notification content for a sanction outcome.
fn sanction_push_content(decision: &Decision) -> (String, String) {
    match decision {
        Decision::Strike { count } => (
            "Infraction recorded".to_string(),
            format!(
                "A report against you was validated. You have {count}/{INFRACTION_LIMIT} infractions."
            ),
        ),
        Decision::AutoEscalatedBan { .. } | Decision::DirectBan { .. } => (
            "Account suspended".to_string(),
            "Your account has been permanently suspended following validated reports.".to_string(),
        ),
    }
}

/// Fire the post-commit side effects of a resolution: domain event, push
/// notification (when the provider registered a token), and email. Runs
/// detached from the admin request; failures are logged and never surfaced.
pub fn spawn_resolution_effects(state: Arc<AppState>, resolution: &Resolution) {
    let provider = resolution.provider.clone();
    let requested = resolution.requested;
    let decision = resolution.decision;
    let report_id = resolution.report.id;

    tokio::spawn(async move {
        publisher::publish_sanction_applied(
            &state.rabbitmq,
            report_id,
            provider.id,
            requested.as_str(),
            decision.applied_action(),
            decision.infraction_count(),
        )
        .await;

        let (title, body) = sanction_push_content(&decision);
        if let Some(token) = provider.push_token.as_deref() {
            if let Err(e) = state
                .push
                .send_push(
                    token,
                    &title,
                    &body,
                    Some(serde_json::json!({ "report_id": report_id })),
                )
                .await
            {
                tracing::warn!(error = %e, provider_id = %provider.id, "failed to send sanction push");
            }
        }

        let email_result = match decision {
            Decision::Strike { count } => {
                state
                    .email
                    .send_strike_notice(&provider.email, &provider.name, count, INFRACTION_LIMIT)
                    .await
            }
            Decision::AutoEscalatedBan { .. } | Decision::DirectBan { .. } => {
                state.email.send_ban_notice(&provider.email, &provider.name).await
            }
        };
        if let Err(e) = email_result {
            tracing::warn!(error = %e, provider_id = %provider.id, "failed to send sanction email");
        }
    });
}

/// Side effects of a registration decision: domain event and outcome email.
pub fn spawn_registration_effects(state: Arc<AppState>, provider: Provider, accepted: bool) {
    tokio::spawn(async move {
        publisher::publish_registration_decided(&state.rabbitmq, provider.id, accepted).await;

        if let Err(e) = state
            .email
            .send_registration_decision(&provider.email, &provider.name, accepted)
            .await
        {
            tracing::warn!(error = %e, provider_id = %provider.id, "failed to send registration decision email");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strike_push_carries_the_running_count() {
        let (title, body) = sanction_push_content(&Decision::Strike { count: 2 });
        assert_eq!(title, "Infraction recorded");
        assert!(body.contains("2/3"));
    }

    #[test]
    fn ban_push_is_the_same_for_both_ban_paths() {
        let (escalated_title, escalated_body) =
            sanction_push_content(&Decision::AutoEscalatedBan { count: 3 });
        let (direct_title, direct_body) = sanction_push_content(&Decision::DirectBan { count: 1 });

        assert_eq!(escalated_title, "Account suspended");
        assert_eq!(escalated_title, direct_title);
        assert_eq!(escalated_body, direct_body);
    }
}

use uuid::Uuid;

use amigo_shared::clients::rabbitmq::RabbitMqClient;
use amigo_shared::types::event::{payloads, routing_keys, Event};

pub async fn publish_report_filed(
    rabbitmq: &RabbitMqClient,
    report_id: Uuid,
    reporter_id: Uuid,
    provider_id: Uuid,
    reason: &str,
) {
    let event = Event::new(
        "amigo-moderation",
        routing_keys::MODERATION_REPORT_FILED,
        payloads::ReportFiled {
            report_id,
            reporter_id,
            provider_id,
            reason: reason.to_string(),
        },
    )
    .with_user(reporter_id);

    if let Err(e) = rabbitmq.publish(routing_keys::MODERATION_REPORT_FILED, &event).await {
        tracing::error!(error = %e, "failed to publish report.filed event");
    }
}

pub async fn publish_sanction_applied(
    rabbitmq: &RabbitMqClient,
    report_id: Uuid,
    provider_id: Uuid,
    requested_action: &str,
    applied_action: &str,
    infraction_count: i32,
) {
    let event = Event::new(
        "amigo-moderation",
        routing_keys::MODERATION_SANCTION_APPLIED,
        payloads::SanctionApplied {
            report_id,
            provider_id,
            requested_action: requested_action.to_string(),
            applied_action: applied_action.to_string(),
            infraction_count,
        },
    )
    .with_user(provider_id);

    if let Err(e) = rabbitmq.publish(routing_keys::MODERATION_SANCTION_APPLIED, &event).await {
        tracing::error!(error = %e, "failed to publish sanction.applied event");
    }
}

pub async fn publish_registration_decided(
    rabbitmq: &RabbitMqClient,
    provider_id: Uuid,
    accepted: bool,
) {
    let event = Event::new(
        "amigo-moderation",
        routing_keys::MODERATION_REGISTRATION_DECIDED,
        payloads::RegistrationDecided {
            provider_id,
            accepted,
        },
    )
    .with_user(provider_id);

    if let Err(e) = rabbitmq
        .publish(routing_keys::MODERATION_REGISTRATION_DECIDED, &event)
        .await
    {
        tracing::error!(error = %e, "failed to publish registration.decided event");
    }
}

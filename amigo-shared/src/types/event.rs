use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// RabbitMQ event envelope wrapping all domain events.
///
/// Routing key format: `amigo.{domain}.{entity}.{action}`
/// Example: `amigo.moderation.sanction.applied`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event<T: Serialize> {
    pub id: Uuid,
    pub source: String,
    pub event_type: String,
    pub timestamp: DateTime<Utc>,
    pub correlation_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub data: T,
}

impl<T: Serialize> Event<T> {
    pub fn new(source: impl Into<String>, event_type: impl Into<String>, data: T) -> Self {
        Self {
            id: Uuid::now_v7(),
            source: source.into(),
            event_type: event_type.into(),
            timestamp: Utc::now(),
            correlation_id: None,
            user_id: None,
            data,
        }
    }

    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_correlation(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }
}

/// RabbitMQ routing keys
pub mod routing_keys {
    pub const MODERATION_REPORT_FILED: &str = "amigo.moderation.report.filed";
    pub const MODERATION_SANCTION_APPLIED: &str = "amigo.moderation.sanction.applied";
    pub const MODERATION_REGISTRATION_DECIDED: &str = "amigo.moderation.registration.decided";
}

/// Common event data payloads
pub mod payloads {
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ReportFiled {
        pub report_id: Uuid,
        pub reporter_id: Uuid,
        pub provider_id: Uuid,
        pub reason: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SanctionApplied {
        pub report_id: Uuid,
        pub provider_id: Uuid,
        pub requested_action: String,
        pub applied_action: String,
        pub infraction_count: i32,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct RegistrationDecided {
        pub provider_id: Uuid,
        pub accepted: bool,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_source_and_type() {
        let event = Event::new(
            "amigo-moderation",
            routing_keys::MODERATION_SANCTION_APPLIED,
            payloads::SanctionApplied {
                report_id: Uuid::now_v7(),
                provider_id: Uuid::now_v7(),
                requested_action: "strike".into(),
                applied_action: "ban".into(),
                infraction_count: 3,
            },
        )
        .with_user(Uuid::now_v7());

        assert_eq!(event.source, "amigo-moderation");
        assert_eq!(event.event_type, "amigo.moderation.sanction.applied");
        assert!(event.user_id.is_some());
        assert!(event.correlation_id.is_none());

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["data"]["applied_action"], "ban");
        assert_eq!(json["data"]["infraction_count"], 3);
    }
}

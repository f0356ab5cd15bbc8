use reqwest::Client;
use serde::Serialize;

const EXPO_PUSH_URL: &str = "https://exp.host/--/api/v2/push/send";

/// Expo push notification client. Tokens are the `ExponentPushToken[...]`
/// strings registered by the mobile app.
#[derive(Clone)]
pub struct PushClient {
    client: Client,
}

#[derive(Debug, Serialize)]
struct PushMessage<'a> {
    to: &'a str,
    sound: &'a str,
    title: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl Default for PushClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PushClient {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }

    pub async fn send_push(
        &self,
        token: &str,
        title: &str,
        body: &str,
        data: Option<serde_json::Value>,
    ) -> Result<(), String> {
        let message = PushMessage {
            to: token,
            sound: "default",
            title,
            body,
            data,
        };

        let response = self
            .client
            .post(EXPO_PUSH_URL)
            .json(&message)
            .send()
            .await
            .map_err(|e| format!("push send failed: {e}"))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("push API error: {body}"));
        }

        tracing::debug!(token = %token, title = %title, "push notification sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_shape_matches_expo_api() {
        let message = PushMessage {
            to: "ExponentPushToken[xxx]",
            sound: "default",
            title: "Account update",
            body: "A strike was recorded",
            data: None,
        };

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["to"], "ExponentPushToken[xxx]");
        assert_eq!(json["sound"], "default");
        assert!(json.get("data").is_none());
    }
}

use reqwest::Client;
use serde::Serialize;

#[derive(Clone)]
pub struct EmailClient {
    client: Client,
    api_key: String,
    from_email: String,
    from_name: String,
}

#[derive(Debug, Serialize)]
struct ResendRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
}

impl EmailClient {
    pub fn new(api_key: &str, from_email: &str, from_name: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            from_email: from_email.to_string(),
            from_name: from_name.to_string(),
        }
    }

    pub async fn send_email(&self, to: &str, subject: &str, html: &str) -> Result<(), String> {
        let request = ResendRequest {
            from: format!("{} <{}>", self.from_name, self.from_email),
            to: vec![to.to_string()],
            subject: subject.to_string(),
            html: html.to_string(),
        };

        let response = self
            .client
            .post("https://api.resend.com/emails")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("email send failed: {e}"))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("email API error: {body}"));
        }

        tracing::debug!(to = %to, subject = %subject, "email sent");
        Ok(())
    }

    /// Strike email, carries the current count against the limit.
    pub async fn send_strike_notice(
        &self,
        to: &str,
        name: &str,
        count: i32,
        limit: i32,
    ) -> Result<(), String> {
        let (subject, html) = strike_notice(name, count, limit);
        self.send_email(to, &subject, &html).await
    }

    /// Permanent suspension email.
    pub async fn send_ban_notice(&self, to: &str, name: &str) -> Result<(), String> {
        let (subject, html) = ban_notice(name);
        self.send_email(to, &subject, &html).await
    }

    /// Registration review outcome email.
    pub async fn send_registration_decision(
        &self,
        to: &str,
        name: &str,
        accepted: bool,
    ) -> Result<(), String> {
        let (subject, html) = registration_decision(name, accepted);
        self.send_email(to, &subject, &html).await
    }
}

fn strike_notice(name: &str, count: i32, limit: i32) -> (String, String) {
    let subject = format!("Infraction notice ({count}/{limit}) - Amigo");
    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
        <h2 style="color: #d97706;">Amigo - Infraction notice</h2>
        <p>Hello {name},</p>
        <p>A report filed against your account has been validated and a strike was recorded.
        You now have <strong>{count} of {limit}</strong> allowed infractions.</p>
        <p style="color: #666; margin-top: 20px;">On reaching the {limit}th infraction your account
        will be suspended automatically.</p>
        </div>"#
    );
    (subject, html)
}

fn ban_notice(name: &str) -> (String, String) {
    let subject = "Account suspension notice - Amigo".to_string();
    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
        <h2 style="color: #dc2626;">Amigo - Account suspended</h2>
        <p>Hello {name},</p>
        <p>We regret to inform you that your account has been <strong>permanently suspended</strong>
        following validated reports. You will no longer be able to access the platform.</p>
        </div>"#
    );
    (subject, html)
}

fn registration_decision(name: &str, accepted: bool) -> (String, String) {
    if accepted {
        let subject = "Welcome to Amigo!".to_string();
        let html = format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
            <h2 style="color: #16a34a;">Amigo - Registration accepted</h2>
            <p>Congratulations {name}! Your account has been <strong>accepted</strong>.
            You can now sign in and start using the platform.</p>
            </div>"#
        );
        (subject, html)
    } else {
        let subject = "Your registration request - Amigo".to_string();
        let html = format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
            <h2 style="color: #dc2626;">Amigo - Registration rejected</h2>
            <p>Hello {name}. We are sorry to inform you that your registration request
            has been <strong>rejected</strong>.</p>
            </div>"#
        );
        (subject, html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strike_notice_shows_count_over_limit() {
        let (subject, html) = strike_notice("Ana", 2, 3);
        assert!(subject.contains("2/3"));
        assert!(html.contains("2 of 3"));
        assert!(html.contains("Ana"));
    }

    #[test]
    fn ban_notice_mentions_suspension() {
        let (subject, html) = ban_notice("Ana");
        assert!(subject.contains("suspension"));
        assert!(html.contains("permanently suspended"));
    }

    #[test]
    fn registration_decision_branches_on_outcome() {
        let (accepted_subject, accepted_html) = registration_decision("Luis", true);
        assert!(accepted_subject.contains("Welcome"));
        assert!(accepted_html.contains("accepted"));

        let (rejected_subject, rejected_html) = registration_decision("Luis", false);
        assert!(rejected_subject.contains("registration"));
        assert!(rejected_html.contains("rejected"));
    }
}

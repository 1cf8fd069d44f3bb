//! Email sink — SMTP delivery via lettre.

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{ConfigError, SinkError};
use crate::sink::SubmissionSink;
use crate::wizard::model::SubmissionPayload;

// ── Configuration ───────────────────────────────────────────────────

/// Email sink configuration, built from environment variables.
#[derive(Debug, Clone)]
pub struct EmailSinkConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: SecretString,
    pub from_address: String,
    /// Where qualification requests are delivered.
    pub to_address: String,
}

impl EmailSinkConfig {
    /// Build config from environment variables.
    /// Returns `Ok(None)` if `LEAD_SMTP_HOST` is not set (sink disabled).
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Ok(smtp_host) = std::env::var("LEAD_SMTP_HOST") else {
            return Ok(None);
        };

        let smtp_port: u16 = match std::env::var("LEAD_SMTP_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "LEAD_SMTP_PORT".to_string(),
                message: format!("not a valid port: {raw}"),
            })?,
            Err(_) => 587,
        };

        let username = std::env::var("LEAD_SMTP_USERNAME").unwrap_or_default();
        let password =
            SecretString::from(std::env::var("LEAD_SMTP_PASSWORD").unwrap_or_default());
        let from_address =
            std::env::var("LEAD_FROM_ADDRESS").unwrap_or_else(|_| username.clone());
        let to_address = std::env::var("LEAD_TO_ADDRESS")
            .or_else(|_| std::env::var("LEAD_SMTP_USERNAME"))
            .map_err(|_| ConfigError::MissingEnvVar("LEAD_TO_ADDRESS".to_string()))?;

        Ok(Some(Self {
            smtp_host,
            smtp_port,
            username,
            password,
            from_address,
            to_address,
        }))
    }
}

// ── Sink ────────────────────────────────────────────────────────────

/// SMTP submission sink. Builds and sends one notification email per
/// delivered payload.
pub struct EmailSink {
    config: EmailSinkConfig,
}

impl EmailSink {
    pub fn new(config: EmailSinkConfig) -> Self {
        Self { config }
    }

    /// Send an email via SMTP. Blocking; run inside spawn_blocking.
    fn send_email(config: &EmailSinkConfig, subject: &str, body: &str) -> Result<(), SinkError> {
        let creds = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let transport = SmtpTransport::relay(&config.smtp_host)
            .map_err(|e| SinkError::DeliveryFailed {
                name: "email".into(),
                reason: format!("SMTP relay error: {e}"),
            })?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        let email = Message::builder()
            .from(config.from_address.parse().map_err(|e| {
                SinkError::Rejected {
                    name: "email".into(),
                    reason: format!("Invalid from address: {e}"),
                }
            })?)
            .to(config.to_address.parse().map_err(|e| SinkError::Rejected {
                name: "email".into(),
                reason: format!("Invalid to address: {e}"),
            })?)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| SinkError::Rejected {
                name: "email".into(),
                reason: format!("Failed to build email: {e}"),
            })?;

        transport.send(&email).map_err(|e| SinkError::DeliveryFailed {
            name: "email".into(),
            reason: format!("SMTP send failed: {e}"),
        })?;

        Ok(())
    }
}

/// Render the payload as the plain-text notification body.
fn render_body(payload: &SubmissionPayload) -> String {
    format!(
        "New qualification request\n\
         \n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Client type: {}\n\
         Business: {}\n\
         Industry: {}\n\
         Pillar: {}\n\
         Plan: {} ({})\n\
         Investment range: {}\n\
         \n\
         Social networks:\n{}\n\
         \n\
         Message:\n{}\n\
         \n\
         Submitted at: {}\n",
        payload.full_name,
        payload.email,
        payload.phone,
        payload.client_type,
        payload.business_name,
        payload.industry,
        payload.pillar,
        payload.plan_name,
        payload.plan_description,
        payload.budget_range,
        payload.social_networks,
        payload.message,
        payload.submitted_at.to_rfc3339(),
    )
}

#[async_trait]
impl SubmissionSink for EmailSink {
    fn name(&self) -> &str {
        "email"
    }

    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), SinkError> {
        let subject = format!("New qualification request: {}", payload.business_name);
        let body = render_body(payload);
        let config = self.config.clone();

        let result = tokio::task::spawn_blocking(move || {
            EmailSink::send_email(&config, &subject, &body)
        })
        .await
        .map_err(|e| SinkError::DeliveryFailed {
            name: "email".into(),
            reason: format!("send task failed: {e}"),
        })?;

        if result.is_ok() {
            tracing::info!(to = %self.config.to_address, "qualification email sent");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::model::{Plan, WizardAnswers};

    #[test]
    fn body_includes_all_payload_fields() {
        let mut answers = WizardAnswers::default();
        answers.full_name = "Alejandra Rivas".to_string();
        answers.email = "alejandra@acme.example".to_string();
        answers.phone_number = "999 999 999".to_string();
        answers.business_name = "Acme Andina".to_string();
        answers.industry = "Retail".to_string();
        answers.message = "We want to scale operations.".to_string();
        answers.socials = vec!["https://instagram.com/acme".to_string()];

        let payload = SubmissionPayload::assemble(&answers, Plan::Blue);
        let body = render_body(&payload);

        assert!(body.contains("Alejandra Rivas"));
        assert!(body.contains("alejandra@acme.example"));
        assert!(body.contains("+51 999 999 999"));
        assert!(body.contains("Acme Andina"));
        assert!(body.contains("Blue Diamond Prime"));
        assert!(body.contains("https://instagram.com/acme"));
        assert!(body.contains("We want to scale operations."));
    }

    #[test]
    fn body_renders_socials_sentinel() {
        let answers = WizardAnswers::default();
        let payload = SubmissionPayload::assemble(&answers, Plan::Red);
        let body = render_body(&payload);
        assert!(body.contains("No links provided."));
        assert!(body.contains("Red Diamond Prime"));
    }
}

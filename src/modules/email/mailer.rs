//! Outbound notification emails over SMTP.
//!
//! Every send here is a best-effort side channel: callers log failures and
//! continue, and no database mutation is ever rolled back because an email
//! did not go out. When no SMTP host is configured the mailer runs disabled
//! and logs what it would have sent.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::core::config::EmailConfig;
use crate::core::error::{AppError, Result};

pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from_address: String,
    frontend_url: String,
}

impl Mailer {
    pub fn new(config: &EmailConfig, frontend_url: &str) -> Result<Self> {
        let transport = match &config.smtp_host {
            Some(host) => {
                let mut builder =
                    AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                        .map_err(|e| {
                            AppError::Internal(format!("Invalid SMTP configuration: {}", e))
                        })?
                        .port(config.smtp_port);

                if let (Some(user), Some(pass)) = (&config.smtp_username, &config.smtp_password) {
                    builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
                }

                Some(builder.build())
            }
            None => {
                tracing::warn!("SMTP_HOST not configured, email notifications are disabled");
                None
            }
        };

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
        })
    }

    async fn send(&self, to: &str, subject: &str, body: String) -> Result<()> {
        let Some(transport) = &self.transport else {
            tracing::info!("Email disabled, dropping \"{}\" to {}", subject, to);
            return Ok(());
        };

        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| AppError::Internal(format!("Invalid recipient address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        transport
            .send(message)
            .await
            .map_err(|e| AppError::Internal(format!("SMTP send failed: {}", e)))?;

        tracing::debug!("Email \"{}\" sent to {}", subject, to);
        Ok(())
    }

    pub async fn send_otp_email(&self, to: &str, full_name: &str, code: &str) -> Result<()> {
        let body = format!(
            "Hi {},\n\nYour CivicDesk verification code is: {}\n\n\
             The code expires in 10 minutes. If you did not request it, you can ignore this email.\n",
            full_name, code
        );
        self.send(to, "Your verification code", body).await
    }

    pub async fn send_password_reset_email(&self, to: &str, raw_token: &str) -> Result<()> {
        let body = format!(
            "A password reset was requested for your CivicDesk account.\n\n\
             Reset your password here: {}/reset-password?token={}\n\n\
             The link expires in 1 hour. If you did not request a reset, ignore this email.\n",
            self.frontend_url, raw_token
        );
        self.send(to, "Password reset request", body).await
    }

    pub async fn send_complaint_received_email(&self, to: &str, title: &str) -> Result<()> {
        let body = format!(
            "Your complaint \"{}\" has been received and forwarded to the responsible agency.\n\
             You will be notified when its status changes.\n",
            title
        );
        self.send(to, "Complaint received", body).await
    }

    pub async fn send_agency_notification_email(
        &self,
        to: &str,
        agency_name: &str,
        title: &str,
    ) -> Result<()> {
        let body = format!(
            "A new complaint \"{}\" has been assigned to {}.\n\
             Please review it in the agency dashboard.\n",
            title, agency_name
        );
        self.send(to, "New complaint assigned", body).await
    }

    pub async fn send_response_email(&self, to: &str, title: &str, message: &str) -> Result<()> {
        let body = format!(
            "Your complaint \"{}\" has a new response:\n\n{}\n",
            title, message
        );
        self.send(to, "New response to your complaint", body).await
    }

    pub async fn send_status_update_email(&self, to: &str, title: &str, status: &str) -> Result<()> {
        let body = format!(
            "The status of your complaint \"{}\" is now: {}\n",
            title, status
        );
        self.send(to, "Complaint status updated", body).await
    }
}

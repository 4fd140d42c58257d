//! Outbound mail boundary.
//!
//! The core never depends on a concrete mail transport. Callers treat
//! sending as fire-and-forget: a failed send is logged, never propagated,
//! so responses stay identical whether or not delivery worked.

use async_trait::async_trait;
use std::env;

use crate::errors::{AppError, AppResult};

/// Narrow interface the core needs from a mail collaborator.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

/// Mail configuration from environment.
struct MailConfig {
    smtp_host: Option<String>,
    smtp_from: String,
}

impl MailConfig {
    fn from_env() -> Self {
        Self {
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_from: env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@example.com".to_string()),
        }
    }

    fn is_configured(&self) -> bool {
        self.smtp_host.is_some()
    }
}

/// Default mailer: logs outgoing mail when SMTP is unconfigured
/// (development mode), and refuses to pretend otherwise.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let config = MailConfig::from_env();

        if !config.is_configured() {
            tracing::warn!("SMTP not configured - logging email instead of sending");
            tracing::info!(
                "=== EMAIL (not sent) ===\n\
                 From: {}\n\
                 To: {}\n\
                 Subject: {}\n\
                 Body:\n{}\n\
                 ========================",
                config.smtp_from,
                to,
                subject,
                body
            );
            return Ok(());
        }

        // No SMTP transport is wired in yet; surface that honestly so the
        // fire-and-forget caller logs it.
        Err(AppError::internal(
            "SMTP is configured but no mail transport is installed",
        ))
    }
}

/// Send a mail on a background task, logging (and otherwise ignoring)
/// any failure.
pub fn send_detached(mailer: std::sync::Arc<dyn Mailer>, to: String, subject: String, body: String) {
    tokio::spawn(async move {
        if let Err(e) = mailer.send(&to, &subject, &body).await {
            tracing::warn!(to = %to, "Mail delivery failed: {}", e);
        }
    });
}

//! Mail delivery through an HTTP mail API webhook
//!
//! The message is posted as JSON to `MAIL_WEBHOOK_URL`. The service behind
//! the webhook owns actual delivery.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info, warn};

use crate::error::RelayError;
use crate::models::MailMessage;
use crate::traits::MailTransport;

/// Posts notification mails to a configured webhook
#[derive(Clone)]
pub struct WebhookMailer {
    client: Client,
    webhook_url: Option<String>,
}

impl WebhookMailer {
    /// Without a webhook URL every send fails with a delivery error.
    pub fn new(webhook_url: Option<String>) -> Self {
        if webhook_url.is_none() {
            warn!("MAIL_WEBHOOK_URL not set - contact form submissions cannot be delivered");
        }

        Self {
            client: Client::new(),
            webhook_url,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }
}

#[async_trait]
impl MailTransport for WebhookMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), RelayError> {
        let Some(webhook_url) = &self.webhook_url else {
            error!("Dropping contact mail {}: no mail transport configured", message.id);
            return Err(RelayError::Delivery("mail transport not configured".to_string()));
        };

        let response = self
            .client
            .post(webhook_url)
            .json(message)
            .send()
            .await
            .map_err(|e| RelayError::Delivery(e.to_string()))?;

        if response.status().is_success() {
            info!("Mail {} accepted for {}", message.id, message.to);
            Ok(())
        } else {
            error!("Failed to send mail {}: {}", message.id, response.status());
            Err(RelayError::Delivery(format!(
                "mail API answered {}",
                response.status()
            )))
        }
    }
}

//! # Contact Form Relay
//!
//! Turns a contact form POST into one notification mail and tells the
//! submitter how it went through a `status` flag on the redirect target.
//!
//! A submission needs a name, an email, a phone number and at least one
//! product of interest; `details` is optional. Every submitted value is
//! HTML-escaped before it reaches the mail body.

pub mod mailer;

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use url::form_urlencoded;

use crate::dom::escape_text;
use crate::error::RelayError;
use crate::models::{ContactSubmission, MailMessage};
use crate::traits::MailTransport;

pub use mailer::WebhookMailer;

pub const MISSING_FIELDS: &str = "Please fill in all required fields";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const INVALID_METHOD: &str = "Invalid request method";

impl ContactSubmission {
    /// Reads an `application/x-www-form-urlencoded` body. Both `products`
    /// and `products[]` keys feed the product list.
    pub fn from_form(body: &[u8]) -> Self {
        let mut submission = Self::default();
        for (key, value) in form_urlencoded::parse(body) {
            let value = value.trim().to_string();
            match &*key {
                "name" => submission.name = value,
                "email" => submission.email = sanitize_email(&value),
                "phone" => submission.phone = value,
                "details" => submission.details = Some(value).filter(|d| !d.is_empty()),
                "products" | "products[]" if !value.is_empty() => submission.products.push(value),
                _ => {}
            }
        }
        submission
    }

    pub fn validate(&self) -> Result<(), RelayError> {
        if self.name.is_empty()
            || self.email.is_empty()
            || self.phone.is_empty()
            || self.products.is_empty()
        {
            return Err(RelayError::Validation(MISSING_FIELDS.to_string()));
        }
        if !is_valid_email(&self.email) {
            return Err(RelayError::Validation(INVALID_EMAIL.to_string()));
        }
        Ok(())
    }
}

/// Drops every character that cannot appear in a mail address.
pub fn sanitize_email(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-=?^_`{|}~@.[]".contains(*c))
        .collect()
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local.len() <= 64
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..");
    let domain_ok = domain.contains('.')
        && domain.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
    local_ok && domain_ok
}

/// Header values may not span lines.
fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

/// Validates submissions, composes the notification and hands it to a transport
#[derive(Clone)]
pub struct ContactRelay {
    transport: Arc<dyn MailTransport>,
    recipient: String,
    redirect_page: String,
}

impl ContactRelay {
    pub fn new(
        transport: Arc<dyn MailTransport>,
        recipient: impl Into<String>,
        redirect_page: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            recipient: recipient.into(),
            redirect_page: redirect_page.into(),
        }
    }

    pub fn compose(&self, submission: &ContactSubmission) -> MailMessage {
        let received_at = Utc::now();
        let mut body = String::from("<html><body><h2>New Contact Form Submission</h2>");
        body.push_str(&format!(
            "<p><strong>Name:</strong> {}</p><p><strong>Email:</strong> {}</p><p><strong>Phone:</strong> {}</p>",
            escape_text(&submission.name),
            escape_text(&submission.email),
            escape_text(&submission.phone),
        ));
        body.push_str("<p><strong>Products of Interest:</strong><br>");
        for product in &submission.products {
            body.push_str(&format!("- {}<br>", escape_text(product)));
        }
        body.push_str("</p>");
        if let Some(details) = &submission.details {
            body.push_str(&format!(
                "<p><strong>Additional Details:</strong><br>{}</p>",
                escape_text(details)
            ));
        }
        body.push_str("</body></html>");

        let id = format!(
            "{:x}",
            md5::compute(format!(
                "{}:{}:{}",
                self.recipient,
                submission.email,
                received_at.to_rfc3339()
            ))
        );

        MailMessage {
            id,
            to: self.recipient.clone(),
            reply_to: submission.email.clone(),
            from_name: single_line(&submission.name),
            subject: format!(
                "New Contact Form Submission from {}",
                single_line(&submission.name)
            ),
            html_body: body,
            received_at,
        }
    }

    /// Validates and sends. Exactly one message goes out for a valid
    /// submission and none otherwise; nothing is retried.
    pub async fn relay(&self, submission: &ContactSubmission) -> Result<MailMessage, RelayError> {
        debug!("Products selected: {:?}", submission.products);
        if let Err(e) = submission.validate() {
            warn!("Rejected contact submission: {}", e);
            return Err(e);
        }

        let message = self.compose(submission);
        self.transport.send(&message).await?;
        info!("Contact submission {} relayed to {}", message.id, message.to);
        Ok(message)
    }

    /// Redirect target reporting the outcome to the contact section.
    pub fn redirect_for<T>(&self, outcome: &Result<T, RelayError>) -> String {
        let status = if outcome.is_ok() { "success" } else { "error" };
        format!("{}?status={status}#contact", self.redirect_page)
    }
}

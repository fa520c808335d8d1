//! Traits for swappable asset sources and mail transports

use async_trait::async_trait;

use crate::error::{FetchError, RelayError};
use crate::models::MailMessage;

/// Where the site's static assets (skeletons, fragments, product JSON) live
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Display name used in logs
    fn name(&self) -> &str;

    /// Fetch a text asset by its site-relative path
    ///
    /// # Returns
    /// * `Err(FetchError::NotFound)` - The asset does not exist
    /// * `Err(_)` - Any other transport or decoding failure
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;
}

/// Delivers a composed notification mail
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send exactly one message
    ///
    /// # Returns
    /// * `Err(RelayError::Delivery)` - The transport did not accept the message
    async fn send(&self, message: &MailMessage) -> Result<(), RelayError>;
}

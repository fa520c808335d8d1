//! Error taxonomies for asset fetching and the contact form relay

use thiserror::Error;

/// Failure to fetch or decode a site asset (product JSON, skeleton, fragment).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("malformed resource {resource}: {reason}")]
    Parse { resource: String, reason: String },
    #[error("unexpected status {status} fetching {resource}")]
    Status { resource: String, status: u16 },
    #[error("transport error fetching {resource}: {source}")]
    Transport {
        resource: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("io error reading {resource}: {source}")]
    Io {
        resource: String,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn parse(resource: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Failure while relaying a contact form submission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("{0}")]
    Validation(String),
    #[error("mail delivery failed: {0}")]
    Delivery(String),
}

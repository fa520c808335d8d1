//! Data models for product descriptions and contact form mail payloads

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Sentinel used by the catalogue for products without a brand.
pub const NO_BRAND: &str = "n/a";

/// A product as described by `assets/data/products/{id}.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDescription {
    pub title: String,
    #[serde(default)]
    pub brand_name: Option<String>,
    /// Rendered as markup, subject to the view's trust policy.
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub gallery: Vec<GalleryImage>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub brochures: Brochures,
    #[serde(default)]
    pub certifications: Vec<Certification>,
}

impl ProductDescription {
    /// Parses and checks a product document. `resource` only names the
    /// document in errors.
    pub fn from_json(resource: &str, body: &str) -> Result<Self, FetchError> {
        let description: Self =
            serde_json::from_str(body).map_err(|e| FetchError::parse(resource, e))?;
        description.validate(resource)?;
        Ok(description)
    }

    fn validate(&self, resource: &str) -> Result<(), FetchError> {
        let mut seen = HashSet::new();
        for variant in &self.variants {
            if !seen.insert(variant.id.as_str()) {
                return Err(FetchError::parse(
                    resource,
                    format!("duplicate variant id `{}`", variant.id),
                ));
            }
        }
        Ok(())
    }

    /// The brand label to show, or `None` when the brand is blank or the
    /// `n/a` sentinel (any case).
    pub fn display_brand(&self) -> Option<&str> {
        self.brand_name
            .as_deref()
            .filter(|brand| !brand.is_empty() && !brand.eq_ignore_ascii_case(NO_BRAND))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

/// One configuration of a product with its own specification table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub specifications: Vec<Specification>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    pub parameter: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon_type: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub icon_class: Option<String>,
}

/// How an application card draws its icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppIcon<'a> {
    Image(&'a str),
    Glyph(&'a str),
}

impl Application {
    /// An image icon wins over a class glyph; neither yields `None`.
    pub fn icon(&self) -> Option<AppIcon<'_>> {
        match (self.icon_type.as_deref(), self.icon_url.as_deref()) {
            (Some("image"), Some(url)) if !url.is_empty() => Some(AppIcon::Image(url)),
            _ => self
                .icon_class
                .as_deref()
                .filter(|class| !class.is_empty())
                .map(AppIcon::Glyph),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Brochures {
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub icon_url: String,
}

/// A contact form submission as posted by the site's contact section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub details: Option<String>,
    pub products: Vec<String>,
}

/// Notification mail handed to the mail transport
#[derive(Debug, Clone, Serialize)]
pub struct MailMessage {
    pub id: String,
    pub to: String,
    pub reply_to: String,
    pub from_name: String,
    pub subject: String,
    pub html_body: String,
    pub received_at: DateTime<Utc>,
}

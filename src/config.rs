//! Environment-driven configuration

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::binder::MarkupTrust;
use crate::sources::{HttpAssetSource, LocalAssetSource};
use crate::traits::AssetSource;

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

/// Where assets are read from; a remote origin wins over a local root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLocation {
    Remote(String),
    Local(PathBuf),
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub bind_addr: SocketAddr,
    pub assets: AssetLocation,
    pub product_template: String,
    pub overview_trust: MarkupTrust,
    pub mail_webhook_url: Option<String>,
    pub contact_recipient: String,
    pub contact_redirect_page: String,
}

impl SiteConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr: SocketAddr = env_or("SHOWROOM_BIND_ADDR", "127.0.0.1:8080")
            .parse()
            .context("SHOWROOM_BIND_ADDR must be a socket address")?;

        let assets = match env::var("SHOWROOM_ASSET_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => AssetLocation::Remote(url),
            _ => AssetLocation::Local(PathBuf::from(env_or("SHOWROOM_ASSET_ROOT", "."))),
        };

        let overview_trust = if env_bool("SHOWROOM_OVERVIEW_TRUSTED", true) {
            MarkupTrust::Trusted
        } else {
            MarkupTrust::Untrusted
        };

        Ok(Self {
            bind_addr,
            assets,
            product_template: env_or("SHOWROOM_PRODUCT_TEMPLATE", "product.html"),
            overview_trust,
            mail_webhook_url: env::var("MAIL_WEBHOOK_URL").ok().filter(|v| !v.is_empty()),
            contact_recipient: env_or("CONTACT_RECIPIENT", "info@example.com"),
            contact_redirect_page: env_or("CONTACT_REDIRECT_PAGE", "index.html"),
        })
    }

    pub fn asset_source(&self) -> Result<Arc<dyn AssetSource>> {
        Ok(match &self.assets {
            AssetLocation::Remote(url) => Arc::new(HttpAssetSource::new(url)?),
            AssetLocation::Local(root) => Arc::new(LocalAssetSource::new(root.clone())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        assert_eq!(env_or("SHOWROOM_TEST_UNSET_VALUE", "index.html"), "index.html");
        assert!(env_bool("SHOWROOM_TEST_UNSET_FLAG", true));
        assert!(!env_bool("SHOWROOM_TEST_UNSET_FLAG", false));
    }

    #[test]
    fn asset_source_follows_location() {
        let mut config = SiteConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            assets: AssetLocation::Local(PathBuf::from("site")),
            product_template: "product.html".to_string(),
            overview_trust: MarkupTrust::Trusted,
            mail_webhook_url: None,
            contact_recipient: "info@example.com".to_string(),
            contact_redirect_page: "index.html".to_string(),
        };
        assert_eq!(config.asset_source().unwrap().name(), "site");

        config.assets = AssetLocation::Remote("https://example.com/".to_string());
        assert_eq!(config.asset_source().unwrap().name(), "https://example.com/");

        config.assets = AssetLocation::Remote("::not a url::".to_string());
        assert!(config.asset_source().is_err());
    }
}

//! Assets served by a remote site origin

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error};
use url::Url;

use crate::error::FetchError;
use crate::traits::AssetSource;

/// Fetches assets relative to a base URL
#[derive(Clone)]
pub struct HttpAssetSource {
    client: Client,
    base_url: Url,
}

impl HttpAssetSource {
    /// Create a source rooted at `base_url`; a trailing slash is added when missing
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(concat!("product-showroom/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    fn resolve(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|_| FetchError::NotFound(path.to_string()))
    }
}

#[async_trait]
impl AssetSource for HttpAssetSource {
    fn name(&self) -> &str {
        self.base_url.as_str()
    }

    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let url = self.resolve(path)?;
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                resource: path.to_string(),
                source,
            })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND | StatusCode::GONE => {
                return Err(FetchError::NotFound(path.to_string()));
            }
            status => {
                error!("Failed to fetch {}: {}", url, status);
                return Err(FetchError::Status {
                    resource: path.to_string(),
                    status: status.as_u16(),
                });
            }
        }

        response.text().await.map_err(|source| FetchError::Transport {
            resource: path.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_below_the_base() {
        let source = HttpAssetSource::new("https://example.com/site").unwrap();
        assert_eq!(
            source
                .resolve("/assets/data/products/pump-42.json")
                .unwrap()
                .as_str(),
            "https://example.com/site/assets/data/products/pump-42.json"
        );
    }

    #[test]
    fn rejects_invalid_base_urls() {
        assert!(HttpAssetSource::new("not a url").is_err());
    }
}

//! Assets read from a local document root

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::FetchError;
use crate::traits::AssetSource;

/// Reads assets below a directory on disk
#[derive(Debug, Clone)]
pub struct LocalAssetSource {
    root: PathBuf,
    name: String,
}

impl LocalAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root.display().to_string();
        Self { root, name }
    }

    /// Maps a site path to a file, refusing anything that escapes the root.
    /// The path is percent-decoded first, as an HTTP origin would.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let decoded = urlencoding::decode(path).ok()?;
        let relative = Path::new(decoded.trim_start_matches('/'));
        relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
            .then(|| self.root.join(relative))
    }
}

#[async_trait]
impl AssetSource for LocalAssetSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let file = self
            .resolve(path)
            .ok_or_else(|| FetchError::NotFound(path.to_string()))?;
        debug!("Reading {}", file.display());

        tokio::fs::read_to_string(&file)
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => FetchError::NotFound(path.to_string()),
                ErrorKind::InvalidData => FetchError::parse(path, source),
                _ => FetchError::Io {
                    resource: path.to_string(),
                    source,
                },
            })
    }
}

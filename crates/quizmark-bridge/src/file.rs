//! Local file asset loader.

use std::path::Path;

use async_trait::async_trait;
use tracing::instrument;

use quizmark_core::traits::{AssetLoader, AssetSpec, LoadedAsset};

use crate::error::LoadError;

/// Reads assets from disk. Accepts plain paths and `file://` URLs.
#[derive(Debug, Default, Clone)]
pub struct FileAssetLoader;

impl FileAssetLoader {
    pub fn new() -> Self {
        Self
    }
}

/// Strip a `file://` scheme if present.
pub(crate) fn local_path(url: &str) -> &Path {
    Path::new(url.strip_prefix("file://").unwrap_or(url))
}

#[async_trait]
impl AssetLoader for FileAssetLoader {
    fn name(&self) -> &str {
        "file"
    }

    #[instrument(skip(self, asset), fields(asset = %asset.name))]
    async fn load(&self, asset: &AssetSpec) -> anyhow::Result<LoadedAsset> {
        let path = local_path(&asset.url);
        let bytes = tokio::fs::read(path).await.map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(LoadedAsset {
            name: asset.name.clone(),
            bytes: bytes.len(),
        })
    }
}

//! HTTP asset loader.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::instrument;

use quizmark_core::traits::{AssetLoader, AssetSpec, LoadedAsset};

use crate::error::LoadError;

/// Fetches assets with a plain `GET`. Any non-2xx status is a failure.
///
/// No timeout is set unless one is asked for; hosts usually wrap the whole
/// dependency load in their own.
pub struct HttpAssetLoader {
    client: reqwest::Client,
    timeout_secs: Option<u64>,
}

impl HttpAssetLoader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout_secs: None,
        }
    }

    /// Build a loader whose requests time out after `timeout`.
    pub fn with_timeout(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            timeout_secs: Some(timeout.as_secs()),
        })
    }
}

impl Default for HttpAssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetLoader for HttpAssetLoader {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, asset), fields(asset = %asset.name))]
    async fn load(&self, asset: &AssetSpec) -> anyhow::Result<LoadedAsset> {
        let response = self.client.get(&asset.url).send().await.map_err(|e| {
            if e.is_timeout() {
                LoadError::Timeout(self.timeout_secs.unwrap_or(0))
            } else {
                LoadError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                status: status.as_u16(),
                url: asset.url.clone(),
            }
            .into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LoadError::NetworkError(e.to_string()))?;

        Ok(LoadedAsset {
            name: asset.name.clone(),
            bytes: body.len(),
        })
    }
}

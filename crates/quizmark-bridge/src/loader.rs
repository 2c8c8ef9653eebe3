//! Loader that picks a backend from the asset URL.

use std::time::Duration;

use async_trait::async_trait;

use quizmark_core::traits::{AssetLoader, AssetSpec, LoadedAsset};

use crate::file::FileAssetLoader;
use crate::http::HttpAssetLoader;

/// Sends `http://` and `https://` URLs over the network and reads
/// everything else from disk.
pub struct RoutingLoader {
    http: HttpAssetLoader,
    file: FileAssetLoader,
}

impl RoutingLoader {
    pub fn new() -> Self {
        Self {
            http: HttpAssetLoader::new(),
            file: FileAssetLoader::new(),
        }
    }

    /// Build a router whose network requests time out after `timeout`.
    pub fn with_timeout(timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            http: HttpAssetLoader::with_timeout(timeout)?,
            file: FileAssetLoader::new(),
        })
    }

    fn backend(&self, url: &str) -> &dyn AssetLoader {
        if is_remote(url) {
            &self.http
        } else {
            &self.file
        }
    }
}

impl Default for RoutingLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn is_remote(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[async_trait]
impl AssetLoader for RoutingLoader {
    fn name(&self) -> &str {
        "routing"
    }

    async fn load(&self, asset: &AssetSpec) -> anyhow::Result<LoadedAsset> {
        let backend = self.backend(&asset.url);
        tracing::debug!(asset = %asset.name, backend = backend.name(), "loading asset");
        backend.load(asset).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn routes_by_scheme() {
        let loader = RoutingLoader::new();
        assert_eq!(loader.backend("https://cdn/x.js").name(), "http");
        assert_eq!(loader.backend("HTTP://cdn/x.js").name(), "http");
        assert_eq!(loader.backend("file:///x.js").name(), "file");
        assert_eq!(loader.backend("assets/x.js").name(), "file");
    }

    #[tokio::test]
    async fn loads_both_kinds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hl.js"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hl"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("theme.css");
        std::fs::write(&local, "a{}").unwrap();

        let loader = RoutingLoader::new();
        let remote = loader
            .load(&AssetSpec::new("hl", format!("{}/hl.js", server.uri())))
            .await
            .unwrap();
        assert_eq!(remote.bytes, 2);

        let file = loader
            .load(&AssetSpec::new("theme", local.display().to_string()))
            .await
            .unwrap();
        assert_eq!(file.bytes, 3);
    }
}

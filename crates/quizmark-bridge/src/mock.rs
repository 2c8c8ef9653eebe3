//! Mock loader and recording surface for testing.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizmark_core::model::QuizConfig;
use quizmark_core::traits::{AssetLoader, AssetSpec, LoadedAsset, Surface, View};

use crate::error::LoadError;

/// An asset loader that never touches the network.
///
/// Every asset loads successfully unless its name was marked as failing.
pub struct MockAssetLoader {
    /// Names of assets that fail to load.
    failing: HashSet<String>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Names requested, in call order.
    requested: Mutex<Vec<String>>,
}

impl MockAssetLoader {
    pub fn new() -> Self {
        Self {
            failing: HashSet::new(),
            call_count: AtomicU32::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Make the named assets fail with a 404.
    pub fn failing<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.failing.extend(names.into_iter().map(Into::into));
        self
    }

    /// Get the number of calls made to this loader.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Names of the assets requested so far.
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Default for MockAssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetLoader for MockAssetLoader {
    fn name(&self) -> &str {
        "mock"
    }

    async fn load(&self, asset: &AssetSpec) -> anyhow::Result<LoadedAsset> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(asset.name.clone());
        }

        if self.failing.contains(&asset.name) {
            return Err(LoadError::HttpStatus {
                status: 404,
                url: asset.url.clone(),
            }
            .into());
        }

        Ok(LoadedAsset {
            name: asset.name.clone(),
            bytes: asset.url.len(),
        })
    }
}

/// A surface that remembers what it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// `(container, view name)` per render call.
    pub rendered: Vec<(String, &'static str)>,
    /// Alert messages, in order.
    pub alerts: Vec<String>,
    /// Containers that were cleared.
    pub cleared: Vec<String>,
}

impl RecordingSurface {
    /// View names in render order.
    pub fn views(&self) -> Vec<&'static str> {
        self.rendered.iter().map(|(_, v)| *v).collect()
    }
}

impl Surface for RecordingSurface {
    fn render(&mut self, container: &str, _config: &QuizConfig, view: &View<'_>) {
        self.rendered.push((container.to_string(), view.name()));
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn clear(&mut self, container: &str) {
        self.cleared.push(container.to_string());
    }
}

//! The host bridge.
//!
//! A bridge mounts one session into one container. Its dependency set is
//! injected at construction, so several quizzes on the same page never share
//! loading state.

use std::sync::Arc;

use futures::future::join_all;
use rand::Rng;

use quizmark_core::scoring::Answer;
use quizmark_core::session::{Session, SessionState};
use quizmark_core::traits::{AssetLoader, AssetSpec, Surface, View};

use crate::error::BridgeError;

/// Message shown to the user when the quiz cannot start.
pub const LOAD_FAILURE_MESSAGE: &str =
    "There's something wrong with quiz loading, please contact your instructor.";

/// Container name used when the host does not pick one.
pub const DEFAULT_CONTAINER: &str = "quizdown";

/// Outcome of loading the dependency set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Not loaded yet.
    Loading,
    /// Every dependency loaded.
    Ready,
    /// The first dependency that failed, and why.
    Unavailable { asset: String, reason: String },
}

/// Drives one session and renders it into a named container.
pub struct HostBridge<S: Surface> {
    container: String,
    dependencies: Vec<AssetSpec>,
    loader: Arc<dyn AssetLoader>,
    surface: S,
    status: LoadStatus,
    session: Session,
}

impl<S: Surface> HostBridge<S> {
    /// Mount `session` into `container` and draw the loading view.
    pub fn new(
        container: impl Into<String>,
        session: Session,
        dependencies: Vec<AssetSpec>,
        loader: Arc<dyn AssetLoader>,
        surface: S,
    ) -> Self {
        let mut bridge = Self {
            container: container.into(),
            dependencies,
            loader,
            surface,
            status: LoadStatus::Loading,
            session,
        };
        bridge.render();
        bridge
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Load the dependency set once.
    ///
    /// All assets are fetched concurrently. The first failure, in dependency
    /// order, makes the bridge unavailable. Calling this again after it has
    /// resolved does nothing.
    pub async fn load_dependencies(&mut self) -> &LoadStatus {
        if self.status != LoadStatus::Loading {
            return &self.status;
        }

        let loader = Arc::clone(&self.loader);
        let outcomes = join_all(self.dependencies.iter().map(|asset| {
            let loader = Arc::clone(&loader);
            async move { (asset, loader.load(asset).await) }
        }))
        .await;

        let mut status = LoadStatus::Ready;
        for (asset, outcome) in outcomes {
            match outcome {
                Ok(loaded) => {
                    tracing::debug!(asset = %loaded.name, bytes = loaded.bytes, "asset loaded");
                }
                Err(e) => {
                    tracing::warn!("asset '{}' failed to load: {e:#}", asset.name);
                    if status == LoadStatus::Ready {
                        status = LoadStatus::Unavailable {
                            asset: asset.name.clone(),
                            reason: format!("{e:#}"),
                        };
                    }
                }
            }
        }

        tracing::info!(
            container = %self.container,
            loader = self.loader.name(),
            assets = self.dependencies.len(),
            ready = status == LoadStatus::Ready,
            "dependencies resolved"
        );
        self.status = status;
        self.render();
        &self.status
    }

    /// Resolve loading without fetching anything, e.g. after an external timeout.
    pub fn mark_unavailable(&mut self, asset: impl Into<String>, reason: impl Into<String>) {
        if self.status == LoadStatus::Loading {
            self.status = LoadStatus::Unavailable {
                asset: asset.into(),
                reason: reason.into(),
            };
            self.render();
        }
    }

    /// Start the session.
    ///
    /// Fails with [`BridgeError::DependencyUnavailable`] unless every
    /// dependency loaded; the user is alerted and the session stays put.
    pub fn start(&mut self) -> Result<(), BridgeError> {
        self.start_with_rng(&mut rand::thread_rng())
    }

    pub fn start_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BridgeError> {
        let reason = match &self.status {
            LoadStatus::Ready => None,
            LoadStatus::Loading => Some("dependencies are still loading".to_string()),
            LoadStatus::Unavailable { asset, reason } => Some(format!("{asset}: {reason}")),
        };
        if let Some(reason) = reason {
            self.surface.alert(LOAD_FAILURE_MESSAGE);
            return Err(BridgeError::DependencyUnavailable { reason });
        }

        self.session.start_with_rng(rng)?;
        self.render();
        Ok(())
    }

    /// Submit the answer for the question at `position`.
    pub fn submit_answer(&mut self, position: usize, answer: Answer) -> Result<bool, BridgeError> {
        let correct = self.session.submit_answer(position, answer)?;
        self.render();
        Ok(correct)
    }

    pub fn finish(&mut self) -> Result<(), BridgeError> {
        self.session.finish()?;
        self.render();
        Ok(())
    }

    pub fn restart(&mut self) -> Result<(), BridgeError> {
        self.restart_with_rng(&mut rand::thread_rng())
    }

    pub fn restart_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BridgeError> {
        self.session.restart_with_rng(rng)?;
        self.render();
        Ok(())
    }

    /// Take the bridge off the page. Session state is discarded.
    pub fn unmount(mut self) -> S {
        if !matches!(
            self.session.state(),
            SessionState::Finished | SessionState::NotStarted
        ) {
            tracing::debug!(session = %self.session.id(), "discarding unfinished session");
        }
        self.surface.clear(&self.container);
        self.surface
    }

    fn render(&mut self) {
        let session = &self.session;
        let config = session.config();
        let results;
        let view = match (session.state(), &self.status) {
            (SessionState::NotStarted, LoadStatus::Loading) => View::Loading,
            (SessionState::NotStarted, LoadStatus::Unavailable { .. }) => View::Unavailable {
                message: LOAD_FAILURE_MESSAGE,
            },
            (SessionState::NotStarted, LoadStatus::Ready) => View::Ready {
                title: session.quiz().title(),
                total: config
                    .question_limit()
                    .map_or(session.quiz().len(), |n| n.min(session.quiz().len())),
            },
            (SessionState::InProgress, _) => match session.current_question() {
                Some(q) => View::Question(q),
                None => return,
            },
            (SessionState::Reviewing, _) => {
                results = session.results();
                View::Review {
                    results: &results,
                    score: session.score(),
                    total: session.total(),
                }
            }
            (SessionState::Finished, _) => View::Finished {
                score: session.score(),
                total: session.total(),
            },
        };
        tracing::trace!(container = %self.container, view = view.name(), "render");
        self.surface.render(&self.container, config, &view);
    }
}

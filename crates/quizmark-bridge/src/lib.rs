//! quizmark-bridge: Host bridge between a quiz session and a page.
//!
//! Owns the per-bridge dependency set, loads it through an [`AssetLoader`],
//! and re-renders the session into its container after every transition.
//!
//! [`AssetLoader`]: quizmark_core::traits::AssetLoader

pub mod bridge;
pub mod config;
pub mod error;
pub mod file;
pub mod http;
pub mod loader;
pub mod mock;

pub use bridge::{HostBridge, LoadStatus, LOAD_FAILURE_MESSAGE};
pub use config::{load_config, load_config_from, QuizmarkConfig};
pub use error::{BridgeError, LoadError};
pub use loader::RoutingLoader;

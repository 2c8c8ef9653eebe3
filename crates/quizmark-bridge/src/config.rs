//! Host configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizmark_core::model::QuizConfig;
use quizmark_core::traits::AssetSpec;

use crate::bridge::DEFAULT_CONTAINER;

/// Top-level quizmark configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizmarkConfig {
    /// Container the bridge renders into.
    #[serde(default = "default_container")]
    pub container: String,
    /// Upper bound on dependency loading, in seconds. `None` waits forever.
    #[serde(default)]
    pub load_timeout_secs: Option<u64>,
    /// Quiz settings applied before each quiz's own front matter.
    #[serde(default)]
    pub defaults: QuizConfig,
    /// Assets to load before a quiz may start.
    #[serde(default)]
    pub assets: Vec<AssetSpec>,
}

fn default_container() -> String {
    DEFAULT_CONTAINER.to_string()
}

impl Default for QuizmarkConfig {
    fn default() -> Self {
        Self {
            container: default_container(),
            load_timeout_secs: None,
            defaults: QuizConfig::default(),
            assets: Vec::new(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!(
            "{}{}{}",
            &result[..start],
            value,
            &result[start + end + 1..]
        );
        from = start + value.len();
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizmark.toml` in the current directory
/// 2. `~/.config/quizmark/config.toml`
///
/// Environment variable override: `QUIZMARK_LOCALE`.
pub fn load_config() -> Result<QuizmarkConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizmarkConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizmark.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("using config {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizmarkConfig::default(),
    };

    if let Ok(locale) = std::env::var("QUIZMARK_LOCALE") {
        if !locale.trim().is_empty() {
            config.defaults.locale = locale.trim().to_string();
        }
    }

    Ok(config)
}

/// Parse a config document and expand `${VAR}` references in asset URLs.
pub fn parse_config(content: &str) -> Result<QuizmarkConfig> {
    let mut config: QuizmarkConfig = toml::from_str(content)?;
    anyhow::ensure!(
        config.defaults.n_questions != Some(0),
        "defaults.n_questions must be at least 1"
    );
    for asset in &mut config.assets {
        asset.url = resolve_env_vars(&asset.url);
    }
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizmark"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZMARK_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZMARK_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZMARK_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no ${closing"), "no ${closing");
        std::env::remove_var("_QUIZMARK_TEST_VAR");
    }

    #[test]
    fn resolved_values_are_not_expanded_again() {
        std::env::set_var("_QUIZMARK_SELF_REF", "${_QUIZMARK_SELF_REF}");
        assert_eq!(
            resolve_env_vars("a/${_QUIZMARK_SELF_REF}/b"),
            "a/${_QUIZMARK_SELF_REF}/b"
        );
        std::env::remove_var("_QUIZMARK_SELF_REF");
    }

    #[test]
    fn zero_n_questions_is_rejected() {
        let err = parse_config("[defaults]\nn_questions = 0\n").unwrap_err();
        assert!(err.to_string().contains("n_questions must be at least 1"));
    }

    #[test]
    fn default_config() {
        let config = QuizmarkConfig::default();
        assert_eq!(config.container, "quizdown");
        assert_eq!(config.load_timeout_secs, None);
        assert!(config.assets.is_empty());
        assert!(config.defaults.shuffle_answers);
    }

    #[test]
    fn parse_full_config() {
        std::env::set_var("_QUIZMARK_CDN", "https://cdn.example.com");
        let toml_str = r#"
container = "review-quiz"
load_timeout_secs = 10

[defaults]
primary_color = "rebeccapurple"
shuffle_questions = true
n_questions = 5

[[assets]]
name = "highlight"
url = "${_QUIZMARK_CDN}/highlight.js"

[[assets]]
name = "theme"
url = "assets/theme.css"
"#;
        let config = parse_config(toml_str).unwrap();
        std::env::remove_var("_QUIZMARK_CDN");

        assert_eq!(config.container, "review-quiz");
        assert_eq!(config.load_timeout_secs, Some(10));
        assert_eq!(config.defaults.primary_color, "rebeccapurple");
        assert!(config.defaults.shuffle_questions);
        assert_eq!(config.defaults.n_questions, Some(5));
        // Unset keys keep their defaults.
        assert_eq!(config.defaults.secondary_color, "#EFEFF0");
        assert_eq!(config.assets.len(), 2);
        assert_eq!(config.assets[0].url, "https://cdn.example.com/highlight.js");
        assert_eq!(config.assets[1].url, "assets/theme.css");
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_config_from(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizmark.toml");
        std::fs::write(&path, "container = \"box\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.container, "box");
    }

    #[test]
    fn malformed_config_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "container = [").unwrap();
        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config"));
    }
}

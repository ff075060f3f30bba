//! Configuration for the transform invoker
//!
//! One configuration object replaces the original's three near-identical
//! command revisions: the discovery, invocation and post-edit strategies are
//! all knobs here rather than separate code paths.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use crate::error::{Error, Result};
use crate::transform::PostEditAction;

/// How the set of transform identifiers is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryStrategy {
    /// Ask the tool itself via its list argument.
    Query,
    /// Scan the transforms directory for source files.
    Scan,
}

/// How the transform subprocess is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvocationStrategy {
    /// Execute the tool with an argument vector. No shell parsing: the
    /// encoded text reaches the tool as one opaque argument.
    Argv,
    /// Build a single command line and hand it to `sh -c`. Legacy: shell
    /// metacharacters that survive escaping are interpreted by the shell.
    Shell,
}

/// Settings controlling discovery, invocation and output handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MorphConfig {
    /// Command that runs the transform tool. May carry leading arguments,
    /// e.g. `"elixir transforms/run.exs"`.
    pub tool: String,
    /// Argument that makes the tool print its transform list.
    pub list_argument: String,
    /// Directory scanned for transform source files (scan strategy).
    pub transforms_dir: PathBuf,
    /// File extension of transform sources in `transforms_dir`.
    pub extension: String,
    pub discovery: DiscoveryStrategy,
    pub invocation: InvocationStrategy,
    pub post_edit: PostEditAction,
    /// Subprocess bound in seconds. `0` disables the timeout.
    pub timeout_secs: u64,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            tool: "extra".to_string(),
            list_argument: "list_transforms".to_string(),
            transforms_dir: PathBuf::from("transforms"),
            extension: "ex".to_string(),
            discovery: DiscoveryStrategy::Query,
            invocation: InvocationStrategy::Argv,
            post_edit: PostEditAction::Reindent,
            timeout_secs: 30,
        }
    }
}

impl MorphConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Otherwise `./morph.toml` is
    /// tried, then the user configuration directory, and finally defaults.
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Self::read_file(path).await;
        }

        for candidate in Self::candidates() {
            if candidate.exists() {
                tracing::debug!("Loading configuration from {}", candidate.display());
                return Self::read_file(&candidate).await;
            }
        }

        tracing::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    async fn read_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    fn candidates() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("morph.toml")];
        if let Some(dirs) = ProjectDirs::from("com", "morph", "morph") {
            paths.push(dirs.config_dir().join("morph.toml"));
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MorphConfig::default();
        assert_eq!(config.tool, "extra");
        assert_eq!(config.list_argument, "list_transforms");
        assert_eq!(config.discovery, DiscoveryStrategy::Query);
        assert_eq!(config.invocation, InvocationStrategy::Argv);
        assert_eq!(config.post_edit, PostEditAction::Reindent);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_zero_timeout_disables_bound() {
        let config = MorphConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            tool = "./tools/extra"
            list_argument = "list"
            transforms_dir = "lib/transforms"
            extension = "exs"
            discovery = "scan"
            invocation = "shell"
            post_edit = "reformat"
            timeout_secs = 5
        "#;

        let config: MorphConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.tool, "./tools/extra");
        assert_eq!(config.list_argument, "list");
        assert_eq!(config.transforms_dir, PathBuf::from("lib/transforms"));
        assert_eq!(config.extension, "exs");
        assert_eq!(config.discovery, DiscoveryStrategy::Scan);
        assert_eq!(config.invocation, InvocationStrategy::Shell);
        assert_eq!(config.post_edit, PostEditAction::Reformat);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_parse_partial_config_fills_defaults() {
        let config: MorphConfig = toml::from_str("tool = \"mytool\"").unwrap();
        assert_eq!(config.tool, "mytool");
        assert_eq!(config.discovery, DiscoveryStrategy::Query);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = toml::from_str::<MorphConfig>("no_such_field = true");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_explicit_missing_file() {
        let result = MorphConfig::load(Some(Path::new("/nonexistent/morph.toml"))).await;
        assert!(matches!(result.unwrap_err(), Error::Config(_)));
    }

    #[tokio::test]
    async fn test_load_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("morph.toml");
        std::fs::write(&path, "tool = \"custom\"\ndiscovery = \"scan\"\n").unwrap();

        let config = MorphConfig::load(Some(&path)).await.unwrap();
        assert_eq!(config.tool, "custom");
        assert_eq!(config.discovery, DiscoveryStrategy::Scan);
    }

    #[tokio::test]
    async fn test_load_malformed_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("morph.toml");
        std::fs::write(&path, "tool = [not toml").unwrap();

        let result = MorphConfig::load(Some(&path)).await;
        assert!(matches!(result.unwrap_err(), Error::Toml(_)));
    }
}

// Configuration loading.
// Reads the TOML config file holding the GitHub token, the document root and tracked products.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::error::{MetaError, Result};
use crate::github::client::GITHUB_API_BASE;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "GHMETA_CONFIG";

/// Environment variable used when no token is configured.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub store: StoreConfig,
    /// Products whose repositories the sync pass tracks.
    pub products: Vec<ProductConfig>,
}

/// `[github]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// API token, sent as bearer auth.
    pub token: Option<String>,
    /// API root, for GitHub Enterprise.
    pub api_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: GITHUB_API_BASE.to_string(),
        }
    }
}

/// `[store]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the `products/` document tree.
    pub root: Option<PathBuf>,
}

/// One `[[products]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConfig {
    pub name: String,
    /// Repositories as `owner/name`.
    #[serde(default)]
    pub repos: Vec<String>,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "ghmeta")
}

impl Config {
    /// Config file location: `$GHMETA_CONFIG`, else `{config_dir}/ghmeta/config.toml`.
    pub fn path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }

        project_dirs()
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("ghmeta.toml"))
    }

    /// Load configuration, falling back to defaults if the file is absent.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).await?;
        Self::parse(&content, path)
    }

    /// Parse TOML content; `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| MetaError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// The configured token, else `$GITHUB_TOKEN`.
    pub fn github_token(&self) -> Result<String> {
        resolve_token(self.github.token.as_deref(), std::env::var(TOKEN_ENV).ok())
    }

    /// Document root: the configured one, else the platform data directory.
    pub fn store_root(&self) -> PathBuf {
        if let Some(root) = &self.store.root {
            return root.clone();
        }

        project_dirs()
            .map(|dirs| dirs.data_dir().join("documents"))
            .unwrap_or_else(|| PathBuf::from("documents"))
    }
}

fn resolve_token(configured: Option<&str>, env: Option<String>) -> Result<String> {
    configured
        .map(str::to_string)
        .or(env)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(MetaError::MissingToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[github]
token = "ghp_secret"

[store]
root = "/var/lib/ghmeta"

[[products]]
name = "core"
repos = ["octo/engine", "octo/tools"]

[[products]]
name = "web"
"#;

    #[test]
    fn test_parse_full() {
        let config = Config::parse(SAMPLE, Path::new("config.toml")).unwrap();

        assert_eq!(config.github.token.as_deref(), Some("ghp_secret"));
        assert_eq!(config.github.api_url, GITHUB_API_BASE);
        assert_eq!(config.store_root(), PathBuf::from("/var/lib/ghmeta"));
        assert_eq!(config.products.len(), 2);
        assert_eq!(config.products[0].repos, vec!["octo/engine", "octo/tools"]);
        assert!(config.products[1].repos.is_empty());
        assert_eq!(config.github_token().unwrap(), "ghp_secret");
    }

    #[test]
    fn test_parse_invalid() {
        let err = Config::parse("[github\ntoken = 1", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, MetaError::Config { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_resolve_token() {
        assert_eq!(resolve_token(Some("a"), Some("b".to_string())).unwrap(), "a");
        assert_eq!(resolve_token(None, Some(" b\n".to_string())).unwrap(), "b");
        assert!(matches!(resolve_token(None, None), Err(MetaError::MissingToken)));
        assert!(matches!(resolve_token(Some("  "), None), Err(MetaError::MissingToken)));
    }

    #[tokio::test]
    async fn test_load_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(&temp_dir.path().join("config.toml")).await.unwrap();

        assert!(config.github.token.is_none());
        assert!(config.products.is_empty());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = Config::load(&path).await.unwrap();
        assert_eq!(config.products[0].name, "core");
    }
}

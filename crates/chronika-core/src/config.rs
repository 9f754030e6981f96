//! Chronika configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ChronikaError, Result};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChronikaConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub ai: AiConfig,
}

impl ChronikaConfig {
    /// Load config from `CHRONIKA_CONFIG` or the default path
    /// (~/.chronika/config.toml). Missing file yields defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var("CHRONIKA_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_path());
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChronikaError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ChronikaError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| ChronikaError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the Chronika home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".chronika")
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins; "*" allows any origin (development).
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_cors_origins() -> Vec<String> { vec!["*".into()] }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String { "~/.chronika/chronika.db".into() }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: default_db_path() }
    }
}

/// Auth / token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Signing secret for JWTs. The `CHRONIKA_JWT_SECRET` env var wins over
    /// the file value.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_access_ttl")]
    pub access_ttl_secs: i64,
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_secs: i64,
}

fn default_jwt_secret() -> String { "dev-secret-change-in-production".into() }
fn default_access_ttl() -> i64 { 3600 }
fn default_refresh_ttl() -> i64 { 30 * 24 * 3600 }

impl AuthConfig {
    /// Effective JWT secret: env override first, then the configured value.
    pub fn resolved_jwt_secret(&self) -> String {
        std::env::var("CHRONIKA_JWT_SECRET").unwrap_or_else(|_| self.jwt_secret.clone())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_ttl_secs: default_access_ttl(),
            refresh_ttl_secs: default_refresh_ttl(),
        }
    }
}

/// Semantic search / fact generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Master switch for the embedding encoder. Disabled means keyword
    /// search only — the service stays fully functional.
    #[serde(default = "bool_true")]
    pub enabled: bool,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_model_cache_dir")]
    pub cache_dir: String,
    /// Candidates scoring at or below this are dropped from semantic results.
    #[serde(default = "default_threshold")]
    pub similarity_threshold: f32,
    /// Texts are truncated to this many chars before encoding.
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
    #[serde(default = "default_search_top_k")]
    pub search_top_k: usize,
    #[serde(default = "default_facts_count")]
    pub facts_count: usize,
    #[serde(default = "default_facts_max")]
    pub facts_max: usize,
    #[serde(default = "default_recommend_count")]
    pub recommend_count: usize,
    #[serde(default = "default_recommend_max")]
    pub recommend_max: usize,
    /// With no model available, recommendations fall back to a random
    /// shuffle of the other leaders; false keeps input order instead.
    #[serde(default = "bool_true")]
    pub shuffle_fallback: bool,
}

fn bool_true() -> bool { true }
fn default_model() -> String { "sentence-transformers/all-MiniLM-L6-v2".into() }
fn default_model_cache_dir() -> String { "~/.chronika/models".into() }
fn default_threshold() -> f32 { 0.3 }
fn default_max_input_chars() -> usize { 512 }
fn default_search_top_k() -> usize { 10 }
fn default_facts_count() -> usize { 3 }
fn default_facts_max() -> usize { 10 }
fn default_recommend_count() -> usize { 3 }
fn default_recommend_max() -> usize { 5 }

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: default_model(),
            cache_dir: default_model_cache_dir(),
            similarity_threshold: default_threshold(),
            max_input_chars: default_max_input_chars(),
            search_top_k: default_search_top_k(),
            facts_count: default_facts_count(),
            facts_max: default_facts_max(),
            recommend_count: default_recommend_count(),
            recommend_max: default_recommend_max(),
            shuffle_fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChronikaConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ai.model, "sentence-transformers/all-MiniLM-L6-v2");
        assert!((config.ai.similarity_threshold - 0.3).abs() < 1e-6);
        assert!(config.ai.enabled);
        assert_eq!(config.auth.access_ttl_secs, 3600);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [server]
            host = "0.0.0.0"
            port = 9090

            [ai]
            enabled = false
            similarity_threshold = 0.5
        "#;

        let config: ChronikaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert!(!config.ai.enabled);
        assert!((config.ai.similarity_threshold - 0.5).abs() < 1e-6);
        // untouched sections fall back to defaults
        assert_eq!(config.database.path, "~/.chronika/chronika.db");
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: ChronikaConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ai.search_top_k, 10);
        assert_eq!(config.ai.facts_count, 3);
    }

    #[test]
    fn test_home_dir() {
        let home = ChronikaConfig::home_dir();
        assert!(home.to_string_lossy().contains("chronika"));
    }
}

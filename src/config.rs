//! Application configuration module
//!
//! Configuration lives in `config.json` in the working directory.
//! A default file is written on first run.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Application configuration / 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub upload: UploadConfig,
    pub search: SearchConfig,
    pub session: SessionConfig,
    /// Directory holding index.html, login.html, signup.html and assets
    pub static_dir: String,
}

/// Server configuration / 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub host: String,
    pub port: u16,
}

/// Database configuration / 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Data directory path / 数据目录路径
    pub data_dir: String,
    /// Database file name (relative to data_dir)
    pub db_file: String,
}

/// Document upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Directory uploaded documents are written to
    pub dir: String,
    /// Request body limit in megabytes
    pub max_size_mb: usize,
    /// Lowercase extensions accepted by /upload
    pub allowed_extensions: Vec<String>,
}

/// Search tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_suggestions: usize,
    pub suggestion_cutoff: f64,
    pub max_common_pairs: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub ttl_hours: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            db_file: "corpus.db".to_string(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: "uploads".to_string(),
            max_size_mb: 32,
            allowed_extensions: ["pdf", "txt", "doc", "docx"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 5,
            suggestion_cutoff: 0.6,
            max_common_pairs: 10,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_hours: 24 * 7 }
    }
}

impl AppConfig {
    /// Get the full database URL
    pub fn get_database_url(&self) -> String {
        let db_path = Path::new(&self.database.data_dir).join(&self.database.db_file);
        format!("sqlite:{}?mode=rwc", db_path.to_string_lossy())
    }

    pub fn get_data_dir(&self) -> PathBuf {
        PathBuf::from(&self.database.data_dir)
    }

    pub fn get_upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.upload.dir)
    }

    pub fn get_static_dir(&self) -> PathBuf {
        PathBuf::from(&self.static_dir)
    }

    /// Get the server bind address
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            upload: UploadConfig::default(),
            search: SearchConfig::default(),
            session: SessionConfig::default(),
            static_dir: "static".to_string(),
        }
    }
}

/// Get the config file path
fn get_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.json")
}

/// Load `config.json` from the working directory, creating it if missing / 加载配置文件
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&get_config_path())
}

/// Load configuration from `path`, or write the defaults there if it does not exist
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;

        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    } else {
        let config = AppConfig::default();
        save_config_to(&config, path)?;
        tracing::info!("Created default configuration at {:?}", path);
        Ok(config)
    }
}

/// Save configuration to `path`
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_written_then_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let created = load_config_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created.search.max_suggestions, 5);
        assert_eq!(created.upload.allowed_extensions, vec!["pdf", "txt", "doc", "docx"]);

        let reloaded = load_config_from(&path).unwrap();
        assert_eq!(reloaded.get_bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"server": {"port": 8080}}"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.search.suggestion_cutoff, 0.6);
        assert_eq!(config.database.db_file, "corpus.db");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(load_config_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_database_url() {
        let config = AppConfig::default();
        let url = config.get_database_url();
        assert!(url.starts_with("sqlite:"));
        assert!(url.ends_with("corpus.db?mode=rwc"));
    }
}

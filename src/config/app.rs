//! Main application configuration
//!
//! This module defines the configuration structures for the team ranking
//! service, including environment variable and TOML file loading plus
//! validation.

use crate::ranking::ScoringTable;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub storage: StorageSettings,
    pub scoring: ScoringTable,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging and health reports
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Interface the HTTP server binds to
    pub host: String,
    /// Port for the HTTP API, health and metrics endpoints
    pub http_port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,
}

/// Record store settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// JSON snapshot written after every commit; in-memory only when unset
    pub snapshot_path: Option<PathBuf>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "team-ranking".to_string(),
            log_level: "info".to_string(),
            host: "0.0.0.0".to_string(),
            http_port: 8080,
            shutdown_timeout_seconds: 30,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }
        if let Ok(host) = env::var("HTTP_HOST") {
            config.service.host = host;
        }
        if let Ok(port) = env::var("HTTP_PORT") {
            config.service.http_port = port
                .parse()
                .map_err(|_| anyhow!("Invalid HTTP_PORT value: {}", port))?;
        }
        if let Ok(timeout) = env::var("SHUTDOWN_TIMEOUT_SECONDS") {
            config.service.shutdown_timeout_seconds = timeout
                .parse()
                .map_err(|_| anyhow!("Invalid SHUTDOWN_TIMEOUT_SECONDS value: {}", timeout))?;
        }

        // Storage settings
        if let Ok(path) = env::var("SNAPSHOT_PATH") {
            config.storage.snapshot_path = Some(PathBuf::from(path));
        }

        // Scoring settings
        if let Ok(points) = env::var("POINTS_FOR_WIN") {
            config.scoring.win = points
                .parse()
                .map_err(|_| anyhow!("Invalid POINTS_FOR_WIN value: {}", points))?;
        }
        if let Ok(points) = env::var("POINTS_FOR_DRAW") {
            config.scoring.draw = points
                .parse()
                .map_err(|_| anyhow!("Invalid POINTS_FOR_DRAW value: {}", points))?;
        }
        if let Ok(points) = env::var("POINTS_FOR_DEFEAT") {
            config.scoring.defeat = points
                .parse()
                .map_err(|_| anyhow!("Invalid POINTS_FOR_DEFEAT value: {}", points))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.service.shutdown_timeout_seconds)
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service.host, self.service.http_port)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.http_port == 0 {
        return Err(anyhow!("HTTP port cannot be 0"));
    }
    if config.service.host.is_empty() {
        return Err(anyhow!("HTTP host cannot be empty"));
    }
    if config.service.shutdown_timeout_seconds == 0 {
        return Err(anyhow!("Shutdown timeout must be greater than 0"));
    }

    if let Some(path) = &config.storage.snapshot_path {
        if path.as_os_str().is_empty() {
            return Err(anyhow!("Snapshot path cannot be empty"));
        }
    }

    // A win must outrank a draw, and a draw must not score below a defeat
    if config.scoring.win <= config.scoring.draw {
        return Err(anyhow!(
            "Points for a win ({}) must exceed points for a draw ({})",
            config.scoring.win,
            config.scoring.draw
        ));
    }
    if config.scoring.draw < config.scoring.defeat {
        return Err(anyhow!(
            "Points for a draw ({}) cannot be lower than points for a defeat ({})",
            config.scoring.draw,
            config.scoring.defeat
        ));
    }

    Ok(())
}

/// Configuration management for the Sentinel panel
use crate::error::{SentinelError, SentinelResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentinelConfig {
    pub storage: StorageConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// Where collections are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// One JSON file per collection under the data directory
    Disk,
    /// Process-local; nothing survives a restart
    Memory,
}

impl StorageBackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackendKind::Disk => "disk",
            StorageBackendKind::Memory => "memory",
        }
    }
}

impl FromStr for StorageBackendKind {
    type Err = SentinelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disk" => Ok(StorageBackendKind::Disk),
            "memory" => Ok(StorageBackendKind::Memory),
            other => Err(SentinelError::Validation(format!(
                "Unknown storage backend: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for StorageBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackendKind,
    pub data_directory: PathBuf,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub directory: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level for the panel's own targets; `RUST_LOG` overrides it
    pub level: String,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub fn default_filter(&self) -> String {
        format!("sentinel_panel={0},sentinel={0}", self.level)
    }
}

impl SentinelConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> SentinelResult<Self> {
        dotenv::dotenv().ok();

        let backend = env::var("SENTINEL_STORAGE_BACKEND")
            .unwrap_or_else(|_| "disk".to_string())
            .parse()?;

        let data_directory: PathBuf = env::var("SENTINEL_DATA_DIRECTORY")
            .unwrap_or_else(|_| "./data".to_string())
            .into();
        let export_directory = env::var("SENTINEL_EXPORT_DIRECTORY")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_directory.join("exports"));

        let log_level = env::var("SENTINEL_LOG_LEVEL")
            .map(|level| level.trim().to_lowercase())
            .unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            storage: StorageConfig {
                backend,
                data_directory,
            },
            export: ExportConfig {
                directory: export_directory,
            },
            logging: LoggingConfig { level: log_level },
        })
    }

    /// Configuration for a throwaway in-memory panel
    pub fn in_memory() -> Self {
        Self {
            storage: StorageConfig {
                backend: StorageBackendKind::Memory,
                data_directory: PathBuf::from("./data"),
            },
            export: ExportConfig {
                directory: PathBuf::from("./data/exports"),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SentinelResult<()> {
        if self.storage.data_directory.as_os_str().is_empty() {
            return Err(SentinelError::Validation(
                "Data directory cannot be empty".to_string(),
            ));
        }

        if self.export.directory.as_os_str().is_empty() {
            return Err(SentinelError::Validation(
                "Export directory cannot be empty".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(SentinelError::Validation(format!(
                "Unknown log level: {}",
                self.logging.level
            )));
        }

        Ok(())
    }
}

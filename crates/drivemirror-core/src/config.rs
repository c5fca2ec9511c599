//! Configuration module for drivemirror.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for drivemirror.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    pub destination: DestinationConfig,
    pub sync: SyncConfig,
    pub logging: LoggingConfig,
}

/// Source bucket settings (S3 or S3-compatible storage).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Bucket to mirror from.
    pub bucket: String,
    /// Region name; any value works for S3-compatible endpoints.
    pub region: String,
    /// Custom endpoint URL (MinIO, Wasabi, ...). `None` means AWS S3.
    pub endpoint: Option<String>,
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
}

/// Destination drive settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// Drive folder id that acts as the mirror root.
    pub root_folder_id: String,
    /// OAuth2 credentials for the drive API.
    pub oauth: OAuthConfig,
}

/// OAuth2 refresh-token credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Long-lived refresh token obtained out of band.
    pub refresh_token: String,
}

/// Reconciliation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Addressing mode: `hierarchical` or `flattened`.
    pub mode: String,
    /// Seconds between reconciliation passes.
    pub poll_interval: u64,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
    /// Optional log file; `None` logs to stdout only.
    pub file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/drivemirror/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("drivemirror")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

// Config derives Default because all its fields implement Default.

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: "us-east-1".to_string(),
            endpoint: None,
            access_key_id: String::new(),
            secret_access_key: String::new(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            mode: "hierarchical".to_string(),
            poll_interval: 300,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"sync.poll_interval"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid values for `sync.mode`.
const VALID_ADDRESSING_MODES: &[&str] = &["hierarchical", "flattened"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- source ---
        if self.source.bucket.is_empty() {
            errors.push(ValidationError {
                field: "source.bucket".into(),
                message: "must not be empty".into(),
            });
        }
        if self.source.region.is_empty() {
            errors.push(ValidationError {
                field: "source.region".into(),
                message: "must not be empty".into(),
            });
        }
        if self.source.access_key_id.is_empty() {
            errors.push(ValidationError {
                field: "source.access_key_id".into(),
                message: "must not be empty".into(),
            });
        }
        if self.source.secret_access_key.is_empty() {
            errors.push(ValidationError {
                field: "source.secret_access_key".into(),
                message: "must not be empty".into(),
            });
        }

        // --- destination ---
        if self.destination.root_folder_id.is_empty() {
            errors.push(ValidationError {
                field: "destination.root_folder_id".into(),
                message: "must not be empty".into(),
            });
        }
        if self.destination.oauth.client_id.is_empty() {
            errors.push(ValidationError {
                field: "destination.oauth.client_id".into(),
                message: "must not be empty".into(),
            });
        }
        if self.destination.oauth.client_secret.is_empty() {
            errors.push(ValidationError {
                field: "destination.oauth.client_secret".into(),
                message: "must not be empty".into(),
            });
        }
        if self.destination.oauth.refresh_token.is_empty() {
            errors.push(ValidationError {
                field: "destination.oauth.refresh_token".into(),
                message: "must not be empty".into(),
            });
        }

        // --- sync ---
        if !VALID_ADDRESSING_MODES.contains(&self.sync.mode.as_str()) {
            errors.push(ValidationError {
                field: "sync.mode".into(),
                message: format!(
                    "invalid mode '{}'; valid options: {}",
                    self.sync.mode,
                    VALID_ADDRESSING_MODES.join(", ")
                ),
            });
        }
        if self.sync.poll_interval == 0 {
            errors.push(ValidationError {
                field: "sync.poll_interval".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use drivemirror_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .source_bucket("backups")
///     .destination_root_folder("1AbcDEfGh")
///     .sync_mode("flattened")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- source ---

    pub fn source_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.config.source.bucket = bucket.into();
        self
    }

    pub fn source_region(mut self, region: impl Into<String>) -> Self {
        self.config.source.region = region.into();
        self
    }

    pub fn source_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.source.endpoint = Some(endpoint.into());
        self
    }

    pub fn source_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.config.source.access_key_id = access_key_id.into();
        self.config.source.secret_access_key = secret_access_key.into();
        self
    }

    // --- destination ---

    pub fn destination_root_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.config.destination.root_folder_id = folder_id.into();
        self
    }

    pub fn destination_oauth(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        self.config.destination.oauth.client_id = client_id.into();
        self.config.destination.oauth.client_secret = client_secret.into();
        self.config.destination.oauth.refresh_token = refresh_token.into();
        self
    }

    // --- sync ---

    pub fn sync_mode(mut self, mode: impl Into<String>) -> Self {
        self.config.sync.mode = mode.into();
        self
    }

    pub fn sync_poll_interval(mut self, seconds: u64) -> Self {
        self.config.sync.poll_interval = seconds;
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn logging_file(mut self, file: PathBuf) -> Self {
        self.config.logging.file = Some(file);
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Engine configuration, loaded from an optional `greenlight` config file
/// with `GREENLIGHT_*` environment overrides on top. Every field has a
/// default, so an empty deployment works out of the box.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Request and mailbox limits
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Task snapshot persistence settings
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Attachments accepted on a single client request
    #[serde(default = "defaults::max_request_attachments")]
    pub max_request_attachments: usize,
    /// Notification page size when the caller names none
    #[serde(default = "defaults::notification_page")]
    pub notification_page: usize,
    /// Hard cap on a notification listing
    #[serde(default = "defaults::notification_page_max")]
    pub notification_page_max: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SnapshotConfig {
    /// Whether the host should persist periodic snapshots
    #[serde(default)]
    pub enabled: bool,
    /// Where the snapshot file lives
    #[serde(default = "defaults::snapshot_path")]
    pub path: PathBuf,
}

mod defaults {
    use std::path::PathBuf;

    pub fn max_request_attachments() -> usize {
        8
    }
    pub fn notification_page() -> usize {
        50
    }
    pub fn notification_page_max() -> usize {
        200
    }
    pub fn snapshot_path() -> PathBuf {
        PathBuf::from(".greenlight/tasks.snapshot.json")
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_attachments: defaults::max_request_attachments(),
            notification_page: defaults::notification_page(),
            notification_page_max: defaults::notification_page_max(),
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: defaults::snapshot_path(),
        }
    }
}

impl EngineConfig {
    /// Loads `greenlight.{toml,json,yaml}` from the working directory if
    /// present, then applies `GREENLIGHT_*` environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    pub fn load_from(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();
        builder = match path {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("greenlight").required(false)),
        };
        let settings = builder
            .add_source(Environment::with_prefix("GREENLIGHT").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

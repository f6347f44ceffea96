//! Application configuration.
//!
//! # Responsibility
//! - Describe logging, latency and storage backend settings.
//! - Load them from JSON with defaults for every omitted field.
//!
//! # Invariants
//! - Unknown keys are rejected so typos do not silently fall back.
//! - Default latencies match the simulated network delays of the services.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub log_level: String,
    /// Absolute directory for rolling log files; stderr when unset.
    pub log_dir: Option<PathBuf>,
    pub latency: LatencyConfig,
    pub storage: StorageBackend,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            latency: LatencyConfig::default(),
            storage: StorageBackend::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(ConfigError::Parse)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

/// Where service collections live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    /// SQLite record store; in-memory database when `path` is unset.
    Sqlite {
        #[serde(default)]
        path: Option<PathBuf>,
    },
}

/// Artificial delays for each collection's service.
///
/// Deserialization starts from [`LatencyConfig::default`] and overwrites only
/// the operations named in the config, so a partial section keeps the
/// collection's own defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LatencyOverrides")]
pub struct LatencyConfig {
    pub items: OperationLatency,
    pub pickups: OperationLatency,
    pub storage_plans: OperationLatency,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            items: OperationLatency::with_list_ms(300),
            pickups: OperationLatency::with_list_ms(250),
            storage_plans: OperationLatency::with_list_ms(200),
        }
    }
}

impl LatencyConfig {
    /// Every call resolves without sleeping.
    pub fn none() -> Self {
        Self {
            items: OperationLatency::none(),
            pickups: OperationLatency::none(),
            storage_plans: OperationLatency::none(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LatencyOverrides {
    items: OperationOverrides,
    pickups: OperationOverrides,
    storage_plans: OperationOverrides,
}

impl From<LatencyOverrides> for LatencyConfig {
    fn from(value: LatencyOverrides) -> Self {
        let defaults = Self::default();
        Self {
            items: value.items.apply(defaults.items),
            pickups: value.pickups.apply(defaults.pickups),
            storage_plans: value.storage_plans.apply(defaults.storage_plans),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OperationOverrides {
    get_all_ms: Option<u64>,
    get_by_id_ms: Option<u64>,
    create_ms: Option<u64>,
    update_ms: Option<u64>,
    delete_ms: Option<u64>,
}

impl OperationOverrides {
    fn apply(self, base: OperationLatency) -> OperationLatency {
        OperationLatency {
            get_all_ms: self.get_all_ms.unwrap_or(base.get_all_ms),
            get_by_id_ms: self.get_by_id_ms.unwrap_or(base.get_by_id_ms),
            create_ms: self.create_ms.unwrap_or(base.create_ms),
            update_ms: self.update_ms.unwrap_or(base.update_ms),
            delete_ms: self.delete_ms.unwrap_or(base.delete_ms),
        }
    }
}

/// Per-operation delays in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperationLatency {
    pub get_all_ms: u64,
    pub get_by_id_ms: u64,
    pub create_ms: u64,
    pub update_ms: u64,
    pub delete_ms: u64,
}

impl OperationLatency {
    /// Standard delays with a collection-specific `get_all` delay.
    pub const fn with_list_ms(get_all_ms: u64) -> Self {
        Self {
            get_all_ms,
            get_by_id_ms: 200,
            create_ms: 400,
            update_ms: 350,
            delete_ms: 300,
        }
    }

    pub const fn none() -> Self {
        Self {
            get_all_ms: 0,
            get_by_id_ms: 0,
            create_ms: 0,
            update_ms: 0,
            delete_ms: 0,
        }
    }

    pub fn get_all(&self) -> Duration {
        Duration::from_millis(self.get_all_ms)
    }

    pub fn get_by_id(&self) -> Duration {
        Duration::from_millis(self.get_by_id_ms)
    }

    pub fn create(&self) -> Duration {
        Duration::from_millis(self.create_ms)
    }

    pub fn update(&self) -> Duration {
        Duration::from_millis(self.update_ms)
    }

    pub fn delete(&self) -> Duration {
        Duration::from_millis(self.delete_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = AppConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.latency.items.get_all_ms, 300);
        assert_eq!(config.latency.pickups.get_all_ms, 250);
        assert_eq!(config.latency.storage_plans.get_all_ms, 200);
        assert_eq!(config.storage, StorageBackend::Memory);
    }

    #[test]
    fn partial_latency_keeps_other_defaults() {
        let config = AppConfig::from_json_str(
            r#"{"latency": {"items": {"get_all_ms": 5}}, "storage": {"kind": "sqlite"}}"#,
        )
        .unwrap();

        assert_eq!(config.latency.items.get_all_ms, 5);
        assert_eq!(config.latency.items.create_ms, 400);
        assert_eq!(config.latency.pickups.get_all_ms, 250);
        assert_eq!(config.storage, StorageBackend::Sqlite { path: None });
    }

    #[test]
    fn partial_collection_keeps_its_own_list_delay() {
        let config = AppConfig::from_json_str(
            r#"{"latency": {"pickups": {"create_ms": 5}, "storage_plans": {"delete_ms": 7}}}"#,
        )
        .unwrap();

        assert_eq!(config.latency.pickups.create_ms, 5);
        assert_eq!(config.latency.pickups.get_all_ms, 250);
        assert_eq!(config.latency.pickups.get_by_id_ms, 200);
        assert_eq!(config.latency.storage_plans.delete_ms, 7);
        assert_eq!(config.latency.storage_plans.get_all_ms, 200);
        assert_eq!(config.latency.items, OperationLatency::with_list_ms(300));
    }

    #[test]
    fn serialized_latency_reads_back_unchanged() {
        let mut latency = LatencyConfig::default();
        latency.pickups.update_ms = 1;
        let raw = serde_json::to_string(&latency).unwrap();
        let parsed: LatencyConfig = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, latency);
    }

    #[test]
    fn unknown_latency_operation_is_rejected() {
        let err = AppConfig::from_json_str(r#"{"latency": {"items": {"list_ms": 1}}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = AppConfig::from_json_str(r#"{"latncy": {}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let err = AppConfig::load(&missing).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }
}

#![forbid(unsafe_code)]

use super::StoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_FILE: &str = "docver.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_MAX_VERSION_ATTEMPTS: u32 = 3;
const MAX_VERSION_ATTEMPTS_CAP: u32 = 10;

/// What to do when a requested tag id no longer exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingTagPolicy {
    #[default]
    Skip,
    Reject,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub storage_dir: PathBuf,
    pub db_file: String,
    pub busy_timeout_ms: u64,
    pub max_version_attempts: u32,
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub dangling_tags: DanglingTagPolicy,
    /// Filter directive for the binary's subscriber. Lives here so one YAML
    /// file configures both; the store never reads it.
    pub log_level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("docver-data"),
            db_file: DEFAULT_DB_FILE.to_string(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            max_version_attempts: DEFAULT_MAX_VERSION_ATTEMPTS,
            default_page_size: 20,
            max_page_size: 100,
            dangling_tags: DanglingTagPolicy::Skip,
            log_level: "info".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn for_dir(storage_dir: impl AsRef<Path>) -> Self {
        Self {
            storage_dir: storage_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, StoreError> {
        serde_yaml::from_str::<Self>(raw).map_err(|err| StoreError::Config(err.to_string()))
    }

    /// Defaults, then the optional YAML file, then `DOCVER_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, StoreError> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|err| {
                    StoreError::Config(format!("read {}: {err}", path.display()))
                })?;
                Self::from_yaml_str(&raw)?
            }
            None => Self::default(),
        };
        config.apply_env_from(|name| std::env::var(name).ok())?;
        Ok(config.normalized())
    }

    pub fn apply_env_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), StoreError> {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(value) = var("DOCVER_STORAGE_DIR") {
            self.storage_dir = PathBuf::from(value);
        }
        if let Some(value) = var("DOCVER_DB_FILE") {
            self.db_file = value;
        }
        if let Some(value) = var("DOCVER_BUSY_TIMEOUT_MS") {
            self.busy_timeout_ms = parse_env("DOCVER_BUSY_TIMEOUT_MS", &value)?;
        }
        if let Some(value) = var("DOCVER_MAX_VERSION_ATTEMPTS") {
            self.max_version_attempts = parse_env("DOCVER_MAX_VERSION_ATTEMPTS", &value)?;
        }
        if let Some(value) = var("DOCVER_DANGLING_TAGS") {
            self.dangling_tags = match value.to_ascii_lowercase().as_str() {
                "skip" => DanglingTagPolicy::Skip,
                "reject" => DanglingTagPolicy::Reject,
                _ => {
                    return Err(StoreError::Config(format!(
                        "DOCVER_DANGLING_TAGS must be skip or reject, got {value}"
                    )));
                }
            };
        }
        if let Some(value) = var("DOCVER_LOG_LEVEL") {
            self.log_level = value;
        }
        Ok(())
    }

    pub fn normalized(mut self) -> Self {
        self.max_version_attempts = self
            .max_version_attempts
            .clamp(1, MAX_VERSION_ATTEMPTS_CAP);
        self.max_page_size = self.max_page_size.max(1);
        self.default_page_size = self.default_page_size.clamp(1, self.max_page_size);
        if self.db_file.trim().is_empty() {
            self.db_file = DEFAULT_DB_FILE.to_string();
        }
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.storage_dir.join(&self.db_file)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, StoreError> {
    value
        .parse::<T>()
        .map_err(|_| StoreError::Config(format!("{name} has an invalid value: {value}")))
}

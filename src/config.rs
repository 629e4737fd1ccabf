//! Configuration file support for the allow-list claim tools.
//!
//! This module provides configuration file loading from TOML format.

use crate::types::Digest;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_MAX_ACCOUNTS_FILE_SIZE: u64 = 100 * 1024 * 1024;
const DEFAULT_MAX_REQUEST_FILE_SIZE: u64 = 1024 * 1024;
const DEFAULT_MAX_PROOF_DEPTH: usize = 64;
const DEFAULT_TIMESTAMP_TOLERANCE_SECS: u64 = 300;
const DEFAULT_TIMESTAMP_MAX_AGE_SECS: u64 = 86400;

/// Configuration for the allow-list claim system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub allowlist: AllowlistConfig,
    #[serde(default)]
    pub claims: ClaimsConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowlistConfig {
    /// Committed root as hex; the claimer's `--root` flag takes precedence.
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default = "default_max_accounts_file_size")]
    pub max_accounts_file_size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimsConfig {
    #[serde(default = "default_store_file")]
    pub store_file: PathBuf,
    #[serde(default = "default_max_request_file_size")]
    pub max_request_file_size: u64,
    /// Requests with more siblings than this are refused before hashing.
    #[serde(default = "default_max_proof_depth")]
    pub max_proof_depth: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(default = "default_timestamp_tolerance_secs")]
    pub timestamp_tolerance_secs: u64,
    #[serde(default = "default_timestamp_max_age_secs")]
    pub timestamp_max_age_secs: u64,
}

impl Default for AllowlistConfig {
    fn default() -> Self {
        Self {
            root: None,
            max_accounts_file_size: DEFAULT_MAX_ACCOUNTS_FILE_SIZE,
        }
    }
}

impl Default for ClaimsConfig {
    fn default() -> Self {
        Self {
            store_file: default_store_file(),
            max_request_file_size: DEFAULT_MAX_REQUEST_FILE_SIZE,
            max_proof_depth: DEFAULT_MAX_PROOF_DEPTH,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            timestamp_tolerance_secs: DEFAULT_TIMESTAMP_TOLERANCE_SECS,
            timestamp_max_age_secs: DEFAULT_TIMESTAMP_MAX_AGE_SECS,
        }
    }
}

fn default_max_accounts_file_size() -> u64 {
    DEFAULT_MAX_ACCOUNTS_FILE_SIZE
}

fn default_store_file() -> PathBuf {
    PathBuf::from("claims.txt")
}

fn default_max_request_file_size() -> u64 {
    DEFAULT_MAX_REQUEST_FILE_SIZE
}

fn default_max_proof_depth() -> usize {
    DEFAULT_MAX_PROOF_DEPTH
}

fn default_timestamp_tolerance_secs() -> u64 {
    DEFAULT_TIMESTAMP_TOLERANCE_SECS
}

fn default_timestamp_max_age_secs() -> u64 {
    DEFAULT_TIMESTAMP_MAX_AGE_SECS
}

impl AllowlistConfig {
    /// Parses the configured root, if any.
    pub fn root_digest(&self) -> Result<Option<Digest>> {
        self.root
            .as_deref()
            .map(|s| {
                s.parse::<Digest>()
                    .with_context(|| format!("Invalid allow-list root in config: '{s}'"))
            })
            .transpose()
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn load_from_file_or_default(path: &PathBuf) -> Self {
        Self::load_from_file(path).unwrap_or_default()
    }

    pub fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

//! Configuration Module
//!
//! The topology never owns its configuration source. It asks a `ConfigProvider`
//! for the handful of values it needs, which keeps the directory usable behind
//! whatever settings service the embedding process runs.
//!
//! ## Providers
//! - **`EnvConfig`**: Reads comma-separated arrays from environment variables
//!   (`BITMAP_SUPPORTED_FRAMES=default,brands`).
//! - **`StaticConfig`**: An in-memory table, used when the values are already known.

use std::collections::HashMap;

/// Key under which the allow-list of frame names is stored.
pub const SUPPORTED_FRAMES_KEY: &str = "supported_frames";

/// Allow-list used when no provider supplies one.
pub const DEFAULT_SUPPORTED_FRAMES: &[&str] = &["default"];

/// Environment prefix used by `EnvConfig::default()`.
pub const DEFAULT_ENV_PREFIX: &str = "BITMAP";

/// Source of configuration values consumed by the topology.
pub trait ConfigProvider: Send + Sync {
    /// Returns the array stored under `key`, or `None` if the key is unset.
    fn get_string_array(&self, key: &str) -> Option<Vec<String>>;

    /// Returns the array stored under `key`, falling back to `default`.
    fn get_string_array_default(&self, key: &str, default: &[&str]) -> Vec<String> {
        self.get_string_array(key)
            .unwrap_or_else(|| default.iter().map(|s| s.to_string()).collect())
    }
}

/// Reads `<PREFIX>_<KEY>` variables from the process environment.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    prefix: String,
}

impl EnvConfig {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.trim_end_matches('_').to_string(),
        }
    }

    /// Name of the variable consulted for `key`, e.g. `BITMAP_SUPPORTED_FRAMES`.
    pub fn var_name(&self, key: &str) -> String {
        let key = key.replace(['-', '.'], "_").to_uppercase();
        if self.prefix.is_empty() {
            key
        } else {
            format!("{}_{}", self.prefix, key)
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_PREFIX)
    }
}

impl ConfigProvider for EnvConfig {
    fn get_string_array(&self, key: &str) -> Option<Vec<String>> {
        let raw = std::env::var(self.var_name(key)).ok()?;
        let values = split_list(&raw);
        if values.is_empty() { None } else { Some(values) }
    }
}

/// In-memory configuration table.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    arrays: HashMap<String, Vec<String>>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_string_array<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arrays
            .insert(key.to_string(), values.into_iter().map(Into::into).collect());
        self
    }
}

impl ConfigProvider for StaticConfig {
    fn get_string_array(&self, key: &str) -> Option<Vec<String>> {
        self.arrays.get(key).cloned()
    }
}

/// Splits a comma-separated list, trimming entries and dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

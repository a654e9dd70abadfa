use crate::controller::FilterPagePolicy;
use crate::github::client::DEFAULT_API_BASE_URL;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Configuration keys enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    ApiBaseUrl,
    TimeoutSecs,
    ResetPageOnFilter,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::ApiBaseUrl => "api_base_url",
            ConfigKey::TimeoutSecs => "timeout_secs",
            ConfigKey::ResetPageOnFilter => "reset_page_on_filter",
        }
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::ApiBaseUrl,
            ConfigKey::TimeoutSecs,
            ConfigKey::ResetPageOnFilter,
        ]
    }
}

/// Filename of the configuration within the .repoview directory.
pub const PROJECT_CONFIG_FILENAME: &str = "config.json";
/// Directory name for the configuration.
pub const PROJECT_CONFIG_DIR: &str = ".repoview";
/// Environment variable overriding `api_base_url`.
pub const API_URL_ENV: &str = "REPOVIEW_API_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Parses a JSON configuration file content into a map of configuration values.
///
/// - Returns the known keys of a JSON object; unknown keys are skipped.
/// - Returns an empty HashMap if `content` is empty or contains only whitespace.
/// - Returns an `Err` if the JSON is malformed or is not an object.
pub fn parse_config(content: &[u8]) -> Result<HashMap<ConfigKey, Value>> {
    if content.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(HashMap::new());
    }

    let value: Value = serde_json::from_slice(content).context("Failed to parse config JSON")?;

    if let Value::Object(map) = &value {
        let config_map = ConfigKey::all()
            .iter()
            .filter_map(|key| map.get(key.as_str()).map(|val| (*key, val.clone())))
            .collect();
        return Ok(config_map);
    }

    Err(anyhow::anyhow!("Config must be a JSON object"))
}

/// Merges `updates` into a clone of `base_config`; values from `updates` win.
pub fn update_config(
    base_config: &HashMap<ConfigKey, Value>,
    updates: &HashMap<ConfigKey, Value>,
) -> HashMap<ConfigKey, Value> {
    let mut new_config = base_config.clone();
    for (key, value) in updates {
        new_config.insert(*key, value.clone());
    }
    new_config
}

/// Reads `<base>/.repoview/config.json`. A missing file yields an empty map.
pub fn load_config_file(base: &Path) -> Result<HashMap<ConfigKey, Value>> {
    let path = base.join(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILENAME);
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid config file {}", path.display()))
}

/// Config values taken from the environment through `lookup`.
pub fn env_overrides(lookup: impl Fn(&str) -> Option<String>) -> HashMap<ConfigKey, Value> {
    lookup(API_URL_ENV)
        .filter(|url| !url.trim().is_empty())
        .map(|url| (ConfigKey::ApiBaseUrl, Value::String(url)))
        .into_iter()
        .collect()
}

/// Typed view of the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub timeout: Duration,
    pub filter_page_policy: FilterPagePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            filter_page_policy: FilterPagePolicy::Keep,
        }
    }
}

impl Settings {
    pub fn from_config(config: &HashMap<ConfigKey, Value>) -> Result<Self> {
        let mut settings = Settings::default();

        if let Some(value) = config.get(&ConfigKey::ApiBaseUrl) {
            settings.api_base_url = value
                .as_str()
                .filter(|url| !url.trim().is_empty())
                .ok_or_else(|| invalid(ConfigKey::ApiBaseUrl, "a non-empty string"))?
                .to_string();
        }
        if let Some(value) = config.get(&ConfigKey::TimeoutSecs) {
            let secs = value
                .as_u64()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| invalid(ConfigKey::TimeoutSecs, "a positive integer"))?;
            settings.timeout = Duration::from_secs(secs);
        }
        if let Some(value) = config.get(&ConfigKey::ResetPageOnFilter) {
            let reset = value
                .as_bool()
                .ok_or_else(|| invalid(ConfigKey::ResetPageOnFilter, "a boolean"))?;
            if reset {
                settings.filter_page_policy = FilterPagePolicy::Reset;
            }
        }

        Ok(settings)
    }

    /// Config file under `base`, overridden by the process environment.
    pub fn load(base: &Path) -> Result<Self> {
        let file = load_config_file(base)?;
        let merged = update_config(&file, &env_overrides(|key| std::env::var(key).ok()));
        Settings::from_config(&merged)
    }
}

fn invalid(key: ConfigKey, expected: &str) -> anyhow::Error {
    anyhow::anyhow!("Config key '{}' must be {expected}", key.as_str())
}

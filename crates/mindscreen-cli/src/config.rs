use std::path::{Path, PathBuf};
use std::time::Duration;

use mindscreen_inference::client::DEFAULT_BASE_URL;
use mindscreen_inference::news::DEFAULT_NEWS_URL;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const PREDICTOR_URL_ENV: &str = "MINDSCREEN_PREDICTOR_URL";
pub const NEWS_API_KEY_ENV: &str = "MINDSCREEN_NEWS_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindscreenConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default = "default_predictor_url")]
    pub predictor_base_url: String,
    #[serde(default = "default_news_url")]
    pub news_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news_api_key: Option<String>,
    /// Request timeout for every outbound call. Added in v1.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_predictor_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_news_url() -> String {
    DEFAULT_NEWS_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for MindscreenConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            predictor_base_url: default_predictor_url(),
            news_url: default_news_url(),
            news_api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl MindscreenConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Apply overrides from a variable lookup, normally [`std::env::var`].
    /// Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(url) = present(PREDICTOR_URL_ENV) {
            self.predictor_base_url = url;
        }
        if let Some(key) = present(NEWS_API_KEY_ENV) {
            self.news_api_key = Some(key);
        }
        self
    }
}

/// Redacted config view, safe to print.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigInfo {
    pub path: String,
    pub predictor_base_url: String,
    pub news_url: String,
    pub news_api_key_hint: Option<String>,
    pub timeout_secs: u64,
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("mindscreen"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config file if there is one, otherwise the defaults, then apply
/// environment overrides.
pub fn load_effective() -> eyre::Result<MindscreenConfig> {
    let path = config_path()?;
    let config = if path.exists() {
        load_from(&path)?
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        MindscreenConfig::default()
    };
    Ok(config.with_overrides(|name| std::env::var(name).ok()))
}

pub fn load_from(path: &Path) -> eyre::Result<MindscreenConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: MindscreenConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update mindscreen."
        ));
    }

    // v0 → v1: add timeout_secs
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("timeout_secs")
            .or_insert(serde_json::Value::Number(DEFAULT_TIMEOUT_SECS.into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added timeout_secs)");
    }

    Ok(json)
}

pub fn save_to(config: &MindscreenConfig, path: &Path) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    // The file may hold an API key
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn config_info(config: &MindscreenConfig, path: &Path) -> ConfigInfo {
    ConfigInfo {
        path: path.display().to_string(),
        predictor_base_url: config.predictor_base_url.clone(),
        news_url: config.news_url.clone(),
        news_api_key_hint: config.news_api_key.as_deref().map(redact_key),
        timeout_secs: config.timeout_secs,
    }
}

fn redact_key(key: &str) -> String {
    if key.len() <= 8 || !key.is_ascii() {
        return "****".to_string();
    }
    let prefix = &key[..4];
    let suffix = &key[key.len() - 4..];
    format!("{prefix}...{suffix}")
}

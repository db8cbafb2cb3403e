use std::path::{Path, PathBuf};
use std::time::Duration;

use clinproto_api::ApiConfig;
use serde::{Deserialize, Serialize};

/// Schema version written by this build. Every bump needs a step in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Overrides `api_base_url` without touching the file.
pub const API_URL_ENV: &str = "CLINPROTO_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinprotoConfig {
    /// 0 when absent: written before the file was versioned.
    #[serde(default)]
    pub config_version: u32,
    pub api_base_url: String,
    /// Added in v1.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    pub created_at: jiff::Timestamp,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClinprotoConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            created_at: jiff::Timestamp::now(),
        }
    }
}

impl ClinprotoConfig {
    pub fn api_config(&self, base_url: String) -> ApiConfig {
        ApiConfig {
            base_url,
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

pub fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("clinproto"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config, falling back to defaults when none has been saved yet.
pub fn load_or_default(path: &Path) -> eyre::Result<ClinprotoConfig> {
    if !path.exists() {
        return Ok(ClinprotoConfig::default());
    }
    load_config(path)
}

pub fn load_config(path: &Path) -> eyre::Result<ClinprotoConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Migrations operate on the raw document.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    Ok(serde_json::from_value(migrate(json, on_disk_version)?)?)
}

/// Upgrade a raw config document one version at a time.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update clinproto."
        ));
    }

    // v0 → v1: add request_timeout_secs
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("request_timeout_secs")
            .or_insert(serde_json::Value::Number(DEFAULT_TIMEOUT_SECS.into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added request_timeout_secs)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &ClinprotoConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Base URL precedence: command-line flag, then environment, then file.
pub fn resolve_base_url(
    config: &ClinprotoConfig,
    flag: Option<&str>,
    env: Option<&str>,
) -> String {
    let given = |url: &&str| !url.trim().is_empty();
    flag.filter(given)
        .or(env.filter(given))
        .unwrap_or(&config.api_base_url)
        .trim()
        .trim_end_matches('/')
        .to_string()
}

pub fn env_base_url() -> Option<String> {
    std::env::var(API_URL_ENV).ok()
}

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackerError};

const TMP_SUFFIX: &str = "tmp";

/// Application configuration, read once at startup. Absent or corrupt
/// config files fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub currency_symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub advice: AdviceSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".into(),
            data_dir: None,
            advice: AdviceSettings::default(),
        }
    }
}

/// Connection settings for the advice collaborator. The API key itself
/// never lives in the config file, only the environment variable name that
/// holds it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdviceSettings {
    pub endpoint: String,
    pub model: String,
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for AdviceSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".into(),
            model: "gemini-3-flash-preview".into(),
            api_key_env: "SPENDTRACK_API_KEY".into(),
            timeout_secs: 15,
        }
    }
}

/// Loads and saves the JSON config file.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let base = dirs::config_dir()
            .map(|dir| dir.join("spendtrack"))
            .ok_or_else(|| TrackerError::Storage("no config directory available".into()))?;
        Ok(Self {
            path: base.join("config.json"),
        })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config, defaulting when the file is missing and warning
    /// (not failing) when it cannot be parsed.
    pub fn load(&self) -> Config {
        if !self.path.exists() {
            return Config::default();
        }
        match fs::read_to_string(&self.path)
            .map_err(TrackerError::from)
            .and_then(|data| Ok(serde_json::from_str(&data)?))
        {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("config file unreadable, using defaults: {err}");
                Config::default()
            }
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

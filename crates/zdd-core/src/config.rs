use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Global configuration loaded from `~/.config/zdd/config.toml`.
///
/// Every knob the transfer engine uses lives here; nothing is hard-coded in
/// the orchestrator or the retry loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZddConfig {
    /// Maximum download attempts per file within one pass (including the first).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay in seconds between retries of the same file.
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
    /// Delay in seconds between passes when a pass ended with failures.
    #[serde(default = "default_pass_delay_secs")]
    pub pass_delay_secs: u64,
    /// Receive buffer size in bytes for the HTTP stream.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_max_retries() -> u32 {
    5
}

fn default_retry_delay_secs() -> u64 {
    5
}

fn default_pass_delay_secs() -> u64 {
    10
}

fn default_chunk_size() -> usize {
    8192
}

impl Default for ZddConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
            pass_delay_secs: default_pass_delay_secs(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl ZddConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn pass_delay(&self) -> Duration {
        Duration::from_secs(self.pass_delay_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("zdd")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ZddConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ZddConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ZddConfig = toml::from_str(&data)?;
    Ok(cfg)
}

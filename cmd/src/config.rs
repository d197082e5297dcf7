use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use aquatemp_climate::EntityConfig;
use serde::Deserialize;
use thiserror::Error;

#[derive(Deserialize)]
pub struct Config {
    pub device: DeviceConfig,
}

#[derive(Deserialize)]
pub struct DeviceConfig {
    #[serde(flatten)]
    pub entity: EntityConfig,
    pub snapshot: PathBuf,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl DeviceConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

fn default_poll_interval() -> u64 {
    aquatemp_climate::poll::DEFAULT_INTERVAL.as_secs()
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    log::info!("reading config from: {}", path.display());
    let text = std::fs::read_to_string(path)?;
    let config = toml::from_str(&text)?;
    Ok(config)
}

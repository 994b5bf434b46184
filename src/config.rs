//! Session configuration.
//!
//! Everything has a default, so a config file only needs the keys it
//! changes. The file is JSON and is located through `PSYFLOW_CONFIG`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::error::{FlowError, Result};
use crate::screenflow::goodbye::DEFAULT_OUTRO;
use crate::screenflow::{CountdownSettings, InstructionOptions, TextStyle};

pub const CONFIG_ENV: &str = "PSYFLOW_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub instructions: InstructionOptions,
    pub instruction_style: TextStyle,
    pub countdown_style: TextStyle,
    pub countdown: CountdownSettings,
    pub outro_text: String,
    /// Minimum time between two flips of the terminal surface
    pub frame_interval_ms: u64,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            instructions: InstructionOptions::default(),
            instruction_style: TextStyle::new(60, "reset"),
            countdown_style: TextStyle::new(30, "reset"),
            countdown: CountdownSettings::default(),
            outro_text: DEFAULT_OUTRO.to_string(),
            frame_interval_ms: 16,
            log_file: PathBuf::from("psyflow.log"),
        }
    }
}

impl Config {
    /// Reads a JSON config file.
    pub fn load(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file named by `PSYFLOW_CONFIG`, or the defaults when unset.
    pub fn from_env() -> Result<Config> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                info!(path = %path.display(), "Loading configuration");
                Config::load(&path)
            }
            None => Ok(Config::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        self.countdown_interval()?;
        self.countdown_duration()?;
        if self.instruction_style.wrap_width == 0 || self.countdown_style.wrap_width == 0 {
            return Err(FlowError::Config("wrap width must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Step of the static countdown. Fails on negative, NaN or huge values.
    pub fn countdown_interval(&self) -> Result<Duration> {
        seconds("countdown interval", self.countdown.interval_secs)
    }

    /// Length of the real-time countdown. Fails on negative, NaN or huge values.
    pub fn countdown_duration(&self) -> Result<Duration> {
        seconds("countdown duration", self.countdown.duration_secs)
    }
}

fn seconds(name: &str, secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|e| {
        FlowError::Config(format!(
            "{} must be a non-negative number of seconds, got {} ({})",
            name, secs, e
        ))
    })
}

use crate::domain::threshold::ThresholdProfiles;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Run,
    Demo,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct BoardConfig {
    pub mode: RunMode,
    pub server: ServerSettings,
    pub display: DisplaySettings,
    pub logging: LoggingSettings,
    pub samples: SampleSettings,
    pub thresholds: ThresholdProfiles,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub bind_retry_delay_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "0.0.0.0".to_string(),
            port: 9501,
            bind_retry_delay_secs: 10,
        }
    }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn bind_retry_delay(&self) -> Duration {
        Duration::from_secs(self.bind_retry_delay_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DisplaySettings {
    pub tick_interval_ms: u64,
    /// Ticks a sample stays on screen before rotating
    pub ticks_per_sample: u32,
    pub indicator_period_ticks: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 10,
            ticks_per_sample: 300,
            indicator_period_ticks: 100,
        }
    }
}

impl DisplaySettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file; stdout belongs to the board. None logs to stderr.
    pub file: Option<String>,
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: Some("awareness-board.log".to_string()),
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SampleSettings {
    /// TOML sample set; the built-in reference set is used when unset
    pub path: Option<String>,
}

pub fn load_board_config() -> anyhow::Result<BoardConfig> {
    load_board_config_from("config/board")
}

/// Optional file layered under `BOARD_*` environment variables
/// (`BOARD_SERVER__PORT=9600`).
pub fn load_board_config_from(path: &str) -> anyhow::Result<BoardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix("BOARD")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

// In crates/app-config/src/types.rs

use serde::Deserialize;
use strategies::SignalOptions;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// Indicator periods, thresholds and record keys for the signal pipeline.
    #[serde(default)]
    pub signal: SignalOptions,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
        }
    }
}

fn default_environment() -> String { "development".to_string() }
fn default_log_level() -> String { "info".to_string() }

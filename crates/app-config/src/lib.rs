// In crates/app-config/src/lib.rs

use config::{Config, Environment, File, FileFormat};
use std::path::Path;
use strategies::SignalOptions;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, Settings};

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `config/base.toml` file, if present.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from("config", &environment)
}

/// Same as [`load_settings`] with an explicit config directory and environment.
pub fn load_settings_from(dir: &str, environment: &str) -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::with_name(&format!("{dir}/base")).required(false))
        .add_source(File::with_name(&format!("{dir}/{environment}")).required(false))
        // Environment variables, e.g. `APP_SIGNAL__EMA_PERIOD=50`.
        // The prefix is `APP` joined by a single `_`, nested keys by `__`.
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}

/// Parses signal options from TOML text. Missing keys take their defaults.
pub fn parse_options(content: &str) -> Result<SignalOptions> {
    let options: SignalOptions = toml::from_str(content)?;
    Ok(options)
}

/// Loads a standalone signal options file.
pub fn load_options_file(path: impl AsRef<Path>) -> Result<SignalOptions> {
    let content = std::fs::read_to_string(path)?;
    parse_options(&content)
}

/// Parses full settings from TOML text through the same `config` pipeline
/// the file loader uses, without environment overrides.
pub fn parse_settings(content: &str) -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::from_str(content, FileFormat::Toml))
        .build()?
        .try_deserialize()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_fall_back_to_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings.app.environment, "development");
        assert_eq!(settings.app.log_level, "info");
        assert_eq!(settings.signal, SignalOptions::default());
    }

    #[test]
    fn signal_table_overrides_defaults() {
        let settings = parse_settings(
            r#"
            [app]
            log_level = "debug"

            [signal]
            ema_period = 50
            macd_fast_period = 12
            timestamp_key = "openTimeInISO"
            "#,
        )
        .unwrap();
        assert_eq!(settings.app.log_level, "debug");
        assert_eq!(settings.signal.ema_period, 50);
        assert_eq!(settings.signal.macd_fast_period, 12);
        assert_eq!(settings.signal.timestamp_key, "openTimeInISO");
        assert_eq!(settings.signal.williams_r_period, 20);
    }

    #[test]
    fn options_file_accepts_original_key_names() {
        let options = parse_options("timestampISO8601Key = \"time\"\nemaSellRatio = 0.01\n").unwrap();
        assert_eq!(options.timestamp_key, "time");
        assert_eq!(options.ema_sell_ratio, 0.01);
    }

    #[test]
    fn malformed_options_are_reported() {
        assert!(matches!(parse_options("ema_period = \"thirty\""), Err(Error::TomlError(_))));
    }

    #[test]
    fn environment_overrides_signal_settings() {
        // The only test in this crate that touches the process environment.
        unsafe { std::env::set_var("APP_SIGNAL__EMA_PERIOD", "50") };
        let settings = load_settings_from("does/not/exist", "development");
        unsafe { std::env::remove_var("APP_SIGNAL__EMA_PERIOD") };

        let settings = settings.unwrap();
        assert_eq!(settings.signal.ema_period, 50);
        assert_eq!(settings.signal.macd_slow_period, 10);
    }

    #[test]
    fn missing_options_file_is_an_io_error() {
        assert!(matches!(load_options_file("does/not/exist.toml"), Err(Error::IoError(_))));
    }
}

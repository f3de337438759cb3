// In app/src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use strategies::macd_williams::MacdWilliams;
use strategies::{SignalOptions, Strategy};
use tracing_subscriber::prelude::*;

mod input;
mod report;

use crate::report::{Summary, print_batch_report};

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "MACD crossover / Williams %R / EMA band signal generator.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Annotates every bar of a candle file with indicators and a decision.
    Run {
        /// JSON file holding an array of candle records.
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the JSON result. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML file with signal options.
        #[arg(long)]
        options: Option<PathBuf>,

        /// Record field holding the ISO-8601 timestamp.
        #[arg(long)]
        timestamp_key: Option<String>,

        /// Pretty-print the JSON result.
        #[arg(long)]
        pretty: bool,
    },

    /// Prints the decision for the newest bar of a candle file.
    Latest {
        /// JSON file holding an array of candle records.
        #[arg(short, long)]
        input: PathBuf,

        /// TOML file with signal options.
        #[arg(long)]
        options: Option<PathBuf>,
    },

    /// Processes several candle files in parallel and prints a summary.
    Batch {
        /// JSON files, each holding an array of candle records.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// TOML file with signal options.
        #[arg(long)]
        options: Option<PathBuf>,
    },
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse first so `--help` and `--version` never depend on config files.
    let cli = Cli::parse();

    let settings = app_config::load_settings()?;

    // Logs go to stderr so stdout stays clean for JSON.
    let level = tracing::Level::from_str(&settings.app.log_level).unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();

    tracing::debug!(environment = %settings.app.environment, "Settings loaded.");

    match cli.command {
        Commands::Run {
            input,
            output,
            options,
            timestamp_key,
            pretty,
        } => {
            let mut options = resolve_options(settings.signal, options)?;
            if let Some(key) = timestamp_key {
                options.timestamp_key = key;
            }
            handle_run(input, output, &options, pretty)?;
        }
        Commands::Latest { input, options } => {
            let options = resolve_options(settings.signal, options)?;
            handle_latest(input, options)?;
        }
        Commands::Batch { inputs, options } => {
            let options = resolve_options(settings.signal, options)?;
            handle_batch(inputs, &options)?;
        }
    }

    Ok(())
}

/// Settings first, then the options file when one is given.
fn resolve_options(from_settings: SignalOptions, file: Option<PathBuf>) -> Result<SignalOptions> {
    let options = match file {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading signal options file.");
            app_config::load_options_file(&path)?
        }
        None => from_settings,
    };
    options.validate()?;
    Ok(options)
}

// --- Subcommand Logic ---

fn handle_run(input: PathBuf, output: Option<PathBuf>, options: &SignalOptions, pretty: bool) -> Result<()> {
    let outputs = input::signals_for_file(&input, options)?;
    let summary = Summary::from_outputs(&outputs);
    tracing::info!(
        bars = summary.bars,
        crossings = summary.crossings,
        buys = summary.buys,
        sells = summary.sells,
        "Signals generated."
    );

    let json = if pretty {
        serde_json::to_string_pretty(&outputs)?
    } else {
        serde_json::to_string(&outputs)?
    };

    match output {
        Some(path) => {
            fs::write(&path, json)?;
            tracing::info!(path = %path.display(), "Signals written.");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn handle_latest(input: PathBuf, options: SignalOptions) -> Result<()> {
    let candles = input::candles_for_file(&input, &options)?;
    let mut strategy = MacdWilliams::new(options)?;
    let signal = strategy.assess(&candles);

    match strategy.latest() {
        Some(bar) => println!(
            "{} {} close={} ema={:.6} macd={:.6} signal_line={:.6} williams_r={:.2} crossing={}",
            bar.timestamp, signal, bar.close, bar.ema, bar.macd, bar.macd_signal, bar.williams_r, bar.is_intersecting
        ),
        None => {
            tracing::warn!(candles = candles.len(), "Not enough candles to evaluate {}.", strategy.name());
            println!("{signal}");
        }
    }
    Ok(())
}

fn handle_batch(inputs: Vec<PathBuf>, options: &SignalOptions) -> Result<()> {
    tracing::info!(files = inputs.len(), "Starting batch run.");

    // Every invocation is independent, so files can run side by side.
    let rows: Vec<(String, Result<Summary, String>)> = inputs
        .par_iter()
        .map(|path| {
            let row = input::signals_for_file(path, options)
                .map(|outputs| Summary::from_outputs(&outputs))
                .map_err(|e| {
                    tracing::error!(path = %path.display(), error = %e, "File failed.");
                    format!("{e:#}")
                });
            (path.display().to_string(), row)
        })
        .collect();

    print_batch_report(&rows);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn help_and_version_need_no_settings() {
        // Parsing alone answers these, before any config file is read.
        let help = Cli::try_parse_from(["signal-app", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
        let version = Cli::try_parse_from(["signal-app", "--version"]).unwrap_err();
        assert_eq!(version.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn batch_requires_at_least_one_file() {
        assert!(Cli::try_parse_from(["signal-app", "batch"]).is_err());
        let cli = Cli::try_parse_from(["signal-app", "batch", "a.json", "b.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Batch { ref inputs, .. } if inputs.len() == 2));
    }
}

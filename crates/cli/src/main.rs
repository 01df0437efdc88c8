//! Jiu-Pluck CLI - rooms, events and timetables from the terminal

mod commands;
mod config;
mod logging;
mod render;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::Commands;
use jiupluck_frontend_common::AppContext;
use jiupluck_frontend_common::auth::FileStorage;
use render::Output;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "jiupluck")]
#[command(about = "Coordinate rooms, events and timetables on Jiu-Pluck")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL, e.g. https://pluck.example.com/api
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print responses as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.into(), cli.log_json)?;

    let config = config::load(cli.config.as_deref(), cli.api_url)?;
    debug!(base_url = %config.api.base_url, state_dir = %config.state_dir.display(), "Loaded configuration");

    let storage = Arc::new(FileStorage::new(config.token_file()));
    let ctx = AppContext::from_config(&config, storage)?;
    let output = if cli.json { Output::Json } else { Output::Text };

    if let Err(e) = cli.command.execute(&ctx, &config, output).await {
        error!("Command failed: {e:#}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "jiupluck",
            "rooms",
            "list",
            "--json",
            "--api-url",
            "http://127.0.0.1:9000/api",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.api_url.as_deref(), Some("http://127.0.0.1:9000/api"));
    }
}

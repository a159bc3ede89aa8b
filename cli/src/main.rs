//! vtk: command-line driver for the voting token.

mod script;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use vtk_token::TokenConfig;
use vtk_utils::LogFormat;

use crate::script::{replay, OutputFormat, Script};

#[derive(Parser)]
#[command(name = "vtk", about = "Voting token command-line driver")]
struct Cli {
    /// Path to a TOML token configuration. CLI flags and env vars override
    /// its logging settings.
    #[arg(long, env = "VTK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "VTK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "VTK_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay a TOML script of calls against a fresh token.
    Replay {
        /// Script file with `[[step]]` tables.
        #[arg(long)]
        script: PathBuf,

        /// Output format for events and query results.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Print the effective token configuration as TOML.
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TokenConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TokenConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    config.validate()?;

    vtk_utils::init_logging(config.log_format, &config.log_level).map_err(anyhow::Error::msg)?;
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::Replay { script, output } => {
            let parsed = Script::from_toml_file(&script)?;
            tracing::info!(
                script = %script.display(),
                steps = parsed.steps.len(),
                symbol = %config.symbol,
                "starting replay"
            );
            let stdout = std::io::stdout();
            let summary = replay(&config, &parsed, output, &mut stdout.lock())?;
            if summary.rejected > 0 {
                tracing::warn!(rejected = summary.rejected, "some calls were rejected");
            }
        }
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}

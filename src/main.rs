use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;

use tt_connect_four::config::AppConfig;
use tt_connect_four::debug_bus::QueryCommand;
use tt_connect_four::game::COLS;
use tt_connect_four::host::script::describe_event;
use tt_connect_four::host::{parse_script, run_script, HostDriver};

/// Drive the Connect Four engine tick by tick.
#[derive(Parser)]
#[command(name = "connect-four", about = "Drive the Connect Four game engine")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a host script ('-' reads stdin)
    Run { script: PathBuf },
    /// Drop pieces into the given comma-separated columns
    Play { columns: String },
    /// Print the default configuration as TOML
    DefaultConfig,
}

fn main() -> Result<()> {
    let Cli {
        config,
        log_level,
        command,
    } = Cli::parse();

    match command {
        Command::DefaultConfig => {
            print!("{}", AppConfig::default_toml());
        }
        Command::Run { script } => {
            let mut driver = start_driver(&config, log_level)?;
            let text = read_script(&script)?;
            let parsed = parse_script(&text)
                .with_context(|| format!("parsing script {}", script.display()))?;
            let output = run_script(&mut driver, &parsed)
                .with_context(|| format!("running script {}", script.display()))?;
            for line in output {
                println!("{line}");
            }
        }
        Command::Play { columns } => {
            let columns = parse_columns(&columns)?;
            let mut driver = start_driver(&config, log_level)?;
            for column in columns {
                if let Some(event) = driver.drop_in(column) {
                    println!("{}", describe_event(&event));
                }
            }
            println!("winner = {}", driver.query(QueryCommand::ReadWinner));
            println!("column = {}", driver.query(QueryCommand::ReadCurrentColumn));
            println!("board = {:#034x}", driver.machine().board().packed());
        }
    }

    Ok(())
}

/// Load the config, install logging, then report a missing config file
/// through the freshly installed subscriber.
fn start_driver(path: &Path, log_level: Option<String>) -> Result<HostDriver> {
    let (config, found) = resolve_config(path, log_level)?;
    setup_logging(&config.logging.level)?;
    if !found {
        tracing::warn!("config file '{}' not found, using defaults", path.display());
    }
    Ok(HostDriver::new(&config.engine))
}

/// Returns the effective config and whether it came from `path`.
fn resolve_config(path: &Path, log_level: Option<String>) -> Result<(AppConfig, bool)> {
    let loaded = AppConfig::load_if_exists(path)
        .with_context(|| format!("loading config from {}", path.display()))?;
    let found = loaded.is_some();
    let mut config = loaded.unwrap_or_default();
    if let Some(level) = log_level {
        config.logging.level = level;
        config.validate().context("validating --log-level")?;
    }
    Ok((config, found))
}

fn setup_logging(level: &str) -> Result<()> {
    let level: Level = level
        .parse()
        .with_context(|| format!("invalid log level '{level}'"))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .compact()
        .init();
    Ok(())
}

fn read_script(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading script from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn parse_columns(list: &str) -> Result<Vec<usize>> {
    list.split(',')
        .map(|c| {
            let column: usize = c
                .trim()
                .parse()
                .with_context(|| format!("invalid column '{c}'"))?;
            if column >= COLS {
                bail!("column {column} out of range 0..{COLS}");
            }
            Ok(column)
        })
        .collect()
}

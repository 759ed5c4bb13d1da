#[macro_use]
extern crate log;

mod shell;

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Env};
use sft::{client::Session, ClientConfig};

use crate::shell::{Command, Shell};

/// Interactive client for SFT embedded file servers
#[derive(Debug, Parser)]
#[command(name = "sft", version, about)]
struct Cli {
    /// Server address to connect to on start-up
    address: Option<String>,

    /// Server TCP port
    #[arg(short, long)]
    port: Option<u16>,

    /// Connect, send and receive timeout in milliseconds
    #[arg(short, long, value_name = "MS")]
    timeout: Option<u64>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log every protocol exchange
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --verbose
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            let timestamp = buf.timestamp();
            writeln!(buf, "[{}] [{}] {}", timestamp, record.level(), record.args())
        })
        .init();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_ms = timeout;
    }
    config.validate().context("Invalid configuration")?;
    debug!("{:?}", config);

    let mut shell = Shell::new(Session::new(config));
    if let Some(address) = cli.address {
        let _ = shell.run_command(Command::Connect(address)).await;
    }

    shell.run().await
}

fn load_config(path: &Path) -> Result<ClientConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    ClientConfig::from_toml(&text)
        .with_context(|| format!("Failed to parse configuration file: {}", path.display()))
}

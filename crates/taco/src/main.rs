#![forbid(unsafe_code)]

//! # Taco
//!
//! Orders a taco through a four-step terminal form built with `promptform`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taco -- --theme dracula
//! ```

mod cli;
mod config;
mod order;
mod terminal;

use std::fs::File;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::Context;
use promptform::FormError;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Config;
use order::Order;

fn main() -> ExitCode {
    let config = Config::from_cli(&Cli::parse_args());
    match run(&config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> anyhow::Result<ExitCode> {
    if let Some(path) = &config.log_file {
        init_logging(path)?;
    }

    let order = Order::new();
    let form = terminal::run(order.form(config), config.alt_screen)
        .context("failed to run the order form")?;

    match form.result() {
        Ok(()) => {
            let receipt = order.receipt();
            info!(name = %receipt.name, "order placed");
            println!("{}", receipt.render(config.output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(FormError::UserAborted) => {
            info!("order cancelled");
            eprintln!("Order cancelled.");
            Ok(ExitCode::from(130))
        }
        Err(err) => Err(err.into()),
    }
}

/// Sends logs to `path`; the terminal belongs to the form.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

#![forbid(unsafe_code)]

mod args;
mod commands;
mod envelope;

use anyhow::Context;
use args::Cli;
use clap::Parser;
use dv_storage::{SqliteStore, StoreConfig};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("docver: {err:#}");
            return ExitCode::from(2);
        }
    };
    init_logging(&config.log_level);

    let intent = cli.command.intent();
    tracing::debug!(storage_dir = %config.storage_dir.display(), intent, "running command");
    let response = match SqliteStore::open_with(config)
        .map_err(anyhow::Error::from)
        .and_then(|mut store| commands::execute(&mut store, cli.user, cli.command))
    {
        Ok(result) => envelope::ok(intent, result),
        Err(err) => envelope::from_error(intent, &err),
    };

    let success = envelope::is_success(&response);
    match serde_json::to_string_pretty(&response) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => {
            eprintln!("docver: render response: {err}");
            return ExitCode::FAILURE;
        }
    }
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Defaults, then the YAML file, then `DOCVER_*`, then flags.
fn load_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut config = StoreConfig::load(cli.config.as_deref()).context("load config")?;
    if let Some(dir) = &cli.storage_dir {
        config.storage_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(attempts) = cli.max_version_attempts {
        config.max_version_attempts = attempts;
    }
    if let Some(policy) = cli.dangling_tags {
        config.dangling_tags = policy.into();
    }
    Ok(config.normalized())
}

// stdout carries the JSON response; logs go to stderr.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

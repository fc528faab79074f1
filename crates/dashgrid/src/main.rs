#![warn(missing_docs)]

//! Entry point for the `dashgrid` binary.

mod cli;
mod commands;
mod error;
mod render;

use std::{io, path::Path, process};

use clap::Parser;
use tracing::{debug, error};

use dashgrid_engine::{Dashboard, DashboardConfig, FileStore};

use crate::{
    cli::{Cli, Commands},
    error::Result,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, open the dashboard and dispatch.
fn run() -> Result<()> {
    let Cli {
        log,
        config: config_path,
        state,
        command,
    } = Cli::parse();
    let log_spec = logging::init(&log);
    debug!(spec = %log_spec, "logging initialised");

    let dash_config = load_config(config_path.as_deref())?;
    let state = state.unwrap_or_else(config::default_state_path);
    debug!(state = %state.display(), "opening dashboard");
    let mut dash = Dashboard::open(dash_config, FileStore::new(state))?;

    let mut out = io::stdout().lock();
    match command {
        Commands::Edit => commands::session(&mut dash, io::stdin().lock(), &mut out)?,
        cmd => commands::execute(&mut dash, &cmd, &mut out)?,
    }
    // A failed write was already reported; retry once before giving up.
    dash.flush()?;
    Ok(())
}

/// Load the explicit or default config file, or fall back to built-in defaults.
fn load_config(explicit: Option<&Path>) -> Result<DashboardConfig> {
    match config::resolve_config_path(explicit) {
        Some(path) => Ok(config::load_from_path(&path)?),
        None => Ok(DashboardConfig::default()),
    }
}

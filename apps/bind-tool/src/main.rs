//! CLI tool that replays scripted form sessions.
//!
//! Loads a JSON fixture describing a row set, the fields bound to it and a
//! list of user actions, then prints the cursor position and every field's
//! buffer after each action.

mod fixture;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rowbind_core::BindConfig;
use tracing_subscriber::EnvFilter;

use fixture::Fixture;
use session::Session;

/// Command-line arguments for the replay tool.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Fixture file to replay
    fixture: PathBuf,

    /// Binding configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log relay transfers
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<BindConfig> {
    let mut config = match path {
        Some(path) => BindConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => BindConfig::new(),
    };
    config.apply_env_overrides()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = load_config(args.config.as_ref())?;
    let fixture = Fixture::from_file(&args.fixture)?;
    let session = Session::open(&fixture, &config)?;

    println!("open: {}", session.render());
    for (step, action) in fixture.actions.iter().enumerate() {
        session
            .apply(action)
            .with_context(|| format!("Step {} ({:?}) failed", step + 1, action))?;
        println!("{}: {}", step + 1, session.render());
    }
    tracing::info!("Replayed {} actions", fixture.actions.len());
    Ok(())
}

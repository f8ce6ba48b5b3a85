//! `crm` command-line front end.
//!
//! Usage:
//!   crm --db crm.db seed
//!   crm --db crm.db create-customer --name Alice --email alice@example.com
//!   crm --db crm.db list orders
//!
//! Results are printed to stdout as JSON; logs go to stderr. A rejected
//! mutation exits with status 2.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use crm_api::{BatchEmailVisibility, CrmConfig, CrmSchema};
use crm_cli::{execute, Command};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "crm")]
#[command(about = "Customers, products and orders over a SQLite store")]
struct Args {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database file (overrides the config; in-memory if unset)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Which earlier writes a bulk create's email check can see
    #[arg(long)]
    batch_visibility: Option<BatchEmailVisibility>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = load_config(&args)?;
    debug!(?config, "configuration loaded");
    let schema = CrmSchema::open(&config).context("Failed to open CRM store")?;

    let outcome = execute(&schema, args.command)?;
    println!("{}", serde_json::to_string_pretty(&outcome.body)?);

    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

fn load_config(args: &Args) -> Result<CrmConfig> {
    let mut config = match &args.config {
        Some(path) => CrmConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => CrmConfig::default(),
    };
    if let Some(db) = &args.db {
        config.database_path = Some(db.clone());
    }
    if let Some(visibility) = args.batch_visibility {
        config.batch_email_visibility = visibility;
    }
    Ok(config)
}

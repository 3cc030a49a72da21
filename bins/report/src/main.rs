//! Haulbook report CLI
//!
//! Reads a ledger dataset export and prints party snapshots or statements as
//! JSON on stdout. Logs go to stderr.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use haulbook_core::ledger::{DateWindow, LedgerService};
use haulbook_shared::{AppConfig, AppError, telemetry::init_tracing};
use haulbook_store::{InMemoryLedgerStore, LedgerQueryService, LedgerStore};
use serde::Serialize;
use tracing::{error, info};

mod cli;

use cli::{Cli, Command, WindowArgs};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err
                .downcast_ref::<AppError>()
                .map_or(1, AppError::exit_code);
            error!(error = %format!("{err:#}"), "Command failed");
            eprintln!("error: {err:#}");
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging)?;

    let tz = config.ledger.tz()?;
    let dataset_path = cli.dataset.unwrap_or(config.dataset.path);

    let store = InMemoryLedgerStore::load_json(tz, &dataset_path)
        .await
        .map_err(AppError::from)
        .with_context(|| format!("loading dataset {dataset_path}"))?;
    info!(path = %dataset_path, timezone = %tz, "Dataset loaded");

    let service = LedgerQueryService::new(
        Arc::new(store),
        LedgerService::new(tz),
        config.ledger.currency,
    );

    match cli.command {
        Command::Parties(args) => {
            let parties = service
                .store()
                .list_parties(args.role)
                .await
                .map_err(AppError::from)?;
            print_json(&parties)
        }
        Command::Snapshot(args) => {
            let window = date_window(&args.window)?;
            let snapshot = service
                .compute_snapshot(args.party, &window)
                .await
                .map_err(AppError::from)?;
            print_json(&snapshot)
        }
        Command::Statement(args) => {
            let window = date_window(&args.window)?;
            let statement = service
                .build_statement(args.party, &window, chrono::Utc::now())
                .await
                .map_err(AppError::from)?;
            print_json(&statement)
        }
        Command::Role(args) => {
            let window = date_window(&args.window)?;
            let snapshots = service
                .snapshots_for_role(args.role, &window)
                .await
                .map_err(AppError::from)?;
            print_json(&snapshots)
        }
    }
}

fn date_window(args: &WindowArgs) -> Result<DateWindow, AppError> {
    DateWindow::new(args.from, args.to).map_err(AppError::from)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).context("writing JSON output")?;
    std::io::Write::write_all(&mut out, b"\n")?;
    Ok(())
}

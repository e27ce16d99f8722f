//! TrimSafe CLI
//!
//! # Usage
//!
//! ```bash
//! trimsafe probe --input movie.mp4
//! trimsafe trim --input movie.mp4 --start 00:01:00 --end 00:02:00 --mode smart
//! trimsafe overwrite --input movie.mp4 --start 10 --end 70
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use trimsafe::cli::{commands, Cli, Commands};
use trimsafe::config_initialization::initialize_configuration;
use trimsafe::utils::logging::init_logging;
use trimsafe::{DefaultAppContainer, ErrorKind, TrimSafeError};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let trim_error = err.downcast_ref::<TrimSafeError>();
            if trim_error.is_some_and(TrimSafeError::is_fatal) {
                error!("Filesystem left inconsistent: {}", err);
            }
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(trim_error.map(TrimSafeError::kind)))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let initialized = initialize_configuration(&cli)?;
    init_logging(&initialized.config.logging);
    initialized.log_summary();
    debug!("Effective configuration: {:?}", initialized.config);

    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling");
            let _ = cancel_tx.send(true);
        }
    });

    let container = DefaultAppContainer::with_cancel(&initialized.config, cancel_rx);
    let interactor = container.trim_interactor();

    match cli.command {
        Commands::Probe(args) => commands::probe(&interactor, args).await?,
        Commands::Suggest(args) => commands::suggest(&interactor, args)?,
        Commands::Trim(args) => commands::trim(&interactor, args).await?,
        Commands::Overwrite(args) => commands::overwrite(&interactor, args).await?,
    }

    info!("TrimSafe completed successfully");
    Ok(())
}

fn exit_code(kind: Option<ErrorKind>) -> u8 {
    match kind {
        Some(ErrorKind::Validation) => 2,
        Some(ErrorKind::ToolInvocation) => 3,
        Some(ErrorKind::OverwriteConsistency) => 4,
        Some(ErrorKind::Cancelled) => 130,
        Some(ErrorKind::Config) => 78,
        _ => 1,
    }
}

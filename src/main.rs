use anyhow::Result;
use clap::Parser;
use confirm_modal::cli::Cli;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Leave raw mode and the alternate screen before reporting a panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        confirm_modal::tui::reset_terminal();
        error!("Application panicked: {}", panic_info);
        default_hook(panic_info);
        std::process::exit(2);
    }));

    // Load environment variables from .env file
    if let Err(e) = dotenvy::dotenv() {
        // Don't error if .env file doesn't exist, just log it
        tracing::debug!("No .env file found or error loading it: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.debug, cli.log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(2);
    }

    match cli.execute().await {
        Ok(outcome) => {
            println!("{}", outcome.report());
            std::process::exit(outcome.exit_code());
        }
        Err(e) => {
            error!("Application error: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

fn init_logging(debug: bool, log_file: Option<&Path>) -> Result<()> {
    let default_filter = if debug { "confirm_modal=debug" } else { "confirm_modal=warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match log_file {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", path.display(), e))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}

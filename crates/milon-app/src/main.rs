use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use milon_config::Config;
use milon_types::Direction;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod context;
pub mod controller;
pub mod edit_flow;
pub mod events;
pub mod progress;
pub mod speech;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionArg {
    SourceToTarget,
    TargetToSource,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::SourceToTarget => Direction::SourceToTarget,
            DirectionArg::TargetToSource => Direction::TargetToSource,
        }
    }
}

/// Build a Hebrew vocabulary list and drill it with flashcards
#[derive(Debug, Parser)]
#[command(name = "milon", version)]
struct Args {
    /// JSON config file, defaults and environment are used otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    /// Name of the vocabulary list
    #[arg(long)]
    list_name: Option<String>,

    /// Practice direction to start with
    #[arg(long, value_enum)]
    direction: Option<DirectionArg>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run());
    // stdin is read on a blocking thread that can stay parked until the next line
    runtime.shutdown_timeout(Duration::from_millis(200));
    result
}

async fn run() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();
    init_tracing(args.log_json);

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            Config::load(path)?
        }
        None => Config::new(),
    };
    if let Some(list_name) = args.list_name {
        config.list_name = list_name;
    }
    if let Some(direction) = args.direction {
        config.practice.default_direction = direction.into();
    }

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("task failed: {e}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while tasks.join_next().await.is_some() {}

    Ok(())
}

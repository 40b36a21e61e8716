use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use respawn_cli::{LoggingFallback, SimulatedHost, SimulationOptions, logging};
use respawn_core::{RespawnTimerPlugin, TimerConfigExt};
use respawn_types::TimerConfig;

/// Run the respawn timer against a simulated server
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Config file to load (created with defaults if missing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many update intervals; runs until Ctrl-C when omitted
    #[arg(short, long)]
    ticks: Option<u32>,

    /// Seconds between simulated respawn waves
    #[arg(long, default_value_t = 75)]
    respawn_in: u64,

    #[arg(long, default_value_t = 2)]
    spectators: u32,

    #[arg(long, default_value_t = 2)]
    alive: u32,

    /// Don't register the RueI hint backend
    #[arg(long)]
    no_backend: bool,

    /// Don't register the respawn manager
    #[arg(long)]
    no_time_source: bool,

    /// Override the configured update interval
    #[arg(long)]
    interval_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    logging::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => TimerConfig::load_from(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Using default configuration");
            TimerConfig::default()
        }),
        None => TimerConfig::load(),
    };
    if let Some(ms) = args.interval_ms {
        config.update_interval_secs = ms as f32 / 1000.0;
    }

    let options = SimulationOptions {
        respawn_in: Duration::from_secs(args.respawn_in),
        spectators: args.spectators,
        alive: args.alive,
        with_backend: !args.no_backend,
        with_time_source: !args.no_time_source,
    };
    let host = SimulatedHost::new(&options, &config);

    let interval = config.effective_interval();
    let mut plugin = RespawnTimerPlugin::new(
        config,
        Arc::clone(&host.runtime),
        Arc::new(LoggingFallback),
        host.roster.clone(),
    );
    plugin.enable().map_err(|e| e.to_string())?;

    match args.ticks {
        // The first tick fires immediately, so n ticks span n - 1 intervals
        Some(n) => {
            let span = interval.saturating_mul(n.saturating_sub(1)).saturating_add(interval / 2);
            tokio::time::sleep(span).await;
        }
        None => {
            tokio::signal::ctrl_c().await.map_err(|e| e.to_string())?;
        }
    }

    plugin.disable().map_err(|e| e.to_string())?;
    Ok(())
}

//! Driver binary for the Warren grid simulation.
//!
//! Loads configuration, builds the board from the configured roster, and
//! runs the tick loop while recording statistics and drawing frames.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `warren-config.yaml` (or `WARREN_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Spawn the roster onto a new board
//! 4. Open the statistics sink
//! 5. Seed the random source
//! 6. Record tick 0, run the simulation loop, flush statistics
//! 7. Log the result

mod callback;
mod error;
mod render;
mod roster;

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use warren_core::config::{SEED_ENV_VAR, SimulationConfig, SinkConfig};
use warren_core::runner::{self, RunBounds, SimulationResult};
use warren_core::sink::{ConsoleSink, FileSink};
use warren_core::statistics::StatisticsAggregator;

use crate::callback::{DynSink, EngineCallback, FrameSettings};
use crate::error::EngineError;

/// Environment variable naming an alternative config file.
const CONFIG_ENV_VAR: &str = "WARREN_CONFIG";

/// Config file looked up in the working directory.
const DEFAULT_CONFIG_PATH: &str = "warren-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let (mut config, source) = load_config(explicit)?;
    let rejected_seed = config.apply_env_overrides();
    config.validate().map_err(EngineError::from)?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("warren-engine starting");
    report_rejected_seed(rejected_seed.as_deref());
    match source {
        Some(path) => info!(path = %path.display(), "Config file loaded"),
        None => info!("Config file not found, using defaults"),
    }
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        tick_interval_ms = config.world.tick_interval_ms,
        columns = config.board.columns,
        rows = config.board.rows,
        max_ticks = config.simulation.max_ticks,
        "Configuration loaded"
    );

    // 3-7. Build and run.
    let result = run(&config).await?;

    info!(
        total_ticks = result.total_ticks,
        moves = result.moves,
        "warren-engine shutdown complete"
    );

    Ok(())
}

/// Build every subsystem from `config` and run the simulation to its tick
/// budget.
async fn run(config: &SimulationConfig) -> Result<SimulationResult, EngineError> {
    // 3. Spawn the roster.
    let mut board = roster::build_board(config)?;
    info!(
        actors = board.actor_count(),
        dimensions = %board.dimensions(),
        "Board populated"
    );

    // 4. Open the statistics sink.
    roster::check_metrics(&config.statistics.metrics)?;
    let sink = build_sink(&config.statistics.sink)?;
    let aggregator = StatisticsAggregator::new(sink, config.statistics.metrics.clone());
    info!(
        metrics = aggregator.metrics().len(),
        sink = ?config.statistics.sink,
        "Statistics aggregator ready"
    );
    let mut callback = EngineCallback::new(
        aggregator,
        FrameSettings::from_config(&config.render),
        std::io::stdout(),
    );

    // 5. Seed the random source.
    let mut rng = StdRng::seed_from_u64(config.world.seed);

    // 6. Run.
    callback.observe(&board, 0)?;
    let result =
        runner::run_simulation(&mut board, &mut rng, RunBounds::from(config), &mut callback)
            .await?;
    callback.finish()?;

    // 7. Log results.
    runner::log_simulation_end(&result);
    Ok(result)
}

/// Warn about a `WARREN_SEED` value that did not parse. Called once the
/// subscriber is installed.
fn report_rejected_seed(rejected: Option<&str>) {
    if let Some(value) = rejected {
        warn!(value, "Ignoring {SEED_ENV_VAR}: not an unsigned integer");
    }
}

/// Open the configured statistics sink.
fn build_sink(config: &SinkConfig) -> Result<DynSink, EngineError> {
    let sink: DynSink = match config {
        SinkConfig::Console => Box::new(ConsoleSink::stdout()),
        SinkConfig::File { path, capacity } => Box::new(FileSink::new(path, *capacity)?),
    };
    Ok(sink)
}

/// Load the simulation configuration.
///
/// An explicit path must exist. Otherwise `warren-config.yaml` in the
/// working directory is used if present, and built-in defaults if not.
/// Returns the config and the file it came from.
fn load_config(
    explicit: Option<PathBuf>,
) -> Result<(SimulationConfig, Option<PathBuf>), EngineError> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if !default_path.exists() {
                return Ok((SimulationConfig::default(), None));
            }
            default_path.to_path_buf()
        }
    };
    let config = SimulationConfig::from_file(&path)?;
    Ok((config, Some(path)))
}

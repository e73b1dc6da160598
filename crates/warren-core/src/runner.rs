//! Bounded tick loop.
//!
//! [`run_simulation`] advances a [`TickClock`], steps the board once per
//! tick, hands a [`TickSummary`] to a [`TickCallback`], and sleeps for the
//! configured interval between ticks. The board is owned exclusively by the
//! caller for the whole run; the loop only yields while sleeping.

use rand::Rng;
use tracing::{debug, info, warn};
use warren_world::{Board, StepOutcome};

use crate::clock::{ClockError, TickClock};
use crate::config::SimulationConfig;
use crate::statistics::StatisticsError;

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The tick counter could not advance.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// The tick callback failed to record statistics.
    #[error("statistics error: {source}")]
    Statistics {
        /// The underlying statistics error.
        #[from]
        source: StatisticsError,
    },
}

/// Limits for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunBounds {
    /// Ticks to run. 0 runs nothing.
    pub max_ticks: u64,
    /// Milliseconds to sleep between ticks. 0 skips the sleep.
    pub tick_interval_ms: u64,
}

impl RunBounds {
    /// Bounds with an explicit tick budget and interval.
    pub const fn new(max_ticks: u64, tick_interval_ms: u64) -> Self {
        Self {
            max_ticks,
            tick_interval_ms,
        }
    }
}

impl From<&SimulationConfig> for RunBounds {
    fn from(config: &SimulationConfig) -> Self {
        Self::new(config.simulation.max_ticks, config.world.tick_interval_ms)
    }
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    /// Tick number that just completed (1-based).
    pub tick: u64,
    /// Result of the board step.
    pub outcome: StepOutcome,
    /// Actors on the board after the step.
    pub actors_on_board: usize,
}

/// Result of the simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationResult {
    /// Total number of ticks executed.
    pub total_ticks: u64,
    /// Ticks in which an actor changed tiles.
    pub moves: u64,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
}

/// Callback invoked after each tick completes.
///
/// Implementations sample statistics, draw frames, and so on. The board is
/// read-only here.
pub trait TickCallback: Send {
    /// Called after a tick completes.
    ///
    /// # Errors
    ///
    /// An error aborts the run and is returned from [`run_simulation`].
    fn on_tick(&mut self, summary: &TickSummary, board: &Board) -> Result<(), StatisticsError>;
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _board: &Board) -> Result<(), StatisticsError> {
        Ok(())
    }
}

/// Run the tick loop until `bounds.max_ticks` ticks have completed.
///
/// # Errors
///
/// Returns [`RunnerError::Clock`] if the tick counter overflows, or
/// [`RunnerError::Statistics`] if the callback fails.
pub async fn run_simulation<R: Rng>(
    board: &mut Board,
    rng: &mut R,
    bounds: RunBounds,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut clock = TickClock::new();
    let mut moves: u64 = 0;
    let mut final_summary: Option<TickSummary> = None;

    info!(
        max_ticks = bounds.max_ticks,
        tick_interval_ms = bounds.tick_interval_ms,
        actors = board.actor_count(),
        "Simulation starting"
    );

    while clock.tick() < bounds.max_ticks {
        let tick = clock.advance()?;
        let outcome = board.step(rng);
        if outcome.moved() {
            moves = moves.saturating_add(1);
        }

        let summary = TickSummary {
            tick,
            outcome,
            actors_on_board: board.actor_count(),
        };
        debug!(tick, moved = outcome.moved(), "Tick complete");

        callback.on_tick(&summary, board)?;
        final_summary = Some(summary);

        if bounds.tick_interval_ms > 0 && tick < bounds.max_ticks {
            tokio::time::sleep(tokio::time::Duration::from_millis(bounds.tick_interval_ms)).await;
        }
    }

    Ok(SimulationResult {
        total_ticks: clock.tick(),
        moves,
        final_summary,
    })
}

/// Log the simulation end sequence.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        total_ticks = result.total_ticks,
        moves = result.moves,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        final_actors = result.final_summary.as_ref().map(|s| s.actors_on_board),
        "Simulation ended"
    );

    if result.final_summary.is_none() {
        warn!("Simulation ended with no ticks executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use warren_actors::{Actor, RabbitActor, TortoiseActor};
    use warren_types::Coordinate;
    use warren_world::Placement;

    use super::*;
    use crate::sink::SinkError;

    fn small_board() -> Board {
        let tortoise: Box<dyn Actor> = Box::new(TortoiseActor::new());
        Board::new(
            4,
            4,
            vec![
                Placement::new(Box::new(RabbitActor::new()), Coordinate::new(0, 0)),
                Placement::new(tortoise, Coordinate::new(3, 3)),
            ],
        )
        .unwrap()
    }

    #[derive(Default)]
    struct CountCallback {
        ticks: Vec<u64>,
        moves: u64,
    }

    impl TickCallback for CountCallback {
        fn on_tick(&mut self, summary: &TickSummary, board: &Board) -> Result<(), StatisticsError> {
            assert_eq!(summary.actors_on_board, board.actor_count());
            self.ticks.push(summary.tick);
            if summary.outcome.moved() {
                self.moves = self.moves.saturating_add(1);
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn bounded_by_max_ticks() {
        let mut board = small_board();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut cb = CountCallback::default();

        let result = run_simulation(&mut board, &mut rng, RunBounds::new(5, 0), &mut cb)
            .await
            .unwrap();

        assert_eq!(result.total_ticks, 5);
        assert_eq!(cb.ticks, vec![1, 2, 3, 4, 5]);
        assert_eq!(result.moves, cb.moves);
        assert_eq!(result.final_summary.map(|s| s.tick), Some(5));
        assert_eq!(board.actor_count(), 2);
    }

    #[tokio::test]
    async fn zero_max_ticks_runs_nothing() {
        let mut board = small_board();
        let before: Vec<Coordinate> = board.actor_bundles().iter().map(|b| b.coordinate).collect();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut cb = CountCallback::default();

        let result = run_simulation(&mut board, &mut rng, RunBounds::new(0, 0), &mut cb)
            .await
            .unwrap();

        assert_eq!(result.total_ticks, 0);
        assert!(result.final_summary.is_none());
        assert!(cb.ticks.is_empty());
        let after: Vec<Coordinate> = board.actor_bundles().iter().map(|b| b.coordinate).collect();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn boxed_in_actor_never_moves() {
        let mut board = Board::new(
            1,
            1,
            vec![Placement::new(
                Box::new(RabbitActor::new()),
                Coordinate::new(0, 0),
            )],
        )
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(9);

        let result = run_simulation(&mut board, &mut rng, RunBounds::new(20, 0), &mut NoOpCallback)
            .await
            .unwrap();

        assert_eq!(result.total_ticks, 20);
        assert_eq!(result.moves, 0);
    }

    #[tokio::test]
    async fn interval_sleeps_between_ticks() {
        let mut board = small_board();
        let mut rng = SmallRng::seed_from_u64(4);

        let started = std::time::Instant::now();
        let result = run_simulation(&mut board, &mut rng, RunBounds::new(3, 5), &mut NoOpCallback)
            .await
            .unwrap();

        assert_eq!(result.total_ticks, 3);
        assert!(started.elapsed() >= std::time::Duration::from_millis(10));
    }

    #[tokio::test]
    async fn callback_error_aborts_run() {
        struct FailingCallback;
        impl TickCallback for FailingCallback {
            fn on_tick(
                &mut self,
                summary: &TickSummary,
                _board: &Board,
            ) -> Result<(), StatisticsError> {
                if summary.tick == 2 {
                    return Err(SinkError::ZeroCapacity.into());
                }
                Ok(())
            }
        }

        let mut board = small_board();
        let mut rng = SmallRng::seed_from_u64(2);
        let result =
            run_simulation(&mut board, &mut rng, RunBounds::new(10, 0), &mut FailingCallback).await;

        assert!(matches!(result, Err(RunnerError::Statistics { .. })));
    }

    #[test]
    fn bounds_from_config() {
        let config = SimulationConfig::default();
        assert_eq!(RunBounds::from(&config), RunBounds::new(100, 100));
    }
}

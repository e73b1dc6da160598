//! Tick callback that records statistics and draws frames.

use std::io::Write;

use tracing::{debug, warn};
use warren_core::config::RenderConfig;
use warren_core::runner::{TickCallback, TickSummary};
use warren_core::sink::Sink;
use warren_core::statistics::{StatisticsAggregator, StatisticsError};
use warren_world::Board;

use crate::render::{GlyphTable, render_tick};

/// Statistics sink chosen at startup.
pub type DynSink = Box<dyn Sink + Send>;

/// Frame drawing settings resolved from [`RenderConfig`].
#[derive(Debug, Clone)]
pub struct FrameSettings {
    glyphs: GlyphTable,
    every: u64,
}

impl FrameSettings {
    /// `None` when rendering is disabled.
    pub fn from_config(config: &RenderConfig) -> Option<Self> {
        config.enabled.then(|| Self {
            glyphs: GlyphTable::with_overrides(&config.glyphs),
            every: config.every.max(1),
        })
    }

    fn due(&self, tick: u64) -> bool {
        tick.checked_rem(self.every) == Some(0)
    }
}

/// Callback that bridges the tick loop to statistics output and the
/// terminal.
pub struct EngineCallback<W: Write + Send> {
    aggregator: StatisticsAggregator<DynSink>,
    frames: Option<FrameSettings>,
    out: W,
}

impl<W: Write + Send> EngineCallback<W> {
    /// Create a callback recording into `aggregator` and drawing frames
    /// to `out`.
    pub const fn new(
        aggregator: StatisticsAggregator<DynSink>,
        frames: Option<FrameSettings>,
        out: W,
    ) -> Self {
        Self {
            aggregator,
            frames,
            out,
        }
    }

    /// Record and draw the state at `tick` outside the loop (the initial
    /// board at tick 0).
    pub fn observe(&mut self, board: &Board, tick: u64) -> Result<(), StatisticsError> {
        self.draw(board, tick);
        self.aggregator.record(board, tick)?;
        Ok(())
    }

    /// Flush buffered statistics and return the aggregator.
    pub fn finish(mut self) -> Result<StatisticsAggregator<DynSink>, StatisticsError> {
        self.aggregator.flush()?;
        Ok(self.aggregator)
    }

    fn draw(&mut self, board: &Board, tick: u64) {
        let Some(frames) = self.frames.as_ref().filter(|f| f.due(tick)) else {
            return;
        };
        match render_tick(board, &frames.glyphs, tick) {
            Ok(frame) => {
                if let Err(e) = self.out.write_all(frame.as_bytes()) {
                    warn!(tick, error = %e, "Failed to draw frame");
                }
            }
            Err(e) => warn!(tick, error = %e, "Failed to render frame"),
        }
    }
}

impl<W: Write + Send> TickCallback for EngineCallback<W> {
    fn on_tick(&mut self, summary: &TickSummary, board: &Board) -> Result<(), StatisticsError> {
        self.draw(board, summary.tick);
        let written = self.aggregator.record(board, summary.tick)?;
        debug!(
            tick = summary.tick,
            written,
            buffered = self.aggregator.sink().buffered(),
            "Statistics recorded"
        );
        Ok(())
    }
}

//! Board-derived metrics and the aggregator that feeds them to a sink.
//!
//! Each tick the [`StatisticsAggregator`] samples every configured
//! [`Metric`], stamps it with the tick index, serializes it with
//! `serde_json`, and buffers the line in its [`Sink`]. Records look like:
//!
//! ```json
//! {"statistic":"centroid","tick":3,"x":2.0,"y":0.0}
//! {"statistic":"actor_count","tick":3,"count":2}
//! {"statistic":"kind_count","tick":3,"kind":"rabbit","count":2}
//! ```
//!
//! A centroid over an empty board is undefined; it is skipped rather than
//! reported as an error.

use serde::{Deserialize, Serialize};
use tracing::trace;
use warren_world::Board;

use crate::sink::{Sink, SinkError};

/// Errors that can occur while recording statistics.
#[derive(Debug, thiserror::Error)]
pub enum StatisticsError {
    /// A record could not be serialized to JSON.
    #[error("failed to serialize statistic: {source}")]
    Serialize {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// The sink rejected a record or failed to flush.
    #[error("statistics sink error: {source}")]
    Sink {
        /// The underlying sink error.
        #[from]
        source: SinkError,
    },
}

/// Mean position of every actor on the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    /// Mean column index.
    pub x: f64,
    /// Mean row index.
    pub y: f64,
}

/// Compute the centroid of all actors, or `None` if the board is empty.
#[allow(clippy::cast_precision_loss)] // board coordinates are far below 2^53
pub fn centroid(board: &Board) -> Option<Centroid> {
    let mut count = 0.0_f64;
    let mut sum_x = 0.0_f64;
    let mut sum_y = 0.0_f64;
    for bundle in board.actor_bundles() {
        count += 1.0;
        sum_x += bundle.coordinate.x as f64;
        sum_y += bundle.coordinate.y as f64;
    }
    if count < 1.0 {
        return None;
    }
    Some(Centroid {
        x: sum_x / count,
        y: sum_y / count,
    })
}

/// Number of actors on the board.
pub fn actor_count(board: &Board) -> usize {
    board.actor_count()
}

/// Lowercased, trimmed kind name, matching how the roster resolves kinds.
fn normalize_kind(kind: &str) -> String {
    kind.trim().to_lowercase()
}

/// Number of actors of the named kind. Matching is case-insensitive.
pub fn kind_count(board: &Board, kind: &str) -> usize {
    let wanted = normalize_kind(kind);
    board
        .actor_bundles()
        .iter()
        .filter(|bundle| bundle.kind().name() == wanted)
        .count()
}

/// A statistic the aggregator can sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Metric {
    /// Mean actor position.
    Centroid,
    /// Total actors on the board.
    ActorCount,
    /// Actors of one kind.
    KindCount {
        /// Kind name, e.g. `rabbit`.
        kind: String,
    },
}

impl Metric {
    /// Sample this metric. `None` when the metric is undefined for the
    /// board (a centroid with no actors).
    pub fn sample(&self, board: &Board, tick: u64) -> Option<StatisticRecord> {
        match self {
            Self::Centroid => centroid(board).map(|c| StatisticRecord::Centroid {
                tick,
                x: c.x,
                y: c.y,
            }),
            Self::ActorCount => Some(StatisticRecord::ActorCount {
                tick,
                count: actor_count(board),
            }),
            Self::KindCount { kind } => Some(StatisticRecord::KindCount {
                tick,
                kind: normalize_kind(kind),
                count: kind_count(board, kind),
            }),
        }
    }
}

/// One sampled statistic, as written to a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "statistic", rename_all = "snake_case")]
pub enum StatisticRecord {
    /// Mean actor position at `tick`.
    Centroid {
        /// Tick the sample was taken at.
        tick: u64,
        /// Mean column index.
        x: f64,
        /// Mean row index.
        y: f64,
    },
    /// Total actors at `tick`.
    ActorCount {
        /// Tick the sample was taken at.
        tick: u64,
        /// Actors on the board.
        count: usize,
    },
    /// Actors of one kind at `tick`.
    KindCount {
        /// Tick the sample was taken at.
        tick: u64,
        /// Kind name.
        kind: String,
        /// Actors of that kind.
        count: usize,
    },
}

/// Samples a fixed metric list each tick and buffers the serialized
/// records into an owned sink.
#[derive(Debug)]
pub struct StatisticsAggregator<S: Sink> {
    sink: S,
    metrics: Vec<Metric>,
}

impl<S: Sink> StatisticsAggregator<S> {
    /// Create an aggregator writing `metrics` into `sink`.
    pub const fn new(sink: S, metrics: Vec<Metric>) -> Self {
        Self { sink, metrics }
    }

    /// The configured metrics, in sampling order.
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Borrow the sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Sample every metric for `board` at `tick` without buffering.
    pub fn sample(&self, board: &Board, tick: u64) -> Vec<StatisticRecord> {
        self.metrics
            .iter()
            .filter_map(|metric| metric.sample(board, tick))
            .collect()
    }

    /// Sample, serialize, and buffer every metric. Returns the number of
    /// records handed to the sink.
    ///
    /// # Errors
    ///
    /// Returns [`StatisticsError::Serialize`] if a record cannot be encoded
    /// or [`StatisticsError::Sink`] if buffering triggered a failed write.
    pub fn record(&mut self, board: &Board, tick: u64) -> Result<usize, StatisticsError> {
        let records = self.sample(board, tick);
        let skipped = self.metrics.len().saturating_sub(records.len());
        let mut written: usize = 0;
        for record in &records {
            let line = serde_json::to_string(record)?;
            self.sink.buffer(line)?;
            written = written.saturating_add(1);
        }
        trace!(tick, written, skipped, "Recorded statistics");
        Ok(written)
    }

    /// Flush the sink.
    ///
    /// # Errors
    ///
    /// Returns [`StatisticsError::Sink`] if the sink fails to write.
    pub fn flush(&mut self) -> Result<(), StatisticsError> {
        self.sink.flush()?;
        Ok(())
    }

    /// Consume the aggregator and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

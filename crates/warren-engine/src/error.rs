//! Error types for the Warren engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup and simulation execution.

/// Top-level error for the Warren engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: warren_core::config::ConfigError,
    },

    /// Board construction failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: warren_world::WorldError,
    },

    /// Statistics sink could not be created.
    #[error("sink error: {source}")]
    Sink {
        /// The underlying sink error.
        #[from]
        source: warren_core::sink::SinkError,
    },

    /// Recording or flushing statistics failed.
    #[error("statistics error: {source}")]
    Statistics {
        /// The underlying statistics error.
        #[from]
        source: warren_core::statistics::StatisticsError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: warren_core::runner::RunnerError,
    },

    /// A roster entry or kind-count metric names a kind the registry does
    /// not know.
    #[error("unknown actor kind {kind:?} (known kinds: {known})")]
    UnknownActorKind {
        /// The kind name as written in the configuration.
        kind: String,
        /// Comma-separated registered kind names.
        known: String,
    },
}

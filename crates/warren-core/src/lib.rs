//! Tick clock, configuration, statistics, and the run loop for Warren.
//!
//! This crate sits on top of the board and drives it: it counts ticks,
//! loads configuration, samples statistics into sinks, and runs the bounded
//! tick loop with an inter-tick delay.
//!
//! # Modules
//!
//! - [`clock`] -- Tick counter with checked advancement.
//! - [`config`] -- Configuration loading from `warren-config.yaml` into
//!   strongly-typed structs.
//! - [`runner`] -- The tick loop and the [`TickCallback`] hook.
//! - [`sink`] -- The [`Sink`] buffering boundary and its console, file, and
//!   memory implementations.
//! - [`statistics`] -- Centroid and count metrics, and the
//!   [`StatisticsAggregator`] that serializes them into a sink.
//!
//! [`TickCallback`]: runner::TickCallback
//! [`Sink`]: sink::Sink
//! [`StatisticsAggregator`]: statistics::StatisticsAggregator

pub mod clock;
pub mod config;
pub mod runner;
pub mod sink;
pub mod statistics;

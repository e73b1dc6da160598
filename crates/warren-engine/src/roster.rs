//! Turns the configured roster into a populated board.
//!
//! Every roster entry names a kind, resolved through the actor registry,
//! and a starting coordinate. The board itself rejects out-of-bounds and
//! colliding placements. Kind-count metrics are checked against the same
//! registry.

use warren_actors::{known_kinds, spawn};
use warren_core::config::{ActorPlacementConfig, SimulationConfig};
use warren_core::statistics::Metric;
use warren_types::Coordinate;
use warren_world::{Board, Placement};

use crate::error::EngineError;

fn unknown_kind(kind: &str) -> EngineError {
    EngineError::UnknownActorKind {
        kind: kind.to_owned(),
        known: known_kinds()
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Resolve one roster entry into a placement.
fn placement(entry: &ActorPlacementConfig) -> Result<Placement, EngineError> {
    let actor = spawn(&entry.kind).ok_or_else(|| unknown_kind(&entry.kind))?;
    Ok(Placement::new(actor, Coordinate::new(entry.x, entry.y)))
}

/// Reject kind-count metrics naming a kind the registry cannot spawn.
///
/// # Errors
///
/// Returns [`EngineError::UnknownActorKind`] for the first unregistered
/// kind.
pub fn check_metrics(metrics: &[Metric]) -> Result<(), EngineError> {
    for metric in metrics {
        if let Metric::KindCount { kind } = metric {
            let known = known_kinds()
                .iter()
                .any(|registered| registered.name().eq_ignore_ascii_case(kind.trim()));
            if !known {
                return Err(unknown_kind(kind));
            }
        }
    }
    Ok(())
}

/// Build the starting board from `config.board` and `config.actors`.
///
/// # Errors
///
/// Returns [`EngineError::UnknownActorKind`] for an unregistered kind, or
/// [`EngineError::World`] if the board rejects the dimensions or a
/// placement.
pub fn build_board(config: &SimulationConfig) -> Result<Board, EngineError> {
    let placements = config
        .actors
        .iter()
        .map(placement)
        .collect::<Result<Vec<_>, _>>()?;
    let board = Board::new(config.board.columns, config.board.rows, placements)?;
    Ok(board)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use warren_core::sink::MemorySink;
    use warren_core::statistics::{StatisticRecord, StatisticsAggregator};
    use warren_types::ActorKind;
    use warren_world::WorldError;

    use super::*;

    fn config_with(yaml: &str) -> SimulationConfig {
        SimulationConfig::parse(yaml).unwrap()
    }

    #[test]
    fn default_roster_is_one_rabbit() {
        let board = build_board(&SimulationConfig::default()).unwrap();
        let bundles = board.actor_bundles();
        assert_eq!(bundles.len(), 1);
        let rabbit = bundles.first().unwrap();
        assert_eq!(rabbit.coordinate, Coordinate::new(5, 5));
        assert_eq!(rabbit.kind(), ActorKind::RABBIT);
    }

    #[test]
    fn mixed_roster() {
        let config = config_with(
            "actors:\n  - { kind: rabbit, x: 0, y: 0 }\n  - { kind: Tortoise, x: 1, y: 0 }\n",
        );
        let board = build_board(&config).unwrap();
        let kinds: Vec<ActorKind> = board.actor_bundles().iter().map(|b| b.kind()).collect();
        assert_eq!(kinds, vec![ActorKind::RABBIT, ActorKind::TORTOISE]);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let config = config_with("actors:\n  - { kind: fox, x: 0, y: 0 }\n");
        let err = build_board(&config).unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnknownActorKind { ref kind, ref known }
                if kind == "fox" && known.contains("rabbit")
        ));
    }

    #[test]
    fn capitalized_kind_count_sees_capitalized_roster() {
        let config = config_with(
            "actors: [ { kind: Rabbit, x: 1, y: 1 } ]\n\
             statistics:\n  metrics: [ { type: kind_count, kind: Rabbit } ]\n",
        );
        check_metrics(&config.statistics.metrics).unwrap();
        let board = build_board(&config).unwrap();

        let aggregator =
            StatisticsAggregator::new(MemorySink::new(), config.statistics.metrics.clone());
        assert_eq!(
            aggregator.sample(&board, 0),
            vec![StatisticRecord::KindCount {
                tick: 0,
                kind: "rabbit".to_owned(),
                count: 1,
            }]
        );
    }

    #[test]
    fn unknown_metric_kind_is_rejected() {
        let config =
            config_with("statistics:\n  metrics: [ { type: kind_count, kind: fox } ]\n");
        assert!(matches!(
            check_metrics(&config.statistics.metrics),
            Err(EngineError::UnknownActorKind { ref kind, .. }) if kind == "fox"
        ));
        check_metrics(&[Metric::Centroid, Metric::ActorCount]).unwrap();
    }

    #[test]
    fn collisions_and_bounds_surface_as_world_errors() {
        let collision = config_with(
            "actors:\n  - { kind: rabbit, x: 2, y: 2 }\n  - { kind: rabbit, x: 2, y: 2 }\n",
        );
        assert!(matches!(
            build_board(&collision),
            Err(EngineError::World {
                source: WorldError::PlacementCollision { .. }
            })
        ));

        let outside = config_with(
            "board: { columns: 4, rows: 4 }\nactors:\n  - { kind: rabbit, x: 4, y: 0 }\n",
        );
        assert!(matches!(
            build_board(&outside),
            Err(EngineError::World {
                source: WorldError::PlacementOutOfBounds { .. }
            })
        ));
    }
}

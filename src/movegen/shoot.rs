//! Legal shooting targets and range.

use crate::board::adjacency::AdjacencyGraph;
use crate::board::distance::distance;
use crate::board::geometry::{FaceKind, FaceId};
use crate::board::state::GameState;
use crate::board::unit::{Rover, UnitId};

/// Base shooting range in hops.
pub const SHOOT_RANGE: i32 = 3;

/// Extra range granted while the shooter occupies an HQ (pentagon) face.
pub const HQ_RANGE_BONUS: i32 = 2;

/// Returns the rover's shooting range: 3 hops, or 5 from an HQ face.
pub fn shooting_range(rover: &Rover) -> i32 {
    match FaceKind::of(rover.face) {
        FaceKind::Pentagon => SHOOT_RANGE + HQ_RANGE_BONUS,
        FaceKind::Triangle => SHOOT_RANGE,
    }
}

/// Returns true if a target on `face` is within the rover's range and not
/// on the rover's own face.
pub fn in_range(graph: &AdjacencyGraph, rover: &Rover, face: FaceId) -> bool {
    let d = distance(rover.face, face, graph);
    d >= 1 && d <= shooting_range(rover)
}

/// Returns the ids of all enemy units (rovers, buildings, fortifications)
/// the rover may shoot this turn.
pub fn legal_shoot_targets(
    state: &GameState,
    graph: &AdjacencyGraph,
    rover: &Rover,
) -> Vec<UnitId> {
    state
        .units_of(rover.player.opponent())
        .iter()
        .filter(|target| in_range(graph, rover, target.face()))
        .map(|target| target.id())
        .collect()
}

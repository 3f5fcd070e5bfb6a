//! Legal movement targets.

use crate::board::adjacency::AdjacencyGraph;
use crate::board::geometry::FaceId;
use crate::board::state::GameState;
use crate::board::unit::Rover;

/// Returns true if the rover may move onto `face`: adjacent to its current
/// face, not occupied by any rover or building, and not hosting an enemy
/// fortification. A friendly fortification does not block movement.
pub fn can_move_to(state: &GameState, graph: &AdjacencyGraph, rover: &Rover, face: FaceId) -> bool {
    graph.is_adjacent(rover.face, face)
        && !state.is_occupied(face)
        && state.enemy_fortification_at(face, rover.player).is_none()
}

/// Returns all faces the rover may legally move to this turn.
pub fn legal_move_targets(
    state: &GameState,
    graph: &AdjacencyGraph,
    rover: &Rover,
) -> Vec<FaceId> {
    graph
        .neighbors(rover.face)
        .iter()
        .copied()
        .filter(|&face| can_move_to(state, graph, rover, face))
        .collect()
}

//! Legal fortification targets.

use crate::board::adjacency::AdjacencyGraph;
use crate::board::geometry::FaceId;
use crate::board::state::GameState;
use crate::board::unit::Rover;

/// Returns true if the rover may fortify `face`: adjacent and completely
/// empty, with no rover, building, or fortification of either player.
pub fn can_fortify(state: &GameState, graph: &AdjacencyGraph, rover: &Rover, face: FaceId) -> bool {
    graph.is_adjacent(rover.face, face)
        && !state.is_occupied(face)
        && state.fortification_at(face).is_none()
}

/// Returns all faces the rover may legally fortify this turn.
pub fn legal_fortify_targets(
    state: &GameState,
    graph: &AdjacencyGraph,
    rover: &Rover,
) -> Vec<FaceId> {
    graph
        .neighbors(rover.face)
        .iter()
        .copied()
        .filter(|&face| can_fortify(state, graph, rover, face))
        .collect()
}

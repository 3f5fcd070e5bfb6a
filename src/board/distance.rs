//! Shortest-path distance over the face-adjacency graph.
//!
//! The graph is unweighted, so breadth-first search yields the true
//! shortest hop count. Unreachable targets are an ordinary expected value
//! (the `-1` sentinel), not an error; the board graph is connected, but
//! callers may query arbitrary graphs.

use std::collections::VecDeque;

use super::adjacency::AdjacencyGraph;
use super::geometry::FaceId;

/// Sentinel returned when no path exists between two faces.
pub const UNREACHABLE: i32 = -1;

/// Returns the BFS hop count from `from` to `to`, 0 when they are equal,
/// or [`UNREACHABLE`] when no path exists.
pub fn distance(from: FaceId, to: FaceId, graph: &AdjacencyGraph) -> i32 {
    if from == to {
        return 0;
    }
    if from >= graph.face_count() || to >= graph.face_count() {
        return UNREACHABLE;
    }

    let mut visited = vec![false; graph.face_count()];
    let mut queue = VecDeque::new();
    visited[from] = true;
    queue.push_back((from, 0i32));

    while let Some((face, hops)) = queue.pop_front() {
        for &neighbor in graph.neighbors(face) {
            if neighbor == to {
                return hops + 1;
            }
            if !visited[neighbor] {
                visited[neighbor] = true;
                queue.push_back((neighbor, hops + 1));
            }
        }
    }

    UNREACHABLE
}

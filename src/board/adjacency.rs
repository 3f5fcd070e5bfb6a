//! Face-adjacency graph derivation.
//!
//! Two faces are adjacent iff their vertex sets intersect in exactly two
//! vertices, i.e. they share an edge. The graph is symmetric by
//! construction, built once at startup from the geometry fixture, and
//! immutable thereafter. On the standard snub dodecahedron a face has one
//! neighbor per edge: 3 for triangles, 5 for pentagons, 150 undirected
//! edges in total.

use std::sync::OnceLock;

use super::geometry::{face_vertices, FaceId, FACE_COUNT};

/// Symmetric face-adjacency relation, indexed by face id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyGraph {
    neighbors: Vec<Vec<FaceId>>,
}

impl AdjacencyGraph {
    /// Builds the adjacency graph from raw face vertex-index lists.
    ///
    /// For every unordered face pair, counts shared vertex indices and adds
    /// an edge to both sides iff the count is exactly 2. O(F^2 * V), which
    /// is fine for the 92-face board.
    pub fn build(faces: &[&[usize]]) -> AdjacencyGraph {
        let mut neighbors = vec![Vec::new(); faces.len()];

        for i in 0..faces.len() {
            for j in (i + 1)..faces.len() {
                let shared = faces[i]
                    .iter()
                    .filter(|v| faces[j].contains(v))
                    .count();
                if shared == 2 {
                    neighbors[i].push(j);
                    neighbors[j].push(i);
                }
            }
        }

        AdjacencyGraph { neighbors }
    }

    /// Builds the graph for the standard snub-dodecahedron board.
    pub fn standard() -> AdjacencyGraph {
        let faces: Vec<&[usize]> = (0..FACE_COUNT)
            .map(|f| face_vertices(f).unwrap_or(&[]))
            .collect();
        AdjacencyGraph::build(&faces)
    }

    /// Returns the number of faces in the graph.
    pub fn face_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns the neighbors of a face; empty for out-of-range ids.
    pub fn neighbors(&self, face: FaceId) -> &[FaceId] {
        self.neighbors.get(face).map_or(&[], Vec::as_slice)
    }

    /// Returns true if `a` and `b` share an edge.
    pub fn is_adjacent(&self, a: FaceId, b: FaceId) -> bool {
        self.neighbors(a).contains(&b)
    }
}

/// Returns the process-wide standard adjacency graph, built on first use.
///
/// Shared read-only by every consuming component; never copied.
pub fn adjacency() -> &'static AdjacencyGraph {
    static GRAPH: OnceLock<AdjacencyGraph> = OnceLock::new();
    GRAPH.get_or_init(AdjacencyGraph::standard)
}

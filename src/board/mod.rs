//! Board representation and game-state types.
//!
//! Contains the polyhedron geometry fixture, the derived face-adjacency
//! graph, BFS distance queries, unit types, and the overall game state.

pub mod adjacency;
pub mod distance;
pub mod events;
pub mod geometry;
pub mod state;
pub mod unit;

pub use adjacency::{adjacency, AdjacencyGraph};
pub use distance::{distance, UNREACHABLE};
pub use events::{EventLog, EventSink, GameEvent, NullSink};
pub use geometry::{
    face_vertices, hq_faces, is_valid_face, FaceId, FaceKind, FACE_COUNT, PENTAGON_COUNT,
    TRIANGLE_COUNT, VERTEX_COUNT,
};
pub use state::{
    ActionPoints, GameState, PlaceError, DRILL_CANNON_PLANET_DESTROY_THRESHOLD,
    TREASURY_MAX_POINTS,
};
pub use unit::{
    Building, BuildingKind, Fortification, Player, Rover, UnitId, UnitRef, BUILDING_MAX_HP,
    FORTIFICATION_HP, ROVER_MAX_HP,
};

//! Snapshot encoding and strict validation.
//!
//! A snapshot is a deep, independent copy of the game state tagged with a
//! format version and a capture timestamp, serialized as JSON. Import
//! validates the whole structure and rejects malformed snapshots outright;
//! the live state is never touched by a failed import.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::geometry::{is_valid_face, FaceId};
use crate::board::state::GameState;
use crate::board::unit::{UnitId, BUILDING_MAX_HP, FORTIFICATION_HP, ROVER_MAX_HP};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: &str = "1.0.0";

/// Errors from decoding or validating a snapshot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("malformed snapshot JSON: {0}")]
    Json(String),

    #[error("unsupported snapshot version '{0}'")]
    UnsupportedVersion(String),

    #[error("unit {unit} sits on unknown face {face}")]
    InvalidFace { unit: UnitId, face: FaceId },

    #[error("unit {unit} has out-of-range hit points {hp}")]
    InvalidHitPoints { unit: UnitId, hp: i32 },

    #[error("unit {unit} has out-of-range maximum hit points {max_hp}")]
    InvalidMaxHitPoints { unit: UnitId, max_hp: i32 },

    #[error("two units occupy face {0}")]
    DuplicateOccupancy(FaceId),

    #[error("duplicate unit id {0}")]
    DuplicateUnitId(UnitId),

    #[error("unit id {0} collides with the id allocator")]
    StaleIdAllocator(UnitId),
}

/// A versioned, timestamped deep copy of the game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    pub version: String,
    /// Capture time in milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub state: GameState,
}

impl Snapshot {
    /// Captures a snapshot of the given state.
    pub fn capture(state: &GameState) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION.to_string(),
            timestamp: epoch_millis(),
            state: state.clone(),
        }
    }

    /// Serializes the snapshot to a JSON string.
    pub fn encode(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Json(e.to_string()))
    }

    /// Parses and validates a snapshot from JSON.
    pub fn decode(json: &str) -> Result<Snapshot, SnapshotError> {
        let snapshot: Snapshot =
            serde_json::from_str(json).map_err(|e| SnapshotError::Json(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks the structural invariants of the carried state.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(self.version.clone()));
        }

        let state = &self.state;
        let mut seen_ids: Vec<UnitId> = Vec::new();
        let mut occupied: Vec<FaceId> = Vec::new();
        let mut fort_faces: Vec<FaceId> = Vec::new();

        let mut check_common = |id: UnitId,
                                face: FaceId,
                                hp: i32,
                                max_hp: i32|
         -> Result<(), SnapshotError> {
            if !is_valid_face(face) {
                return Err(SnapshotError::InvalidFace { unit: id, face });
            }
            if hp < 1 || hp > max_hp {
                return Err(SnapshotError::InvalidHitPoints { unit: id, hp });
            }
            if seen_ids.contains(&id) {
                return Err(SnapshotError::DuplicateUnitId(id));
            }
            if id.0 >= state.next_unit_id() {
                return Err(SnapshotError::StaleIdAllocator(id));
            }
            seen_ids.push(id);
            Ok(())
        };

        for rover in &state.rovers {
            // The cap is fixed by the data model, not by the snapshot.
            if rover.max_hit_points != ROVER_MAX_HP {
                return Err(SnapshotError::InvalidMaxHitPoints {
                    unit: rover.id,
                    max_hp: rover.max_hit_points,
                });
            }
            check_common(rover.id, rover.face, rover.hit_points, rover.max_hit_points)?;
            if occupied.contains(&rover.face) {
                return Err(SnapshotError::DuplicateOccupancy(rover.face));
            }
            occupied.push(rover.face);
        }
        for building in &state.buildings {
            if building.max_hit_points != BUILDING_MAX_HP {
                return Err(SnapshotError::InvalidMaxHitPoints {
                    unit: building.id,
                    max_hp: building.max_hit_points,
                });
            }
            check_common(
                building.id,
                building.face,
                building.hit_points,
                building.max_hit_points,
            )?;
            if occupied.contains(&building.face) {
                return Err(SnapshotError::DuplicateOccupancy(building.face));
            }
            occupied.push(building.face);
        }
        for fort in &state.fortifications {
            check_common(fort.id, fort.face, fort.hit_points, FORTIFICATION_HP)?;
            if fort_faces.contains(&fort.face) {
                return Err(SnapshotError::DuplicateOccupancy(fort.face));
            }
            fort_faces.push(fort.face);
        }

        Ok(())
    }
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

//! Unit types and ownership.
//!
//! Represents rovers, buildings, and fortifications, their owning player,
//! hit points, and position on the board.

use serde::{Deserialize, Serialize};

use super::geometry::FaceId;

/// Maximum hit points of a rover.
pub const ROVER_MAX_HP: i32 = 5;

/// Maximum hit points of a building.
pub const BUILDING_MAX_HP: i32 = 5;

/// Hit points of a fortification. Fortifications die to a single hit.
pub const FORTIFICATION_HP: i32 = 1;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red,
    Green,
}

impl Player {
    /// Returns the other player.
    pub const fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Green,
            Player::Green => Player::Red,
        }
    }

    /// Returns the lowercase display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Player::Red => "red",
            Player::Green => "green",
        }
    }

    /// Parses a player from its lowercase name.
    pub fn from_str_opt(s: &str) -> Option<Player> {
        match s {
            "red" => Some(Player::Red),
            "green" => Some(Player::Green),
            _ => None,
        }
    }
}

/// The kind of an immobile building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingKind {
    Spaceport,
    Factory,
    DrillCannon,
    Treasury,
}

impl BuildingKind {
    /// Returns the lowercase display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            BuildingKind::Spaceport => "spaceport",
            BuildingKind::Factory => "factory",
            BuildingKind::DrillCannon => "drillcannon",
            BuildingKind::Treasury => "treasury",
        }
    }
}

/// Store-assigned unit identifier, unique across all unit variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mobile combat unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rover {
    pub id: UnitId,
    pub player: Player,
    pub face: FaceId,
    pub hit_points: i32,
    pub max_hit_points: i32,
}

/// An immobile structure. A `Factory` sustains its owner's alive status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: UnitId,
    pub player: Player,
    pub kind: BuildingKind,
    pub face: FaceId,
    pub hit_points: i32,
    pub max_hit_points: i32,
}

/// A single-hit-point obstacle blocking enemy movement onto its face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fortification {
    pub id: UnitId,
    pub player: Player,
    pub face: FaceId,
    pub hit_points: i32,
}

/// A borrowed view of any unit variant, used for queries and targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitRef<'a> {
    Rover(&'a Rover),
    Building(&'a Building),
    Fortification(&'a Fortification),
}

impl UnitRef<'_> {
    /// Returns the unit's id.
    pub fn id(&self) -> UnitId {
        match self {
            UnitRef::Rover(r) => r.id,
            UnitRef::Building(b) => b.id,
            UnitRef::Fortification(f) => f.id,
        }
    }

    /// Returns the owning player.
    pub fn player(&self) -> Player {
        match self {
            UnitRef::Rover(r) => r.player,
            UnitRef::Building(b) => b.player,
            UnitRef::Fortification(f) => f.player,
        }
    }

    /// Returns the face the unit occupies.
    pub fn face(&self) -> FaceId {
        match self {
            UnitRef::Rover(r) => r.face,
            UnitRef::Building(b) => b.face,
            UnitRef::Fortification(f) => f.face,
        }
    }

    /// Returns the unit's current hit points.
    pub fn hit_points(&self) -> i32 {
        match self {
            UnitRef::Rover(r) => r.hit_points,
            UnitRef::Building(b) => b.hit_points,
            UnitRef::Fortification(f) => f.hit_points,
        }
    }

    /// Returns a short display label like "rover" or "factory".
    pub fn label(&self) -> &'static str {
        match self {
            UnitRef::Rover(_) => "rover",
            UnitRef::Building(b) => b.kind.as_str(),
            UnitRef::Fortification(_) => "fortification",
        }
    }
}

//! Game state: the authoritative entity store.
//!
//! Holds the complete mutable snapshot of a game in progress: the unit
//! collections, whose turn it is, the move history, stored action points,
//! and the drill-cannon shot counter. All rule mutations flow through the
//! validated actions in [`crate::resolve`]; the methods here enforce the
//! occupancy and hit-point invariants and emit lifecycle events.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::events::{EventSink, GameEvent};
use super::geometry::{hq_faces, is_valid_face, FaceId};
use super::unit::{
    Building, BuildingKind, Fortification, Player, Rover, UnitId, UnitRef, BUILDING_MAX_HP,
    FORTIFICATION_HP, ROVER_MAX_HP,
};

/// Cumulative drill-cannon shots at which the planet is destroyed.
pub const DRILL_CANNON_PLANET_DESTROY_THRESHOLD: u32 = 8;

/// Capacity of a player's stored action-point pool (treasury limit).
pub const TREASURY_MAX_POINTS: u32 = 3;

/// Errors from direct unit placement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaceError {
    #[error("unknown face {0}")]
    InvalidFace(FaceId),

    #[error("face {0} is already occupied")]
    Occupied(FaceId),
}

/// Per-player stored action points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPoints {
    pub red: u32,
    pub green: u32,
}

impl ActionPoints {
    /// Returns the stored points for one player.
    pub fn of(&self, player: Player) -> u32 {
        match player {
            Player::Red => self.red,
            Player::Green => self.green,
        }
    }
}

/// Complete mutable game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GameState {
    pub current_player: Player,
    pub rovers: Vec<Rover>,
    pub buildings: Vec<Building>,
    pub fortifications: Vec<Fortification>,
    /// Append-only human-readable action log.
    pub move_history: Vec<String>,
    /// Flips true -> false exactly once, when a win condition is detected.
    pub game_started: bool,
    pub action_points_stored: ActionPoints,
    pub drill_cannon_shots: u32,
    next_unit_id: u32,
}

impl GameState {
    /// Creates an empty, not-yet-started state with red to move.
    pub fn new() -> GameState {
        GameState {
            current_player: Player::Red,
            rovers: Vec::new(),
            buildings: Vec::new(),
            fortifications: Vec::new(),
            move_history: Vec::new(),
            game_started: false,
            action_points_stored: ActionPoints::default(),
            drill_cannon_shots: 0,
            next_unit_id: 1,
        }
    }

    /// Sets up a fresh game: one rover per player on distinct, randomly
    /// chosen HQ (pentagon) faces, then marks the game started.
    pub fn setup(rng: &mut impl Rng, sink: &mut dyn EventSink) -> GameState {
        let mut state = GameState::new();

        let mut hq = hq_faces();
        hq.shuffle(rng);
        state
            .place_rover(Player::Red, hq[0], sink)
            .expect("fresh HQ faces are empty");
        state
            .place_rover(Player::Green, hq[1], sink)
            .expect("fresh HQ faces are empty");

        state.game_started = true;
        state
    }

    fn alloc_id(&mut self) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        id
    }

    /// The id the allocator will hand out next. Every live unit id is
    /// strictly below this value.
    pub fn next_unit_id(&self) -> u32 {
        self.next_unit_id
    }

    // ---- queries ----

    /// True if a rover or building sits on the face.
    pub fn is_occupied(&self, face: FaceId) -> bool {
        self.rover_at(face).is_some() || self.building_at(face).is_some()
    }

    /// Returns the rover on a face, if any.
    pub fn rover_at(&self, face: FaceId) -> Option<&Rover> {
        self.rovers.iter().find(|r| r.face == face)
    }

    /// Returns the building on a face, if any.
    pub fn building_at(&self, face: FaceId) -> Option<&Building> {
        self.buildings.iter().find(|b| b.face == face)
    }

    /// Returns the fortification on a face, if any.
    pub fn fortification_at(&self, face: FaceId) -> Option<&Fortification> {
        self.fortifications.iter().find(|f| f.face == face)
    }

    /// Returns a fortification on the face owned by `player`'s opponent.
    pub fn enemy_fortification_at(&self, face: FaceId, player: Player) -> Option<&Fortification> {
        self.fortifications
            .iter()
            .find(|f| f.face == face && f.player != player)
    }

    /// Looks up any unit by id.
    pub fn unit(&self, id: UnitId) -> Option<UnitRef<'_>> {
        if let Some(r) = self.rovers.iter().find(|r| r.id == id) {
            return Some(UnitRef::Rover(r));
        }
        if let Some(b) = self.buildings.iter().find(|b| b.id == id) {
            return Some(UnitRef::Building(b));
        }
        self.fortifications
            .iter()
            .find(|f| f.id == id)
            .map(UnitRef::Fortification)
    }

    /// Looks up a rover by id.
    pub fn rover(&self, id: UnitId) -> Option<&Rover> {
        self.rovers.iter().find(|r| r.id == id)
    }

    /// Returns all units owned by a player.
    pub fn units_of(&self, player: Player) -> Vec<UnitRef<'_>> {
        let mut units: Vec<UnitRef<'_>> = Vec::new();
        units.extend(self.rovers.iter().filter(|r| r.player == player).map(UnitRef::Rover));
        units.extend(
            self.buildings
                .iter()
                .filter(|b| b.player == player)
                .map(UnitRef::Building),
        );
        units.extend(
            self.fortifications
                .iter()
                .filter(|f| f.player == player)
                .map(UnitRef::Fortification),
        );
        units
    }

    /// A player is alive while they own a rover or a factory.
    pub fn is_alive(&self, player: Player) -> bool {
        self.rovers.iter().any(|r| r.player == player)
            || self
                .buildings
                .iter()
                .any(|b| b.player == player && b.kind == BuildingKind::Factory)
    }

    // ---- mutations ----

    /// Places a new rover. Rejects invalid or occupied faces.
    pub fn place_rover(
        &mut self,
        player: Player,
        face: FaceId,
        sink: &mut dyn EventSink,
    ) -> Result<UnitId, PlaceError> {
        self.check_placeable(face)?;
        let id = self.alloc_id();
        self.rovers.push(Rover {
            id,
            player,
            face,
            hit_points: ROVER_MAX_HP,
            max_hit_points: ROVER_MAX_HP,
        });
        sink.handle(GameEvent::UnitCreated { unit: id, face });
        Ok(id)
    }

    /// Places a new building. Rejects invalid or occupied faces.
    pub fn place_building(
        &mut self,
        player: Player,
        kind: BuildingKind,
        face: FaceId,
        sink: &mut dyn EventSink,
    ) -> Result<UnitId, PlaceError> {
        self.check_placeable(face)?;
        let id = self.alloc_id();
        self.buildings.push(Building {
            id,
            player,
            kind,
            face,
            hit_points: BUILDING_MAX_HP,
            max_hit_points: BUILDING_MAX_HP,
        });
        sink.handle(GameEvent::UnitCreated { unit: id, face });
        Ok(id)
    }

    /// Places a new fortification. The face must be completely empty:
    /// no rover, building, or fortification of either player.
    pub fn place_fortification(
        &mut self,
        player: Player,
        face: FaceId,
        sink: &mut dyn EventSink,
    ) -> Result<UnitId, PlaceError> {
        self.check_placeable(face)?;
        if self.fortification_at(face).is_some() {
            return Err(PlaceError::Occupied(face));
        }
        let id = self.alloc_id();
        self.fortifications.push(Fortification {
            id,
            player,
            face,
            hit_points: FORTIFICATION_HP,
        });
        sink.handle(GameEvent::UnitCreated { unit: id, face });
        Ok(id)
    }

    fn check_placeable(&self, face: FaceId) -> Result<(), PlaceError> {
        if !is_valid_face(face) {
            return Err(PlaceError::InvalidFace(face));
        }
        if self.is_occupied(face) {
            return Err(PlaceError::Occupied(face));
        }
        Ok(())
    }

    /// Moves a rover to a new face. Legality is checked by the caller;
    /// this only updates the position and reports the event.
    pub fn move_rover(&mut self, id: UnitId, to: FaceId, sink: &mut dyn EventSink) -> bool {
        match self.rovers.iter_mut().find(|r| r.id == id) {
            Some(rover) => {
                let from = rover.face;
                rover.face = to;
                sink.handle(GameEvent::UnitMoved { unit: id, from, to });
                true
            }
            None => false,
        }
    }

    /// Removes a unit from the store, reporting the eviction so the
    /// presentation layer can release its visual handle.
    pub fn remove(&mut self, id: UnitId, sink: &mut dyn EventSink) -> bool {
        let face = match self.unit(id) {
            Some(u) => u.face(),
            None => return false,
        };
        self.rovers.retain(|r| r.id != id);
        self.buildings.retain(|b| b.id != id);
        self.fortifications.retain(|f| f.id != id);
        sink.handle(GameEvent::UnitRemoved { unit: id, face });
        true
    }

    /// Applies damage to a unit and returns its remaining hit points.
    ///
    /// A unit whose hit points reach zero is removed in the same operation;
    /// no state with non-positive HP is ever observable. Returns None for
    /// an unknown unit id.
    pub fn apply_damage(
        &mut self,
        id: UnitId,
        amount: i32,
        sink: &mut dyn EventSink,
    ) -> Option<i32> {
        let amount = amount.max(0);
        let remaining = {
            let hp = self.hit_points_mut(id)?;
            *hp -= amount;
            *hp
        };
        if remaining <= 0 {
            self.remove(id, sink);
            return Some(0);
        }
        Some(remaining)
    }

    fn hit_points_mut(&mut self, id: UnitId) -> Option<&mut i32> {
        if let Some(r) = self.rovers.iter_mut().find(|r| r.id == id) {
            return Some(&mut r.hit_points);
        }
        if let Some(b) = self.buildings.iter_mut().find(|b| b.id == id) {
            return Some(&mut b.hit_points);
        }
        self.fortifications
            .iter_mut()
            .find(|f| f.id == id)
            .map(|f| &mut f.hit_points)
    }

    /// Increments the cumulative drill-cannon counter and returns it.
    pub fn record_drill_cannon_shot(&mut self) -> u32 {
        self.drill_cannon_shots += 1;
        self.drill_cannon_shots
    }

    /// Appends a line to the move history.
    pub fn push_history(&mut self, entry: String) {
        self.move_history.push(entry);
    }

    /// Hands the turn to the other player.
    pub fn end_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }
}

impl Default for GameState {
    fn default() -> GameState {
        GameState::new()
    }
}

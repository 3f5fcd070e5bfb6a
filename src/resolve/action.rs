//! Turn action validation and commit.
//!
//! Each function validates one action kind against the topology and the
//! entity store, then commits it: mutate the store, append a history line,
//! flip the turn, and run the win evaluator. Rejections return a typed
//! [`ActionError`] and leave the state untouched.

use std::fmt;

use thiserror::Error;

use crate::board::adjacency::AdjacencyGraph;
use crate::board::distance::distance;
use crate::board::events::EventSink;
use crate::board::geometry::{is_valid_face, FaceId};
use crate::board::state::GameState;
use crate::board::unit::{Rover, UnitId, UnitRef};
use crate::movegen::shoot::shooting_range;

use super::combat::{resolve_shot, CombatReport, Dice};
use super::victory::{check_and_apply, Outcome};

/// The action a selected unit may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Move,
    Shoot,
    Fortify,
}

impl ActionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::Move => "move",
            ActionKind::Shoot => "shoot",
            ActionKind::Fortify => "fortify",
        }
    }

    /// Parses an action kind from its lowercase name.
    pub fn from_str_opt(s: &str) -> Option<ActionKind> {
        match s {
            "move" => Some(ActionKind::Move),
            "shoot" => Some(ActionKind::Shoot),
            "fortify" => Some(ActionKind::Fortify),
            _ => None,
        }
    }
}

/// Why an action was rejected. No state mutation accompanies any of these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("the game is over")]
    GameOver,

    #[error("unknown unit {0}")]
    UnknownUnit(UnitId),

    #[error("unknown face {0}")]
    UnknownFace(FaceId),

    #[error("unit {0} is not owned by the current player")]
    NotYourUnit(UnitId),

    #[error("unit {0} is not a rover and cannot act")]
    NotARover(UnitId),

    #[error("face {to} is not adjacent to face {from}")]
    NotAdjacent { from: FaceId, to: FaceId },

    #[error("face {0} is occupied")]
    FaceOccupied(FaceId),

    #[error("face {0} hosts an enemy fortification")]
    EnemyFortification(FaceId),

    #[error("face {0} is not empty")]
    FaceNotEmpty(FaceId),

    #[error("target out of range ({distance} hops, max {max})")]
    OutOfRange { distance: i32, max: i32 },

    #[error("unit {0} is not an enemy")]
    TargetNotEnemy(UnitId),

    #[error("no unit to shoot at face {0}")]
    NoTarget(FaceId),

    #[error("no unit selected")]
    NoSelection,

    #[error("no action chosen")]
    NoActionChosen,
}

/// A successfully committed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionReport {
    Moved { unit: UnitId, from: FaceId, to: FaceId },
    Fortified { fort: UnitId, face: FaceId },
    Shot(CombatReport),
}

impl fmt::Display for ActionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionReport::Moved { to, .. } => write!(f, "moved to face {}", to),
            ActionReport::Fortified { face, .. } => write!(f, "fortified face {}", face),
            ActionReport::Shot(report) => {
                if report.destroyed {
                    write!(f, "rolled {}: hit, target destroyed", report.roll)
                } else if report.hit {
                    write!(f, "rolled {}: hit, {} HP remaining", report.roll, report.remaining_hp)
                } else {
                    write!(f, "rolled {}: miss", report.roll)
                }
            }
        }
    }
}

/// Looks up the acting rover and checks it may act for the current player.
fn acting_rover(state: &GameState, unit: UnitId) -> Result<Rover, ActionError> {
    if !state.game_started {
        return Err(ActionError::GameOver);
    }
    let found = state.unit(unit).ok_or(ActionError::UnknownUnit(unit))?;
    let rover = match found {
        UnitRef::Rover(r) => *r,
        _ => return Err(ActionError::NotARover(unit)),
    };
    if rover.player != state.current_player {
        return Err(ActionError::NotYourUnit(unit));
    }
    Ok(rover)
}

/// Validates and commits a move action, then ends the turn.
pub fn perform_move(
    state: &mut GameState,
    graph: &AdjacencyGraph,
    unit: UnitId,
    to: FaceId,
    sink: &mut dyn EventSink,
) -> Result<(ActionReport, Option<Outcome>), ActionError> {
    let rover = acting_rover(state, unit)?;

    if !is_valid_face(to) {
        return Err(ActionError::UnknownFace(to));
    }
    if !graph.is_adjacent(rover.face, to) {
        return Err(ActionError::NotAdjacent { from: rover.face, to });
    }
    if state.is_occupied(to) {
        return Err(ActionError::FaceOccupied(to));
    }
    if state.enemy_fortification_at(to, rover.player).is_some() {
        return Err(ActionError::EnemyFortification(to));
    }

    let from = rover.face;
    state.move_rover(unit, to, sink);
    state.push_history(format!("{} moved rover to face {}", rover.player.as_str(), to));
    state.end_turn();
    let outcome = check_and_apply(state);

    Ok((ActionReport::Moved { unit, from, to }, outcome))
}

/// Validates and commits a fortify action, then ends the turn.
pub fn perform_fortify(
    state: &mut GameState,
    graph: &AdjacencyGraph,
    unit: UnitId,
    face: FaceId,
    sink: &mut dyn EventSink,
) -> Result<(ActionReport, Option<Outcome>), ActionError> {
    let rover = acting_rover(state, unit)?;

    if !is_valid_face(face) {
        return Err(ActionError::UnknownFace(face));
    }
    if !graph.is_adjacent(rover.face, face) {
        return Err(ActionError::NotAdjacent { from: rover.face, to: face });
    }
    if state.is_occupied(face) || state.fortification_at(face).is_some() {
        return Err(ActionError::FaceNotEmpty(face));
    }

    let fort = state
        .place_fortification(rover.player, face, sink)
        .map_err(|_| ActionError::FaceNotEmpty(face))?;
    state.push_history(format!(
        "{} fortified face {}",
        rover.player.as_str(),
        face
    ));
    state.end_turn();
    let outcome = check_and_apply(state);

    Ok((ActionReport::Fortified { fort, face }, outcome))
}

/// Validates and commits a shoot action, then ends the turn.
///
/// The turn ends after every shot attempt, hit or miss.
pub fn perform_shot(
    state: &mut GameState,
    graph: &AdjacencyGraph,
    unit: UnitId,
    target: UnitId,
    dice: &mut dyn Dice,
    sink: &mut dyn EventSink,
) -> Result<(ActionReport, Option<Outcome>), ActionError> {
    let rover = acting_rover(state, unit)?;

    let target_ref = state.unit(target).ok_or(ActionError::UnknownUnit(target))?;
    if target_ref.player() == rover.player {
        return Err(ActionError::TargetNotEnemy(target));
    }
    let (target_face, target_label, target_player) =
        (target_ref.face(), target_ref.label(), target_ref.player());

    let d = distance(rover.face, target_face, graph);
    let max = shooting_range(&rover);
    if d < 1 || d > max {
        return Err(ActionError::OutOfRange { distance: d, max });
    }

    // Target existence was just checked, so resolution cannot fail.
    let report = resolve_shot(state, target, dice, sink).ok_or(ActionError::UnknownUnit(target))?;

    let verdict = if report.destroyed {
        "destroyed".to_string()
    } else if report.hit {
        format!("hit, {} HP left", report.remaining_hp)
    } else {
        "miss".to_string()
    };
    state.push_history(format!(
        "{} shot {} {} at face {}: rolled {}, {}",
        rover.player.as_str(),
        target_player.as_str(),
        target_label,
        target_face,
        report.roll,
        verdict
    ));
    state.end_turn();
    let outcome = check_and_apply(state);

    Ok((ActionReport::Shot(report), outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::adjacency::adjacency;
    use crate::board::events::NullSink;
    use crate::board::geometry::FACE_COUNT;
    use crate::board::unit::Player;
    use crate::resolve::combat::FixedDice;

    fn started_state(red_face: usize, green_face: usize) -> (GameState, UnitId, UnitId) {
        let mut state = GameState::new();
        let mut sink = NullSink;
        let red = state.place_rover(Player::Red, red_face, &mut sink).unwrap();
        let green = state.place_rover(Player::Green, green_face, &mut sink).unwrap();
        state.game_started = true;
        (state, red, green)
    }

    #[test]
    fn move_to_adjacent_empty_face_commits_and_flips_turn() {
        let graph = adjacency();
        let (mut state, red, _) = started_state(0, 50);
        let mut sink = NullSink;
        let to = graph.neighbors(0)[0];

        let (report, outcome) = perform_move(&mut state, graph, red, to, &mut sink).unwrap();
        assert_eq!(report, ActionReport::Moved { unit: red, from: 0, to });
        assert_eq!(outcome, None);
        assert_eq!(state.rover(red).unwrap().face, to);
        assert_eq!(state.current_player, Player::Green);
        assert_eq!(state.move_history.len(), 1);
    }

    #[test]
    fn move_to_non_adjacent_face_rejected_without_mutation() {
        let graph = adjacency();
        let (mut state, red, _) = started_state(0, 50);
        let snapshot = state.clone();
        let mut sink = NullSink;

        let err = perform_move(&mut state, graph, red, 79, &mut sink).unwrap_err();
        assert_eq!(err, ActionError::NotAdjacent { from: 0, to: 79 });
        assert_eq!(state, snapshot);
    }

    #[test]
    fn move_onto_occupied_face_rejected() {
        let graph = adjacency();
        let (mut state, red, _) = started_state(0, graph.neighbors(0)[0]);
        let mut sink = NullSink;
        let err =
            perform_move(&mut state, graph, red, graph.neighbors(0)[0], &mut sink).unwrap_err();
        assert_eq!(err, ActionError::FaceOccupied(graph.neighbors(0)[0]));
    }

    #[test]
    fn move_onto_enemy_fortification_rejected() {
        let graph = adjacency();
        let (mut state, red, _) = started_state(0, 50);
        let mut sink = NullSink;
        let fort_face = graph.neighbors(0)[0];
        state
            .place_fortification(Player::Green, fort_face, &mut sink)
            .unwrap();

        let err = perform_move(&mut state, graph, red, fort_face, &mut sink).unwrap_err();
        assert_eq!(err, ActionError::EnemyFortification(fort_face));
        assert_eq!(state.current_player, Player::Red);
    }

    #[test]
    fn move_with_opponent_unit_rejected() {
        let graph = adjacency();
        let (mut state, _, green) = started_state(0, 50);
        let mut sink = NullSink;
        let err =
            perform_move(&mut state, graph, green, graph.neighbors(50)[0], &mut sink).unwrap_err();
        assert_eq!(err, ActionError::NotYourUnit(green));
    }

    #[test]
    fn move_unknown_unit_or_face_rejected() {
        let graph = adjacency();
        let (mut state, red, _) = started_state(0, 50);
        let mut sink = NullSink;
        assert_eq!(
            perform_move(&mut state, graph, UnitId(99), 1, &mut sink).unwrap_err(),
            ActionError::UnknownUnit(UnitId(99))
        );
        assert_eq!(
            perform_move(&mut state, graph, red, FACE_COUNT, &mut sink).unwrap_err(),
            ActionError::UnknownFace(FACE_COUNT)
        );
    }

    #[test]
    fn no_actions_after_game_over() {
        let graph = adjacency();
        let (mut state, red, _) = started_state(0, 50);
        state.game_started = false;
        let mut sink = NullSink;
        let err =
            perform_move(&mut state, graph, red, graph.neighbors(0)[0], &mut sink).unwrap_err();
        assert_eq!(err, ActionError::GameOver);
    }

    #[test]
    fn fortify_empty_adjacent_face() {
        let graph = adjacency();
        let (mut state, red, _) = started_state(0, 50);
        let mut sink = NullSink;
        let face = graph.neighbors(0)[0];

        let (report, outcome) = perform_fortify(&mut state, graph, red, face, &mut sink).unwrap();
        match report {
            ActionReport::Fortified { face: f, .. } => assert_eq!(f, face),
            other => panic!("unexpected report {:?}", other),
        }
        assert_eq!(outcome, None);
        let fort = state.fortification_at(face).unwrap();
        assert_eq!(fort.player, Player::Red);
        assert_eq!(fort.hit_points, 1);
        assert_eq!(state.current_player, Player::Green);
    }

    #[test]
    fn fortify_rejects_any_occupant() {
        let graph = adjacency();
        let (mut state, red, _) = started_state(0, 50);
        let mut sink = NullSink;
        let face = graph.neighbors(0)[0];
        state.place_fortification(Player::Red, face, &mut sink).unwrap();

        let err = perform_fortify(&mut state, graph, red, face, &mut sink).unwrap_err();
        assert_eq!(err, ActionError::FaceNotEmpty(face));
    }

    #[test]
    fn shot_within_range_hits_with_forced_roll() {
        let graph = adjacency();
        // Find a green face exactly 2 hops from face 0.
        let green_face = (0..FACE_COUNT)
            .find(|&f| distance(0, f, graph) == 2)
            .unwrap();
        let (mut state, red, green) = started_state(0, green_face);
        let mut sink = NullSink;
        let mut dice = FixedDice::new([5]);

        let (report, outcome) =
            perform_shot(&mut state, graph, red, green, &mut dice, &mut sink).unwrap();
        match report {
            ActionReport::Shot(r) => {
                assert_eq!(r.roll, 5);
                assert!(r.hit);
                assert!(!r.destroyed);
                assert_eq!(r.remaining_hp, 4);
            }
            other => panic!("unexpected report {:?}", other),
        }
        assert_eq!(outcome, None);
        assert_eq!(state.rover(green).unwrap().hit_points, 4);
        assert_eq!(state.current_player, Player::Green);
    }

    #[test]
    fn shot_beyond_range_rejected_without_turn_end() {
        let graph = adjacency();
        let green_face = (0..FACE_COUNT)
            .find(|&f| distance(0, f, graph) == 4)
            .unwrap();
        let (mut state, red, green) = started_state(0, green_face);
        let mut sink = NullSink;
        let mut dice = FixedDice::new([6]);

        let err =
            perform_shot(&mut state, graph, red, green, &mut dice, &mut sink).unwrap_err();
        assert_eq!(err, ActionError::OutOfRange { distance: 4, max: 3 });
        assert_eq!(state.rover(green).unwrap().hit_points, 5);
        assert_eq!(state.current_player, Player::Red);
    }

    #[test]
    fn shot_at_friendly_unit_rejected() {
        let graph = adjacency();
        let (mut state, red, _) = started_state(0, 50);
        let mut sink = NullSink;
        let friend = state
            .place_rover(Player::Red, graph.neighbors(0)[0], &mut sink)
            .unwrap();
        let mut dice = FixedDice::new([6]);

        let err = perform_shot(&mut state, graph, red, friend, &mut dice, &mut sink).unwrap_err();
        assert_eq!(err, ActionError::TargetNotEnemy(friend));
    }

    #[test]
    fn miss_still_ends_turn() {
        let graph = adjacency();
        let green_face = graph.neighbors(0)[0];
        let (mut state, red, green) = started_state(0, green_face);
        let mut sink = NullSink;
        let mut dice = FixedDice::new([2]);

        let (report, _) =
            perform_shot(&mut state, graph, red, green, &mut dice, &mut sink).unwrap();
        match report {
            ActionReport::Shot(r) => assert!(!r.hit),
            other => panic!("unexpected report {:?}", other),
        }
        assert_eq!(state.rover(green).unwrap().hit_points, 5);
        assert_eq!(state.current_player, Player::Green);
    }

    #[test]
    fn destroying_last_rover_ends_the_game() {
        let graph = adjacency();
        let green_face = graph.neighbors(0)[0];
        let (mut state, red, green) = started_state(0, green_face);
        // Wear the target down to 1 HP first.
        let mut sink = NullSink;
        for _ in 0..4 {
            state.apply_damage(green, 1, &mut sink);
        }
        let mut dice = FixedDice::new([6]);

        let (report, outcome) =
            perform_shot(&mut state, graph, red, green, &mut dice, &mut sink).unwrap();
        match report {
            ActionReport::Shot(r) => assert!(r.destroyed),
            other => panic!("unexpected report {:?}", other),
        }
        assert_eq!(outcome, Some(Outcome::RedWins));
        assert!(!state.game_started);
        assert!(state.unit(green).is_none());
        let _ = red;
    }

    #[test]
    fn building_cannot_act() {
        let graph = adjacency();
        let (mut state, _, _) = started_state(0, 50);
        let mut sink = NullSink;
        let building = state
            .place_building(Player::Red, crate::board::unit::BuildingKind::Factory, 10, &mut sink)
            .unwrap();
        let err = perform_move(&mut state, graph, building, 11, &mut sink).unwrap_err();
        assert_eq!(err, ActionError::NotARover(building));
    }
}

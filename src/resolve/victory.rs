//! Win-condition evaluation.
//!
//! Runs after every turn end. A player is alive while they own at least
//! one rover or one factory. Reaching the drill-cannon threshold destroys
//! the planet outright, overriding the normal win/lose outcomes.

use std::fmt;

use crate::board::state::{GameState, DRILL_CANNON_PLANET_DESTROY_THRESHOLD};
use crate::board::unit::Player;

/// Terminal game outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    RedWins,
    GreenWins,
    Draw,
    PlanetDestroyed,
}

impl Outcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::RedWins => "red wins",
            Outcome::GreenWins => "green wins",
            Outcome::Draw => "draw",
            Outcome::PlanetDestroyed => "planet destroyed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluates the current state for a terminal outcome, without mutating.
pub fn evaluate(state: &GameState) -> Option<Outcome> {
    if state.drill_cannon_shots >= DRILL_CANNON_PLANET_DESTROY_THRESHOLD {
        return Some(Outcome::PlanetDestroyed);
    }

    let red_alive = state.is_alive(Player::Red);
    let green_alive = state.is_alive(Player::Green);
    match (red_alive, green_alive) {
        (false, false) => Some(Outcome::Draw),
        (false, true) => Some(Outcome::GreenWins),
        (true, false) => Some(Outcome::RedWins),
        (true, true) => None,
    }
}

/// Evaluates and, on a terminal outcome, marks the game over.
///
/// The `game_started` flag transitions true -> false exactly once; calling
/// this again on an already-terminal state reports the outcome without
/// appending another history entry.
pub fn check_and_apply(state: &mut GameState) -> Option<Outcome> {
    let outcome = evaluate(state)?;
    if state.game_started {
        state.game_started = false;
        state.push_history(format!("game over: {}", outcome));
    }
    Some(outcome)
}

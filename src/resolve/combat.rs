//! Randomized combat resolution.
//!
//! A shot rolls one d6 and hits on 4 or better. A hit removes exactly one
//! hit point; a unit dropping to zero is destroyed and leaves the store as
//! part of the same operation. The attacker is never mutated. The die is
//! an injected capability so tests can force deterministic sequences.

use std::collections::VecDeque;

use rand::Rng;

use crate::board::events::EventSink;
use crate::board::state::GameState;
use crate::board::unit::UnitId;

/// Minimum d6 roll that counts as a hit.
pub const HIT_THRESHOLD: i32 = 4;

/// Source of d6 rolls.
pub trait Dice {
    /// Returns a roll in `1..=6`.
    fn roll_d6(&mut self) -> i32;
}

/// Dice backed by a random number generator.
#[derive(Debug)]
pub struct RngDice<R: Rng> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> RngDice<R> {
        RngDice { rng }
    }
}

impl<R: Rng> Dice for RngDice<R> {
    fn roll_d6(&mut self) -> i32 {
        self.rng.gen_range(1..=6)
    }
}

/// Dice that replay a fixed sequence, then repeat the last roll.
#[derive(Debug)]
pub struct FixedDice {
    rolls: VecDeque<i32>,
    last: i32,
}

impl FixedDice {
    pub fn new(rolls: impl IntoIterator<Item = i32>) -> FixedDice {
        FixedDice {
            rolls: rolls.into_iter().collect(),
            last: 1,
        }
    }
}

impl Dice for FixedDice {
    fn roll_d6(&mut self) -> i32 {
        if let Some(roll) = self.rolls.pop_front() {
            self.last = roll;
        }
        self.last
    }
}

/// Result of one resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatReport {
    pub target: UnitId,
    pub roll: i32,
    pub hit: bool,
    pub destroyed: bool,
    /// Target hit points after the shot.
    pub remaining_hp: i32,
}

/// Resolves a shot against a validated target.
///
/// The caller has already checked ownership and range; this only rolls,
/// applies damage on a hit, and reports the result. Returns None if the
/// target id is unknown.
pub fn resolve_shot(
    state: &mut GameState,
    target: UnitId,
    dice: &mut dyn Dice,
    sink: &mut dyn EventSink,
) -> Option<CombatReport> {
    let before = state.unit(target)?.hit_points();
    let roll = dice.roll_d6();
    let hit = roll >= HIT_THRESHOLD;

    let remaining_hp = if hit {
        state.apply_damage(target, 1, sink)?
    } else {
        before
    };

    Some(CombatReport {
        target,
        roll,
        hit,
        destroyed: hit && remaining_hp == 0,
        remaining_hp,
    })
}

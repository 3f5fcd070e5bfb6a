//! Action validation, combat resolution, and win evaluation.
//!
//! Each player turn is a single validated action (move, shoot, or fortify)
//! committed atomically: a rejected action mutates nothing, a committed one
//! updates the entity store, appends history, flips the turn, and runs the
//! win-condition evaluator.

pub mod action;
pub mod combat;
pub mod victory;

pub use action::{perform_fortify, perform_move, perform_shot, ActionError, ActionKind, ActionReport};
pub use combat::{CombatReport, Dice, FixedDice, RngDice, HIT_THRESHOLD};
pub use victory::{check_and_apply, evaluate, Outcome};

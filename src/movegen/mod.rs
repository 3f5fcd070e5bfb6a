//! Legal target generation.
//!
//! Computes, for a given rover, the faces it may move to or fortify and
//! the enemy units it may shoot, against the current game state and the
//! shared adjacency graph. The resolve layer applies the same predicates
//! when committing an action, so a target produced here always validates.

pub mod fortify;
pub mod movement;
pub mod shoot;

pub use fortify::legal_fortify_targets;
pub use movement::legal_move_targets;
pub use shoot::{legal_shoot_targets, shooting_range};

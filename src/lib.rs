//! Snubwar engine library.
//!
//! A two-player turn-based strategy game played on the face graph of a snub
//! dodecahedron. Exposes the board representation, legal target generation,
//! action resolution, and the snapshot protocol for use by integration
//! tests, presentation layers, and the binary entry point.

pub mod board;
pub mod engine;
pub mod movegen;
pub mod protocol;
pub mod resolve;

//! External snapshot format and CLI command grammar.

pub mod parser;
pub mod snapshot;

pub use parser::{parse_command, Command};
pub use snapshot::{Snapshot, SnapshotError, SNAPSHOT_VERSION};

//! Line-command grammar for the CLI driver.
//!
//! One command per line, whitespace-separated tokens. Unknown or
//! malformed commands parse to None and are ignored by the loop, matching
//! the usual engine-protocol convention.

use crate::board::geometry::FaceId;
use crate::board::unit::UnitId;
use crate::resolve::action::ActionKind;

/// A parsed CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `newgame [seed]` — start a fresh game, optionally seeded.
    NewGame { seed: Option<u64> },
    /// `select <unit-id>`
    Select { unit: UnitId },
    /// `action <move|shoot|fortify>`
    Action { kind: ActionKind },
    /// `target <face-id>`
    Target { face: FaceId },
    /// `cancel`
    Cancel,
    /// `state` — dump the current turn and units.
    State,
    /// `export` — print a snapshot JSON line.
    Export,
    /// `import <json>` — replace the game state from a snapshot.
    Import { json: String },
    /// `quit`
    Quit,
}

/// Parses a single input line into a command, or None for noise.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    match word {
        "newgame" => {
            if rest.is_empty() {
                Some(Command::NewGame { seed: None })
            } else {
                rest.parse::<u64>()
                    .ok()
                    .map(|seed| Command::NewGame { seed: Some(seed) })
            }
        }
        "select" => rest
            .parse::<u32>()
            .ok()
            .map(|id| Command::Select { unit: UnitId(id) }),
        "action" => ActionKind::from_str_opt(rest).map(|kind| Command::Action { kind }),
        "target" => rest
            .parse::<FaceId>()
            .ok()
            .map(|face| Command::Target { face }),
        "cancel" if rest.is_empty() => Some(Command::Cancel),
        "state" if rest.is_empty() => Some(Command::State),
        "export" if rest.is_empty() => Some(Command::Export),
        "import" if !rest.is_empty() => Some(Command::Import { json: rest.to_string() }),
        "quit" if rest.is_empty() => Some(Command::Quit),
        _ => None,
    }
}

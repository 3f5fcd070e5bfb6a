//! Snubwar -- a turn-based strategy engine on a snub dodecahedron.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! one line per command, suitable for driving from a frontend or a pipe.

use std::io::{self, BufRead};

use snubwar::engine::Engine;
use snubwar::protocol::parser::{parse_command, Command};

/// Runs the main command loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::NewGame { seed } => {
                engine.handle_newgame(seed, &mut out);
            }
            Command::Select { unit } => {
                engine.handle_select(unit, &mut out);
            }
            Command::Action { kind } => {
                engine.handle_action(kind, &mut out);
            }
            Command::Target { face } => {
                engine.handle_target(face, &mut out);
            }
            Command::Cancel => {
                engine.handle_cancel(&mut out);
            }
            Command::State => {
                engine.handle_state(&mut out);
            }
            Command::Export => {
                engine.handle_export(&mut out);
            }
            Command::Import { json } => {
                engine.handle_import(&json, &mut out);
            }
            Command::Quit => {
                break;
            }
        }
    }
}

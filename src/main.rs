//! Gridlock -- a grid-pursuit game engine implementing the GPI protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! following the GPI (Grid Pursuit Interface) convention.

use std::io::{self, BufRead};

use gridlock::engine::Engine;
use gridlock::protocol::parser::{parse_command, Command};

/// Runs the main GPI protocol loop, reading commands from stdin
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
            Command::Gpi => {
                engine.handle_gpi(&mut out);
            }
            Command::IsReady => {
                engine.handle_isready(&mut out);
            }
            Command::SetOption { name, value } => {
                engine.set_option(name, value);
            }
            Command::NewGame => {
                engine.new_game();
            }
            Command::Layout { rows } => {
                if let Err(e) = engine.set_layout(&rows) {
                    eprintln!("{}", e);
                }
            }
            Command::Terrain { rows } => {
                if let Err(e) = engine.set_terrain(&rows) {
                    eprintln!("{}", e);
                }
            }
            Command::Scenario { path } => {
                if let Err(e) = engine.load_scenario(&path) {
                    eprintln!("{}", e);
                }
            }
            Command::Plan { algorithm } => {
                engine.handle_plan(algorithm, &mut out);
            }
            Command::Go(params) => {
                engine.handle_go(&params, &mut out);
            }
            Command::Stop => {
                // No async search to interrupt; no-op
            }
            Command::Quit => {
                break;
            }
        }
    }
}

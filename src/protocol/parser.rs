//! GPI command parser.
//!
//! Parses incoming GPI protocol commands from raw text into structured
//! `Command` variants that the engine main loop can dispatch on.

use crate::search::Algorithm;

/// Search constraints passed with the `go` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u32>,
}

/// A parsed server-to-engine GPI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the GPI protocol handshake.
    Gpi,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset engine state for a new game.
    NewGame,

    /// Set the game position from a layout, rows separated by `|`.
    Layout { rows: String },

    /// Set the terrain grid from a layout, rows separated by `|`.
    Terrain { rows: String },

    /// Load a JSON scenario file.
    Scenario { path: String },

    /// Plan a route with a single-agent search algorithm.
    Plan { algorithm: Algorithm },

    /// Begin calculating a move with optional search constraints.
    Go(GoParams),

    /// Interrupt the current search immediately.
    Stop,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "gpi" => Some(Command::Gpi),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "stop" => Some(Command::Stop),

        "setoption" => parse_setoption(&tokens),
        "layout" => parse_rows(&tokens, "layout").map(|rows| Command::Layout { rows }),
        "terrain" => parse_rows(&tokens, "terrain").map(|rows| Command::Terrain { rows }),
        "scenario" => parse_scenario(&tokens),
        "plan" => parse_plan(&tokens),
        "go" => parse_go(&tokens),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    // Minimum: setoption name <id>
    if tokens.len() < 3 || tokens[1] != "name" {
        eprintln!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    // Find the "value" keyword to split name from value.
    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                eprintln!("malformed setoption: empty name");
                return None;
            }
            let name = name_parts.join(" ");
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name, value)
        }
        None => {
            let name = tokens[2..].join(" ");
            (name, None)
        }
    };

    Some(Command::SetOption { name, value })
}

/// Parses `layout <rows>` / `terrain <rows>` where rows are `|`-separated.
fn parse_rows(tokens: &[&str], keyword: &str) -> Option<String> {
    if tokens.len() < 2 {
        eprintln!("malformed {0}: expected '{0} <rows>'", keyword);
        return None;
    }
    // The layout is a single token (no spaces; empty cells use row framing)
    Some(tokens[1].to_string())
}

/// Parses `scenario <path>`.
fn parse_scenario(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed scenario: expected 'scenario <path>'");
        return None;
    }
    Some(Command::Scenario {
        path: tokens[1..].join(" "),
    })
}

/// Parses `plan <dfs|bfs|ucs|astar>`.
fn parse_plan(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed plan: expected 'plan <dfs|bfs|ucs|astar>'");
        return None;
    }
    match Algorithm::from_name(tokens[1]) {
        Some(algorithm) => Some(Command::Plan { algorithm }),
        None => {
            eprintln!("unknown algorithm: '{}'", tokens[1]);
            None
        }
    }
}

/// Parses `go [depth <n>]`.
fn parse_go(tokens: &[&str]) -> Option<Command> {
    let mut params = GoParams::default();
    let mut i = 1;

    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                i += 1;
                if i < tokens.len() {
                    match tokens[i].parse::<u32>() {
                        Ok(v) => params.depth = Some(v),
                        Err(_) => {
                            eprintln!("invalid depth value: '{}'", tokens[i]);
                        }
                    }
                }
            }
            other => {
                eprintln!("unknown go parameter: '{}'", other);
            }
        }
        i += 1;
    }

    Some(Command::Go(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_commands() {
        assert_eq!(parse_command("gpi"), Some(Command::Gpi));
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("newgame"), Some(Command::NewGame));
        assert_eq!(parse_command("stop"), Some(Command::Stop));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
    }

    #[test]
    fn empty_and_unknown_lines_return_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("frobnicate"), None);
    }

    #[test]
    fn parses_setoption_with_value() {
        assert_eq!(
            parse_command("setoption name Depth value 3"),
            Some(Command::SetOption {
                name: "Depth".to_string(),
                value: Some("3".to_string()),
            })
        );
    }

    #[test]
    fn parses_setoption_without_value() {
        assert_eq!(
            parse_command("setoption name Mode"),
            Some(Command::SetOption {
                name: "Mode".to_string(),
                value: None,
            })
        );
    }

    #[test]
    fn malformed_setoption_returns_none() {
        assert_eq!(parse_command("setoption"), None);
        assert_eq!(parse_command("setoption Depth"), None);
    }

    #[test]
    fn parses_layout_rows() {
        assert_eq!(
            parse_command("layout %%%|%C%|%%%"),
            Some(Command::Layout {
                rows: "%%%|%C%|%%%".to_string()
            })
        );
    }

    #[test]
    fn parses_terrain_rows() {
        assert_eq!(
            parse_command("terrain SRG"),
            Some(Command::Terrain {
                rows: "SRG".to_string()
            })
        );
    }

    #[test]
    fn parses_scenario_path() {
        assert_eq!(
            parse_command("scenario fixtures/corner.json"),
            Some(Command::Scenario {
                path: "fixtures/corner.json".to_string()
            })
        );
    }

    #[test]
    fn parses_plan_algorithms() {
        assert_eq!(
            parse_command("plan astar"),
            Some(Command::Plan {
                algorithm: Algorithm::AStar
            })
        );
        assert_eq!(
            parse_command("plan bfs"),
            Some(Command::Plan {
                algorithm: Algorithm::BreadthFirst
            })
        );
        assert_eq!(parse_command("plan dijkstra"), None);
        assert_eq!(parse_command("plan"), None);
    }

    #[test]
    fn parses_go_with_depth() {
        assert_eq!(
            parse_command("go depth 4"),
            Some(Command::Go(GoParams { depth: Some(4) }))
        );
        assert_eq!(parse_command("go"), Some(Command::Go(GoParams::default())));
    }
}

//! Engine state management.
//!
//! Holds the current game position, terrain grid, and engine options, and
//! runs search for the `plan` and `go` commands. Game-tree mode and depth
//! come from the `Mode` and `Depth` options; `go depth <n>` overrides the
//! depth for one search.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::adversarial::{decide, Game, SearchMode};
use crate::eval::{evaluate, evaluate_action, score_evaluation};
use crate::grid::{format_plan, Direction, GameState, Pos};
use crate::problem::{PositionProblem, TerrainProblem};
use crate::protocol::parser::GoParams;
use crate::protocol::{load_scenario, parse_layout, parse_terrain};
use crate::search::{
    a_star_outcome, breadth_first_outcome, depth_first_outcome, manhattan_heuristic,
    terrain_heuristic, uniform_cost_outcome, Algorithm, SearchOutcome,
};

/// Default game-tree search depth in plies.
const DEFAULT_DEPTH: u32 = 2;

/// Picks a uniformly random legal action for an agent, if it has any.
pub fn random_action(state: &GameState, agent: usize, rng: &mut impl Rng) -> Option<Direction> {
    let legal = state.legal_actions(agent);
    if legal.is_empty() {
        return None;
    }
    Some(legal[rng.gen_range(0..legal.len())])
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub position: Option<GameState>,
    pub terrain: Option<TerrainProblem>,
    pub options: HashMap<String, String>,
    rng: SmallRng,
}

impl Engine {
    /// Creates a new engine with no position or terrain loaded.
    pub fn new() -> Self {
        Engine {
            position: None,
            terrain: None,
            options: HashMap::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Resets all engine state for a new game.
    pub fn new_game(&mut self) {
        self.position = None;
        self.terrain = None;
    }

    /// Sets the current game position from `|`-separated layout rows.
    /// Returns an error message on failure.
    pub fn set_layout(&mut self, rows: &str) -> Result<(), String> {
        let rows: Vec<&str> = rows.split('|').collect();
        match parse_layout(&rows) {
            Ok(state) => {
                self.position = Some(state);
                Ok(())
            }
            Err(e) => Err(format!("failed to parse layout: {}", e)),
        }
    }

    /// Sets the current terrain grid from `|`-separated layout rows.
    /// Returns an error message on failure.
    pub fn set_terrain(&mut self, rows: &str) -> Result<(), String> {
        let rows: Vec<&str> = rows.split('|').collect();
        let grid = parse_terrain(&rows).map_err(|e| format!("failed to parse terrain: {}", e))?;
        match TerrainProblem::new(grid) {
            Some(problem) => {
                self.terrain = Some(problem);
                Ok(())
            }
            None => Err("terrain layout lacks start or goal".to_string()),
        }
    }

    /// Loads a scenario file: applies its layout and any search defaults.
    /// Returns an error message on failure.
    pub fn load_scenario(&mut self, path: &str) -> Result<(), String> {
        let scenario = load_scenario(Path::new(path))
            .map_err(|e| format!("failed to load scenario: {}", e))?;
        let state = scenario
            .game_state()
            .map_err(|e| format!("failed to parse scenario layout: {}", e))?;
        self.position = Some(state);
        if let Some(depth) = scenario.depth {
            self.options.insert("Depth".to_string(), depth.to_string());
        }
        if let Some(mode) = scenario.mode {
            self.options.insert("Mode".to_string(), mode);
        }
        Ok(())
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        match value {
            Some(v) => {
                self.options.insert(name, v);
            }
            None => {
                self.options.insert(name, String::new());
            }
        }
    }

    /// Returns the configured search depth from options, or the default.
    fn depth(&self) -> u32 {
        self.options
            .get("Depth")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_DEPTH)
    }

    /// Returns the configured mode name from options (default alphabeta).
    fn mode(&self) -> String {
        self.options
            .get("Mode")
            .cloned()
            .unwrap_or_else(|| "alphabeta".to_string())
    }

    /// Returns the configured evaluator: the raw game score by default,
    /// the hand-tuned feature evaluator when `Evaluator` is `tuned`.
    fn evaluator(&self) -> fn(&GameState) -> f64 {
        match self.options.get("Evaluator").map(String::as_str) {
            Some("tuned") => evaluate,
            _ => score_evaluation,
        }
    }

    /// Handles the GPI handshake: writes id, options, protocol_version,
    /// and gpiok.
    pub fn handle_gpi<W: Write>(&self, out: &mut W) {
        writeln!(out, "id name gridlock").unwrap();
        writeln!(out, "id author gridlock").unwrap();
        writeln!(out, "option name Depth type spin default 2 min 1 max 8").unwrap();
        writeln!(
            out,
            "option name Mode type combo default alphabeta var reflex var minimax var alphabeta var expectimax"
        )
        .unwrap();
        writeln!(
            out,
            "option name Evaluator type combo default score var score var tuned"
        )
        .unwrap();
        writeln!(out, "protocol_version 1").unwrap();
        writeln!(out, "gpiok").unwrap();
        out.flush().unwrap();
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) {
        writeln!(out, "readyok").unwrap();
        out.flush().unwrap();
    }

    /// Handles the `plan` command: routes on the loaded terrain grid when
    /// one is set, otherwise from the player to the nearest pellet of the
    /// game position.
    pub fn handle_plan<W: Write>(&self, algorithm: Algorithm, out: &mut W) {
        let outcome = if let Some(problem) = &self.terrain {
            Some(run_terrain_plan(problem, algorithm))
        } else if let Some(state) = &self.position {
            match nearest_pellet(state) {
                Some(goal) => {
                    let problem =
                        PositionProblem::new(state.maze().clone(), state.player(), goal);
                    Some(run_position_plan(&problem, algorithm))
                }
                None => None,
            }
        } else {
            eprintln!("plan: no position or terrain set");
            return;
        };

        match outcome {
            Some(outcome) => {
                writeln!(
                    out,
                    "info nodes {} cost {}",
                    outcome.expanded.len(),
                    outcome.cost
                )
                .unwrap();
                writeln!(out, "plan {}", format_plan(&outcome.plan)).unwrap();
            }
            None => {
                writeln!(out, "plan -").unwrap();
            }
        }
        out.flush().unwrap();
    }

    /// Handles the `go` command: reflex scoring or game-tree search per
    /// the `Mode` option, falling back to a random legal action when the
    /// search offers nothing.
    pub fn handle_go<W: Write>(&mut self, params: &GoParams, out: &mut W) {
        let state = match &self.position {
            Some(s) => s.clone(),
            None => {
                eprintln!("go: no position set");
                return;
            }
        };

        let depth = params.depth.unwrap_or_else(|| self.depth());
        let mode = self.mode();

        let chosen = if mode == "reflex" {
            self.reflex_action(&state)
        } else {
            let search_mode = match SearchMode::from_name(&mode) {
                Some(m) => m,
                None => {
                    eprintln!("unknown mode '{}', using alphabeta", mode);
                    SearchMode::AlphaBeta
                }
            };
            match decide(&state, depth, self.evaluator(), search_mode) {
                Some(decision) => {
                    writeln!(out, "info depth {} score {}", depth, decision.value).unwrap();
                    Some(decision.action)
                }
                None => None,
            }
        };

        let chosen = chosen.or_else(|| random_action(&state, 0, &mut self.rng));

        match chosen {
            Some(action) => writeln!(out, "bestmove {}", action.gpi_char()).unwrap(),
            None => writeln!(out, "bestmove -").unwrap(),
        }
        out.flush().unwrap();
    }

    /// Scores every legal action one move ahead and picks uniformly at
    /// random among the actions tied for the best score.
    fn reflex_action(&mut self, state: &GameState) -> Option<Direction> {
        let legal = state.legal_actions(0);
        if legal.is_empty() {
            return None;
        }

        let scores: Vec<f64> = legal
            .iter()
            .map(|action| evaluate_action(state, action))
            .collect();
        let best = scores
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let best_indices: Vec<usize> = (0..legal.len())
            .filter(|&i| scores[i] == best)
            .collect();
        let pick = best_indices[self.rng.gen_range(0..best_indices.len())];
        Some(legal[pick])
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// The remaining pellet closest to the player, ties broken in row-major
/// order.
fn nearest_pellet(state: &GameState) -> Option<Pos> {
    let player = state.player();
    state
        .pellet_positions()
        .into_iter()
        .min_by_key(|&p| player.manhattan(p))
}

fn run_position_plan(
    problem: &PositionProblem,
    algorithm: Algorithm,
) -> SearchOutcome<Pos, Direction> {
    match algorithm {
        Algorithm::DepthFirst => depth_first_outcome(problem),
        Algorithm::BreadthFirst => breadth_first_outcome(problem),
        Algorithm::UniformCost => uniform_cost_outcome(problem),
        Algorithm::AStar => a_star_outcome(problem, manhattan_heuristic),
    }
}

fn run_terrain_plan(
    problem: &TerrainProblem,
    algorithm: Algorithm,
) -> SearchOutcome<Pos, Direction> {
    match algorithm {
        Algorithm::DepthFirst => depth_first_outcome(problem),
        Algorithm::BreadthFirst => breadth_first_outcome(problem),
        Algorithm::UniformCost => uniform_cost_outcome(problem),
        Algorithm::AStar => a_star_outcome(problem, terrain_heuristic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &str = "%%%%%|%.oH%|%C..%|%%%%%";
    const TERRAIN: &str = "SRH|RBP|RRG";

    #[test]
    fn new_engine_has_no_state() {
        let engine = Engine::new();
        assert!(engine.position.is_none());
        assert!(engine.terrain.is_none());
        assert!(engine.options.is_empty());
    }

    #[test]
    fn new_game_resets_state() {
        let mut engine = Engine::new();
        engine.set_layout(LAYOUT).unwrap();
        engine.set_terrain(TERRAIN).unwrap();
        engine.new_game();
        assert!(engine.position.is_none());
        assert!(engine.terrain.is_none());
    }

    #[test]
    fn set_layout_valid() {
        let mut engine = Engine::new();
        assert!(engine.set_layout(LAYOUT).is_ok());
        let state = engine.position.as_ref().unwrap();
        assert_eq!(state.pellets_remaining(), 3);
        assert_eq!(state.hunters().len(), 1);
    }

    #[test]
    fn set_layout_invalid() {
        let mut engine = Engine::new();
        assert!(engine.set_layout("garbage").is_err());
        assert!(engine.position.is_none());
    }

    #[test]
    fn set_terrain_requires_markers() {
        let mut engine = Engine::new();
        assert!(engine.set_terrain("RRR|RRR").is_err());
        assert!(engine.set_terrain(TERRAIN).is_ok());
    }

    #[test]
    fn set_option_stores_value() {
        let mut engine = Engine::new();
        engine.set_option("Depth".to_string(), Some("3".to_string()));
        assert_eq!(engine.options.get("Depth"), Some(&"3".to_string()));
        assert_eq!(engine.depth(), 3);
    }

    #[test]
    fn handle_go_outputs_bestmove() {
        let mut engine = Engine::new();
        engine.set_layout(LAYOUT).unwrap();

        let mut output = Vec::new();
        engine.handle_go(&GoParams::default(), &mut output);

        let output_str = String::from_utf8(output).unwrap();
        let bestmove_line = output_str
            .lines()
            .find(|l| l.starts_with("bestmove "))
            .expect("output should contain bestmove");
        let mv = bestmove_line.strip_prefix("bestmove ").unwrap();
        assert_eq!(mv.len(), 1);
        assert!(Direction::from_gpi_char(mv.chars().next().unwrap()).is_some());
    }

    #[test]
    fn handle_go_reports_info_for_game_tree_modes() {
        let mut engine = Engine::new();
        engine.set_layout(LAYOUT).unwrap();
        engine.set_option("Mode".to_string(), Some("minimax".to_string()));

        let mut output = Vec::new();
        engine.handle_go(&GoParams { depth: Some(1) }, &mut output);

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("info depth 1 score "));
    }

    #[test]
    fn handle_go_reflex_picks_legal_move() {
        let mut engine = Engine::new();
        engine.set_layout(LAYOUT).unwrap();
        engine.set_option("Mode".to_string(), Some("reflex".to_string()));

        let mut output = Vec::new();
        engine.handle_go(&GoParams::default(), &mut output);

        let output_str = String::from_utf8(output).unwrap();
        let mv = output_str
            .lines()
            .find(|l| l.starts_with("bestmove "))
            .unwrap()
            .strip_prefix("bestmove ")
            .unwrap()
            .chars()
            .next()
            .unwrap();
        let action = Direction::from_gpi_char(mv).unwrap();
        let state = engine.position.as_ref().unwrap();
        assert!(state.legal_actions(0).contains(&action));
    }

    #[test]
    fn handle_plan_routes_to_nearest_pellet() {
        let mut engine = Engine::new();
        engine.set_layout(LAYOUT).unwrap();

        let mut output = Vec::new();
        engine.handle_plan(Algorithm::AStar, &mut output);

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("info nodes "));
        // Nearest pellet is one step east of the player.
        assert!(output_str.contains("plan E"));
    }

    #[test]
    fn handle_plan_on_terrain_uses_the_grid() {
        let mut engine = Engine::new();
        engine.set_terrain(TERRAIN).unwrap();

        let mut output = Vec::new();
        engine.handle_plan(Algorithm::UniformCost, &mut output);

        let output_str = String::from_utf8(output).unwrap();
        let plan_line = output_str
            .lines()
            .find(|l| l.starts_with("plan "))
            .unwrap();
        // The building in the middle forces the route around an edge.
        assert_ne!(plan_line, "plan -");
    }

    #[test]
    fn handle_gpi_outputs_handshake() {
        let engine = Engine::new();
        let mut output = Vec::new();
        engine.handle_gpi(&mut output);

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("id name gridlock"));
        assert!(output_str.contains("protocol_version 1"));
        assert!(output_str.contains("gpiok"));
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = Engine::new();
        let mut output = Vec::new();
        engine.handle_isready(&mut output);

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(output_str.trim(), "readyok");
    }
}

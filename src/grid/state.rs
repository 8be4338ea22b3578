//! Pursuit game state.
//!
//! Holds the complete snapshot of a pursuit game at a given point in time:
//! the player, the hunters chasing it, remaining pellets and boosts, the
//! running score, and the win/lose flags. States are immutable from the
//! search core's point of view; `successor` produces a new value.

use std::sync::Arc;

use crate::adversarial::Game;

use super::coord::{Direction, Pos};
use super::maze::Maze;

/// Score delta for each player move.
pub const STEP_PENALTY: f64 = 1.0;
/// Score awarded for collecting a pellet.
pub const PELLET_SCORE: f64 = 10.0;
/// Score awarded for eating a dazed hunter.
pub const HUNTER_SCORE: f64 = 200.0;
/// Score awarded on collecting the final pellet.
pub const WIN_SCORE: f64 = 500.0;
/// Score deducted when a hunter catches the player.
pub const LOSE_PENALTY: f64 = 500.0;
/// Number of hunter moves a boost keeps each hunter dazed for.
pub const DAZE_MOVES: u32 = 40;

/// One hunter: its current position, its spawn cell, and the remaining
/// count of its own moves during which it is dazed (harmless).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hunter {
    pub pos: Pos,
    pub spawn: Pos,
    pub daze: u32,
}

impl Hunter {
    /// Creates a hunter at its spawn cell with no daze.
    pub fn new(spawn: Pos) -> Self {
        Hunter {
            pos: spawn,
            spawn,
            daze: 0,
        }
    }

    /// Whether contact with this hunter is currently harmless.
    pub fn is_dazed(&self) -> bool {
        self.daze > 0
    }
}

/// Complete pursuit game state.
///
/// Agent 0 is the player; agents `1..num_agents()` are the hunters in
/// declaration order. The maze is shared, not copied, between states.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    maze: Arc<Maze>,
    player: Pos,
    hunters: Vec<Hunter>,
    pellets: Vec<bool>,
    pellet_count: usize,
    boosts: Vec<Pos>,
    score: f64,
    won: bool,
    lost: bool,
}

impl GameState {
    /// Creates an initial state with score zero.
    ///
    /// Pellet positions outside the maze bounds are ignored.
    pub fn new(maze: Arc<Maze>, player: Pos, hunters: Vec<Pos>, pellets: &[Pos], boosts: Vec<Pos>) -> Self {
        let mut pellet_grid = vec![false; (maze.width() * maze.height()) as usize];
        let mut pellet_count = 0;
        for &pos in pellets {
            if maze.in_bounds(pos) {
                let idx = (pos.y * maze.width() + pos.x) as usize;
                if !pellet_grid[idx] {
                    pellet_grid[idx] = true;
                    pellet_count += 1;
                }
            }
        }
        GameState {
            maze,
            player,
            hunters: hunters.into_iter().map(Hunter::new).collect(),
            pellets: pellet_grid,
            pellet_count,
            boosts,
            score: 0.0,
            won: false,
            lost: false,
        }
    }

    /// The shared maze.
    pub fn maze(&self) -> &Arc<Maze> {
        &self.maze
    }

    /// The player's position.
    pub fn player(&self) -> Pos {
        self.player
    }

    /// The hunters, in agent order (agent index = slice index + 1).
    pub fn hunters(&self) -> &[Hunter] {
        &self.hunters
    }

    /// The running game score.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Whether a pellet remains at the given position.
    pub fn has_pellet(&self, pos: Pos) -> bool {
        self.maze.in_bounds(pos) && self.pellets[self.pellet_idx(pos)]
    }

    fn pellet_idx(&self, pos: Pos) -> usize {
        (pos.y * self.maze.width() + pos.x) as usize
    }

    /// Number of pellets still on the grid.
    pub fn pellets_remaining(&self) -> usize {
        self.pellet_count
    }

    /// Positions of all remaining pellets in row-major order.
    pub fn pellet_positions(&self) -> Vec<Pos> {
        let mut positions = Vec::with_capacity(self.pellet_count);
        for y in 0..self.maze.height() {
            for x in 0..self.maze.width() {
                let pos = Pos::new(x, y);
                if self.pellets[self.pellet_idx(pos)] {
                    positions.push(pos);
                }
            }
        }
        positions
    }

    /// Positions of the remaining boosts.
    pub fn boosts(&self) -> &[Pos] {
        &self.boosts
    }

    fn resolve_contact(&mut self) {
        for i in 0..self.hunters.len() {
            if self.hunters[i].pos != self.player {
                continue;
            }
            if self.hunters[i].is_dazed() {
                self.score += HUNTER_SCORE;
                self.hunters[i].pos = self.hunters[i].spawn;
                self.hunters[i].daze = 0;
            } else {
                self.score -= LOSE_PENALTY;
                self.lost = true;
            }
        }
    }

    fn apply_player_move(&mut self, action: Direction) {
        self.player = self.player.step(action);
        self.score -= STEP_PENALTY;

        if self.has_pellet(self.player) {
            let idx = self.pellet_idx(self.player);
            self.pellets[idx] = false;
            self.pellet_count -= 1;
            self.score += PELLET_SCORE;
            if self.pellet_count == 0 {
                self.score += WIN_SCORE;
                self.won = true;
            }
        }

        if let Some(i) = self.boosts.iter().position(|&b| b == self.player) {
            self.boosts.remove(i);
            for hunter in &mut self.hunters {
                hunter.daze = DAZE_MOVES;
            }
        }

        self.resolve_contact();
    }

    fn apply_hunter_move(&mut self, index: usize, action: Direction) {
        let hunter = &mut self.hunters[index];
        hunter.pos = hunter.pos.step(action);
        if hunter.daze > 0 {
            hunter.daze -= 1;
        }
        self.resolve_contact();
    }
}

impl Game for GameState {
    type Action = Direction;

    fn is_win(&self) -> bool {
        self.won
    }

    fn is_lose(&self) -> bool {
        self.lost
    }

    fn num_agents(&self) -> usize {
        1 + self.hunters.len()
    }

    /// Legal actions for an agent.
    ///
    /// The player may stop or move to any non-wall cell; hunters may only
    /// move. Finished games have no legal actions for anyone.
    fn legal_actions(&self, agent: usize) -> Vec<Direction> {
        if self.won || self.lost {
            return Vec::new();
        }
        let from = if agent == 0 {
            self.player
        } else {
            self.hunters[agent - 1].pos
        };
        let mut actions: Vec<Direction> = self
            .maze
            .open_neighbors(from)
            .into_iter()
            .map(|(dir, _)| dir)
            .collect();
        if agent == 0 {
            actions.push(Direction::Stop);
        }
        actions
    }

    fn successor(&self, agent: usize, action: &Direction) -> GameState {
        let mut next = self.clone();
        if agent == 0 {
            next.apply_player_move(*action);
        } else {
            next.apply_hunter_move(agent - 1, *action);
        }
        next
    }
}

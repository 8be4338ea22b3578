//! Position search: reach a goal cell in a maze.

use std::sync::Arc;

use crate::grid::{Direction, Maze, Pos};

use super::{SearchProblem, Successor, WalkError};

/// Find a shortest walk from a start cell to a goal cell, with unit step
/// costs and 4-directional movement.
#[derive(Debug, Clone)]
pub struct PositionProblem {
    maze: Arc<Maze>,
    start: Pos,
    goal: Pos,
}

impl PositionProblem {
    /// Creates a position problem over a shared maze.
    pub fn new(maze: Arc<Maze>, start: Pos, goal: Pos) -> Self {
        PositionProblem { maze, start, goal }
    }

    /// The goal cell, used by distance heuristics.
    pub fn goal(&self) -> Pos {
        self.goal
    }
}

impl SearchProblem for PositionProblem {
    type State = Pos;
    type Action = Direction;

    fn start_state(&self) -> Pos {
        self.start
    }

    fn is_goal(&self, state: &Pos) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &Pos) -> Vec<Successor<Pos, Direction>> {
        self.maze
            .open_neighbors(*state)
            .into_iter()
            .map(|(action, next)| Successor {
                state: next,
                action,
                cost: 1.0,
            })
            .collect()
    }

    fn cost_of_actions(&self, actions: &[Direction]) -> Result<f64, WalkError> {
        let mut pos = self.start;
        let mut cost = 0.0;
        for (step, &action) in actions.iter().enumerate() {
            if action == Direction::Stop {
                return Err(WalkError::IllegalAction { step });
            }
            let next = pos.step(action);
            if self.maze.is_wall(next) {
                return Err(WalkError::IllegalAction { step });
            }
            pos = next;
            cost += 1.0;
        }
        Ok(cost)
    }
}

//! Weighted terrain search: reach the goal cell of a terrain grid.
//!
//! The cost of a step is the cost of the cell being entered, so routes
//! trade distance against terrain: a detour over hills can beat a direct
//! line over pavement. Impassable cells are simply never offered as
//! successors.

use crate::grid::{Direction, Pos, TerrainGrid};

use super::{SearchProblem, Successor, WalkError};

/// Find a cheapest walk from the start marker to the goal marker of a
/// terrain grid.
#[derive(Debug, Clone)]
pub struct TerrainProblem {
    grid: TerrainGrid,
    start: Pos,
    goal: Pos,
}

impl TerrainProblem {
    /// Creates a terrain problem from a grid carrying start and goal
    /// markers. Returns `None` when either marker is missing.
    pub fn new(grid: TerrainGrid) -> Option<Self> {
        let start = grid.start()?;
        let goal = grid.goal()?;
        Some(TerrainProblem { grid, start, goal })
    }

    /// The underlying terrain grid.
    pub fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    /// The goal cell, used by distance heuristics.
    pub fn goal(&self) -> Pos {
        self.goal
    }
}

impl SearchProblem for TerrainProblem {
    type State = Pos;
    type Action = Direction;

    fn start_state(&self) -> Pos {
        self.start
    }

    fn is_goal(&self, state: &Pos) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &Pos) -> Vec<Successor<Pos, Direction>> {
        self.grid
            .passable_neighbors(*state)
            .into_iter()
            .map(|(action, next, cost)| Successor {
                state: next,
                action,
                cost,
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
            let terrain = self.grid.get(next);
            if !self.grid.in_bounds(next) || !terrain.is_passable() {
                return Err(WalkError::IllegalAction { step });
            }
            pos = next;
            cost += terrain.step_cost();
        }
        Ok(cost)
    }
}

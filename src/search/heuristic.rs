//! Remaining-cost heuristics for informed search.
//!
//! A heuristic estimates the cost from a state to the nearest goal. A*
//! returns a cheapest plan only for admissible heuristics (ones that never
//! overestimate); everything here is admissible for its problem.

use crate::grid::Pos;
use crate::problem::{PositionProblem, SearchProblem, TerrainProblem};

/// The trivial heuristic: always zero. A* with this heuristic is exactly
/// uniform-cost search.
pub fn null_heuristic<P: SearchProblem>(_state: &P::State, _problem: &P) -> f64 {
    0.0
}

/// Manhattan distance to the goal cell. Admissible for unit-cost
/// 4-directional movement.
pub fn manhattan_heuristic(state: &Pos, problem: &PositionProblem) -> f64 {
    state.manhattan(problem.goal()) as f64
}

/// Straight-line distance to the goal cell. Admissible, and never tighter
/// than Manhattan on a 4-connected grid.
pub fn euclidean_heuristic(state: &Pos, problem: &PositionProblem) -> f64 {
    state.euclidean(problem.goal())
}

/// Manhattan distance scaled by the cheapest terrain step cost (the 0.5 of
/// a hill), so the estimate stays admissible on weighted terrain.
pub fn terrain_heuristic(state: &Pos, problem: &TerrainProblem) -> f64 {
    state.manhattan(problem.goal()) as f64 * 0.5
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::grid::{Maze, Terrain, TerrainGrid};

    fn position_problem() -> PositionProblem {
        PositionProblem::new(Arc::new(Maze::new(5, 5)), Pos::new(0, 0), Pos::new(4, 4))
    }

    #[test]
    fn null_is_zero_everywhere() {
        let problem = position_problem();
        assert_eq!(null_heuristic(&Pos::new(0, 0), &problem), 0.0);
        assert_eq!(null_heuristic(&Pos::new(4, 4), &problem), 0.0);
    }

    #[test]
    fn manhattan_at_goal_is_zero() {
        let problem = position_problem();
        assert_eq!(manhattan_heuristic(&Pos::new(4, 4), &problem), 0.0);
        assert_eq!(manhattan_heuristic(&Pos::new(0, 0), &problem), 8.0);
    }

    #[test]
    fn euclidean_never_exceeds_manhattan() {
        let problem = position_problem();
        for x in 0..5 {
            for y in 0..5 {
                let pos = Pos::new(x, y);
                assert!(
                    euclidean_heuristic(&pos, &problem)
                        <= manhattan_heuristic(&pos, &problem)
                );
            }
        }
    }

    #[test]
    fn terrain_heuristic_is_half_manhattan() {
        let mut grid = TerrainGrid::new(4, 1);
        grid.set(Pos::new(0, 0), Terrain::Start);
        grid.set(Pos::new(3, 0), Terrain::Goal);
        let problem = TerrainProblem::new(grid).unwrap();
        assert_eq!(terrain_heuristic(&Pos::new(0, 0), &problem), 1.5);
        assert_eq!(terrain_heuristic(&Pos::new(3, 0), &problem), 0.0);
    }
}

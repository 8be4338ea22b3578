//! Single-agent search.
//!
//! Plans action sequences through an abstract state space, with the
//! exploration order chosen by the frontier container and an optional
//! heuristic estimate of remaining cost.

pub mod frontier;
pub mod heuristic;
pub mod plan;

pub use frontier::{Frontier, PriorityQueue, Queue, Stack};
pub use heuristic::{
    euclidean_heuristic, manhattan_heuristic, null_heuristic, terrain_heuristic,
};
pub use plan::{
    a_star_outcome, a_star_search, breadth_first_outcome, breadth_first_search,
    depth_first_outcome, depth_first_search, uniform_cost_outcome, uniform_cost_search,
    Algorithm, SearchOutcome,
};

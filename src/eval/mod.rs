//! Game-state evaluation.
//!
//! Scores a pursuit game state from the player's perspective, considering
//! the running score, pellet and boost distances, and hunter proximity.

pub(crate) mod heuristic;

pub use heuristic::{evaluate, evaluate_action, score_evaluation};

//! Grid-world representation.
//!
//! Contains the core data structures for positions, directions, mazes,
//! weighted terrain, and the pursuit game state.

pub mod coord;
pub mod maze;
pub mod state;
pub mod terrain;

pub use coord::{format_plan, Direction, Pos, CARDINALS};
pub use maze::Maze;
pub use state::{
    GameState, Hunter, DAZE_MOVES, HUNTER_SCORE, LOSE_PENALTY, PELLET_SCORE, STEP_PENALTY,
    WIN_SCORE,
};
pub use terrain::{Terrain, TerrainGrid};

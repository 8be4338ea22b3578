//! GPI protocol handling.
//!
//! This module implements parsing and serialization for the GPI (Grid
//! Pursuit Interface) protocol: ASCII layout encoding for positions and
//! terrain, JSON scenario files, and the command parser for the main loop.

pub mod layout;
pub mod parser;
pub mod scenario;

pub use layout::{format_layout, parse_layout, parse_terrain, LayoutError};
pub use parser::{parse_command, Command, GoParams};
pub use scenario::{load_scenario, Scenario, ScenarioError};

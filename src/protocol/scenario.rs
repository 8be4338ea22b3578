//! Scenario files.
//!
//! A scenario is a JSON document bundling a named layout with optional
//! search defaults, so a whole test position loads with one command:
//!
//! ```json
//! {
//!   "name": "corner chase",
//!   "layout": ["%%%%%", "%.oH%", "%C..%", "%%%%%"],
//!   "depth": 2,
//!   "mode": "alphabeta"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::grid::GameState;

use super::layout::{parse_layout, LayoutError};

/// A scenario document parsed from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub layout: Vec<String>,
    #[serde(default)]
    pub depth: Option<u32>,
    #[serde(default)]
    pub mode: Option<String>,
}

/// Errors that can occur while loading a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid scenario layout: {0}")]
    Layout(#[from] LayoutError),
}

/// Loads and parses a scenario file.
pub fn load_scenario(path: &Path) -> Result<Scenario, ScenarioError> {
    let text = fs::read_to_string(path)?;
    let scenario: Scenario = serde_json::from_str(&text)?;
    Ok(scenario)
}

impl Scenario {
    /// Builds the initial game state described by the scenario's layout.
    pub fn game_state(&self) -> Result<GameState, LayoutError> {
        let rows: Vec<&str> = self.layout.iter().map(String::as_str).collect();
        parse_layout(&rows)
    }
}

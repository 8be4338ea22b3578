//! ASCII layout encoding and decoding.
//!
//! A game layout is a rectangular block of characters, one per cell:
//! `%` wall, `.` pellet, `o` boost, `C` player, `H` hunter, space empty.
//! A terrain layout uses the terrain abbreviations (`S`, `G`, `R`, `H`,
//! `P`, `B`, `W`) instead. Row 0 of the text is the top of the grid, so
//! rows are mirrored into the northward y axis.

use std::sync::Arc;

use thiserror::Error;

use crate::grid::{GameState, Maze, Pos, Terrain, TerrainGrid};

/// Errors that can occur while parsing a layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unknown layout character '{0}'")]
    UnknownChar(char),

    #[error("layout has no player cell")]
    MissingPlayer,

    #[error("layout has more than one player cell")]
    DuplicatePlayer,

    #[error("terrain layout has no start cell")]
    MissingStart,

    #[error("terrain layout has more than one start cell")]
    DuplicateStart,

    #[error("terrain layout has no goal cell")]
    MissingGoal,

    #[error("terrain layout has more than one goal cell")]
    DuplicateGoal,
}

fn check_shape(rows: &[&str]) -> Result<(i32, i32), LayoutError> {
    if rows.is_empty() || rows[0].is_empty() {
        return Err(LayoutError::Empty);
    }
    let width = rows[0].chars().count();
    for (row, text) in rows.iter().enumerate() {
        let found = text.chars().count();
        if found != width {
            return Err(LayoutError::RaggedRow {
                row,
                found,
                expected: width,
            });
        }
    }
    Ok((width as i32, rows.len() as i32))
}

/// Parses a game layout into an initial [`GameState`].
///
/// Hunters become agents in reading order (top-left to bottom-right), so
/// the same layout always produces the same agent numbering.
pub fn parse_layout(rows: &[&str]) -> Result<GameState, LayoutError> {
    let (width, height) = check_shape(rows)?;

    let mut maze = Maze::new(width, height);
    let mut player: Option<Pos> = None;
    let mut hunters: Vec<Pos> = Vec::new();
    let mut pellets: Vec<Pos> = Vec::new();
    let mut boosts: Vec<Pos> = Vec::new();

    for (row, text) in rows.iter().enumerate() {
        let y = height - 1 - row as i32;
        for (col, c) in text.chars().enumerate() {
            let pos = Pos::new(col as i32, y);
            match c {
                '%' => maze.set_wall(pos, true),
                '.' => pellets.push(pos),
                'o' => boosts.push(pos),
                'C' => {
                    if player.replace(pos).is_some() {
                        return Err(LayoutError::DuplicatePlayer);
                    }
                }
                'H' => hunters.push(pos),
                ' ' => {}
                other => return Err(LayoutError::UnknownChar(other)),
            }
        }
    }

    let player = player.ok_or(LayoutError::MissingPlayer)?;
    Ok(GameState::new(
        Arc::new(maze),
        player,
        hunters,
        &pellets,
        boosts,
    ))
}

/// Parses a terrain layout into a [`TerrainGrid`] with exactly one start
/// and one goal marker.
pub fn parse_terrain(rows: &[&str]) -> Result<TerrainGrid, LayoutError> {
    let (width, height) = check_shape(rows)?;

    let mut grid = TerrainGrid::new(width, height);
    let mut saw_start = false;
    let mut saw_goal = false;

    for (row, text) in rows.iter().enumerate() {
        let y = height - 1 - row as i32;
        for (col, c) in text.chars().enumerate() {
            let terrain = Terrain::from_layout_char(c).ok_or(LayoutError::UnknownChar(c))?;
            match terrain {
                Terrain::Start => {
                    if saw_start {
                        return Err(LayoutError::DuplicateStart);
                    }
                    saw_start = true;
                }
                Terrain::Goal => {
                    if saw_goal {
                        return Err(LayoutError::DuplicateGoal);
                    }
                    saw_goal = true;
                }
                _ => {}
            }
            grid.set(Pos::new(col as i32, y), terrain);
        }
    }

    if !saw_start {
        return Err(LayoutError::MissingStart);
    }
    if !saw_goal {
        return Err(LayoutError::MissingGoal);
    }
    Ok(grid)
}

/// Formats a game state back into layout text, one row per line.
///
/// The player wins over a pellet or boost sharing its cell; hunters win
/// over everything. Round-trips cleanly for freshly parsed layouts, where
/// nothing overlaps yet.
pub fn format_layout(state: &GameState) -> String {
    let maze = state.maze();
    let mut out = String::new();
    for row in 0..maze.height() {
        let y = maze.height() - 1 - row;
        for x in 0..maze.width() {
            let pos = Pos::new(x, y);
            let c = if state.hunters().iter().any(|h| h.pos == pos) {
                'H'
            } else if state.player() == pos {
                'C'
            } else if maze.is_wall(pos) {
                '%'
            } else if state.has_pellet(pos) {
                '.'
            } else if state.boosts().contains(&pos) {
                'o'
            } else {
                ' '
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

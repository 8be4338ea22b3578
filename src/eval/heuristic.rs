//! Hand-tuned evaluation of pursuit game states.
//!
//! Combines handcrafted features of a state into one number, higher being
//! better for the player. The weights are hand-picked, not fitted, and
//! carry no optimality guarantee.

use crate::adversarial::Game;
use crate::grid::{Direction, GameState, Pos};

/// Distance to the nearest remaining pellet, if any.
#[inline]
fn nearest_pellet_dist(pos: Pos, state: &GameState) -> Option<i32> {
    state
        .pellet_positions()
        .iter()
        .map(|&p| pos.manhattan(p))
        .min()
}

/// Distance to the nearest remaining boost, if any.
#[inline]
fn nearest_boost_dist(pos: Pos, state: &GameState) -> Option<i32> {
    state.boosts().iter().map(|&b| pos.manhattan(b)).min()
}

/// Whether an active (non-dazed) hunter is on or next to the position.
#[inline]
fn active_hunter_adjacent(pos: Pos, state: &GameState) -> bool {
    state
        .hunters()
        .iter()
        .any(|h| !h.is_dazed() && pos.manhattan(h.pos) <= 1)
}

/// The game score itself, with nothing added.
///
/// The default evaluator for adversarial search: it makes the search
/// optimize exactly what the game scores.
pub fn score_evaluation(state: &GameState) -> f64 {
    state.score()
}

/// Evaluates a game state for the player.
///
/// Components:
/// - Running game score as the baseline
/// - Pull toward the nearest pellet
/// - Pull toward dazed hunters (they are worth eating), push away from
///   active ones
/// - Pull toward the nearest boost
/// - Penalty per remaining pellet and boost, so clearing the grid
///   dominates loitering near it
///
/// An active hunter on or next to the player is an immediate, unavoidable
/// loss and short-circuits to negative infinity; every other state gets a
/// finite score.
pub fn evaluate(state: &GameState) -> f64 {
    let player = state.player();

    if active_hunter_adjacent(player, state) {
        return f64::NEG_INFINITY;
    }

    let mut value = state.score();

    if let Some(dist) = nearest_pellet_dist(player, state) {
        value -= 1.5 * dist as f64;
    }

    for hunter in state.hunters() {
        let dist = player.manhattan(hunter.pos);
        if hunter.is_dazed() {
            if dist > 0 {
                value += 200.0 / dist as f64;
            }
        } else {
            value -= 2.0 / dist as f64;
        }
    }

    if let Some(dist) = nearest_boost_dist(player, state) {
        value -= 2.0 * dist as f64;
    }

    value -= 10.0 * state.pellets_remaining() as f64;
    value -= 20.0 * state.boosts().len() as f64;

    value
}

/// Scores taking one action from a state, for reflex play.
///
/// Looks a single move ahead: the successor's score, plus a pull toward
/// food and a push away from active hunters. Distances of zero are
/// clamped to one so the reciprocal terms stay finite.
pub fn evaluate_action(state: &GameState, action: &Direction) -> f64 {
    let successor = state.successor(0, action);
    let pos = successor.player();

    let food_dist = nearest_pellet_dist(pos, &successor).unwrap_or(1).max(1);

    let hunter_dist = successor
        .hunters()
        .iter()
        .map(|h| pos.manhattan(h.pos))
        .min();
    let any_dazed = successor.hunters().iter().any(|h| h.is_dazed());

    let hunter_score = match hunter_dist {
        Some(dist) if dist <= 1 && !any_dazed => return f64::NEG_INFINITY,
        Some(dist) => 1.0 / dist.max(1) as f64,
        None => 0.0,
    };

    successor.score() + 1.0 / food_dist as f64 + hunter_score
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adversarial::Game;
    use crate::grid::{Direction, GameState, Maze, DAZE_MOVES};

    fn state(hunters: Vec<Pos>, pellets: &[Pos], boosts: Vec<Pos>) -> GameState {
        GameState::new(Arc::new(Maze::new(7, 7)), Pos::new(0, 0), hunters, pellets, boosts)
    }

    #[test]
    fn score_evaluation_is_the_raw_score() {
        let s = state(vec![], &[Pos::new(3, 3)], vec![]);
        assert_eq!(score_evaluation(&s), s.score());
        let moved = s.successor(0, &Direction::East);
        assert_eq!(score_evaluation(&moved), moved.score());
    }

    #[test]
    fn adjacent_active_hunter_is_negative_infinity() {
        let s = state(vec![Pos::new(1, 0)], &[Pos::new(5, 5)], vec![]);
        assert_eq!(evaluate(&s), f64::NEG_INFINITY);
    }

    #[test]
    fn distant_hunter_keeps_value_finite() {
        let s = state(vec![Pos::new(6, 6)], &[Pos::new(5, 5)], vec![]);
        assert!(evaluate(&s).is_finite());
    }

    #[test]
    fn closer_pellets_score_higher() {
        let near = state(vec![], &[Pos::new(1, 0), Pos::new(5, 5)], vec![]);
        let far = state(vec![], &[Pos::new(4, 0), Pos::new(5, 5)], vec![]);
        assert!(evaluate(&near) > evaluate(&far));
    }

    #[test]
    fn fewer_pellets_score_higher() {
        let two = state(vec![], &[Pos::new(3, 0), Pos::new(3, 1)], vec![]);
        let three = state(
            vec![],
            &[Pos::new(3, 0), Pos::new(3, 1), Pos::new(3, 2)],
            vec![],
        );
        assert!(evaluate(&two) > evaluate(&three));
    }

    #[test]
    fn dazed_hunters_attract() {
        let s = state(
            vec![Pos::new(3, 0)],
            &[Pos::new(6, 6)],
            vec![Pos::new(1, 0)],
        );
        let dazed = s.successor(0, &Direction::East);
        assert_eq!(dazed.hunters()[0].daze, DAZE_MOVES);
        // Same geometry, but the hunter being dazed flips it from a
        // threat into a target.
        let plain = state(vec![Pos::new(3, 0)], &[Pos::new(6, 6)], vec![])
            .successor(0, &Direction::East);
        assert!(evaluate(&dazed) > evaluate(&plain));
    }

    #[test]
    fn action_beside_active_hunter_is_negative_infinity() {
        let s = state(vec![Pos::new(2, 0)], &[Pos::new(5, 5)], vec![]);
        assert_eq!(
            evaluate_action(&s, &Direction::East),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn action_toward_food_beats_action_away() {
        let s = state(vec![], &[Pos::new(3, 0)], vec![]);
        let toward = evaluate_action(&s, &Direction::East);
        let away = evaluate_action(&s, &Direction::North);
        assert!(toward > away);
    }
}

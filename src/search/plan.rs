//! Single-agent path planning.
//!
//! All four algorithms are instances of one frontier-driven loop: pop a
//! node, test it against the goal, expand its successors, repeat until the
//! frontier runs dry. Depth-first and breadth-first share an explored-set
//! core and differ only in their container; uniform-cost and A* share a
//! cost-table relaxation core and differ only in their heuristic.

use std::collections::{HashMap, HashSet};

use crate::problem::SearchProblem;

use super::frontier::{Frontier, PriorityQueue, Queue, Stack};
use super::heuristic::null_heuristic;

/// Which planning algorithm to run, for callers that pick one by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    DepthFirst,
    BreadthFirst,
    UniformCost,
    AStar,
}

impl Algorithm {
    /// The lowercase GPI protocol name.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::DepthFirst => "dfs",
            Algorithm::BreadthFirst => "bfs",
            Algorithm::UniformCost => "ucs",
            Algorithm::AStar => "astar",
        }
    }

    /// Parses an algorithm from its GPI protocol name.
    pub fn from_name(name: &str) -> Option<Algorithm> {
        match name {
            "dfs" => Some(Algorithm::DepthFirst),
            "bfs" => Some(Algorithm::BreadthFirst),
            "ucs" => Some(Algorithm::UniformCost),
            "astar" => Some(Algorithm::AStar),
            _ => None,
        }
    }
}

/// Result of a planning run: the plan, its accumulated cost, and the
/// states expanded in order.
///
/// An empty plan with infinite cost means no goal was reachable; an empty
/// plan with zero cost means the start state was already a goal.
#[derive(Debug, Clone)]
pub struct SearchOutcome<S, A> {
    pub plan: Vec<A>,
    pub cost: f64,
    pub expanded: Vec<S>,
}

/// A frontier entry: a state together with the walk that reached it and
/// that walk's accumulated cost.
struct Node<S, A> {
    state: S,
    plan: Vec<A>,
    g: f64,
}

/// Searches the deepest discovered states first.
pub fn depth_first_search<P: SearchProblem>(problem: &P) -> Vec<P::Action> {
    depth_first_outcome(problem).plan
}

/// Depth-first search, returning the full outcome.
pub fn depth_first_outcome<P: SearchProblem>(problem: &P) -> SearchOutcome<P::State, P::Action> {
    explored_search(problem, Stack::new(), false)
}

/// Searches the shallowest discovered states first.
pub fn breadth_first_search<P: SearchProblem>(problem: &P) -> Vec<P::Action> {
    breadth_first_outcome(problem).plan
}

/// Breadth-first search, returning the full outcome.
pub fn breadth_first_outcome<P: SearchProblem>(problem: &P) -> SearchOutcome<P::State, P::Action> {
    explored_search(problem, Queue::new(), true)
}

/// Searches the cheapest discovered states first.
pub fn uniform_cost_search<P: SearchProblem>(problem: &P) -> Vec<P::Action> {
    uniform_cost_outcome(problem).plan
}

/// Uniform-cost search, returning the full outcome.
///
/// Implemented as A* with the zero heuristic, so the two cannot drift
/// apart in cost accounting or expansion order.
pub fn uniform_cost_outcome<P: SearchProblem>(problem: &P) -> SearchOutcome<P::State, P::Action> {
    relaxation_search(problem, null_heuristic::<P>)
}

/// Searches by accumulated cost plus a heuristic estimate of the cost
/// still to go.
///
/// The returned plan is cheapest only when the heuristic never
/// overestimates the true remaining cost; an inadmissible heuristic is
/// not detected, it just degrades the answer.
pub fn a_star_search<P, H>(problem: &P, heuristic: H) -> Vec<P::Action>
where
    P: SearchProblem,
    H: Fn(&P::State, &P) -> f64,
{
    a_star_outcome(problem, heuristic).plan
}

/// A* search, returning the full outcome.
pub fn a_star_outcome<P, H>(problem: &P, heuristic: H) -> SearchOutcome<P::State, P::Action>
where
    P: SearchProblem,
    H: Fn(&P::State, &P) -> f64,
{
    relaxation_search(problem, heuristic)
}

/// Generic frontier + explored-set loop used by depth-first and
/// breadth-first search.
///
/// States are marked explored when expanded, not when enqueued. With
/// `skip_queued` set, a state already sitting in the frontier is not
/// enqueued a second time (the breadth-first discipline; without it a
/// queue frontier blows up exponentially on grids).
fn explored_search<P, F>(
    problem: &P,
    mut frontier: F,
    skip_queued: bool,
) -> SearchOutcome<P::State, P::Action>
where
    P: SearchProblem,
    F: Frontier<Node<P::State, P::Action>>,
{
    let start = problem.start_state();
    let mut queued: HashSet<P::State> = HashSet::new();
    if skip_queued {
        queued.insert(start.clone());
    }
    frontier.push(Node {
        state: start,
        plan: Vec::new(),
        g: 0.0,
    });

    let mut explored: HashSet<P::State> = HashSet::new();
    let mut expanded: Vec<P::State> = Vec::new();

    while let Some(node) = frontier.pop() {
        if problem.is_goal(&node.state) {
            return SearchOutcome {
                plan: node.plan,
                cost: node.g,
                expanded,
            };
        }

        if explored.contains(&node.state) {
            continue;
        }
        explored.insert(node.state.clone());
        expanded.push(node.state.clone());

        let mut batch = Vec::new();
        for succ in problem.successors(&node.state) {
            if explored.contains(&succ.state) {
                continue;
            }
            if skip_queued && !queued.insert(succ.state.clone()) {
                continue;
            }
            let mut plan = node.plan.clone();
            plan.push(succ.action);
            batch.push(Node {
                state: succ.state,
                plan,
                g: node.g + succ.cost,
            });
        }
        // Sibling batches keep enumeration order under both containers,
        // so depth-first dives into the first-listed successor.
        frontier.push_siblings(batch);
    }

    SearchOutcome {
        plan: Vec::new(),
        cost: f64::INFINITY,
        expanded,
    }
}

/// Generic cost-table relaxation loop used by uniform-cost and A* search.
///
/// The cost table replaces the explored set: a state is re-queued whenever
/// a cheaper walk to it is found (lazy re-insertion; queued priorities are
/// never decreased in place). A popped entry whose recorded cost has been
/// beaten since it was queued is stale and skipped without expansion.
fn relaxation_search<P, H>(problem: &P, heuristic: H) -> SearchOutcome<P::State, P::Action>
where
    P: SearchProblem,
    H: Fn(&P::State, &P) -> f64,
{
    let start = problem.start_state();
    let mut frontier: PriorityQueue<Node<P::State, P::Action>> = PriorityQueue::new();
    let h0 = heuristic(&start, problem);
    let mut best_cost: HashMap<P::State, f64> = HashMap::new();
    best_cost.insert(start.clone(), 0.0);
    frontier.push(
        Node {
            state: start,
            plan: Vec::new(),
            g: 0.0,
        },
        h0,
    );

    let mut expanded: Vec<P::State> = Vec::new();

    while let Some(node) = frontier.pop() {
        if problem.is_goal(&node.state) {
            return SearchOutcome {
                plan: node.plan,
                cost: node.g,
                expanded,
            };
        }

        // Stale entry: a cheaper walk to this state was queued after this one.
        if let Some(&best) = best_cost.get(&node.state) {
            if node.g > best {
                continue;
            }
        }
        expanded.push(node.state.clone());

        for succ in problem.successors(&node.state) {
            let g = node.g + succ.cost;
            let improves = match best_cost.get(&succ.state) {
                None => true,
                Some(&known) => g < known,
            };
            if improves {
                best_cost.insert(succ.state.clone(), g);
                let priority = g + heuristic(&succ.state, problem);
                let mut plan = node.plan.clone();
                plan.push(succ.action);
                frontier.push(
                    Node {
                        state: succ.state,
                        plan,
                        g,
                    },
                    priority,
                );
            }
        }
    }

    SearchOutcome {
        plan: Vec::new(),
        cost: f64::INFINITY,
        expanded,
    }
}

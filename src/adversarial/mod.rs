//! Adversarial game-tree search.
//!
//! Explores a turn-structured multi-agent game to a fixed ply depth and
//! backs leaf evaluations up the tree: minimax assumes every opponent
//! plays its worst case, alpha-beta computes the same values while
//! skipping provably irrelevant subtrees, and expectimax models opponents
//! as uniformly random.
//!
//! Depth is measured in plies: one ply is a full round in which every
//! agent has moved once, so the counter increments only when control
//! returns to agent 0.

/// A turn-structured multi-agent game state.
///
/// Agent 0 is the sole maximizer; agents `1..num_agents()` are its
/// opponents. Successor generation must be deterministic for a given
/// `(agent, action)` pair, and a finished game must report no legal
/// actions for any agent.
pub trait Game: Sized {
    type Action: Clone;

    /// Whether the game is over in agent 0's favor.
    fn is_win(&self) -> bool;

    /// Whether the game is over against agent 0.
    fn is_lose(&self) -> bool;

    /// Total number of agents, the maximizer included.
    fn num_agents(&self) -> usize;

    /// The legal actions for an agent, in a fixed enumeration order.
    fn legal_actions(&self, agent: usize) -> Vec<Self::Action>;

    /// The state after an agent takes an action.
    fn successor(&self, agent: usize, action: &Self::Action) -> Self;
}

/// Which backup rule the game-tree search applies at opponent nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Minimax,
    AlphaBeta,
    Expectimax,
}

impl SearchMode {
    /// The lowercase GPI option value.
    pub const fn name(self) -> &'static str {
        match self {
            SearchMode::Minimax => "minimax",
            SearchMode::AlphaBeta => "alphabeta",
            SearchMode::Expectimax => "expectimax",
        }
    }

    /// Parses a mode from its GPI option value.
    pub fn from_name(name: &str) -> Option<SearchMode> {
        match name {
            "minimax" => Some(SearchMode::Minimax),
            "alphabeta" => Some(SearchMode::AlphaBeta),
            "expectimax" => Some(SearchMode::Expectimax),
            _ => None,
        }
    }
}

/// A chosen root action together with its backed-up value.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<A> {
    pub action: A,
    pub value: f64,
}

/// Picks the best action for agent 0, or `None` when agent 0 has no legal
/// action.
///
/// Ties between equally good actions break to the one enumerated first,
/// so repeated calls on the same state choose the same action.
pub fn choose_action<G, E>(
    state: &G,
    depth_limit: u32,
    evaluate: E,
    mode: SearchMode,
) -> Option<G::Action>
where
    G: Game,
    E: Fn(&G) -> f64,
{
    decide(state, depth_limit, evaluate, mode).map(|d| d.action)
}

/// Like [`choose_action`], but also reports the root value backed up for
/// the chosen action.
pub fn decide<G, E>(
    state: &G,
    depth_limit: u32,
    evaluate: E,
    mode: SearchMode,
) -> Option<Decision<G::Action>>
where
    G: Game,
    E: Fn(&G) -> f64,
{
    let actions = state.legal_actions(0);
    if actions.is_empty() {
        return None;
    }

    let num_agents = state.num_agents();
    let next_agent = 1 % num_agents;
    let root_depth = if next_agent == 0 { 1 } else { 0 };

    let mut best: Option<Decision<G::Action>> = None;
    // Alpha threads through the root loop exactly like a maximizer node;
    // beta stays unbounded so the root itself never cuts off.
    let mut alpha = f64::NEG_INFINITY;

    for action in actions {
        let child = state.successor(0, &action);
        let value = match mode {
            SearchMode::Minimax => {
                minimax_value(&child, root_depth, next_agent, depth_limit, &evaluate)
            }
            SearchMode::AlphaBeta => alphabeta_value(
                &child,
                root_depth,
                next_agent,
                alpha,
                f64::INFINITY,
                depth_limit,
                &evaluate,
            ),
            SearchMode::Expectimax => {
                expectimax_value(&child, root_depth, next_agent, depth_limit, &evaluate)
            }
        };
        let replaces = match &best {
            Some(current) => value > current.value,
            None => true,
        };
        if replaces {
            best = Some(Decision { action, value });
        }
        if value > alpha {
            alpha = value;
        }
    }

    best
}

/// Whether a node is terminal for the search: the game ended or the ply
/// limit was reached.
fn cutoff<G: Game>(state: &G, depth: u32, limit: u32) -> bool {
    state.is_win() || state.is_lose() || depth == limit
}

/// Exact minimax value of a node.
fn minimax_value<G, E>(state: &G, depth: u32, agent: usize, limit: u32, evaluate: &E) -> f64
where
    G: Game,
    E: Fn(&G) -> f64,
{
    if cutoff(state, depth, limit) {
        return evaluate(state);
    }
    let actions = state.legal_actions(agent);
    if actions.is_empty() {
        return evaluate(state);
    }

    let next_agent = (agent + 1) % state.num_agents();
    let next_depth = if next_agent == 0 { depth + 1 } else { depth };

    if agent == 0 {
        let mut value = f64::NEG_INFINITY;
        for action in &actions {
            let child = state.successor(agent, action);
            value = value.max(minimax_value(&child, next_depth, next_agent, limit, evaluate));
        }
        value
    } else {
        let mut value = f64::INFINITY;
        for action in &actions {
            let child = state.successor(agent, action);
            value = value.min(minimax_value(&child, next_depth, next_agent, limit, evaluate));
        }
        value
    }
}

/// Minimax value with alpha-beta pruning.
///
/// `alpha` is the best value the maximizer can already guarantee on the
/// path to this node, `beta` the best a minimizer can. A maximizer stops
/// once its value exceeds beta, a minimizer once its value drops below
/// alpha; neither cut can change the value backed up to the root.
fn alphabeta_value<G, E>(
    state: &G,
    depth: u32,
    agent: usize,
    alpha: f64,
    beta: f64,
    limit: u32,
    evaluate: &E,
) -> f64
where
    G: Game,
    E: Fn(&G) -> f64,
{
    if cutoff(state, depth, limit) {
        return evaluate(state);
    }
    let actions = state.legal_actions(agent);
    if actions.is_empty() {
        return evaluate(state);
    }

    let next_agent = (agent + 1) % state.num_agents();
    let next_depth = if next_agent == 0 { depth + 1 } else { depth };

    if agent == 0 {
        let mut value = f64::NEG_INFINITY;
        let mut alpha = alpha;
        for action in &actions {
            let child = state.successor(agent, action);
            value = value.max(alphabeta_value(
                &child, next_depth, next_agent, alpha, beta, limit, evaluate,
            ));
            if value > beta {
                return value;
            }
            alpha = alpha.max(value);
        }
        value
    } else {
        let mut value = f64::INFINITY;
        let mut beta = beta;
        for action in &actions {
            let child = state.successor(agent, action);
            value = value.min(alphabeta_value(
                &child, next_depth, next_agent, alpha, beta, limit, evaluate,
            ));
            if value < alpha {
                return value;
            }
            beta = beta.min(value);
        }
        value
    }
}

/// Expectimax value of a node: opponents average over their legal actions
/// instead of minimizing.
fn expectimax_value<G, E>(state: &G, depth: u32, agent: usize, limit: u32, evaluate: &E) -> f64
where
    G: Game,
    E: Fn(&G) -> f64,
{
    if cutoff(state, depth, limit) {
        return evaluate(state);
    }
    let actions = state.legal_actions(agent);
    if actions.is_empty() {
        return evaluate(state);
    }

    let next_agent = (agent + 1) % state.num_agents();
    let next_depth = if next_agent == 0 { depth + 1 } else { depth };

    if agent == 0 {
        let mut value = f64::NEG_INFINITY;
        for action in &actions {
            let child = state.successor(agent, action);
            value = value.max(expectimax_value(
                &child, next_depth, next_agent, limit, evaluate,
            ));
        }
        value
    } else {
        let mut total = 0.0;
        for action in &actions {
            let child = state.successor(agent, action);
            total += expectimax_value(&child, next_depth, next_agent, limit, evaluate);
        }
        total / actions.len() as f64
    }
}

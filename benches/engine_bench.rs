use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gridlock::adversarial::{decide, Game, SearchMode};
use gridlock::eval::{evaluate, score_evaluation};
use gridlock::problem::{PositionProblem, TerrainProblem};
use gridlock::protocol::{parse_layout, parse_terrain};
use gridlock::search::{
    a_star_outcome, breadth_first_outcome, manhattan_heuristic, terrain_heuristic,
    uniform_cost_outcome,
};

/// A medium pursuit position: two hunters, a pellet field, two boosts.
const ARENA: [&str; 9] = [
    "%%%%%%%%%%%%",
    "%C...%....o%",
    "%.%%.%.%%..%",
    "%.%....%.H.%",
    "%.%.%%.%%..%",
    "%......%...%",
    "%.%%%..%.%%%",
    "%o...H.....%",
    "%%%%%%%%%%%%",
];

/// A weighted terrain field with scattered buildings and water.
const FIELD: [&str; 6] = [
    "SRRHHBRRRR",
    "RRBHWWRHHR",
    "RPPRRBRHBR",
    "RRBRRRRHRR",
    "HRRPBPPRRR",
    "RRHRRRRRRG",
];

fn bench_evaluate(c: &mut Criterion) {
    let state = parse_layout(&ARENA).unwrap();
    c.bench_function("evaluate_tuned", |b| {
        b.iter(|| evaluate(black_box(&state)))
    });
}

fn bench_legal_actions(c: &mut Criterion) {
    let state = parse_layout(&ARENA).unwrap();
    c.bench_function("legal_actions_all_agents", |b| {
        b.iter(|| {
            let mut total = 0;
            for agent in 0..state.num_agents() {
                total += black_box(&state).legal_actions(agent).len();
            }
            total
        })
    });
}

fn bench_position_search(c: &mut Criterion) {
    let state = parse_layout(&ARENA).unwrap();
    let problem = PositionProblem::new(
        state.maze().clone(),
        state.player(),
        gridlock::grid::Pos::new(10, 1),
    );

    c.bench_function("bfs_arena", |b| {
        b.iter(|| breadth_first_outcome(black_box(&problem)))
    });
    c.bench_function("ucs_arena", |b| {
        b.iter(|| uniform_cost_outcome(black_box(&problem)))
    });
    c.bench_function("astar_arena", |b| {
        b.iter(|| a_star_outcome(black_box(&problem), manhattan_heuristic))
    });
}

fn bench_terrain_search(c: &mut Criterion) {
    let problem = TerrainProblem::new(parse_terrain(&FIELD).unwrap()).unwrap();
    c.bench_function("astar_terrain", |b| {
        b.iter(|| a_star_outcome(black_box(&problem), terrain_heuristic))
    });
}

fn bench_game_tree(c: &mut Criterion) {
    let state = parse_layout(&ARENA).unwrap();
    c.bench_function("alphabeta_depth_2", |b| {
        b.iter(|| decide(black_box(&state), 2, score_evaluation, SearchMode::AlphaBeta))
    });
    c.bench_function("expectimax_depth_2", |b| {
        b.iter(|| decide(black_box(&state), 2, score_evaluation, SearchMode::Expectimax))
    });
}

criterion_group!(
    benches,
    bench_evaluate,
    bench_legal_actions,
    bench_position_search,
    bench_terrain_search,
    bench_game_tree
);
criterion_main!(benches);

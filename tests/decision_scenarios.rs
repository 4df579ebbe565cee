//! End-to-end move decisions on hand-built boards
//!
//! Each test drives the public engine the same way the /move handler does:
//! build a Grid from the board, score candidates, break ties with a seeded
//! generator.

mod common;

use common::{board, snake};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use volume_snake::bot::Bot;
use volume_snake::config::Config;
use volume_snake::grid::Grid;
use volume_snake::selector::MoveSelector;
use volume_snake::types::{Board, Direction};

fn decide(board: &Board, seed: u64) -> Direction {
    let config = Config::default_hardcoded();
    let rng = Mutex::new(StdRng::seed_from_u64(seed));
    Bot::compute_move(board, "me", &config, &rng)
}

fn best_moves(board: &Board) -> Vec<Direction> {
    let config = Config::default_hardcoded();
    let grid = Grid::new(board);
    let mut best = MoveSelector::new(&grid, &config).best_moves("me");
    best.sort_by_key(|d| d.as_str());
    best
}

/// Straight up, or left away from the longer snake's body on our right
#[test]
fn test_avoids_longer_snake_body() {
    let board = board(
        8,
        8,
        &[(3, 0)],
        vec![
            snake("me", 100, &[(3, 3), (3, 2), (3, 1)]),
            snake("rival", 100, &[(4, 5), (4, 4), (4, 3), (4, 2)]),
        ],
    );

    for seed in 0..20 {
        let chosen = decide(&board, seed);
        assert!(
            chosen == Direction::Up || chosen == Direction::Left,
            "seed {} chose {:?}",
            seed,
            chosen
        );
    }
}

/// Longer heads on both sides: only straight ahead avoids a losing head-on
#[test]
fn test_runs_between_two_longer_heads() {
    let board = board(
        11,
        11,
        &[],
        vec![
            snake("me", 100, &[(5, 5), (5, 4), (5, 3)]),
            snake("a", 100, &[(3, 5), (2, 5), (1, 5), (0, 5), (0, 4)]),
            snake("b", 100, &[(7, 5), (8, 5), (9, 5), (10, 5), (10, 4)]),
        ],
    );

    assert_eq!(best_moves(&board), vec![Direction::Up]);
    for seed in 0..20 {
        assert_eq!(decide(&board, seed), Direction::Up);
    }
}

/// Food sits in a dead-end pocket; the open side wins despite hunger
#[test]
fn test_hunger_never_beats_a_dead_end() {
    let board = board(
        7,
        7,
        &[(0, 0)],
        vec![snake("me", 10, &[(1, 0), (1, 1), (0, 1), (0, 2), (0, 3)])],
    );

    let config = Config::default_hardcoded();
    let grid = Grid::new(&board);
    let selector = MoveSelector::new(&grid, &config);
    let me = grid.snake("me").unwrap();
    assert!(selector.is_hungry(me));

    let scores = selector.score_candidates(me);
    let left = scores.iter().find(|c| c.direction == Direction::Left).unwrap();
    assert_eq!(left.volume, 0);
    assert_eq!(left.food_distance, Some(0));
    assert_eq!(left.score, -100 - 5 + 1);

    for seed in 0..20 {
        assert_eq!(decide(&board, seed), Direction::Right);
    }
}

/// Food further away than our remaining health is not chased
#[test]
fn test_unreachable_food_is_ignored_when_starving() {
    let starving = board(
        11,
        11,
        &[(10, 10)],
        vec![
            snake("me", 5, &[(5, 0), (5, 1), (5, 2)]),
            snake("rival", 100, &[(0, 10), (0, 9), (0, 8)]),
        ],
    );
    assert_eq!(best_moves(&starving), vec![Direction::Left, Direction::Right]);

    let config = Config::default_hardcoded();
    let grid = Grid::new(&starving);
    let selector = MoveSelector::new(&grid, &config);
    assert!(!selector.is_hungry(grid.snake("me").unwrap()));
    assert!(selector
        .score_candidates(grid.snake("me").unwrap())
        .iter()
        .all(|c| c.food_distance.is_none()));
}

/// The same board with enough health to make it: the food side wins
#[test]
fn test_reachable_food_tips_the_tie() {
    let fed = board(
        11,
        11,
        &[(10, 10)],
        vec![
            snake("me", 20, &[(5, 0), (5, 1), (5, 2)]),
            snake("rival", 100, &[(0, 10), (0, 9), (0, 8)]),
        ],
    );
    assert_eq!(best_moves(&fed), vec![Direction::Right]);

    let config = Config::default_hardcoded();
    let grid = Grid::new(&fed);
    let scores = MoveSelector::new(&grid, &config).score_candidates(grid.snake("me").unwrap());
    let distance = |d: Direction| scores.iter().find(|c| c.direction == d).unwrap().food_distance;
    assert_eq!(distance(Direction::Right), Some(14));
    assert_eq!(distance(Direction::Left), Some(16));
}

/// Ties are broken at random but the same seed replays the same choice
#[test]
fn test_tie_break_is_seeded() {
    let open = board(11, 11, &[], vec![snake("me", 100, &[(5, 5), (5, 4), (5, 3)])]);
    assert_eq!(
        best_moves(&open),
        vec![Direction::Left, Direction::Right, Direction::Up]
    );

    let mut seen = Vec::new();
    for seed in 0..64 {
        let first = decide(&open, seed);
        assert_eq!(first, decide(&open, seed));
        if !seen.contains(&first) {
            seen.push(first);
        }
    }
    assert_eq!(seen.len(), 3, "every tied move should come up: {:?}", seen);
}

/// Boxed in on every side: the fallback is sent
#[test]
fn test_no_legal_move_falls_back_to_up() {
    let board = board(
        3,
        3,
        &[],
        vec![
            snake("me", 100, &[(0, 0), (0, 1), (0, 1)]),
            snake("wall", 100, &[(2, 2), (2, 1), (2, 0), (1, 0), (1, 1)]),
        ],
    );

    assert!(best_moves(&board).is_empty());
    assert_eq!(decide(&board, 0), Direction::Up);
}

//! Bot endpoint behavior: move responses, fallbacks and decision logging

mod common;

use common::{board, game, snake};
use std::time::Duration;
use volume_snake::bot::Bot;
use volume_snake::config::Config;
use volume_snake::debug_logger::DebugLogger;
use volume_snake::replay::ReplayEngine;

fn seeded_config(seed: u64) -> Config {
    let mut config = Config::default_hardcoded();
    config.tie_break.seed = Some(seed);
    config
}

#[tokio::test]
async fn test_move_response_for_forced_move() {
    let bot = Bot::new(seeded_config(1));
    let me = snake("me", 90, &[(0, 0), (1, 0), (2, 0)]);
    let board = board(5, 5, &[], vec![me.clone()]);

    let response = bot.get_move(&game("g1"), &4, &board, &me).await;
    assert_eq!(response["move"], "up");
    assert_eq!(response["shout"], volume_snake::bot::SHOUT);
}

#[tokio::test]
async fn test_unknown_snake_gets_fallback() {
    let bot = Bot::new(seeded_config(1));
    let me = snake("me", 90, &[(2, 2), (2, 1), (2, 0)]);
    let stranger = snake("stranger", 90, &[(4, 4), (4, 3), (4, 2)]);
    let board = board(5, 5, &[], vec![me]);

    let response = bot.get_move(&game("g1"), &0, &board, &stranger).await;
    assert_eq!(response["move"], "up");
}

#[tokio::test]
async fn test_concurrent_games_do_not_interfere() {
    let bot = Bot::new(seeded_config(9));
    let left_corner = snake("me", 90, &[(0, 0), (0, 1), (0, 2)]);
    let right_corner = snake("me", 90, &[(4, 0), (4, 1), (4, 2)]);
    let board_a = board(5, 5, &[], vec![left_corner.clone()]);
    let board_b = board(5, 5, &[], vec![right_corner.clone()]);

    let game_a = game("a");
    let game_b = game("b");
    let (a, b) = tokio::join!(
        bot.get_move(&game_a, &1, &board_a, &left_corner),
        bot.get_move(&game_b, &1, &board_b, &right_corner)
    );

    assert_eq!(a["move"], "right");
    assert_eq!(b["move"], "left");
}

#[tokio::test]
async fn test_logged_decisions_replay_identically() {
    let path = std::env::temp_dir().join(format!("volume_snake_bot_{}.jsonl", std::process::id()));
    let path_str = path.to_string_lossy().to_string();

    let logger = DebugLogger::new(true, &path_str).await;
    let bot = Bot::with_debug_logger(seeded_config(5), logger);

    let me = snake("me", 60, &[(5, 5), (5, 4), (5, 3)]);
    let rival = snake("rival", 80, &[(1, 1), (1, 0), (0, 0), (0, 1)]);
    let board = board(11, 11, &[(8, 8), (2, 9)], vec![me.clone(), rival]);
    for turn in 0..3 {
        bot.get_move(&game("logged"), &turn, &board, &me).await;
    }

    // Log writes are fire-and-forget
    let mut entries = Vec::new();
    let engine = ReplayEngine::new(Config::default_hardcoded(), false);
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        if let Ok(loaded) = engine.load_log_file(&path) {
            if loaded.len() == 3 {
                entries = loaded;
                break;
            }
        }
    }
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.game_id == "logged" && e.you_id == "me"));

    let results = engine.replay_all(&entries);
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.matches), "{:?}", results);

    let _ = std::fs::remove_file(&path);
}

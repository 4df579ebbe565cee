// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// The Bot ties the HTTP endpoints to the move engine: it owns the
// configuration, the process-wide tie-break generator and the debug logger.
// For more info see docs.battlesnake.com

use log::{info, warn};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::grid::Grid;
use crate::selector::{choose_move, MoveSelector, FALLBACK_MOVE};
use crate::types::{Battlesnake, Board, Direction, Game};

/// Sent along with every move
pub const SHOUT: &str = "I'm walkin here!";

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    /// Seeded once; only used to break ties between equally scored moves
    rng: Arc<Mutex<StdRng>>,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Self::with_debug_logger(config, DebugLogger::disabled())
    }

    /// Creates a Bot that records every decision through `debug_logger`
    pub fn with_debug_logger(config: Config, debug_logger: DebugLogger) -> Self {
        let rng = match config.tie_break.seed {
            Some(seed) => {
                info!("Tie-break generator seeded with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        Bot {
            config,
            rng: Arc::new(Mutex::new(rng)),
            debug_logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "apiversion": "1",
            "author": "volume-snake",
            "color": "#c0ffee",
            "head": "default",
            "tail": "default",
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: &Board, you: &Battlesnake) {
        info!("GAME START {} as {}", game.id, you.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, you: &Battlesnake) {
        info!("GAME OVER {} after {} turns as {}", game.id, turn, you.id);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The decision runs on the blocking pool against a Grid built for this
    /// request alone. If it does not finish within the effective budget the
    /// fallback move is sent instead.
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub async fn get_move(
        &self,
        game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> Value {
        let start_time = Instant::now();

        let task_board = board.clone();
        let you_id = you.id.clone();
        let config = self.config.clone();
        let rng = self.rng.clone();

        let task = tokio::task::spawn_blocking(move || {
            Bot::compute_move(&task_board, &you_id, &config, &rng)
        });

        let budget = Duration::from_millis(self.config.timing.effective_budget_ms());
        let chosen_move = match tokio::time::timeout(budget, task).await {
            Ok(Ok(direction)) => direction,
            Ok(Err(e)) => {
                warn!("Turn {}: move computation failed ({}), sending fallback", turn, e);
                FALLBACK_MOVE
            }
            Err(_) => {
                warn!(
                    "Turn {}: no decision within {}ms, sending fallback",
                    turn,
                    budget.as_millis()
                );
                FALLBACK_MOVE
            }
        };

        info!(
            "Turn {}: Chose {} (time: {}ms)",
            turn,
            chosen_move.as_str(),
            start_time.elapsed().as_millis()
        );

        self.debug_logger
            .log_move(&game.id, *turn, &you.id, board.clone(), chosen_move);

        json!({ "move": chosen_move.as_str(), "shout": SHOUT })
    }

    /// Synchronous decision for one snapshot. The generator is only locked
    /// for the final tie-break so concurrent games do not serialize.
    pub fn compute_move(board: &Board, you_id: &str, config: &Config, rng: &Mutex<StdRng>) -> Direction {
        let grid = Grid::new(board);
        let best = MoveSelector::new(&grid, config).best_moves(you_id);
        let mut rng = rng.lock();
        choose_move(&best, &mut *rng)
    }
}

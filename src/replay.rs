// Replay module for analyzing logged decisions
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Re-run the move selector on each logged board
// 3. Compare logged vs replayed moves
// 4. Generate summary reports

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DecisionRecord;
use crate::grid::Grid;
use crate::selector::{choose_move, MoveSelector, FALLBACK_MOVE};
use crate::simple_profiler;
use crate::types::{Board, Direction};

/// Represents a single log entry from the debug JSONL file
pub type LogEntry = DecisionRecord;

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    /// Every move tied for the best score; empty when the selector fell back
    pub best_moves: Vec<Direction>,
    /// The logged move was one the selector could have picked
    pub matches: bool,
    pub computation_time_ms: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    config: Config,
    seed: u64,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        let seed = config.tie_break.seed.unwrap_or(0);
        ReplayEngine {
            config,
            seed,
            verbose,
        }
    }

    /// Overrides the tie-break seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays the selector on a single board state
    /// Returns the chosen move, all tied best moves, and the time taken
    pub fn replay_turn(
        &self,
        board: &Board,
        our_snake_id: &str,
        turn: i32,
    ) -> Result<(Direction, Vec<Direction>, u128), String> {
        if !board.snakes.iter().any(|s| s.id == our_snake_id) {
            return Err(format!(
                "Snake with id '{}' not found in board state",
                our_snake_id
            ));
        }

        let start_time = Instant::now();

        let grid = Grid::new(board);
        let best = MoveSelector::new(&grid, &self.config).best_moves(our_snake_id);
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(turn as u64));
        let direction = choose_move(&best, &mut rng);

        Ok((direction, best, start_time.elapsed().as_millis()))
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        // Older logs carry no id; the first snake is then assumed to be ours
        let our_snake_id = if entry.you_id.is_empty() {
            entry
                .board
                .snakes
                .first()
                .map(|s| s.id.clone())
                .ok_or("No snakes found in board state")?
        } else {
            entry.you_id.clone()
        };

        let original_move = Direction::parse(&entry.chosen_move)?;

        let (replayed_move, best_moves, computation_time) =
            self.replay_turn(&entry.board, &our_snake_id, entry.turn)?;

        let matches = if best_moves.is_empty() {
            original_move == FALLBACK_MOVE
        } else {
            best_moves.contains(&original_move)
        };

        let result = ReplayResult {
            turn: entry.turn,
            original_move,
            replayed_move,
            best_moves,
            matches,
            computation_time_ms: computation_time,
        };

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: ✓ MATCH - {} (time: {}ms)",
                    entry.turn,
                    original_move.as_str(),
                    computation_time
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {}, Best: {:?} (time: {}ms)",
                    entry.turn,
                    original_move.as_str(),
                    result.best_moves.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    computation_time
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in a log file, in parallel. Each entry builds its
    /// own Grid so nothing is shared between workers.
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        let outcomes: Vec<(i32, Result<ReplayResult, String>)> = entries
            .par_iter()
            .map(|entry| {
                let outcome = self.replay_entry(entry);
                simple_profiler::merge_thread_local();
                (entry.turn, outcome)
            })
            .collect();

        outcomes
            .into_iter()
            .filter_map(|(turn, outcome)| match outcome {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", turn_num, e);
                }
            }
        }
        simple_profiler::merge_thread_local();

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results.iter().map(|r| r.computation_time_ms as f64).sum::<f64>()
                / results.len() as f64;
            println!("Average Computation Time:   {:.1}ms\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} → {:?} (time: {}ms)",
                    result.turn,
                    result.original_move.as_str(),
                    result.best_moves.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    result.computation_time_ms
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            let actual_move = Direction::parse(&entry.chosen_move)?;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move.as_str()
                ));
            }
        }

        Ok(())
    }
}

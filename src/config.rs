// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Battlesnake bot

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub scores: ScoresConfig,
    pub hunger: HungerConfig,
    pub search: SearchConfig,
    #[serde(default)]
    pub tie_break: TieBreakConfig,
    pub debug: DebugConfig,
}

/// Response deadline constants
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub response_time_budget_ms: u64,
    pub network_overhead_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget
    pub fn effective_budget_ms(&self) -> u64 {
        self.response_time_budget_ms.saturating_sub(self.network_overhead_ms)
    }
}

/// Move selector weights. These are heuristic values with no derivation
/// behind them; tune freely.
#[derive(Debug, Deserialize, Clone)]
pub struct ScoresConfig {
    // Optimistic volume smaller than our body
    pub volume_shortfall_penalty: i32,
    // Pessimistic (head-avoiding) volume smaller than our body
    pub worst_case_shortfall_penalty: i32,

    // Adjacent opposing heads
    pub head_on_penalty: i32,
    pub head_on_bonus: i32,

    // Stepping onto a starving snake that can still eat
    pub eating_risk_penalty: i32,

    pub hunger_bonus: i32,
}

/// Hunger determination constants
#[derive(Debug, Deserialize, Clone)]
pub struct HungerConfig {
    pub health_margin: i32,
    pub length_parity_margin: i32,
}

/// Search horizon constants
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub threat_turn_cap: i32,
}

/// Tie-break random source
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TieBreakConfig {
    /// Fixed seed; `None` seeds from the OS once at startup
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                response_time_budget_ms: 500,
                network_overhead_ms: 100,
            },
            scores: ScoresConfig {
                volume_shortfall_penalty: -100,
                worst_case_shortfall_penalty: -50,
                head_on_penalty: -10,
                head_on_bonus: 10,
                eating_risk_penalty: -10,
                hunger_bonus: 1,
            },
            hunger: HungerConfig {
                health_margin: 10,
                length_parity_margin: 4,
            },
            search: SearchConfig { threat_turn_cap: 30 },
            tie_break: TieBreakConfig { seed: None },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!("Warning: Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}

use brickfall_engine::{BrickSeed, EngineConfig, GameStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::player::PlayerStyle;

/// Output of the `simulate` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub created_at: DateTime<Utc>,
    pub config: EngineConfig,
    pub player: PlayerStyle,
    pub buy_power_ups: bool,
    pub max_bricks: usize,
    pub mean_score: f64,
    pub games: Vec<GameSummary>,
}

/// Final state of one simulated game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
    pub seed: BrickSeed,
    pub score: usize,
    pub skill_points: usize,
    /// `false` when the game stopped at the brick limit instead
    pub game_over: bool,
    pub stats: GameStats,
}

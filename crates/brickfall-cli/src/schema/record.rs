use brickfall_engine::{BrickSeed, EngineConfig, GameStats, Input};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::player::PlayerStyle;

/// Recorded play session with everything needed to replay it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedSession {
    /// Timestamp when recording was created (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// Random seed used for brick generation
    pub seed: BrickSeed,
    /// Engine configuration the game was played with
    pub config: EngineConfig,
    /// How the inputs were produced
    pub player: PlayerStyle,
    /// Score at the end of the recording
    pub final_score: usize,
    /// Final game statistics at the time of recording
    pub final_stats: GameStats,
    /// Every input applied to the game, in order
    pub inputs: Vec<Input>,
}

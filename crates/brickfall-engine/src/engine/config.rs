use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, PowerUpKind};

/// Complete engine configuration.
///
/// Every field has a default, so a partial JSON
/// document (or `{}`) is a valid configuration.
///
/// # Example
///
/// ```
/// use brickfall_engine::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{"board": {"rows": 22}}"#).unwrap();
/// assert_eq!(config.board.rows, 22);
/// assert_eq!(config.board.columns, 10);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub board: BoardConfig,
    pub power_up_costs: PowerUpCosts,
    pub timing: TimingConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.validate()
    }
}

/// Grid dimensions and spawn position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Total number of rows, including the hidden spawn rows.
    pub rows: usize,
    pub columns: usize,
    /// Leading rows above the visible play area.
    pub hidden_rows: usize,
    /// Column of the spawned brick's bounding box.
    pub spawn_x: i32,
    /// Row of the spawned brick's bounding box.
    pub spawn_y: i32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 25,
            columns: 10,
            hidden_rows: 2,
            spawn_x: 4,
            spawn_y: 0,
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if self.rows <= self.hidden_rows {
            return Err(ConfigError::NoVisibleRows {
                rows: self.rows,
                hidden_rows: self.hidden_rows,
            });
        }
        let inside = |v: i32, len: usize| usize::try_from(v).is_ok_and(|v| v < len);
        if !inside(self.spawn_x, self.columns) || !inside(self.spawn_y, self.rows) {
            return Err(ConfigError::SpawnOutOfBounds {
                x: self.spawn_x,
                y: self.spawn_y,
            });
        }
        Ok(())
    }
}

/// Skill-point price of each power-up.
///
/// Power-ups are free unless configured; all costs default to `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PowerUpCosts {
    pub row_clearer: usize,
    pub slow_motion: usize,
    pub bomb_piece: usize,
}

impl PowerUpCosts {
    #[must_use]
    pub fn cost(&self, kind: PowerUpKind) -> usize {
        match kind {
            PowerUpKind::RowClearer => self.row_clearer,
            PowerUpKind::SlowMotion => self.slow_motion,
            PowerUpKind::BombPiece => self.bomb_piece,
        }
    }
}

/// Advisory timings for the external scheduler.
///
/// The engine never reads a clock; these values only travel to whoever drives
/// the periodic `on_down` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    pub drop_interval_ms: u64,
    pub slow_motion_drop_interval_ms: u64,
    pub slow_motion_duration_secs: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            drop_interval_ms: 400,
            slow_motion_drop_interval_ms: 800,
            slow_motion_duration_secs: 10,
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        Duration::from_millis(self.drop_interval_ms)
    }

    #[must_use]
    pub fn slow_motion_drop_interval(&self) -> Duration {
        Duration::from_millis(self.slow_motion_drop_interval_ms)
    }

    #[must_use]
    pub fn slow_motion_duration(&self) -> Duration {
        Duration::from_secs(self.slow_motion_duration_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = EngineConfig::default();
        assert_eq!(config.board.rows, 25);
        assert_eq!(config.board.columns, 10);
        assert_eq!(config.board.hidden_rows, 2);
        assert_eq!((config.board.spawn_x, config.board.spawn_y), (4, 0));
        assert_eq!(config.timing.drop_interval(), Duration::from_millis(400));
        assert_eq!(config.timing.slow_motion_duration(), Duration::from_secs(10));
        for kind in PowerUpKind::ALL {
            assert_eq!(config.power_up_costs.cost(kind), 0);
        }
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_boards() {
        let mut board = BoardConfig {
            columns: 0,
            ..BoardConfig::default()
        };
        assert!(matches!(board.validate(), Err(ConfigError::ZeroColumns)));

        board.columns = 10;
        board.rows = 2;
        assert!(matches!(
            board.validate(),
            Err(ConfigError::NoVisibleRows { .. })
        ));

        board.rows = 25;
        board.spawn_x = 10;
        assert!(matches!(
            board.validate(),
            Err(ConfigError::SpawnOutOfBounds { x: 10, y: 0 })
        ));

        board.spawn_x = -1;
        assert!(board.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"power_up_costs": {"bomb_piece": 40}}"#).unwrap();
        assert_eq!(config.power_up_costs.cost(PowerUpKind::BombPiece), 40);
        assert_eq!(config.power_up_costs.cost(PowerUpKind::RowClearer), 0);
        assert_eq!(config.board, BoardConfig::default());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<EngineConfig>(r#"{"bord": {}}"#).is_err());
    }
}

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    ActivatePowerUpError, ClearRowsError, ConfigError, PurchaseError,
    core::matrix::ClearRow,
};

use super::{
    board::Board,
    brick_generator::{BrickGenerator, BrickSeed, RandomBrickGenerator},
    config::{EngineConfig, TimingConfig},
    game_stats::GameStats,
    power_up::PowerUpKind,
    view::{BombEffect, ViewData},
};

/// Rows removed by one activation of [`PowerUpKind::RowClearer`].
pub const ROW_CLEARER_ROWS: usize = 3;

/// Points per row for a player-initiated soft drop.
pub const SOFT_DROP_POINTS: usize = 1;

/// Points per row travelled during a hard drop.
pub const HARD_DROP_POINTS_PER_ROW: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// Who asked the brick to move down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveSource {
    /// The player pressed the soft-drop key. Earns points.
    User,
    /// The periodic gravity timer. Earns nothing.
    Timer,
}

/// A single recorded player or timer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    Tick,
    SoftDrop,
    Left,
    Right,
    Rotate,
    HardDrop,
    Hold,
    Purchase(PowerUpKind),
    Activate(PowerUpKind),
}

/// Result of a downward move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownData {
    clear_row: Option<ClearRow>,
    view: ViewData,
}

impl DownData {
    /// Present only when the move locked the brick.
    #[must_use]
    pub fn clear_row(&self) -> Option<&ClearRow> {
        self.clear_row.as_ref()
    }

    #[must_use]
    pub fn view(&self) -> &ViewData {
        &self.view
    }
}

/// What a successful power-up activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PowerUpActivation {
    RowsCleared { rows: usize },
    /// The scheduler should use `drop_interval` between ticks for `duration`.
    SlowMotion {
        drop_interval: Duration,
        duration: Duration,
    },
    BombArmed,
}

/// Input policy on top of a [`Board`].
///
/// Turns player and timer events into board operations and applies the
/// scoring rules: soft drops, hard drops and line clears feed both the
/// [`Score`](super::Score) and skill-point accrual at the same rate.
///
/// Once the session is over every input is ignored until
/// [`new_game`](Self::new_game).
///
/// # Example
///
/// ```
/// use brickfall_engine::{EngineConfig, GameController, MoveSource};
///
/// let mut game = GameController::new(&EngineConfig::default()).unwrap();
/// game.on_down(MoveSource::User);
/// assert_eq!(game.score(), 1);
///
/// let down = game.on_hard_drop();
/// assert!(down.clear_row().is_some());
/// assert_eq!(game.stats().completed_bricks(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameController<G = RandomBrickGenerator> {
    board: Board<G>,
    stats: GameStats,
    session_state: SessionState,
    timing: TimingConfig,
}

impl GameController {
    /// Validates `config` and starts a game with a randomly seeded generator.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_board(Board::new(config), config.timing))
    }

    pub fn with_seed(config: &EngineConfig, seed: BrickSeed) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_board(Board::with_seed(config, seed), config.timing))
    }
}

impl<G> GameController<G>
where
    G: BrickGenerator,
{
    pub fn with_generator(config: &EngineConfig, generator: G) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_board(
            Board::with_generator(config, generator),
            config.timing,
        ))
    }

    fn from_board(board: Board<G>, timing: TimingConfig) -> Self {
        let session_state = if board.is_colliding() {
            SessionState::GameOver
        } else {
            SessionState::Playing
        };
        Self {
            board,
            stats: GameStats::new(),
            session_state,
            timing,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board<G> {
        &self.board
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.board.score().value()
    }

    #[must_use]
    pub fn skill_points(&self) -> usize {
        self.board.power_ups().skill_points()
    }

    /// Normal interval between gravity ticks.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.timing.drop_interval()
    }

    #[must_use]
    pub fn view(&self) -> ViewData {
        self.board.view_data()
    }

    /// Drains the pending bomb detonation, if any, for the renderer.
    pub fn take_bomb_effect(&mut self) -> Option<BombEffect> {
        self.board.take_bomb_effect()
    }

    pub fn on_down(&mut self, source: MoveSource) -> DownData {
        if self.session_state.is_game_over() {
            return self.down_data(None);
        }
        if self.board.move_down().is_ok() {
            if source == MoveSource::User {
                self.award(SOFT_DROP_POINTS);
            }
            return self.down_data(None);
        }
        let clear_row = self.lock_and_spawn();
        self.down_data(Some(clear_row))
    }

    pub fn on_hard_drop(&mut self) -> DownData {
        if self.session_state.is_game_over() {
            return self.down_data(None);
        }
        let distance = self.board.hard_drop();
        self.award(HARD_DROP_POINTS_PER_ROW * distance);
        let clear_row = self.lock_and_spawn();
        self.down_data(Some(clear_row))
    }

    pub fn on_left(&mut self) -> ViewData {
        if self.session_state.is_playing() {
            let _ = self.board.move_left();
        }
        self.view()
    }

    pub fn on_right(&mut self) -> ViewData {
        if self.session_state.is_playing() {
            let _ = self.board.move_right();
        }
        self.view()
    }

    pub fn on_rotate(&mut self) -> ViewData {
        if self.session_state.is_playing() {
            let _ = self.board.rotate_left();
        }
        self.view()
    }

    pub fn on_hold(&mut self) -> ViewData {
        if self.session_state.is_playing() {
            let _ = self.board.hold();
        }
        self.view()
    }

    /// Resets the board, score, power-ups and statistics.
    pub fn new_game(&mut self) {
        self.stats = GameStats::new();
        self.session_state = match self.board.new_game() {
            Ok(()) => SessionState::Playing,
            Err(_) => SessionState::GameOver,
        };
    }

    /// Buys one power-up. Purchases are allowed after game over.
    pub fn purchase_power_up(&mut self, kind: PowerUpKind) -> Result<(), PurchaseError> {
        self.board.power_ups_mut().purchase(kind)
    }

    /// Consumes one owned power-up and applies its effect.
    ///
    /// Nothing is consumed when the activation fails.
    pub fn activate_power_up(
        &mut self,
        kind: PowerUpKind,
    ) -> Result<PowerUpActivation, ActivatePowerUpError> {
        if self.session_state.is_game_over() {
            return Err(ActivatePowerUpError::GameOver);
        }
        let rows = self.board.grid().rows();
        if kind == PowerUpKind::RowClearer && rows < ROW_CLEARER_ROWS {
            return Err(ClearRowsError::OutOfRange {
                requested: ROW_CLEARER_ROWS,
                rows,
            }
            .into());
        }
        self.board.power_ups_mut().use_power_up(kind)?;

        let activation = match kind {
            PowerUpKind::RowClearer => {
                self.board.clear_bottom_rows(ROW_CLEARER_ROWS)?;
                PowerUpActivation::RowsCleared {
                    rows: ROW_CLEARER_ROWS,
                }
            }
            PowerUpKind::SlowMotion => PowerUpActivation::SlowMotion {
                drop_interval: self.timing.slow_motion_drop_interval(),
                duration: self.timing.slow_motion_duration(),
            },
            PowerUpKind::BombPiece => {
                self.board.arm_bomb();
                PowerUpActivation::BombArmed
            }
        };
        Ok(activation)
    }

    /// Applies a recorded input, discarding its result.
    ///
    /// Failed purchases and activations are ignored just as an unaffordable
    /// key press would be during play.
    pub fn apply(&mut self, input: Input) {
        match input {
            Input::Tick => {
                self.on_down(MoveSource::Timer);
            }
            Input::SoftDrop => {
                self.on_down(MoveSource::User);
            }
            Input::Left => {
                self.on_left();
            }
            Input::Right => {
                self.on_right();
            }
            Input::Rotate => {
                self.on_rotate();
            }
            Input::HardDrop => {
                self.on_hard_drop();
            }
            Input::Hold => {
                self.on_hold();
            }
            Input::Purchase(kind) => {
                let _ = self.purchase_power_up(kind);
            }
            Input::Activate(kind) => {
                let _ = self.activate_power_up(kind);
            }
        }
    }

    fn award(&mut self, points: usize) {
        if points == 0 {
            return;
        }
        self.board.score_mut().add(points);
        self.board.power_ups_mut().award_skill_points(points);
    }

    fn lock_and_spawn(&mut self) -> ClearRow {
        if self.board.lock_brick().is_exploded() {
            self.stats.record_bomb();
        }
        let clear_row = self.board.clear_rows();
        self.stats.complete_brick_drop(clear_row.lines_removed());
        self.award(clear_row.score_bonus());
        if self.board.spawn_brick().is_err() {
            self.session_state = SessionState::GameOver;
        }
        clear_row
    }

    fn down_data(&self, clear_row: Option<ClearRow>) -> DownData {
        DownData {
            clear_row,
            view: self.view(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        BrickKind, UsePowerUpError,
        engine::{
            brick_generator::SequenceBrickGenerator,
            config::{BoardConfig, PowerUpCosts},
        },
    };

    use super::*;

    // 4×4 board with O bricks spawning in the top-left corner.
    fn small_game(columns: usize) -> GameController<SequenceBrickGenerator> {
        let config = EngineConfig {
            board: BoardConfig {
                rows: 4,
                columns,
                hidden_rows: 0,
                spawn_x: 0,
                spawn_y: 0,
            },
            ..EngineConfig::default()
        };
        GameController::with_generator(&config, SequenceBrickGenerator::new(vec![BrickKind::O]))
            .unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = EngineConfig::default();
        config.board.columns = 0;
        assert_eq!(
            GameController::new(&config).unwrap_err(),
            ConfigError::ZeroColumns
        );
    }

    #[test]
    fn test_only_user_soft_drops_score() {
        let mut game = GameController::with_generator(
            &EngineConfig::default(),
            SequenceBrickGenerator::new(vec![BrickKind::T]),
        )
        .unwrap();
        let down = game.on_down(MoveSource::User);
        assert!(down.clear_row().is_none());
        assert_eq!(down.view().y(), 1);
        assert_eq!(game.score(), 1);
        assert_eq!(game.skill_points(), 0);
        assert!((game.board().power_ups().fractional_skill_points() - 0.1).abs() < 1e-9);

        let revision = game.board().score().revision();
        game.on_down(MoveSource::Timer);
        assert_eq!(game.score(), 1);
        assert_eq!(game.board().score().revision(), revision);
        assert_eq!(game.view().y(), 2);
    }

    #[test]
    fn test_hard_drops_and_line_clear_scoring() {
        let mut game = small_game(4);

        let down = game.on_hard_drop();
        assert_eq!(down.clear_row().map(ClearRow::lines_removed), Some(0));
        assert_eq!(game.score(), 4);

        game.on_right();
        game.on_right();
        assert_eq!(game.view().x(), 2);
        let down = game.on_hard_drop();
        let clear_row = down.clear_row().unwrap();
        assert_eq!(clear_row.lines_removed(), 2);
        assert_eq!(clear_row.score_bonus(), 200);
        assert!(clear_row.new_grid().is_empty());

        assert_eq!(game.score(), 4 + 4 + 200);
        assert_eq!(game.skill_points(), 20);
        assert_eq!(game.stats().completed_bricks(), 2);
        assert_eq!(game.stats().total_cleared_lines(), 2);
        assert_eq!(game.stats().line_cleared_counter(), &[1, 0, 1, 0, 0]);
        assert!(game.session_state().is_playing());
    }

    #[test]
    fn test_soft_drop_locks_at_floor() {
        let mut game = small_game(4);
        game.on_down(MoveSource::User);
        game.on_down(MoveSource::User);
        assert_eq!(game.score(), 2);
        let down = game.on_down(MoveSource::User);
        assert!(down.clear_row().is_some());
        assert_eq!(game.score(), 2);
        assert_eq!(game.board().grid().occupied_count(), 4);
        assert_eq!(down.view().y(), 0);
    }

    #[test]
    fn test_game_over_ignores_inputs_until_new_game() {
        let mut game = small_game(3);
        game.on_hard_drop();
        // The second O cannot fall and fills the spawn area.
        game.on_hard_drop();
        assert!(game.session_state().is_game_over());

        let view = game.view();
        assert_eq!(game.on_left(), view);
        assert_eq!(game.on_rotate(), view);
        assert_eq!(game.on_hold(), view);
        assert!(game.on_down(MoveSource::User).clear_row().is_none());
        assert!(game.on_hard_drop().clear_row().is_none());
        assert_eq!(game.stats().completed_bricks(), 2);

        game.purchase_power_up(PowerUpKind::BombPiece).unwrap();
        assert_eq!(
            game.activate_power_up(PowerUpKind::BombPiece),
            Err(ActivatePowerUpError::GameOver)
        );

        game.new_game();
        assert!(game.session_state().is_playing());
        assert!(game.board().grid().is_empty());
        assert_eq!(game.score(), 0);
        assert_eq!(game.stats(), &GameStats::new());
        assert_eq!(game.board().power_ups().quantity(PowerUpKind::BombPiece), 0);
    }

    #[test]
    fn test_row_clearer() {
        let mut game = small_game(4);
        assert_eq!(
            game.activate_power_up(PowerUpKind::RowClearer),
            Err(ActivatePowerUpError::NotOwned(UsePowerUpError::NotOwned {
                kind: PowerUpKind::RowClearer
            }))
        );

        game.on_hard_drop();
        assert_eq!(game.board().grid().occupied_count(), 4);
        game.purchase_power_up(PowerUpKind::RowClearer).unwrap();
        assert_eq!(
            game.activate_power_up(PowerUpKind::RowClearer),
            Ok(PowerUpActivation::RowsCleared { rows: 3 })
        );
        assert!(game.board().grid().is_empty());
        assert_eq!(game.board().power_ups().quantity(PowerUpKind::RowClearer), 0);
        // Row clearing is not a line clear and scores nothing.
        assert_eq!(game.stats().total_cleared_lines(), 0);
        assert_eq!(game.score(), 4);
    }

    #[test]
    fn test_row_clearer_on_short_board_keeps_the_power_up() {
        let config = EngineConfig {
            board: BoardConfig {
                rows: 2,
                columns: 4,
                hidden_rows: 0,
                spawn_x: 0,
                spawn_y: 0,
            },
            ..EngineConfig::default()
        };
        let mut game =
            GameController::with_generator(&config, SequenceBrickGenerator::new(vec![BrickKind::O]))
                .unwrap();
        game.purchase_power_up(PowerUpKind::RowClearer).unwrap();
        assert_eq!(
            game.activate_power_up(PowerUpKind::RowClearer),
            Err(ActivatePowerUpError::ClearRows(ClearRowsError::OutOfRange {
                requested: 3,
                rows: 2
            }))
        );
        assert_eq!(game.board().power_ups().quantity(PowerUpKind::RowClearer), 1);
    }

    #[test]
    fn test_bomb_piece_explodes_on_next_lock() {
        let mut game = small_game(4);
        game.purchase_power_up(PowerUpKind::BombPiece).unwrap();
        assert_eq!(
            game.activate_power_up(PowerUpKind::BombPiece),
            Ok(PowerUpActivation::BombArmed)
        );
        assert!(game.board().is_bomb_armed());

        game.on_hard_drop();
        assert!(game.board().grid().is_empty());
        assert_eq!(game.stats().bombs_detonated(), 1);
        assert_eq!(game.stats().completed_bricks(), 1);
        assert_eq!(game.take_bomb_effect(), Some(BombEffect { x: 0, y: 2 }));
        assert_eq!(game.take_bomb_effect(), None);
        assert!(!game.board().is_bomb_armed());
    }

    #[test]
    fn test_slow_motion_reports_timing() {
        let mut game = GameController::new(&EngineConfig::default()).unwrap();
        game.purchase_power_up(PowerUpKind::SlowMotion).unwrap();
        assert_eq!(
            game.activate_power_up(PowerUpKind::SlowMotion),
            Ok(PowerUpActivation::SlowMotion {
                drop_interval: Duration::from_millis(800),
                duration: Duration::from_secs(10),
            })
        );
        assert_eq!(game.drop_interval(), Duration::from_millis(400));
    }

    #[test]
    fn test_purchase_costs_skill_points() {
        let config = EngineConfig {
            power_up_costs: PowerUpCosts {
                bomb_piece: 1,
                ..PowerUpCosts::default()
            },
            ..EngineConfig::default()
        };
        let mut game = GameController::new(&config).unwrap();
        assert!(game.purchase_power_up(PowerUpKind::BombPiece).is_err());
        for _ in 0..10 {
            game.on_down(MoveSource::User);
        }
        assert_eq!(game.skill_points(), 1);
        game.purchase_power_up(PowerUpKind::BombPiece).unwrap();
        assert_eq!(game.skill_points(), 0);
    }

    #[test]
    fn test_same_seed_and_inputs_replay_identically() {
        let seed = BrickSeed::from_bytes([3; 16]);
        let inputs = [
            Input::Left,
            Input::Rotate,
            Input::HardDrop,
            Input::Hold,
            Input::SoftDrop,
            Input::Tick,
            Input::Right,
            Input::Purchase(PowerUpKind::BombPiece),
            Input::Activate(PowerUpKind::BombPiece),
            Input::HardDrop,
            Input::HardDrop,
        ];
        let mut a = GameController::with_seed(&EngineConfig::default(), seed).unwrap();
        let mut b = GameController::with_seed(&EngineConfig::default(), seed).unwrap();
        for input in inputs {
            a.apply(input);
            b.apply(input);
        }
        assert_eq!(a.stats(), b.stats());
        assert_eq!(a.score(), b.score());
        assert_eq!(a.board().grid(), b.board().grid());
        assert_eq!(a.stats().completed_bricks(), 3);
        assert_eq!(a.stats().bombs_detonated(), 1);
    }

    #[test]
    fn test_input_serialization() {
        let json = serde_json::to_string(&[Input::Tick, Input::Activate(PowerUpKind::SlowMotion)])
            .unwrap();
        assert_eq!(json, r#"["Tick",{"Activate":"SlowMotion"}]"#);
    }
}

//! Rules engine for a falling-brick puzzle game with a skill-point power-up economy.
//!
//! - [`core`] holds the data model: bricks, their rotation states, the grid,
//!   and the pure [`matrix`] operations (collision, merge, row removal).
//! - [`engine`] holds the stateful parts: the [`Board`] state machine, the
//!   [`Score`] counter, the [`PowerUpManager`], and the [`GameController`]
//!   that applies the input and scoring policy on top of the board.
//!
//! The engine is synchronous and clock-free. Whoever embeds it owns the timer
//! that calls [`GameController::on_down`] periodically.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("brick colliding at the requested position")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HoldError {
    #[display("hold already used for this brick")]
    HoldAlreadyUsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ClearRowsError {
    #[display("cannot clear {requested} rows from a board of {rows} rows")]
    OutOfRange { requested: usize, rows: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PurchaseError {
    #[display("power-up costs {cost} skill points, only {available} available")]
    InsufficientSkillPoints { cost: usize, available: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum UsePowerUpError {
    #[display("no {kind:?} power-up owned")]
    NotOwned { kind: PowerUpKind },
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum ActivatePowerUpError {
    #[display("{_0}")]
    NotOwned(UsePowerUpError),
    #[display("{_0}")]
    ClearRows(ClearRowsError),
    #[display("game is over")]
    #[from(ignore)]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board must have at least one column")]
    ZeroColumns,
    #[display("board has {rows} rows but {hidden_rows} of them are hidden")]
    NoVisibleRows { rows: usize, hidden_rows: usize },
    #[display("spawn position ({x}, {y}) is outside the board")]
    SpawnOutOfBounds { x: i32, y: i32 },
}

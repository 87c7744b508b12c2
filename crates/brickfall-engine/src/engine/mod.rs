//! Stateful game logic built on the [`core`](crate::core) data model.
//!
//! - [`Board`] - Grid, falling brick, hold slot and bomb state
//! - [`GameController`] - Input policy and scoring on top of a board
//! - [`Score`] - Score counter with a change revision
//! - [`PowerUpManager`] - Skill-point balance and power-up inventory
//! - [`GameStats`] - Per-game counters
//! - [`BrickGenerator`] - Brick source with one brick of lookahead
//! - [`EngineConfig`] - Board size, power-up prices and scheduler timings
//!
//! # Game Flow
//!
//! 1. A timer calls [`GameController::on_down`] every
//!    [`drop_interval`](GameController::drop_interval)
//! 2. The player moves, rotates, holds, soft-drops or hard-drops the brick
//! 3. When the brick can no longer fall it locks (or explodes, if a bomb was
//!    armed), complete rows are cleared, and the next brick spawns
//! 4. Score feeds skill points, which buy power-ups
//! 5. Repeat until a spawned brick collides
//!
//! # Example
//!
//! ```
//! use brickfall_engine::{EngineConfig, GameController, PowerUpActivation, PowerUpKind};
//!
//! let mut game = GameController::new(&EngineConfig::default()).unwrap();
//! game.on_rotate();
//! game.on_hard_drop();
//!
//! game.purchase_power_up(PowerUpKind::BombPiece).unwrap();
//! let activation = game.activate_power_up(PowerUpKind::BombPiece).unwrap();
//! assert_eq!(activation, PowerUpActivation::BombArmed);
//!
//! game.on_hard_drop();
//! assert_eq!(game.stats().bombs_detonated(), 1);
//! assert!(game.take_bomb_effect().is_some());
//! ```

pub use self::{
    board::*, brick_generator::*, config::*, game_controller::*, game_stats::*, power_up::*,
    score::*, view::*,
};

mod board;
mod brick_generator;
mod config;
mod game_controller;
mod game_stats;
mod power_up;
mod score;
mod view;

use serde::{Deserialize, Serialize};

use crate::{PurchaseError, UsePowerUpError};

use super::config::PowerUpCosts;

/// Skill points are awarded at one point per this many score points.
pub const SCORE_PER_SKILL_POINT: usize = 10;

/// The three purchasable power-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PowerUpKind {
    /// Clears the bottom three rows.
    RowClearer = 0,
    /// Slows the falling speed for a while.
    SlowMotion = 1,
    /// The next brick explodes in a 4×4 area when it locks.
    BombPiece = 2,
}

impl PowerUpKind {
    pub const LEN: usize = 3;

    pub const ALL: [PowerUpKind; Self::LEN] = [
        PowerUpKind::RowClearer,
        PowerUpKind::SlowMotion,
        PowerUpKind::BombPiece,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PowerUpKind::RowClearer => "Row Clearer",
            PowerUpKind::SlowMotion => "Slow Motion",
            PowerUpKind::BombPiece => "Bomb Piece",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            PowerUpKind::RowClearer => "Clears the bottom 3 rows",
            PowerUpKind::SlowMotion => "Slows falling speed for 10 seconds",
            PowerUpKind::BombPiece => "Next piece explodes in 4x4 area on placement",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Skill-point ledger and power-up inventory.
///
/// Skill points accrue from score at a 1:[`SCORE_PER_SKILL_POINT`] ratio. The
/// sub-point remainder is kept in score units, so accrual is exact no matter
/// how small the individual awards are.
///
/// # Example
///
/// ```
/// use brickfall_engine::{PowerUpCosts, PowerUpKind, PowerUpManager};
///
/// let costs = PowerUpCosts { bomb_piece: 5, ..PowerUpCosts::default() };
/// let mut manager = PowerUpManager::new(costs);
///
/// manager.award_skill_points(50);
/// assert_eq!(manager.skill_points(), 5);
///
/// manager.purchase(PowerUpKind::BombPiece).unwrap();
/// assert_eq!(manager.skill_points(), 0);
/// assert_eq!(manager.quantity(PowerUpKind::BombPiece), 1);
///
/// manager.use_power_up(PowerUpKind::BombPiece).unwrap();
/// assert!(manager.use_power_up(PowerUpKind::BombPiece).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerUpManager {
    costs: PowerUpCosts,
    inventory: [usize; PowerUpKind::LEN],
    skill_points: usize,
    // Score earned but not yet converted, always < SCORE_PER_SKILL_POINT.
    pending_score: usize,
}

impl Default for PowerUpManager {
    fn default() -> Self {
        Self::new(PowerUpCosts::default())
    }
}

impl PowerUpManager {
    #[must_use]
    pub const fn new(costs: PowerUpCosts) -> Self {
        Self {
            costs,
            inventory: [0; PowerUpKind::LEN],
            skill_points: 0,
            pending_score: 0,
        }
    }

    #[must_use]
    pub const fn skill_points(&self) -> usize {
        self.skill_points
    }

    /// The not-yet-whole part of the skill-point balance, in `[0, 1)`.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn fractional_skill_points(&self) -> f64 {
        self.pending_score as f64 / SCORE_PER_SKILL_POINT as f64
    }

    #[must_use]
    pub fn cost(&self, kind: PowerUpKind) -> usize {
        self.costs.cost(kind)
    }

    #[must_use]
    pub const fn quantity(&self, kind: PowerUpKind) -> usize {
        self.inventory[kind.index()]
    }

    #[must_use]
    pub fn can_afford(&self, kind: PowerUpKind) -> bool {
        self.skill_points >= self.cost(kind)
    }

    /// Accrues `score_earned / 10` skill points, carrying the remainder over.
    pub fn award_skill_points(&mut self, score_earned: usize) {
        let total = self.pending_score + score_earned;
        self.skill_points += total / SCORE_PER_SKILL_POINT;
        self.pending_score = total % SCORE_PER_SKILL_POINT;
    }

    /// Buys one unit of `kind`. Fails without side effects when the balance is too low.
    pub fn purchase(&mut self, kind: PowerUpKind) -> Result<(), PurchaseError> {
        let cost = self.cost(kind);
        if self.skill_points < cost {
            return Err(PurchaseError::InsufficientSkillPoints {
                cost,
                available: self.skill_points,
            });
        }
        self.skill_points -= cost;
        self.inventory[kind.index()] += 1;
        Ok(())
    }

    /// Consumes one owned unit of `kind`.
    pub fn use_power_up(&mut self, kind: PowerUpKind) -> Result<(), UsePowerUpError> {
        let owned = &mut self.inventory[kind.index()];
        if *owned == 0 {
            return Err(UsePowerUpError::NotOwned { kind });
        }
        *owned -= 1;
        Ok(())
    }

    /// Zeroes the inventory, the balance, and the pending remainder.
    pub fn reset(&mut self) {
        self.inventory = [0; PowerUpKind::LEN];
        self.skill_points = 0;
        self.pending_score = 0;
    }
}

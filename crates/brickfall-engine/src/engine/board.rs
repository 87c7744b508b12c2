use arrayvec::ArrayVec;

use crate::{
    ClearRowsError, HoldError, PieceCollisionError,
    core::{
        brick::{BrickKind, BrickShape, SHAPE_SIZE, occupied_cells},
        brick_rotator::BrickRotator,
        grid::{Block, Grid},
        matrix::{self, ClearRow},
    },
};

use super::{
    brick_generator::{BrickGenerator, BrickSeed, RandomBrickGenerator},
    config::{BoardConfig, EngineConfig},
    power_up::PowerUpManager,
    score::Score,
    view::{BombEffect, ViewData},
};

/// Horizontal offsets tried, in order, when an in-place rotation collides.
pub const WALL_KICK_OFFSETS: [i32; 4] = [-1, 1, -2, 2];

/// Half-open extent of the bomb blast around its center: one cell before and
/// two cells after, on both axes (a 4×4 window).
const BOMB_REACH_BEFORE: i32 = 1;
const BOMB_REACH_AFTER: i32 = 2;

/// What happened to the falling brick when it locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum LockOutcome {
    /// The brick's cells were written into the grid.
    Merged,
    /// The brick was a bomb and cleared the area around this point instead.
    Exploded(BombEffect),
}

/// The game board: locked grid, falling brick, hold slot and bomb state.
///
/// `Board` owns the rules of movement and locking but no input policy: it
/// never decides by itself when to lock, spawn, or award points. See
/// [`GameController`](super::GameController) for that layer.
///
/// # Lifecycle
///
/// A falling brick moves until [`move_down`](Self::move_down) fails. The caller
/// then [`lock_brick`](Self::lock_brick)s it, [`clear_rows`](Self::clear_rows),
/// and [`spawn_brick`](Self::spawn_brick)s the next one. A spawn that collides
/// is game over; only [`new_game`](Self::new_game) leaves that state.
///
/// Every fallible operation either applies completely or leaves the board
/// untouched.
///
/// # Example
///
/// ```
/// use brickfall_engine::{Board, EngineConfig};
///
/// let mut board = Board::new(&EngineConfig::default());
/// board.move_left().unwrap();
/// board.rotate_left().unwrap();
///
/// let distance = board.hard_drop_distance();
/// assert_eq!(board.hard_drop(), distance);
/// assert!(board.move_down().is_err());
///
/// board.lock_brick();
/// let cleared = board.clear_rows();
/// assert_eq!(cleared.lines_removed(), 0);
/// assert!(board.spawn_brick().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Board<G = RandomBrickGenerator> {
    config: BoardConfig,
    grid: Grid,
    generator: G,
    rotator: BrickRotator,
    x: i32,
    y: i32,
    held: Option<BrickKind>,
    can_hold: bool,
    bomb_armed: bool,
    bomb_effect: Option<BombEffect>,
    score: Score,
    power_ups: PowerUpManager,
}

impl Board {
    /// Creates a board with a randomly seeded brick generator.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_generator(config, RandomBrickGenerator::new())
    }

    /// Like [`Self::new`], but with a deterministic brick sequence.
    #[must_use]
    pub fn with_seed(config: &EngineConfig, seed: BrickSeed) -> Self {
        Self::with_generator(config, RandomBrickGenerator::with_seed(seed))
    }
}

impl<G> Board<G>
where
    G: BrickGenerator,
{
    /// Creates an empty board and places the generator's first brick at the
    /// spawn position.
    ///
    /// The configuration is not validated here; see [`BoardConfig::validate`].
    #[must_use]
    pub fn with_generator(config: &EngineConfig, mut generator: G) -> Self {
        let board = config.board;
        let rotator = BrickRotator::new(generator.next_brick());
        Self {
            config: board,
            grid: Grid::new(board.rows, board.columns),
            generator,
            rotator,
            x: board.spawn_x,
            y: board.spawn_y,
            held: None,
            can_hold: true,
            bomb_armed: false,
            bomb_effect: None,
            score: Score::new(),
            power_ups: PowerUpManager::new(config.power_up_costs),
        }
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The locked cells. Clone it to keep a snapshot across later mutations.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Rows below the hidden spawn buffer, top to bottom.
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Block]> + '_ {
        self.grid.iter_rows().skip(self.config.hidden_rows)
    }

    #[must_use]
    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn score_mut(&mut self) -> &mut Score {
        &mut self.score
    }

    #[must_use]
    pub fn power_ups(&self) -> &PowerUpManager {
        &self.power_ups
    }

    pub fn power_ups_mut(&mut self) -> &mut PowerUpManager {
        &mut self.power_ups
    }

    #[must_use]
    pub fn brick_kind(&self) -> BrickKind {
        self.rotator.kind()
    }

    #[must_use]
    pub fn brick_shape(&self) -> BrickShape {
        self.rotator.current_shape()
    }

    #[must_use]
    pub fn brick_rotation(&self) -> usize {
        self.rotator.rotation()
    }

    /// Top-left corner of the falling brick's bounding box, as `(column, row)`.
    #[must_use]
    pub fn brick_offset(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    #[must_use]
    pub fn held_brick(&self) -> Option<BrickKind> {
        self.held
    }

    #[must_use]
    pub fn next_brick(&self) -> BrickKind {
        self.generator.peek_next()
    }

    #[must_use]
    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Grid coordinates of the falling brick's occupied cells, in row-major
    /// shape order.
    #[must_use]
    pub fn brick_cells(&self) -> ArrayVec<(i32, i32), { SHAPE_SIZE * SHAPE_SIZE }> {
        let shape = self.brick_shape();
        occupied_cells(&shape)
            .map(|(col, row)| {
                #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let (col, row) = (col as i32, row as i32);
                (self.x + col, self.y + row)
            })
            .collect()
    }

    /// Returns `true` if the falling brick overlaps the grid where it stands.
    #[must_use]
    pub fn is_colliding(&self) -> bool {
        matrix::intersect(&self.grid, &self.brick_shape(), self.x, self.y)
    }

    #[must_use]
    pub fn view_data(&self) -> ViewData {
        ViewData::new(
            self.brick_kind(),
            self.brick_shape(),
            (self.x, self.y),
            self.next_brick(),
            self.held,
        )
    }

    fn try_shift(&mut self, dx: i32, dy: i32) -> Result<(), PieceCollisionError> {
        let (x, y) = (self.x + dx, self.y + dy);
        if matrix::intersect(&self.grid, &self.brick_shape(), x, y) {
            return Err(PieceCollisionError);
        }
        self.x = x;
        self.y = y;
        Ok(())
    }

    /// Moves the falling brick one row down.
    ///
    /// An error means the brick rests on something and should be locked.
    pub fn move_down(&mut self) -> Result<(), PieceCollisionError> {
        self.try_shift(0, 1)
    }

    pub fn move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.try_shift(-1, 0)
    }

    pub fn move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.try_shift(1, 0)
    }

    /// Advances the falling brick to its next rotation state.
    ///
    /// The rotated shape is tried in place first, then shifted horizontally by
    /// each of [`WALL_KICK_OFFSETS`] in order. The first non-colliding
    /// placement is committed.
    pub fn rotate_left(&mut self) -> Result<(), PieceCollisionError> {
        let next = self.rotator.next_shape();
        let x = std::iter::once(0)
            .chain(WALL_KICK_OFFSETS)
            .map(|dx| self.x + dx)
            .find(|x| !matrix::intersect(&self.grid, next.shape(), *x, self.y))
            .ok_or(PieceCollisionError)?;
        self.x = x;
        self.rotator.set_rotation(next.rotation());
        Ok(())
    }

    /// Number of rows the falling brick can still fall.
    ///
    /// Measure before calling [`hard_drop`](Self::hard_drop) if the distance
    /// matters for scoring.
    #[must_use]
    pub fn hard_drop_distance(&self) -> usize {
        let shape = self.brick_shape();
        let mut distance = 0;
        // Each step moves one row down, so the loop ends after at most `rows` steps.
        while distance <= self.grid.rows()
            && !matrix::intersect(&self.grid, &shape, self.x, self.y + step(distance + 1))
        {
            distance += 1;
        }
        distance
    }

    /// Drops the falling brick as far as it goes in a single step and returns
    /// the distance travelled (possibly `0`). Never fails.
    pub fn hard_drop(&mut self) -> usize {
        let distance = self.hard_drop_distance();
        self.y += step(distance);
        distance
    }

    /// Stores the falling brick in the hold slot.
    ///
    /// With an empty slot the next generated brick becomes the falling brick;
    /// otherwise the falling and held bricks swap. Either way the new falling
    /// brick starts over at the spawn position in its spawn rotation. Only one
    /// hold is allowed per spawned brick.
    pub fn hold(&mut self) -> Result<(), HoldError> {
        if !self.can_hold {
            return Err(HoldError::HoldAlreadyUsed);
        }
        let current = self.rotator.kind();
        let incoming = match self.held.replace(current) {
            Some(held) => held,
            None => self.generator.next_brick(),
        };
        self.rotator.set_brick(incoming);
        self.reset_offset();
        self.can_hold = false;
        Ok(())
    }

    /// Makes the generator's next brick the falling brick and re-arms hold.
    ///
    /// An error means the new brick already collides at the spawn position:
    /// the game is over.
    pub fn spawn_brick(&mut self) -> Result<(), PieceCollisionError> {
        let kind = self.generator.next_brick();
        self.rotator.set_brick(kind);
        self.reset_offset();
        self.can_hold = true;
        if self.is_colliding() {
            return Err(PieceCollisionError);
        }
        Ok(())
    }

    fn reset_offset(&mut self) {
        self.x = self.config.spawn_x;
        self.y = self.config.spawn_y;
    }

    /// Fixes the falling brick in place.
    ///
    /// A normal brick is merged into the grid. An armed bomb is not merged:
    /// it empties the 4×4 window around its first occupied cell (one cell up
    /// and left, two cells down and right), posts the blast point to the bomb
    /// effect mailbox, and disarms.
    pub fn lock_brick(&mut self) -> LockOutcome {
        if !self.bomb_armed {
            self.grid = matrix::merge(&self.grid, &self.brick_shape(), self.x, self.y);
            return LockOutcome::Merged;
        }

        let (x, y) = self.brick_cells().first().copied().unwrap_or((self.x, self.y));
        self.grid = matrix::clear_area(
            &self.grid,
            (x - BOMB_REACH_BEFORE, y - BOMB_REACH_BEFORE),
            (x + BOMB_REACH_AFTER, y + BOMB_REACH_AFTER),
        );
        let effect = BombEffect { x, y };
        self.bomb_effect = Some(effect);
        self.bomb_armed = false;
        LockOutcome::Exploded(effect)
    }

    /// Removes complete rows and compacts the grid.
    pub fn clear_rows(&mut self) -> ClearRow {
        let cleared = matrix::check_removing(&self.grid);
        self.grid = cleared.new_grid().clone();
        cleared
    }

    /// Removes the bottom `count` rows whether or not they are complete.
    pub fn clear_bottom_rows(&mut self, count: usize) -> Result<(), ClearRowsError> {
        let rows = self.grid.rows();
        if count == 0 || count > rows {
            return Err(ClearRowsError::OutOfRange {
                requested: count,
                rows,
            });
        }
        self.grid = matrix::remove_bottom_rows(&self.grid, count);
        Ok(())
    }

    /// Makes the next brick to lock explode instead of merging.
    pub fn arm_bomb(&mut self) {
        self.bomb_armed = true;
    }

    #[must_use]
    pub fn is_bomb_armed(&self) -> bool {
        self.bomb_armed
    }

    /// `true` while a detonation is waiting to be shown.
    #[must_use]
    pub fn should_show_bomb_effect(&self) -> bool {
        self.bomb_effect.is_some()
    }

    /// Blast point of the pending detonation, if any.
    #[must_use]
    pub fn bomb_effect_coordinates(&self) -> Option<BombEffect> {
        self.bomb_effect
    }

    pub fn clear_bomb_effect_flag(&mut self) {
        self.bomb_effect = None;
    }

    /// Drains the bomb effect mailbox.
    pub fn take_bomb_effect(&mut self) -> Option<BombEffect> {
        self.bomb_effect.take()
    }

    /// Empties the grid, resets score and power-ups, clears hold and bomb
    /// state, and spawns a fresh brick.
    pub fn new_game(&mut self) -> Result<(), PieceCollisionError> {
        self.grid = Grid::new(self.grid.rows(), self.grid.columns());
        self.score.reset();
        self.power_ups.reset();
        self.held = None;
        self.can_hold = true;
        self.bomb_armed = false;
        self.bomb_effect = None;
        self.spawn_brick()
    }
}

fn step(rows: usize) -> i32 {
    i32::try_from(rows).unwrap_or(i32::MAX)
}

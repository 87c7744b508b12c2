//! Pure grid operations: collision testing, merging, and row removal.
//!
//! None of these functions mutate their input. Operations that change the
//! grid return a new [`Grid`], so any grid previously handed out stays valid.
//!
//! # Coordinate convention
//!
//! A [`BrickShape`] is indexed `[row][column]`. Placing a shape at offset
//! `(x, y)` maps shape cell `[row][col]` to grid cell `(x + col, y + row)`, so
//! `x` is always the column offset and `y` the row offset of the shape's
//! top-left corner. Offsets may be negative; shape cells that land outside the
//! grid count as collisions for [`intersect`] and are dropped by [`merge`].

use serde::{Deserialize, Serialize};

use super::{
    brick::{BrickShape, occupied_cells},
    grid::{Block, Grid},
};

/// Points awarded per cleared row, multiplied by the square of the row count.
pub const ROW_CLEAR_BONUS: usize = 50;

/// Result of [`check_removing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearRow {
    lines_removed: usize,
    new_grid: Grid,
    score_bonus: usize,
}

impl ClearRow {
    /// Number of complete rows that were removed.
    #[must_use]
    pub fn lines_removed(&self) -> usize {
        self.lines_removed
    }

    /// The compacted grid.
    #[must_use]
    pub fn new_grid(&self) -> &Grid {
        &self.new_grid
    }

    /// `50 × lines_removed²`.
    #[must_use]
    pub fn score_bonus(&self) -> usize {
        self.score_bonus
    }
}

fn shape_targets(shape: &BrickShape, x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
    occupied_cells(shape).map(move |(col, row)| {
        #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let (col, row) = (col as i32, row as i32);
        (x + col, y + row)
    })
}

/// Returns `true` if placing `shape` at `(x, y)` overlaps an occupied cell or
/// leaves the grid.
///
/// # Example
///
/// ```
/// use brickfall_engine::{BrickKind, Grid, matrix};
///
/// let grid = Grid::new(4, 4);
/// let shape = BrickKind::O.spawn_shape();
/// assert!(!matrix::intersect(&grid, &shape, 0, 0));
/// assert!(matrix::intersect(&grid, &shape, 3, 0));
/// ```
#[must_use]
pub fn intersect(grid: &Grid, shape: &BrickShape, x: i32, y: i32) -> bool {
    shape_targets(shape, x, y).any(|(tx, ty)| grid.get(tx, ty).is_none_or(|b| !b.is_empty()))
}

/// Returns an independent deep copy of `grid`.
#[must_use]
pub fn copy(grid: &Grid) -> Grid {
    grid.clone()
}

/// Returns a new grid with every occupied cell of `shape` written at `(x, y)`.
///
/// Shape cells falling outside the grid are silently dropped.
#[must_use]
pub fn merge(grid: &Grid, shape: &BrickShape, x: i32, y: i32) -> Grid {
    let mut merged = copy(grid);
    for ((tx, ty), (col, row)) in shape_targets(shape, x, y).zip(occupied_cells(shape)) {
        merged.set(tx, ty, shape[row][col]);
    }
    merged
}

/// Removes every complete row and compacts the rest against the bottom.
///
/// A row is complete when none of its cells is empty. Remaining rows keep their
/// relative order; vacated rows at the top are empty.
///
/// # Example
///
/// ```
/// use brickfall_engine::{Block, BrickKind, Grid, matrix};
///
/// const I: Block = Block::Brick(BrickKind::I);
/// const E: Block = Block::Empty;
/// let grid = Grid::from_rows(&[[E, I], [I, I], [I, I]]).unwrap();
///
/// let cleared = matrix::check_removing(&grid);
/// assert_eq!(cleared.lines_removed(), 2);
/// assert_eq!(cleared.score_bonus(), 200);
/// assert_eq!(cleared.new_grid(), &Grid::from_rows(&[[E, E], [E, E], [E, I]]).unwrap());
/// ```
#[must_use]
pub fn check_removing(grid: &Grid) -> ClearRow {
    let kept: Vec<&[Block]> = grid
        .iter_rows()
        .filter(|row| row.iter().any(|b| b.is_empty()))
        .collect();
    let lines_removed = grid.rows() - kept.len();
    let new_grid = stack_at_bottom(grid, &kept);
    ClearRow {
        lines_removed,
        new_grid,
        score_bonus: ROW_CLEAR_BONUS * lines_removed * lines_removed,
    }
}

/// Removes the bottom `count` rows unconditionally and compacts the rest.
///
/// `count` must not exceed the number of rows; callers validate the range.
#[must_use]
pub fn remove_bottom_rows(grid: &Grid, count: usize) -> Grid {
    let kept_rows = grid.rows().saturating_sub(count);
    let kept: Vec<&[Block]> = grid.iter_rows().take(kept_rows).collect();
    stack_at_bottom(grid, &kept)
}

/// Returns a new grid with the inclusive rectangle `x0..=x1`, `y0..=y1`
/// emptied. Parts of the rectangle outside the grid are ignored.
#[must_use]
pub fn clear_area(grid: &Grid, (x0, y0): (i32, i32), (x1, y1): (i32, i32)) -> Grid {
    let mut cleared = copy(grid);
    for y in y0..=y1 {
        for x in x0..=x1 {
            cleared.set(x, y, Block::Empty);
        }
    }
    cleared
}

// Builds a grid of `template`'s dimensions with `rows` flush against the bottom.
fn stack_at_bottom(template: &Grid, rows: &[&[Block]]) -> Grid {
    let mut stacked = Grid::new(template.rows(), template.columns());
    let offset = template.rows() - rows.len();
    for (i, row) in rows.iter().enumerate() {
        stacked.row_mut(offset + i).copy_from_slice(row);
    }
    stacked
}

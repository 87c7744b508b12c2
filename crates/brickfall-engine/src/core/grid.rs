use std::fmt;

use serde::{Deserialize, Serialize};

use super::brick::BrickKind;

/// A single cell of the grid or of a brick shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a locked (or falling) brick of the given kind.
    Brick(BrickKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    /// Returns the numeric cell value: `0` for empty, `1..=7` for a brick.
    #[must_use]
    pub fn value(self) -> u8 {
        match self {
            Block::Empty => 0,
            Block::Brick(kind) => kind.value(),
        }
    }

    /// Inverse of [`Self::value`].
    #[must_use]
    pub fn from_value(value: u8) -> Option<Self> {
        if value == 0 {
            return Some(Block::Empty);
        }
        BrickKind::from_value(value).map(Block::Brick)
    }

    const fn as_char(self) -> char {
        match self {
            Block::Empty => '.',
            Block::Brick(kind) => kind.as_char(),
        }
    }

    const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Block::Empty),
            _ => match BrickKind::from_char(c) {
                Some(kind) => Some(Block::Brick(kind)),
                None => None,
            },
        }
    }
}

/// Fixed-size rectangular field of locked cells.
///
/// The grid is addressed as `(x, y)` = `(column, row)` with `(0, 0)` at the
/// top-left and `y` growing downward. Every row has exactly
/// [`columns`](Self::columns) cells.
///
/// `Grid` has value semantics: [`Clone`] is a deep copy, and the matrix
/// operations in [`matrix`](super::matrix) always return a fresh grid rather
/// than mutating their input. Snapshots handed out by the board therefore
/// never alias engine state.
///
/// # Serialization
///
/// Serialized as a list of row strings, one character per cell: `.` for empty
/// and the brick letter otherwise (e.g. `["....", "IIJ."]`).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    columns: usize,
    cells: Vec<Block>,
}

impl Grid {
    /// Creates an all-empty grid of `rows` × `columns`.
    #[must_use]
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            columns,
            cells: vec![Block::Empty; rows * columns],
        }
    }

    /// Builds a grid from explicit rows.
    ///
    /// Returns `None` if the rows are not all of the same length.
    #[must_use]
    pub fn from_rows<R>(rows: &[R]) -> Option<Self>
    where
        R: AsRef<[Block]>,
    {
        let columns = rows.first().map_or(0, |row| row.as_ref().len());
        let mut cells = Vec::with_capacity(rows.len() * columns);
        for row in rows {
            let row = row.as_ref();
            if row.len() != columns {
                return None;
            }
            cells.extend_from_slice(row);
        }
        Some(Self { columns, cells })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        if self.columns == 0 {
            0
        } else {
            self.cells.len() / self.columns
        }
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns the cell at `(x, y)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Block> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Sets the cell at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, block: Block) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = block;
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|x| *x < self.columns)?;
        let y = usize::try_from(y).ok().filter(|y| *y < self.rows())?;
        Some(y * self.columns + x)
    }

    /// Returns row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y` is out of bounds.
    #[must_use]
    pub fn row(&self, y: usize) -> &[Block] {
        &self.cells[y * self.columns..][..self.columns]
    }

    /// Iterates over all rows from top to bottom.
    pub fn iter_rows(&self) -> impl DoubleEndedIterator<Item = &[Block]> + '_ {
        // `chunks_exact(0)` panics, and a zero-column grid has no rows anyway.
        self.cells.chunks_exact(self.columns.max(1))
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|b| !b.is_empty()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|b| b.is_empty())
    }

    /// Returns the grid as rows of numeric cell values (`0` empty, `1..=7` bricks).
    #[must_use]
    pub fn to_values(&self) -> Vec<Vec<u8>> {
        self.iter_rows()
            .map(|row| row.iter().map(|b| b.value()).collect())
            .collect()
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [Block] {
        &mut self.cells[y * self.columns..][..self.columns]
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{} [", self.rows(), self.columns)?;
        for row in self.iter_rows() {
            let line: String = row.iter().map(|b| b.as_char()).collect();
            writeln!(f, "  {line}")?;
        }
        write!(f, "]")
    }
}

impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let rows: Vec<String> = self
            .iter_rows()
            .map(|row| row.iter().map(|b| b.as_char()).collect())
            .collect();
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let lines = Vec::<String>::deserialize(deserializer)?;
        let mut rows = Vec::with_capacity(lines.len());
        for (y, line) in lines.iter().enumerate() {
            if line.is_empty() {
                return Err(serde::de::Error::custom(format!("row {y} has no cells")));
            }
            let row = line
                .chars()
                .map(|c| {
                    Block::from_char(c).ok_or_else(|| {
                        serde::de::Error::custom(format!("invalid cell '{c}' at row {y}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Grid::from_rows(&rows)
            .ok_or_else(|| serde::de::Error::custom("rows must all have the same length"))
    }
}

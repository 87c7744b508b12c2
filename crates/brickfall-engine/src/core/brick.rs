use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::grid::Block;

/// Side length of the square bounding box every brick shape lives in.
pub const SHAPE_SIZE: usize = 4;

/// A single rotation state of a brick, indexed `[row][column]`.
///
/// Shapes are always 4×4; unused cells are [`Block::Empty`].
pub type BrickShape = [[Block; SHAPE_SIZE]; SHAPE_SIZE];

/// An all-empty shape.
pub const EMPTY_SHAPE: BrickShape = [[Block::Empty; SHAPE_SIZE]; SHAPE_SIZE];

/// The seven standard bricks.
///
/// The discriminant doubles as the cell value written into the grid when the
/// brick locks (`1..=7`, `0` being reserved for empty cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum BrickKind {
    /// I-brick.
    I = 1,
    /// J-brick.
    J = 2,
    /// L-brick.
    L = 3,
    /// O-brick.
    O = 4,
    /// S-brick.
    S = 5,
    /// T-brick.
    T = 6,
    /// Z-brick.
    Z = 7,
}

impl Distribution<BrickKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BrickKind {
        BrickKind::ALL[rng.random_range(0..BrickKind::LEN)]
    }
}

impl BrickKind {
    /// Number of brick kinds (7).
    pub const LEN: usize = 7;

    /// All brick kinds in cell-value order.
    pub const ALL: [BrickKind; Self::LEN] = [
        BrickKind::I,
        BrickKind::J,
        BrickKind::L,
        BrickKind::O,
        BrickKind::S,
        BrickKind::T,
        BrickKind::Z,
    ];

    /// Returns the cell value (`1..=7`) identifying this brick in the grid.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Self::value`].
    #[must_use]
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(BrickKind::I),
            2 => Some(BrickKind::J),
            3 => Some(BrickKind::L),
            4 => Some(BrickKind::O),
            5 => Some(BrickKind::S),
            6 => Some(BrickKind::T),
            7 => Some(BrickKind::Z),
            _ => None,
        }
    }

    const fn index(self) -> usize {
        self as usize - 1
    }

    /// Returns the ordered, cyclic sequence of rotation states of this brick.
    ///
    /// Index `0` is the spawn orientation; each following state is the previous
    /// one rotated 90° counter-clockwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use brickfall_engine::BrickKind;
    ///
    /// assert_eq!(BrickKind::T.shapes().len(), 4);
    /// assert_eq!(BrickKind::O.shapes().len(), 1);
    /// ```
    #[must_use]
    pub fn shapes(self) -> &'static [BrickShape] {
        let (count, shapes) = &BRICK_SHAPES[self.index()];
        &shapes[..*count]
    }

    /// Returns the spawn orientation, used for next/hold previews.
    #[must_use]
    pub fn spawn_shape(self) -> BrickShape {
        self.shapes()[0]
    }

    /// Returns the single character representation of this brick kind.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            BrickKind::I => 'I',
            BrickKind::J => 'J',
            BrickKind::L => 'L',
            BrickKind::O => 'O',
            BrickKind::S => 'S',
            BrickKind::T => 'T',
            BrickKind::Z => 'Z',
        }
    }

    /// Parses a brick kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use brickfall_engine::BrickKind;
    ///
    /// assert_eq!(BrickKind::from_char('Z'), Some(BrickKind::Z));
    /// assert_eq!(BrickKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(BrickKind::I),
            'J' => Some(BrickKind::J),
            'L' => Some(BrickKind::L),
            'O' => Some(BrickKind::O),
            'S' => Some(BrickKind::S),
            'T' => Some(BrickKind::T),
            'Z' => Some(BrickKind::Z),
            _ => None,
        }
    }
}

/// Generates the rotation states of a shape by rotating 90° counter-clockwise
/// inside its `size`×`size` corner.
///
/// # Arguments
///
/// * `size` - Effective size of the brick (3 for most bricks, 4 for I, 2 for O)
/// * `shape` - Spawn orientation
const fn shape_rotations(size: usize, shape: &BrickShape) -> [BrickShape; 4] {
    let mut rotates = [*shape; 4];
    let mut i = 1;
    while i < 4 {
        let mut new_shape = EMPTY_SHAPE;
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                new_shape[y][x] = rotates[i - 1][x][size - 1 - y];
                x += 1;
            }
            y += 1;
        }
        rotates[i] = new_shape;
        i += 1;
    }
    rotates
}

// (number of distinct rotation states, states)
static BRICK_SHAPES: [(usize, [BrickShape; 4]); BrickKind::LEN] = {
    use Block::Empty as E;
    const I: Block = Block::Brick(BrickKind::I);
    const J: Block = Block::Brick(BrickKind::J);
    const L: Block = Block::Brick(BrickKind::L);
    const O: Block = Block::Brick(BrickKind::O);
    const S: Block = Block::Brick(BrickKind::S);
    const T: Block = Block::Brick(BrickKind::T);
    const Z: Block = Block::Brick(BrickKind::Z);
    const EEEE: [Block; 4] = [E; 4];
    [
        (4, shape_rotations(4, &[EEEE, [I, I, I, I], EEEE, EEEE])),
        (4, shape_rotations(3, &[[J, E, E, E], [J, J, J, E], EEEE, EEEE])),
        (4, shape_rotations(3, &[[E, E, L, E], [L, L, L, E], EEEE, EEEE])),
        (1, shape_rotations(2, &[[O, O, E, E], [O, O, E, E], EEEE, EEEE])),
        (4, shape_rotations(3, &[[E, S, S, E], [S, S, E, E], EEEE, EEEE])),
        (4, shape_rotations(3, &[[E, T, E, E], [T, T, T, E], EEEE, EEEE])),
        (4, shape_rotations(3, &[[Z, Z, E, E], [E, Z, Z, E], EEEE, EEEE])),
    ]
};

/// Iterates over the occupied `(column, row)` cells of a shape in row-major order.
pub fn occupied_cells(shape: &BrickShape) -> impl Iterator<Item = (usize, usize)> + '_ {
    shape.iter().enumerate().flat_map(|(row, cells)| {
        cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(move |(col, _)| (col, row))
    })
}

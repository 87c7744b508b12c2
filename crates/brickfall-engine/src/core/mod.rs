pub use self::{brick::*, brick_rotator::*, grid::*, matrix::ClearRow};

pub(crate) mod brick;
pub(crate) mod brick_rotator;
pub(crate) mod grid;
pub mod matrix;

use serde::{Deserialize, Serialize};

use crate::{BrickKind, BrickShape};

/// Immutable snapshot of everything a renderer needs about the bricks.
///
/// All shapes are owned copies; holding a `ViewData` never observes later
/// engine mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewData {
    brick_kind: BrickKind,
    brick_shape: BrickShape,
    x: i32,
    y: i32,
    next_kind: BrickKind,
    held_kind: Option<BrickKind>,
}

impl ViewData {
    pub(crate) fn new(
        brick_kind: BrickKind,
        brick_shape: BrickShape,
        (x, y): (i32, i32),
        next_kind: BrickKind,
        held_kind: Option<BrickKind>,
    ) -> Self {
        Self {
            brick_kind,
            brick_shape,
            x,
            y,
            next_kind,
            held_kind,
        }
    }

    #[must_use]
    pub fn brick_kind(&self) -> BrickKind {
        self.brick_kind
    }

    /// Shape of the falling brick in its current rotation.
    #[must_use]
    pub fn brick_shape(&self) -> &BrickShape {
        &self.brick_shape
    }

    /// Column of the falling brick's bounding box.
    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Row of the falling brick's bounding box.
    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub fn next_kind(&self) -> BrickKind {
        self.next_kind
    }

    /// Spawn orientation of the upcoming brick.
    #[must_use]
    pub fn next_shape(&self) -> BrickShape {
        self.next_kind.spawn_shape()
    }

    #[must_use]
    pub fn held_kind(&self) -> Option<BrickKind> {
        self.held_kind
    }

    /// Spawn orientation of the held brick, if any.
    #[must_use]
    pub fn held_shape(&self) -> Option<BrickShape> {
        self.held_kind.map(BrickKind::spawn_shape)
    }
}

/// Where a bomb brick detonated, in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BombEffect {
    pub x: i32,
    pub y: i32,
}

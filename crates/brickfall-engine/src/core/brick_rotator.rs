use super::brick::{BrickKind, BrickShape};

/// Tracks the active brick and its index into the brick's rotation sequence.
///
/// The current shape is always derived from `kind.shapes()[rotation]`, never
/// stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickRotator {
    kind: BrickKind,
    rotation: usize,
}

/// A rotation candidate returned by [`BrickRotator::next_shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextShape {
    shape: BrickShape,
    rotation: usize,
}

impl NextShape {
    #[must_use]
    pub fn shape(&self) -> &BrickShape {
        &self.shape
    }

    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation
    }
}

impl BrickRotator {
    /// Starts tracking `kind` in its spawn orientation.
    #[must_use]
    pub fn new(kind: BrickKind) -> Self {
        Self { kind, rotation: 0 }
    }

    #[must_use]
    pub fn kind(&self) -> BrickKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub fn current_shape(&self) -> BrickShape {
        self.kind.shapes()[self.rotation]
    }

    /// Returns the shape one step further in the rotation sequence, without
    /// committing to it.
    #[must_use]
    pub fn next_shape(&self) -> NextShape {
        let shapes = self.kind.shapes();
        let rotation = (self.rotation + 1) % shapes.len();
        NextShape {
            shape: shapes[rotation],
            rotation,
        }
    }

    /// Commits a rotation index, wrapping it into the sequence length.
    pub fn set_rotation(&mut self, rotation: usize) {
        self.rotation = rotation % self.kind.shapes().len();
    }

    /// Replaces the tracked brick and resets the rotation to the spawn state.
    pub fn set_brick(&mut self, kind: BrickKind) {
        self.kind = kind;
        self.rotation = 0;
    }
}

/// Monotonic score counter.
///
/// Instead of a bindable property, every change bumps a revision number;
/// observers compare [`Score::revision`] against the last value they saw to
/// decide whether to redraw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    value: usize,
    revision: u64,
}

impl Score {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: 0,
            revision: 0,
        }
    }

    #[must_use]
    pub const fn value(&self) -> usize {
        self.value
    }

    /// Incremented on every [`add`](Self::add) and [`reset`](Self::reset).
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn add(&mut self, points: usize) {
        self.value += points;
        self.revision += 1;
    }

    pub fn reset(&mut self) {
        self.value = 0;
        self.revision += 1;
    }
}

use serde::{Deserialize, Serialize};

/// Largest number of rows a single brick can complete (the height of a shape).
pub const MAX_LINES_PER_CLEAR: usize = 4;

/// Per-game counters kept alongside the [`Score`](super::Score).
///
/// - **Completed bricks**: bricks locked, bombs included
/// - **Line clear distribution**: how many locks cleared 0, 1, 2, 3 or 4 rows
/// - **Bombs detonated**: bomb bricks that exploded instead of merging
///
/// Rows removed by the row-clearer power-up are not line clears and are not
/// counted here.
///
/// # Example
///
/// ```
/// use brickfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_brick_drop(4);
/// stats.complete_brick_drop(0);
///
/// assert_eq!(stats.completed_bricks(), 2);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter(), &[1, 0, 0, 0, 1]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    completed_bricks: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; MAX_LINES_PER_CLEAR + 1],
    bombs_detonated: usize,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            completed_bricks: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; MAX_LINES_PER_CLEAR + 1],
            bombs_detonated: 0,
        }
    }

    #[must_use]
    pub const fn completed_bricks(&self) -> usize {
        self.completed_bricks
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Histogram of locks by number of rows cleared; index `n` counts locks
    /// that cleared exactly `n` rows.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; MAX_LINES_PER_CLEAR + 1] {
        &self.line_cleared_counter
    }

    #[must_use]
    pub const fn bombs_detonated(&self) -> usize {
        self.bombs_detonated
    }

    /// Records one locked brick and the rows its lock cleared.
    pub const fn complete_brick_drop(&mut self, cleared_lines: usize) {
        self.completed_bricks += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
    }

    pub const fn record_bomb(&mut self) {
        self.bombs_detonated += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut stats = GameStats::new();
        stats.complete_brick_drop(1);
        stats.complete_brick_drop(1);
        stats.complete_brick_drop(3);
        stats.record_bomb();
        assert_eq!(stats.completed_bricks(), 3);
        assert_eq!(stats.total_cleared_lines(), 5);
        assert_eq!(stats.line_cleared_counter(), &[0, 2, 0, 1, 0]);
        assert_eq!(stats.bombs_detonated(), 1);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut stats = GameStats::new();
        stats.complete_brick_drop(2);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"total_cleared_lines\":2"));
        let back: GameStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}

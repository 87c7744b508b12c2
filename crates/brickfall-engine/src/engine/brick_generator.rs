use std::fmt::Write as _;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::BrickKind;

/// Source of bricks with one brick of lookahead.
///
/// [`peek_next`](Self::peek_next) always reports the brick the following
/// [`next_brick`](Self::next_brick) call will return.
pub trait BrickGenerator {
    /// Removes and returns the upcoming brick.
    fn next_brick(&mut self) -> BrickKind;

    /// Returns the upcoming brick without consuming it.
    fn peek_next(&self) -> BrickKind;
}

/// Seed for deterministic brick generation.
///
/// A 128-bit seed for the generator's PRNG. Two generators built from the same
/// seed yield the same brick sequence, which is what makes recordings
/// replayable.
///
/// # Example
///
/// ```
/// use brickfall_engine::{BrickGenerator, BrickSeed, RandomBrickGenerator};
/// use rand::Rng as _;
///
/// let seed: BrickSeed = rand::rng().random();
/// let mut a = RandomBrickGenerator::with_seed(seed);
/// let mut b = RandomBrickGenerator::with_seed(seed);
/// assert_eq!(a.next_brick(), b.next_brick());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickSeed([u8; 16]);

impl BrickSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Parses a 32-digit hexadecimal seed.
    pub fn from_hex(hex_str: &str) -> Result<Self, String> {
        if hex_str.len() != 32 {
            return Err(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            ));
        }
        let num = u128::from_str_radix(hex_str, 16)
            .map_err(|e| format!("invalid hex: {hex_str} ({e})"))?;
        Ok(Self(num.to_be_bytes()))
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        hex_str
    }
}

impl Serialize for BrickSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for BrickSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

impl Distribution<BrickSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BrickSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BrickSeed(seed)
    }
}

/// Draws every brick independently and uniformly at random.
///
/// There is no 7-bag guarantee: any kind may repeat any number of times.
///
/// # Example
///
/// ```
/// use brickfall_engine::{BrickGenerator, RandomBrickGenerator};
///
/// let mut generator = RandomBrickGenerator::new();
/// let upcoming = generator.peek_next();
/// assert_eq!(generator.next_brick(), upcoming);
/// ```
#[derive(Debug, Clone)]
pub struct RandomBrickGenerator {
    rng: Pcg32,
    next: BrickKind,
}

impl Default for RandomBrickGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomBrickGenerator {
    /// Creates a generator seeded from the thread-local RNG.
    ///
    /// For a reproducible sequence, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: BrickSeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.0);
        let next = rng.random();
        Self { rng, next }
    }
}

impl BrickGenerator for RandomBrickGenerator {
    fn next_brick(&mut self) -> BrickKind {
        let upcoming = self.rng.random();
        std::mem::replace(&mut self.next, upcoming)
    }

    fn peek_next(&self) -> BrickKind {
        self.next
    }
}

/// Cycles through a fixed list of bricks.
///
/// Useful for tests and puzzles where the brick order must be known.
#[derive(Debug, Clone)]
pub struct SequenceBrickGenerator {
    sequence: Vec<BrickKind>,
    position: usize,
}

impl SequenceBrickGenerator {
    /// # Panics
    ///
    /// Panics if `sequence` is empty.
    #[must_use]
    pub fn new(sequence: Vec<BrickKind>) -> Self {
        assert!(!sequence.is_empty(), "brick sequence must not be empty");
        Self {
            sequence,
            position: 0,
        }
    }
}

impl BrickGenerator for SequenceBrickGenerator {
    fn next_brick(&mut self) -> BrickKind {
        let kind = self.sequence[self.position];
        self.position = (self.position + 1) % self.sequence.len();
        kind
    }

    fn peek_next(&self) -> BrickKind {
        self.sequence[self.position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_from_bytes(bytes: [u8; 16]) -> BrickSeed {
        BrickSeed(bytes)
    }

    #[test]
    fn test_seed_known_value_sequential_bytes() {
        let seed = seed_from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");

        let deserialized: BrickSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
    }

    #[test]
    fn test_seed_accepts_uppercase_hex() {
        let seed = BrickSeed::from_hex("0123456789ABCDEFFEDCBA9876543210").unwrap();
        assert_eq!(seed.to_hex(), "0123456789abcdeffedcba9876543210");
    }

    #[test]
    fn test_seed_rejects_bad_input() {
        for json in [
            "\"\"",
            "\"0123456789abcdef0123456789abcde\"",
            "\"0123456789abcdef0123456789abcdef0\"",
            "\"ghijklmnopqrstuvwxyzghijklmnopqr\"",
        ] {
            let err = serde_json::from_str::<BrickSeed>(json).unwrap_err();
            assert!(err.to_string().contains("invalid hex"), "{json}: {err}");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let seed = seed_from_bytes([0x42; 16]);
        let mut a = RandomBrickGenerator::with_seed(seed);
        let mut b = RandomBrickGenerator::with_seed(seed);
        for _ in 0..50 {
            assert_eq!(a.peek_next(), b.peek_next());
            assert_eq!(a.next_brick(), b.next_brick());
        }
    }

    #[test]
    fn test_peek_matches_next() {
        let mut generator = RandomBrickGenerator::with_seed(seed_from_bytes([7; 16]));
        for _ in 0..50 {
            let peeked = generator.peek_next();
            assert_eq!(peeked, generator.peek_next());
            assert_eq!(generator.next_brick(), peeked);
        }
    }

    #[test]
    fn test_sequence_generator_cycles() {
        let mut generator = SequenceBrickGenerator::new(vec![BrickKind::I, BrickKind::O]);
        assert_eq!(generator.peek_next(), BrickKind::I);
        assert_eq!(generator.next_brick(), BrickKind::I);
        assert_eq!(generator.peek_next(), BrickKind::O);
        assert_eq!(generator.next_brick(), BrickKind::O);
        assert_eq!(generator.next_brick(), BrickKind::I);
    }
}

use std::{
    fmt::{self, Write as _},
    ops::Range,
};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{InvalidGapRangeError, Obstacle};

/// Seed for a reproducible obstacle course.
///
/// A 128-bit seed for the PCG32 generator that draws gap heights. The same
/// seed always yields the same sequence of obstacles, so generations can be
/// replayed and compared.
///
/// Serialized as a 32-character hex string.
///
/// # Example
///
/// ```
/// use oxiflap_engine::{CourseSeed, ObstacleGenerator};
/// use rand::Rng as _;
///
/// let seed: CourseSeed = rand::rng().random();
/// let mut a = ObstacleGenerator::with_seed(seed);
/// let mut b = ObstacleGenerator::with_seed(seed);
///
/// assert_eq!(a.next_obstacle(600.0), b.next_obstacle(600.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseSeed([u8; 16]);

impl CourseSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }
}

impl fmt::Display for CourseSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl Serialize for CourseSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{self}").map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for CourseSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self::from_u128(num))
    }
}

impl Distribution<CourseSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> CourseSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        CourseSeed(seed)
    }
}

/// Draws the obstacles of one course.
///
/// Gap heights are uniform over [`Obstacle::GAP_CENTER_RANGE`] unless a
/// narrower range is given with [`Self::with_gap_range`].
#[derive(Debug, Clone)]
pub struct ObstacleGenerator {
    seed: CourseSeed,
    rng: Pcg32,
    gap_range: Range<i32>,
}

impl Default for ObstacleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleGenerator {
    /// Creates a generator with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible course.
    #[must_use]
    pub fn with_seed(seed: CourseSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
            gap_range: Obstacle::GAP_CENTER_RANGE,
        }
    }

    /// Like [`Self::with_seed`], but drawing gap centers from `gap_range`.
    pub fn with_gap_range(
        seed: CourseSeed,
        gap_range: Range<i32>,
    ) -> Result<Self, InvalidGapRangeError> {
        if gap_range.is_empty() {
            return Err(InvalidGapRangeError {
                start: gap_range.start,
                end: gap_range.end,
            });
        }
        Ok(Self {
            gap_range,
            ..Self::with_seed(seed)
        })
    }

    #[must_use]
    pub fn seed(&self) -> CourseSeed {
        self.seed
    }

    #[must_use]
    pub fn gap_range(&self) -> Range<i32> {
        self.gap_range.clone()
    }

    /// Spawns the next obstacle of the course at horizontal position `x`.
    pub fn next_obstacle(&mut self, x: f32) -> Obstacle {
        Obstacle::spawn(x, self.gap_range.clone(), &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod course_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: CourseSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: CourseSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            let seed = CourseSeed::from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        }

        #[test]
        fn test_deserialize_uppercase_hex() {
            let json = "\"0123456789ABCDEFFEDCBA9876543210\"";
            let deserialized: CourseSeed = serde_json::from_str(json).unwrap();
            assert_eq!(
                deserialized,
                CourseSeed::from_u128(0x0123_4567_89ab_cdef_fedc_ba98_7654_3210)
            );
        }

        #[test]
        fn test_error_wrong_length_or_characters() {
            for json in [
                "\"\"",
                "\"0123456789abcdef0123456789abcde\"",
                "\"0123456789abcdef0123456789abcdef0\"",
                "\"ghijklmnopqrstuvwxyzghijklmnopqr\"",
            ] {
                let result: Result<CourseSeed, _> = serde_json::from_str(json);
                let err_msg = result.unwrap_err().to_string();
                assert!(err_msg.contains("invalid hex"), "{json}: {err_msg}");
            }
        }
    }

    #[test]
    fn test_same_seed_same_course() {
        let seed = CourseSeed::from_u128(0x1234);
        let mut a = ObstacleGenerator::with_seed(seed);
        let mut b = ObstacleGenerator::with_seed(seed);
        for _ in 0..20 {
            assert_eq!(a.next_obstacle(600.0), b.next_obstacle(600.0));
        }
    }

    #[test]
    fn test_custom_gap_range() {
        let mut generator =
            ObstacleGenerator::with_gap_range(CourseSeed::from_u128(1), 300..301).unwrap();
        for _ in 0..10 {
            assert_eq!(generator.next_obstacle(600.0).top_edge(), 300.0);
        }
    }

    #[test]
    fn test_empty_gap_range_is_rejected() {
        let err =
            ObstacleGenerator::with_gap_range(CourseSeed::from_u128(1), 300..300).unwrap_err();
        assert_eq!(err, InvalidGapRangeError { start: 300, end: 300 });
        assert_eq!(err.to_string(), "gap center range is empty: 300..300");
    }
}

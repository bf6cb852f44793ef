//! Simulation core for a population of flapping avatars.
//!
//! - [`core`] holds the entities and their motion laws ([`Avatar`], [`Obstacle`],
//!   [`Ground`]) plus the silhouette-based [`collides`] predicate.
//! - [`engine`] drives them: the obstacle course generator, the [`Controller`]
//!   capability, the per-generation tick loop ([`Generation`]) and the
//!   [`Session`] that carries counters across generations.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("gap center range is empty: {start}..{end}")]
pub struct InvalidGapRangeError {
    pub start: i32,
    pub end: i32,
}

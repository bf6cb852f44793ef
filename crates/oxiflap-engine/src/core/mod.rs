//! Entities of the playfield and their motion laws.
//!
//! All coordinates are in playfield pixels with the origin at the top-left
//! corner; `y` grows downwards. Every entity scrolls with the same
//! [`SCROLL_VELOCITY`], so the world moves uniformly past the avatars.

pub use self::{avatar::*, collision::*, ground::*, mask::*, obstacle::*};

pub(crate) mod avatar;
pub(crate) mod collision;
pub(crate) mod ground;
pub(crate) mod mask;
pub(crate) mod obstacle;

/// Width of the visible playfield.
pub const PLAYFIELD_WIDTH: f32 = 500.0;
/// Height of the visible playfield.
pub const PLAYFIELD_HEIGHT: f32 = 700.0;
/// Top of the ground strip; avatars reaching it are out of bounds.
pub const GROUND_Y: f32 = 640.0;
/// Horizontal distance every obstacle and the ground travel per tick.
pub const SCROLL_VELOCITY: f32 = 6.0;

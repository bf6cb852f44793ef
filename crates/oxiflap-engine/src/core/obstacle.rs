use std::{ops::Range, sync::LazyLock};

use rand::Rng;

use super::{SCROLL_VELOCITY, mask::Mask};

static PIPE_MASK: LazyLock<Mask> =
    LazyLock::new(|| Mask::filled(Obstacle::WIDTH, Obstacle::HEIGHT));

/// A pipe pair: a top sprite hanging from above and a bottom sprite rising
/// from below, separated by a vertical gap of [`Obstacle::GAP`] pixels.
///
/// ```text
///        x      x + WIDTH
///        ┌──────┐
///        │ top  │
///        └──────┘  ← top_edge    (gap center height)
///
///                    GAP
///
///        ┌──────┐  ← bottom_edge (top_edge + GAP)
///        │bottom│
///        └──────┘
/// ```
///
/// Only [`advance`](Self::advance) mutates the geometry; the `passed` flag
/// is set once by the evaluation loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    x: f32,
    top_edge: f32,
    passed: bool,
}

impl Obstacle {
    pub const WIDTH: u32 = 104;
    pub const HEIGHT: u32 = 640;
    pub const GAP: f32 = 195.0;
    pub const SPAWN_X: f32 = 600.0;
    /// Range the gap center (bottom edge of the top sprite) is drawn from.
    ///
    /// Keeps the gap away from the extreme top and bottom of the playfield.
    pub const GAP_CENTER_RANGE: Range<i32> = 50..450;

    /// Creates an obstacle at `x` whose gap starts at `top_edge`.
    #[must_use]
    pub fn new(x: f32, top_edge: f32) -> Self {
        Self {
            x,
            top_edge,
            passed: false,
        }
    }

    /// Creates an obstacle at `x` with a gap center drawn uniformly from `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty.
    pub fn spawn<R>(x: f32, range: Range<i32>, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        #[expect(clippy::cast_precision_loss)]
        let top_edge = rng.random_range(range) as f32;
        Self::new(x, top_edge)
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Right edge of both sprites.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + Self::WIDTH as f32
    }

    /// Bottom edge of the top sprite; the upper boundary of the gap.
    #[must_use]
    pub fn top_edge(&self) -> f32 {
        self.top_edge
    }

    /// Top edge of the bottom sprite; the lower boundary of the gap.
    #[must_use]
    pub fn bottom_edge(&self) -> f32 {
        self.top_edge + Self::GAP
    }

    /// World `y` of the top sprite's upper-left corner.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn top_sprite_y(&self) -> f32 {
        self.top_edge - Self::HEIGHT as f32
    }

    /// World `y` of the bottom sprite's upper-left corner.
    #[must_use]
    pub fn bottom_sprite_y(&self) -> f32 {
        self.bottom_edge()
    }

    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.passed
    }

    /// Marks the obstacle as passed.
    ///
    /// Returns `true` only on the first call, so each obstacle scores once.
    pub fn mark_passed(&mut self) -> bool {
        !std::mem::replace(&mut self.passed, true)
    }

    /// Whether both sprites have scrolled past the left boundary.
    #[must_use]
    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }

    /// Silhouette of either sprite; both are solid rectangles.
    #[must_use]
    pub fn mask(&self) -> &'static Mask {
        &PIPE_MASK
    }

    /// Scrolls the obstacle left by the world scroll velocity.
    pub fn advance(&mut self) {
        self.x -= SCROLL_VELOCITY;
    }
}

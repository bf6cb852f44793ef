use super::{GROUND_Y, SCROLL_VELOCITY};

/// Scrolling ground strip drawn as two tiles that leapfrog each other.
///
/// Purely cosmetic: it scrolls at the same speed as the obstacles but never
/// takes part in collision tests (the ground line is [`GROUND_Y`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Ground {
    y: f32,
    x1: f32,
    x2: f32,
}

impl Default for Ground {
    fn default() -> Self {
        Self::new(GROUND_Y)
    }
}

impl Ground {
    pub const TILE_WIDTH: f32 = 672.0;

    #[must_use]
    pub fn new(y: f32) -> Self {
        Self {
            y,
            x1: 0.0,
            x2: Self::TILE_WIDTH,
        }
    }

    #[must_use]
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Left edges of the two tiles.
    #[must_use]
    pub fn tile_offsets(&self) -> [f32; 2] {
        [self.x1, self.x2]
    }

    pub fn advance(&mut self) {
        self.x1 -= SCROLL_VELOCITY;
        self.x2 -= SCROLL_VELOCITY;
        if self.x1 + Self::TILE_WIDTH < 0.0 {
            self.x1 = self.x2 + Self::TILE_WIDTH;
        }
        if self.x2 + Self::TILE_WIDTH < 0.0 {
            self.x2 = self.x1 + Self::TILE_WIDTH;
        }
    }
}

use std::sync::LazyLock;

use super::mask::Mask;

static AVATAR_MASK: LazyLock<Mask> =
    LazyLock::new(|| Mask::ellipse(Avatar::WIDTH, Avatar::HEIGHT));

/// The controlled entity: a bird that falls under gravity and flaps upwards.
///
/// The horizontal position is fixed for the whole session; only `y` moves.
/// Motion is integrated per tick from the ticks elapsed since the last
/// [`impulse`](Self::impulse), so each flap restarts a parabolic arc:
///
/// ```text
/// d = v·t + ½·a·t²      (a = 3, clamped to +16 per tick)
/// d = d - 2             (while rising)
/// ```
///
/// # Example
///
/// ```
/// use oxiflap_engine::Avatar;
///
/// let mut avatar = Avatar::new(230.0, 350.0);
/// avatar.advance();
/// assert_eq!(avatar.y(), 351.5);
///
/// avatar.impulse();
/// avatar.advance();
/// assert!(avatar.y() < 351.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    x: f32,
    y: f32,
    velocity: f32,
    ticks_since_impulse: u32,
    impulse_height: f32,
    tilt: f32,
}

impl Avatar {
    pub const WIDTH: u32 = 68;
    pub const HEIGHT: u32 = 48;
    pub const START_X: f32 = 230.0;
    pub const START_Y: f32 = 350.0;

    pub const GRAVITY: f32 = 3.0;
    pub const IMPULSE_VELOCITY: f32 = -10.5;
    pub const TERMINAL_DISPLACEMENT: f32 = 16.0;
    pub const RISING_BIAS: f32 = 2.0;

    pub const MAX_TILT: f32 = 25.0;
    pub const MIN_TILT: f32 = -90.0;
    pub const TILT_VELOCITY: f32 = 20.0;
    /// Band below the last impulse height in which the avatar keeps tilting up.
    pub const TILT_HOLD_BAND: f32 = 50.0;

    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            velocity: 0.0,
            ticks_since_impulse: 0,
            impulse_height: y,
            tilt: 0.0,
        }
    }

    /// Creates an avatar at the session's starting position.
    #[must_use]
    pub fn at_start() -> Self {
        Self::new(Self::START_X, Self::START_Y)
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[must_use]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[must_use]
    pub fn ticks_since_impulse(&self) -> u32 {
        self.ticks_since_impulse
    }

    /// Current rotation in degrees; positive is nose up.
    #[must_use]
    pub fn tilt(&self) -> f32 {
        self.tilt
    }

    /// Bottom edge of the bounding box.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + Self::HEIGHT as f32
    }

    /// Silhouette used for collision tests. Tilt does not rotate it.
    #[must_use]
    pub fn mask(&self) -> &'static Mask {
        &AVATAR_MASK
    }

    /// Vertical displacement for the next tick, given the ticks elapsed
    /// since the last impulse (including the next one).
    #[must_use]
    pub fn displacement(velocity: f32, ticks: u32) -> f32 {
        #[expect(clippy::cast_precision_loss)]
        let t = ticks as f32;
        let d = velocity * t + 0.5 * Self::GRAVITY * t * t;
        let d = d.min(Self::TERMINAL_DISPLACEMENT);
        if d < 0.0 { d - Self::RISING_BIAS } else { d }
    }

    /// Moves the avatar by one tick and updates its tilt.
    pub fn advance(&mut self) {
        self.ticks_since_impulse += 1;
        let d = Self::displacement(self.velocity, self.ticks_since_impulse);
        self.y += d;

        if d < 0.0 || self.y < self.impulse_height + Self::TILT_HOLD_BAND {
            self.tilt = self.tilt.max(Self::MAX_TILT);
        } else if self.tilt > Self::MIN_TILT {
            self.tilt = (self.tilt - Self::TILT_VELOCITY).max(Self::MIN_TILT);
        }
    }

    /// Flaps: restarts the arc with a fixed upward velocity from the current height.
    pub fn impulse(&mut self) {
        self.velocity = Self::IMPULSE_VELOCITY;
        self.ticks_since_impulse = 0;
        self.impulse_height = self.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_fall_sequence() {
        let mut avatar = Avatar::at_start();
        let expected = [351.5, 357.5, 371.0, 387.0, 403.0];
        for y in expected {
            avatar.advance();
            assert!((avatar.y() - y).abs() < 1e-4, "{} != {y}", avatar.y());
        }
    }

    #[test]
    fn test_displacement_never_exceeds_terminal_clamp() {
        let mut avatar = Avatar::at_start();
        for tick in 0..200 {
            let before = avatar.y();
            avatar.advance();
            assert!(
                avatar.y() - before <= Avatar::TERMINAL_DISPLACEMENT,
                "tick {tick}: moved {}",
                avatar.y() - before
            );
            if tick % 7 == 0 {
                avatar.impulse();
            }
        }
    }

    #[test]
    fn test_impulse_resets_velocity_and_tick_counter() {
        let mut avatar = Avatar::at_start();
        for _ in 0..5 {
            avatar.advance();
        }
        avatar.impulse();
        assert_eq!(avatar.velocity(), Avatar::IMPULSE_VELOCITY);
        assert_eq!(avatar.ticks_since_impulse(), 0);

        // repeated impulses are idempotent
        avatar.advance();
        avatar.impulse();
        avatar.impulse();
        assert_eq!(avatar.velocity(), Avatar::IMPULSE_VELOCITY);
        assert_eq!(avatar.ticks_since_impulse(), 0);
    }

    #[test]
    fn test_rising_displacement_is_biased_upwards() {
        // v·t + 1.5·t² = -10.5 + 1.5 = -9, biased by -2
        assert!((Avatar::displacement(Avatar::IMPULSE_VELOCITY, 1) + 11.0).abs() < 1e-6);
        // the apex of the arc is not biased
        assert!(Avatar::displacement(Avatar::IMPULSE_VELOCITY, 7).abs() < 1e-6);
    }

    #[test]
    fn test_impulse_arc_rises_then_falls() {
        let mut avatar = Avatar::at_start();
        avatar.impulse();
        let mut ys = vec![];
        for _ in 0..10 {
            avatar.advance();
            ys.push(avatar.y());
        }
        // six rising ticks: 11 + 17 + 20 + 20 + 17 + 11
        assert!((ys[5] - (350.0 - 96.0)).abs() < 1e-4);
        assert!(ys[9] > ys[6]);
    }

    #[test]
    fn test_tilt_goes_up_while_rising_and_decays_while_falling() {
        let mut avatar = Avatar::at_start();
        avatar.impulse();
        avatar.advance();
        assert_eq!(avatar.tilt(), Avatar::MAX_TILT);

        for _ in 0..40 {
            avatar.advance();
        }
        assert_eq!(avatar.tilt(), Avatar::MIN_TILT);
    }

    #[test]
    fn test_tilt_holds_within_band_below_impulse_height() {
        let mut avatar = Avatar::at_start();
        avatar.impulse();
        // six rising ticks, the apex, then the first falling tick
        for _ in 0..8 {
            avatar.advance();
        }
        assert!(Avatar::displacement(avatar.velocity(), avatar.ticks_since_impulse()) > 0.0);
        assert!(avatar.y() < Avatar::START_Y + Avatar::TILT_HOLD_BAND);
        assert_eq!(avatar.tilt(), Avatar::MAX_TILT);
    }
}

use super::{avatar::Avatar, obstacle::Obstacle};

/// Rounds half away from zero to the nearest pixel.
#[expect(clippy::cast_possible_truncation)]
fn to_pixel(v: f32) -> i32 {
    v.round() as i32
}

/// Tests whether the avatar's silhouette overlaps either sprite of the obstacle.
///
/// Both sprites are placed relative to the avatar's top-left corner, so the
/// traversable region is exactly the obstacle's declared gap:
///
/// - rows `< top_edge` belong to the top sprite,
/// - rows `>= bottom_edge` belong to the bottom sprite.
///
/// # Example
///
/// ```
/// use oxiflap_engine::{Avatar, Obstacle, collides};
///
/// let avatar = Avatar::new(230.0, 300.0);
/// let inside = Obstacle::new(200.0, 250.0);
/// let too_low = Obstacle::new(200.0, 320.0);
///
/// assert!(!collides(&avatar, &inside));
/// assert!(collides(&avatar, &too_low));
/// ```
#[must_use]
pub fn collides(avatar: &Avatar, obstacle: &Obstacle) -> bool {
    let avatar_mask = avatar.mask();
    let pipe_mask = obstacle.mask();
    let dx = to_pixel(obstacle.x()) - to_pixel(avatar.x());
    let avatar_y = to_pixel(avatar.y());
    let top_offset = (dx, to_pixel(obstacle.top_sprite_y()) - avatar_y);
    let bottom_offset = (dx, to_pixel(obstacle.bottom_sprite_y()) - avatar_y);

    avatar_mask.overlap(pipe_mask, top_offset).is_some()
        || avatar_mask.overlap(pipe_mask, bottom_offset).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    const AVATAR_HEIGHT: f32 = Avatar::HEIGHT as f32;

    /// Obstacle horizontally covering the whole avatar at the start position.
    fn obstacle_over_avatar(top_edge: f32) -> Obstacle {
        Obstacle::new(Avatar::START_X - 10.0, top_edge)
    }

    #[test]
    fn test_no_collision_strictly_inside_gap() {
        let obstacle = obstacle_over_avatar(200.0);
        // touching the top edge from inside
        assert!(!collides(&Avatar::new(Avatar::START_X, 200.0), &obstacle));
        // touching the bottom edge from inside
        let y = obstacle.bottom_edge() - AVATAR_HEIGHT;
        assert!(!collides(&Avatar::new(Avatar::START_X, y), &obstacle));
        // anywhere in between
        let mut y = 200.0;
        while y + AVATAR_HEIGHT <= obstacle.bottom_edge() {
            assert!(!collides(&Avatar::new(Avatar::START_X, y), &obstacle), "y = {y}");
            y += 1.0;
        }
    }

    #[test]
    fn test_collision_when_crossing_top_edge() {
        let obstacle = obstacle_over_avatar(200.0);
        assert!(collides(&Avatar::new(Avatar::START_X, 199.0), &obstacle));
        assert!(collides(&Avatar::new(Avatar::START_X, 150.0), &obstacle));
    }

    #[test]
    fn test_collision_when_crossing_bottom_edge() {
        let obstacle = obstacle_over_avatar(200.0);
        let y = obstacle.bottom_edge() - AVATAR_HEIGHT + 1.0;
        assert!(collides(&Avatar::new(Avatar::START_X, y), &obstacle));
        assert!(collides(&Avatar::new(Avatar::START_X, 500.0), &obstacle));
    }

    #[test]
    fn test_no_collision_without_horizontal_overlap() {
        let avatar = Avatar::new(Avatar::START_X, 0.0);
        let ahead = Obstacle::new(Avatar::START_X + Avatar::WIDTH as f32, 200.0);
        let behind = Obstacle::new(Avatar::START_X - Obstacle::WIDTH as f32, 200.0);
        assert!(!collides(&avatar, &ahead));
        assert!(!collides(&avatar, &behind));
    }

    #[test]
    fn test_positions_are_rounded_half_away_from_zero() {
        let obstacle = obstacle_over_avatar(200.0);
        // 199.5 rounds to 200: inside the gap
        assert!(!collides(&Avatar::new(Avatar::START_X, 199.5), &obstacle));
        // 199.4 rounds to 199: one row inside the top sprite
        assert!(collides(&Avatar::new(Avatar::START_X, 199.4), &obstacle));
    }
}

//! Hand-written gap follower.

use oxiflap_engine::{Action, Avatar, Controller, Obstacle, Observation};

/// Flaps whenever the avatar's bottom edge sinks to within `margin` pixels
/// of the gap's bottom edge, or below it.
///
/// The observation only carries absolute distances. Inside the gap they sum
/// to [`Obstacle::GAP`]; outside it they differ by the gap, and the larger
/// one tells on which side the avatar is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedController {
    margin: f32,
}

impl Default for ScriptedController {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MARGIN)
    }
}

impl ScriptedController {
    pub const DEFAULT_MARGIN: f32 = 30.0;

    #[must_use]
    pub fn new(margin: f32) -> Self {
        Self { margin }
    }

    #[must_use]
    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Signed `bottom_edge - y`: negative once the avatar's top is below the gap.
    #[must_use]
    pub fn bottom_clearance(observation: &Observation) -> f32 {
        let Observation {
            top_distance,
            bottom_distance,
            ..
        } = *observation;
        let inside_gap = (top_distance + bottom_distance - Obstacle::GAP).abs() < 1e-2;
        if inside_gap || top_distance < bottom_distance {
            bottom_distance
        } else {
            -bottom_distance
        }
    }
}

impl Controller for ScriptedController {
    fn observe_and_act(&mut self, observation: &Observation) -> Action {
        #[expect(clippy::cast_precision_loss)]
        let threshold = Avatar::HEIGHT as f32 + self.margin;
        let flap = Self::bottom_clearance(observation) < threshold;
        Action::from(if flap { 1.0 } else { 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use oxiflap_engine::{
        CourseSeed, Generation, GenerationOutcome, NoopObserver, ObstacleGenerator, Session,
    };

    use super::*;

    fn observe(y: f32, obstacle: &Obstacle) -> Observation {
        Observation::new(&Avatar::new(Avatar::START_X, y), obstacle)
    }

    #[test]
    fn test_bottom_clearance_is_signed() {
        let obstacle = Obstacle::new(600.0, 200.0);
        // above the gap, inside it, below it
        for (y, expected) in [(100.0, 295.0), (250.0, 145.0), (420.0, -25.0)] {
            let clearance = ScriptedController::bottom_clearance(&observe(y, &obstacle));
            assert!((clearance - expected).abs() < 1e-4, "y = {y}: {clearance}");
        }
    }

    #[test]
    fn test_flaps_near_the_bottom_edge() {
        let obstacle = Obstacle::new(600.0, 200.0);
        let mut controller = ScriptedController::default();
        // bottom edge at 395: flap once y + 48 + 30 > 395
        assert!(!controller.observe_and_act(&observe(100.0, &obstacle)).should_flap());
        assert!(!controller.observe_and_act(&observe(310.0, &obstacle)).should_flap());
        assert!(controller.observe_and_act(&observe(320.0, &obstacle)).should_flap());
        assert!(controller.observe_and_act(&observe(500.0, &obstacle)).should_flap());
    }

    #[test]
    fn test_clears_a_long_course() {
        for seed in 0..8 {
            let mut session = Session::new();
            let course = ObstacleGenerator::with_seed(CourseSeed::from_u128(seed));
            let mut generation =
                Generation::new(&mut session, [ScriptedController::default()], course);
            let report = generation.run(&mut session, &mut NoopObserver, Some(1500));
            assert_eq!(report.outcome, GenerationOutcome::TickLimitReached, "seed {seed}");
            assert!(report.score >= 20, "seed {seed}: {}", report.score);
        }
    }
}

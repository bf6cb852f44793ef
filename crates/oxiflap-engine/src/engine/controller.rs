use arrayvec::ArrayVec;

use crate::{Avatar, Obstacle};

/// What a controller perceives each tick.
///
/// Distances are absolute, so the sign (above or below an edge) is only
/// recoverable by combining them with the fixed [`Obstacle::GAP`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Avatar's vertical position (top of its bounding box).
    pub y: f32,
    /// `|y - top_edge|` of the nearest obstacle.
    pub top_distance: f32,
    /// `|y - bottom_edge|` of the nearest obstacle.
    pub bottom_distance: f32,
}

impl Observation {
    pub const LEN: usize = 3;

    #[must_use]
    pub fn new(avatar: &Avatar, nearest: &Obstacle) -> Self {
        Self {
            y: avatar.y(),
            top_distance: (avatar.y() - nearest.top_edge()).abs(),
            bottom_distance: (avatar.y() - nearest.bottom_edge()).abs(),
        }
    }

    #[must_use]
    pub fn to_array(&self) -> [f32; Self::LEN] {
        [self.y, self.top_distance, self.bottom_distance]
    }
}

/// Output of a controller: up to [`Action::MAX_LEN`] numeric components.
///
/// Only the first component is interpreted: the avatar flaps when it
/// exceeds [`Action::FLAP_THRESHOLD`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Action(ArrayVec<f32, { Action::MAX_LEN }>);

impl Action {
    pub const MAX_LEN: usize = 4;
    pub const FLAP_THRESHOLD: f32 = 0.5;

    /// An action that never flaps.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Creates an action from its first `MAX_LEN` outputs.
    #[must_use]
    pub fn from_outputs(outputs: &[f32]) -> Self {
        Self(outputs.iter().copied().take(Self::MAX_LEN).collect())
    }

    #[must_use]
    pub fn outputs(&self) -> &[f32] {
        &self.0
    }

    #[must_use]
    pub fn should_flap(&self) -> bool {
        self.0.first().is_some_and(|&v| v > Self::FLAP_THRESHOLD)
    }
}

impl From<f32> for Action {
    fn from(value: f32) -> Self {
        Self::from_outputs(&[value])
    }
}

/// Decision-making capability bound to one avatar.
///
/// Any neuroevolution network, learned policy or scripted heuristic can
/// drive an avatar by implementing this trait.
pub trait Controller {
    fn observe_and_act(&mut self, observation: &Observation) -> Action;
}

impl<C> Controller for &mut C
where
    C: Controller + ?Sized,
{
    fn observe_and_act(&mut self, observation: &Observation) -> Action {
        (**self).observe_and_act(observation)
    }
}

impl<C> Controller for Box<C>
where
    C: Controller + ?Sized,
{
    fn observe_and_act(&mut self, observation: &Observation) -> Action {
        (**self).observe_and_act(observation)
    }
}

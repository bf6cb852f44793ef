use std::ops::ControlFlow;

use crate::{Avatar, Ground, Obstacle};

/// Read-only view of the world after a tick.
///
/// Handed to the [`FrameObserver`] once per tick. Nothing reachable from a
/// snapshot can mutate the simulation.
#[derive(Debug, Clone)]
pub struct WorldSnapshot<'a> {
    pub(crate) avatars: Vec<&'a Avatar>,
    pub(crate) obstacles: &'a [Obstacle],
    pub(crate) nearest: Option<usize>,
    pub(crate) ground: &'a Ground,
    pub(crate) tick: u64,
    pub(crate) score: u32,
    pub(crate) generation: u32,
    pub(crate) best_score: u32,
}

impl<'a> WorldSnapshot<'a> {
    /// Live avatars in controller order.
    #[must_use]
    pub fn avatars(&self) -> &[&'a Avatar] {
        &self.avatars
    }

    /// Obstacles in flight, oldest first.
    #[must_use]
    pub fn obstacles(&self) -> &'a [Obstacle] {
        self.obstacles
    }

    /// The obstacle every controller observes, if any.
    #[must_use]
    pub fn nearest_obstacle(&self) -> Option<&'a Obstacle> {
        self.nearest.and_then(|i| self.obstacles.get(i))
    }

    #[must_use]
    pub fn ground(&self) -> &'a Ground {
        self.ground
    }

    /// Ticks completed in the current generation.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Obstacles passed in the current generation.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }
}

/// Receives the world once per tick, e.g. to draw it.
///
/// Returning [`ControlFlow::Break`] asks the loop to stop after the current
/// tick.
pub trait FrameObserver {
    fn on_frame(&mut self, snapshot: &WorldSnapshot<'_>) -> ControlFlow<()>;
}

/// Observer for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl FrameObserver for NoopObserver {
    fn on_frame(&mut self, _snapshot: &WorldSnapshot<'_>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl<F> FrameObserver for F
where
    F: FnMut(&WorldSnapshot<'_>) -> ControlFlow<()>,
{
    fn on_frame(&mut self, snapshot: &WorldSnapshot<'_>) -> ControlFlow<()> {
        self(snapshot)
    }
}

//! One generation of the evaluation loop.
//!
//! A [`Generation`] spawns one avatar per supplied controller and advances all
//! of them through a shared obstacle course until none remain alive. Fitness
//! is accumulated in place on each [`ControllerBinding`]; the caller reads it
//! back from the [`GenerationReport`].
//!
//! # Tick
//!
//! Each call to [`Generation::step`] performs, in order:
//!
//! 1. Pick the nearest obstacle: index 1 once the lead avatar has cleared the
//!    right edge of obstacle 0 and a second one exists, otherwise index 0.
//! 2. Terminate if no avatar is alive.
//! 3. Advance every live avatar, credit [`SURVIVAL_REWARD`], query its
//!    controller with the nearest obstacle and flap on request.
//! 4. For each obstacle, oldest first: eliminate colliding avatars with
//!    [`COLLISION_PENALTY`], mark the obstacle passed once it is behind an
//!    avatar checked this tick (colliding or not), then scroll it.
//! 5. If an obstacle was passed: bump the score, credit [`PASS_REWARD`] to
//!    every survivor and spawn the next obstacle.
//! 6. Drop obstacles that scrolled off the left boundary.
//! 7. Eliminate avatars that reached the ground or left the top.
//! 8. Scroll the ground.
//!
//! Every live controller observes the same nearest obstacle, the one picked
//! by the lead avatar, regardless of its own avatar's position.
//!
//! Removal only clears the binding's liveness flag, so indices stay aligned
//! with the supplied controller order for the whole generation.

use tracing::debug;

use crate::{
    Avatar, Controller, FrameObserver, GROUND_Y, Ground, Obstacle, ObstacleGenerator, Observation,
    Session, WorldSnapshot, collides,
};

/// Fitness credited to each live avatar per tick.
pub const SURVIVAL_REWARD: f32 = 0.15;
/// Fitness deducted from an avatar that hits an obstacle.
pub const COLLISION_PENALTY: f32 = 1.0;
/// Fitness credited to every survivor when an obstacle is passed.
pub const PASS_REWARD: f32 = 5.0;

/// An avatar, the controller driving it and its fitness accumulator.
#[derive(Debug, Clone)]
pub struct ControllerBinding<C> {
    avatar: Avatar,
    controller: C,
    fitness: f32,
    alive: bool,
}

impl<C> ControllerBinding<C> {
    fn new(controller: C) -> Self {
        Self {
            avatar: Avatar::at_start(),
            controller,
            fitness: 0.0,
            alive: true,
        }
    }

    #[must_use]
    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    #[must_use]
    pub fn controller(&self) -> &C {
        &self.controller
    }

    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub fn into_controller(self) -> C {
        self.controller
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GenerationState {
    Running,
    Terminated,
}

/// Why [`Generation::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum GenerationOutcome {
    /// No avatar is alive.
    #[display("extinct")]
    Extinct,
    /// The tick limit was reached with avatars still alive.
    #[display("tick limit reached")]
    TickLimitReached,
    /// The observer asked to stop.
    #[display("interrupted")]
    Interrupted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub generation: u32,
    pub outcome: GenerationOutcome,
    pub score: u32,
    pub best_score: u32,
    pub ticks: u64,
    /// Final fitness per controller, in the order the controllers were supplied.
    pub fitness: Vec<f32>,
}

impl GenerationReport {
    /// Highest final fitness, or `None` for an empty generation.
    #[must_use]
    pub fn max_fitness(&self) -> Option<f32> {
        self.fitness.iter().copied().reduce(f32::max)
    }
}

#[derive(Debug, Clone)]
pub struct Generation<C> {
    bindings: Vec<ControllerBinding<C>>,
    obstacles: Vec<Obstacle>,
    ground: Ground,
    course: ObstacleGenerator,
    generation: u32,
    best_score: u32,
    score: u32,
    tick: u64,
    state: GenerationState,
}

impl<C> Generation<C>
where
    C: Controller,
{
    /// Begins the next generation of `session` with one avatar per controller
    /// and the first obstacle of `course` at [`Obstacle::SPAWN_X`].
    pub fn new<I>(session: &mut Session, controllers: I, mut course: ObstacleGenerator) -> Self
    where
        I: IntoIterator<Item = C>,
    {
        let first = course.next_obstacle(Obstacle::SPAWN_X);
        Self::with_obstacles(session, controllers, course, [first])
    }

    /// Like [`Self::new`], but starting with the given obstacles in flight.
    ///
    /// `course` only supplies the obstacles spawned afterwards.
    pub fn with_obstacles<I, O>(
        session: &mut Session,
        controllers: I,
        course: ObstacleGenerator,
        obstacles: O,
    ) -> Self
    where
        I: IntoIterator<Item = C>,
        O: IntoIterator<Item = Obstacle>,
    {
        let generation = session.begin_generation();
        let bindings = controllers
            .into_iter()
            .map(ControllerBinding::new)
            .collect::<Vec<_>>();
        debug!(
            generation,
            population = bindings.len(),
            seed = %course.seed(),
            "generation started"
        );
        Self {
            bindings,
            obstacles: obstacles.into_iter().collect(),
            ground: Ground::default(),
            course,
            generation,
            best_score: session.best_score(),
            score: 0,
            tick: 0,
            state: GenerationState::Running,
        }
    }

    /// Performs one tick.
    ///
    /// Once terminated, further calls do nothing.
    pub fn step(&mut self, session: &mut Session) -> GenerationState {
        if self.state.is_terminated() {
            return self.state;
        }

        let nearest = self.nearest_index();
        if self.live_count() == 0 {
            debug!(generation = self.generation, ticks = self.tick, "generation terminated");
            self.state = GenerationState::Terminated;
            return self.state;
        }
        self.tick += 1;

        self.advance_avatars(nearest);
        let passed = self.resolve_obstacles();
        if passed {
            self.score += 1;
            session.record_score(self.score);
            for binding in self.bindings.iter_mut().filter(|b| b.alive) {
                binding.fitness += PASS_REWARD;
            }
            debug!(
                generation = self.generation,
                tick = self.tick,
                score = self.score,
                "obstacle passed"
            );
            let next = self.course.next_obstacle(Obstacle::SPAWN_X);
            self.obstacles.push(next);
        }
        self.obstacles.retain(|obstacle| !obstacle.is_off_screen());
        self.remove_out_of_bounds();
        self.ground.advance();
        self.best_score = session.best_score();

        self.state
    }

    /// Steps until the population dies out, `tick_limit` ticks have run, or
    /// `observer` breaks.
    ///
    /// The observer sees the world after every tick. At least one tick runs
    /// unless the population is already extinct.
    pub fn run(
        &mut self,
        session: &mut Session,
        observer: &mut dyn FrameObserver,
        tick_limit: Option<u64>,
    ) -> GenerationReport {
        let outcome = loop {
            if self.step(session).is_terminated() {
                break GenerationOutcome::Extinct;
            }
            if observer.on_frame(&self.snapshot()).is_break() {
                break GenerationOutcome::Interrupted;
            }
            if tick_limit.is_some_and(|limit| self.tick >= limit) && self.live_count() > 0 {
                break GenerationOutcome::TickLimitReached;
            }
        };
        self.report(outcome)
    }

    fn advance_avatars(&mut self, nearest: Option<usize>) {
        let nearest = nearest.and_then(|i| self.obstacles.get(i));
        for binding in self.bindings.iter_mut().filter(|b| b.alive) {
            binding.avatar.advance();
            binding.fitness += SURVIVAL_REWARD;
            let Some(obstacle) = nearest else {
                continue;
            };
            let observation = Observation::new(&binding.avatar, obstacle);
            if binding.controller.observe_and_act(&observation).should_flap() {
                binding.avatar.impulse();
            }
        }
    }

    /// Collision and pass checks; returns whether any obstacle was newly passed.
    fn resolve_obstacles(&mut self) -> bool {
        let mut passed = false;
        for obstacle in &mut self.obstacles {
            for (id, binding) in self.bindings.iter_mut().enumerate() {
                if !binding.alive {
                    continue;
                }
                if collides(&binding.avatar, obstacle) {
                    binding.fitness -= COLLISION_PENALTY;
                    binding.alive = false;
                    debug!(generation = self.generation, tick = self.tick, id, "avatar collided");
                }
                // a colliding avatar still marks the obstacle passed
                if obstacle.x() < binding.avatar.x() && obstacle.mark_passed() {
                    passed = true;
                }
            }
            obstacle.advance();
        }
        passed
    }

    fn remove_out_of_bounds(&mut self) {
        for (id, binding) in self.bindings.iter_mut().enumerate() {
            let avatar = &binding.avatar;
            if binding.alive && (avatar.bottom() >= GROUND_Y || avatar.y() < 0.0) {
                binding.alive = false;
                debug!(generation = self.generation, tick = self.tick, id, "avatar out of bounds");
            }
        }
    }
}

impl<C> Generation<C> {
    /// Index of the obstacle every controller observes, if any.
    fn nearest_index(&self) -> Option<usize> {
        let lead = self.bindings.iter().find(|b| b.alive)?;
        match self.obstacles.as_slice() {
            [] => None,
            [first, _, ..] if lead.avatar.x() > first.right() => Some(1),
            [_, ..] => Some(0),
        }
    }

    #[must_use]
    pub fn bindings(&self) -> &[ControllerBinding<C>] {
        &self.bindings
    }

    #[must_use]
    pub fn into_bindings(self) -> Vec<ControllerBinding<C>> {
        self.bindings
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.bindings.iter().filter(|b| b.alive).count()
    }

    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn state(&self) -> GenerationState {
        self.state
    }

    /// Read-only view of the current world.
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot<'_> {
        WorldSnapshot {
            avatars: self
                .bindings
                .iter()
                .filter(|b| b.alive)
                .map(|b| &b.avatar)
                .collect(),
            obstacles: &self.obstacles,
            nearest: self.nearest_index(),
            ground: &self.ground,
            tick: self.tick,
            score: self.score,
            generation: self.generation,
            best_score: self.best_score,
        }
    }

    #[must_use]
    pub fn report(&self, outcome: GenerationOutcome) -> GenerationReport {
        GenerationReport {
            generation: self.generation,
            outcome,
            score: self.score,
            best_score: self.best_score,
            ticks: self.tick,
            fitness: self.bindings.iter().map(|b| b.fitness).collect(),
        }
    }
}

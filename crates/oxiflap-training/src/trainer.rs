//! Generation-by-generation training driver.

use rand::Rng;
use tracing::info;

use oxiflap_engine::{CourseSeed, FrameObserver, ObstacleGenerator, Session};
use oxiflap_evaluator::network::NetworkShapeError;

use crate::genetic::{EvolverConfigError, Individual, Population, PopulationEvolver};

/// Why training stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum TrainingStop {
    #[display("all generations evaluated")]
    GenerationsExhausted,
    #[display("fitness threshold reached")]
    FitnessThresholdReached,
    #[display("interrupted")]
    Interrupted,
}

#[derive(Debug, Clone)]
pub struct TrainingSummary {
    /// Fittest individual seen in any generation.
    pub best: Individual,
    /// Index of the generation `best` was evaluated in.
    pub best_generation: u32,
    pub generations: u32,
    pub best_score: u32,
    pub stop: TrainingStop,
}

/// Evolves a population for up to `generations` generations.
///
/// The trainer owns the [`Session`], so generation indices and the best score
/// carry over from one generation to the next.
#[derive(Debug)]
pub struct Trainer {
    session: Session,
    population: Population,
    evolver: PopulationEvolver,
    generations: u32,
    fitness_threshold: Option<f32>,
    tick_limit: Option<u64>,
    course_seed: Option<CourseSeed>,
}

impl Trainer {
    /// Fails if `evolver` cannot breed a population of this size.
    pub fn new(
        population: Population,
        evolver: PopulationEvolver,
        generations: u32,
    ) -> Result<Self, EvolverConfigError> {
        evolver.validate(population.individuals().len())?;
        Ok(Self {
            session: Session::new(),
            population,
            evolver,
            generations,
            fitness_threshold: None,
            tick_limit: None,
            course_seed: None,
        })
    }

    /// Stops as soon as the best individual of a generation reaches `threshold`.
    #[must_use]
    pub fn with_fitness_threshold(mut self, threshold: Option<f32>) -> Self {
        self.fitness_threshold = threshold;
        self
    }

    /// Caps every generation at `tick_limit` ticks.
    #[must_use]
    pub fn with_tick_limit(mut self, tick_limit: Option<u64>) -> Self {
        self.tick_limit = tick_limit;
        self
    }

    /// Flies every generation through the same course instead of a fresh one.
    #[must_use]
    pub fn with_course_seed(mut self, seed: Option<CourseSeed>) -> Self {
        self.course_seed = seed;
        self
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Runs the training loop.
    ///
    /// Returns `None` if no generation was evaluated.
    pub fn run<R>(
        &mut self,
        observer: &mut dyn FrameObserver,
        rng: &mut R,
    ) -> Result<Option<TrainingSummary>, NetworkShapeError>
    where
        R: Rng + ?Sized,
    {
        let mut best: Option<(Individual, u32)> = None;
        let mut stop = TrainingStop::GenerationsExhausted;

        for round in 0..self.generations {
            if round > 0 {
                self.population = self.evolver.evolve(&self.population, rng);
            }
            let course = match self.course_seed {
                Some(seed) => ObstacleGenerator::with_seed(seed),
                None => ObstacleGenerator::with_seed(rng.random()),
            };
            let report = self.population.evaluate_fitness(
                &mut self.session,
                course,
                observer,
                self.tick_limit,
            )?;
            let Some(stats) = self.population.compute_fitness_stats() else {
                break;
            };
            info!(
                generation = report.generation,
                ticks = report.ticks,
                score = report.score,
                best_score = report.best_score,
                max = stats.max,
                mean = stats.mean,
                median = stats.median,
                std_dev = stats.std_dev,
                "generation evaluated"
            );

            if let Some(leader) = self.population.best()
                && best
                    .as_ref()
                    .is_none_or(|(ind, _)| leader.fitness() > ind.fitness())
            {
                best = Some((leader.clone(), report.generation));
            }

            if report.outcome.is_interrupted() {
                stop = TrainingStop::Interrupted;
                break;
            }
            if self
                .fitness_threshold
                .is_some_and(|threshold| stats.max >= threshold)
            {
                stop = TrainingStop::FitnessThresholdReached;
                break;
            }
        }

        info!(%stop, generations = self.session.generation(), "training finished");
        Ok(best.map(|(best, best_generation)| TrainingSummary {
            best,
            best_generation,
            generations: self.session.generation(),
            best_score: self.session.best_score(),
            stop,
        }))
    }
}

//! Genetic algorithm over network weights.
//!
//! # Algorithm
//!
//! 1. **Evaluate Fitness** - The whole population flies through one shared
//!    [`Generation`]; every individual's avatar earns fitness in the same world
//! 2. **Sort** - Individuals are ranked by fitness, best first
//! 3. **Elitism** - The top `elite_count` individuals survive unchanged
//! 4. **Reproduction** - The rest is bred by tournament selection, BLX-α
//!    crossover and Gaussian mutation (see [`weights`])
//!
//! # Key Components
//!
//! - [`Individual`] - A network's flat weights and their fitness
//! - [`Population`] - A set of individuals sharing one [`NetworkShape`]
//! - [`PopulationEvolver`] - Breeding parameters
//!
//! # Tournament Selection
//!
//! Randomly pick K individuals and keep the fittest. Larger K means stronger
//! selection pressure. Selection only compares fitness, so it is not
//! affected by negative values from collisions.
//!
//! # Shared World
//!
//! All avatars see the same obstacles at the same ticks, so fitness
//! differences reflect controllers and not luck of the course. A fixed
//! [`CourseSeed`](oxiflap_engine::CourseSeed) additionally makes generations
//! comparable with each other.

use rand::{Rng, seq::IndexedRandom};

use oxiflap_engine::{FrameObserver, Generation, GenerationReport, ObstacleGenerator, Session};
use oxiflap_evaluator::network::{
    FeedForwardNetwork, NetworkController, NetworkShape, NetworkShapeError,
};

use crate::{statistics::FitnessStats, weights};

/// A candidate network and its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    weights: Vec<f32>,
    fitness: f32,
}

impl Individual {
    /// An unevaluated individual.
    #[must_use]
    pub fn new(weights: Vec<f32>) -> Self {
        Self {
            weights,
            fitness: f32::MIN,
        }
    }

    /// Creates an individual with weights uniform in `[-max_weight, max_weight]`.
    pub fn random<R>(rng: &mut R, max_weight: f32, shape: NetworkShape) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(weights::random(rng, max_weight, shape.weight_count()))
    }

    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Fitness from the last evaluation; `f32::MIN` before any.
    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    /// Builds the controller that flies this individual.
    pub fn controller(&self, shape: NetworkShape) -> Result<NetworkController, NetworkShapeError> {
        let network = FeedForwardNetwork::new(shape, self.weights.clone())?;
        Ok(NetworkController::new(network))
    }
}

#[derive(Debug, Clone)]
pub struct Population {
    shape: NetworkShape,
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates `count` random individuals.
    #[must_use]
    pub fn random<R>(shape: NetworkShape, count: usize, rng: &mut R, max_weight: f32) -> Self
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..count)
            .map(|_| Individual::random(rng, max_weight, shape))
            .collect();
        Self { shape, individuals }
    }

    /// Wraps existing individuals, e.g. to continue training from a saved model.
    pub fn from_individuals(
        shape: NetworkShape,
        individuals: Vec<Individual>,
    ) -> Result<Self, NetworkShapeError> {
        if let Some(bad) = individuals
            .iter()
            .find(|ind| ind.weights.len() != shape.weight_count())
        {
            return Err(NetworkShapeError {
                hidden: shape.hidden(),
                expected: shape.weight_count(),
                actual: bad.weights.len(),
            });
        }
        Ok(Self { shape, individuals })
    }

    #[must_use]
    pub fn shape(&self) -> NetworkShape {
        self.shape
    }

    /// Individuals, best first once evaluated.
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
    }

    /// Flies the whole population through one generation and records fitness.
    ///
    /// Each individual's fitness is replaced by what its avatar accumulated.
    /// Individuals are then sorted by fitness in descending order.
    pub fn evaluate_fitness(
        &mut self,
        session: &mut Session,
        course: ObstacleGenerator,
        observer: &mut dyn FrameObserver,
        tick_limit: Option<u64>,
    ) -> Result<GenerationReport, NetworkShapeError> {
        let controllers = self
            .individuals
            .iter()
            .map(|ind| ind.controller(self.shape))
            .collect::<Result<Vec<_>, _>>()?;
        let mut generation = Generation::new(session, controllers, course);
        let report = generation.run(session, observer, tick_limit);

        for (ind, fitness) in self.individuals.iter_mut().zip(&report.fitness) {
            ind.fitness = *fitness;
        }
        self.individuals.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        Ok(report)
    }

    #[must_use]
    pub fn compute_fitness_stats(&self) -> Option<FitnessStats> {
        FitnessStats::new(self.individuals.iter().map(|ind| ind.fitness))
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum EvolverConfigError {
    #[display("elite count {elite_count} exceeds the population size {population_size}")]
    EliteCountTooLarge {
        elite_count: usize,
        population_size: usize,
    },
    #[display(
        "tournament size must be between 1 and the population size {population_size}, got {tournament_size}"
    )]
    InvalidTournamentSize {
        tournament_size: usize,
        population_size: usize,
    },
    #[display("{name} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

/// Controls how one population breeds the next.
#[derive(Debug, Clone)]
pub struct PopulationEvolver {
    /// Number of top individuals preserved unchanged (elitism)
    pub elite_count: usize,
    /// Weights are clamped to `[-max_weight, max_weight]`
    pub max_weight: f32,
    /// Tournament size for selection (larger = stronger selection pressure)
    pub tournament_size: usize,
    /// Standard deviation for Gaussian mutation noise
    pub mutation_sigma: f32,
    /// BLX-α crossover parameter (controls exploration beyond parent range)
    pub blx_alpha: f32,
    /// Probability of mutating each weight
    pub mutation_rate: f32,
}

impl PopulationEvolver {
    /// Checks the parameters against a population of `population_size`.
    pub fn validate(&self, population_size: usize) -> Result<(), EvolverConfigError> {
        if self.elite_count > population_size {
            return Err(EvolverConfigError::EliteCountTooLarge {
                elite_count: self.elite_count,
                population_size,
            });
        }
        if self.tournament_size == 0 || self.tournament_size > population_size {
            return Err(EvolverConfigError::InvalidTournamentSize {
                tournament_size: self.tournament_size,
                population_size,
            });
        }
        let ranges = [
            ("max_weight", self.max_weight, f32::MIN_POSITIVE, f32::MAX),
            ("mutation_sigma", self.mutation_sigma, 0.0, f32::MAX),
            ("blx_alpha", self.blx_alpha, 0.0, f32::MAX),
            ("mutation_rate", self.mutation_rate, 0.0, 1.0),
        ];
        for (name, value, min, max) in ranges {
            if !(min..=max).contains(&value) {
                return Err(EvolverConfigError::OutOfRange {
                    name,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Breeds the next population.
    ///
    /// 1. Preserves the top `elite_count` individuals unchanged
    /// 2. Fills the rest through tournament selection, crossover and mutation
    ///
    /// # Panics
    ///
    /// Panics if `population` is not sorted by fitness (best first) or if the
    /// parameters do not pass [`Self::validate`].
    #[must_use]
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let individuals = &population.individuals;
        assert!(individuals.is_sorted_by(|a, b| a.fitness >= b.fitness));

        let mut next_individuals = Vec::with_capacity(individuals.len());
        next_individuals.extend(individuals[..self.elite_count].iter().cloned());

        while next_individuals.len() < individuals.len() {
            let p1 = tournament_select(individuals, self.tournament_size, rng);
            let p2 = tournament_select(individuals, self.tournament_size, rng);

            let mut child =
                weights::blx_alpha(&p1.weights, &p2.weights, self.blx_alpha, self.max_weight, rng);
            weights::mutate(
                &mut child,
                self.mutation_sigma,
                self.max_weight,
                self.mutation_rate,
                rng,
            );
            next_individuals.push(Individual::new(child));
        }

        Population {
            shape: population.shape,
            individuals: next_individuals,
        }
    }
}

/// Picks `tournament_size` distinct individuals at random and returns the fittest.
fn tournament_select<'a, R>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Individual
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0);
    population
        .choose_multiple(rng, tournament_size)
        .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
        .expect("tournament is never empty")
}

#[cfg(test)]
mod tests {
    use oxiflap_engine::{CourseSeed, NoopObserver};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    const DIRECT: NetworkShape = NetworkShape::new(0);

    fn evolver() -> PopulationEvolver {
        PopulationEvolver {
            elite_count: 2,
            max_weight: 3.0,
            tournament_size: 3,
            mutation_sigma: 0.5,
            blx_alpha: 0.5,
            mutation_rate: 0.2,
        }
    }

    fn evaluated(fitness: &[f32]) -> Population {
        let individuals = fitness
            .iter()
            .enumerate()
            .map(|(i, &fitness)| {
                #[expect(clippy::cast_precision_loss)]
                let w = i as f32;
                Individual {
                    weights: vec![w; DIRECT.weight_count()],
                    fitness,
                }
            })
            .collect();
        Population::from_individuals(DIRECT, individuals).unwrap()
    }

    #[test]
    fn test_evaluate_fitness_writes_back_and_sorts() {
        // bias-only networks: one never flaps, one always does
        let idle = Individual::new(vec![0.0, 0.0, 0.0, -2.0]);
        let flapper = Individual::new(vec![0.0, 0.0, 0.0, 2.0]);
        let mut population =
            Population::from_individuals(DIRECT, vec![idle.clone(), flapper.clone()]).unwrap();

        let mut session = Session::new();
        let course = ObstacleGenerator::with_seed(CourseSeed::from_u128(9));
        let report = population
            .evaluate_fitness(&mut session, course, &mut NoopObserver, None)
            .unwrap();

        assert_eq!(report.generation, 1);
        assert_eq!(report.ticks, 33);
        // the idle avatar hits the ground after 17 ticks, the flapper leaves
        // the top after 33
        let [first, second] = population.individuals() else {
            unreachable!()
        };
        assert_eq!(first.weights(), flapper.weights());
        assert_eq!(second.weights(), idle.weights());
        assert!((first.fitness() - 33.0 * 0.15).abs() < 1e-4);
        assert!((second.fitness() - 17.0 * 0.15).abs() < 1e-4);
        assert_eq!(population.best(), Some(first));
    }

    #[test]
    fn test_mismatched_weights_are_rejected() {
        let err = Population::from_individuals(DIRECT, vec![Individual::new(vec![0.0; 5])])
            .unwrap_err();
        assert_eq!(err.expected, 4);
        assert_eq!(err.actual, 5);
    }

    #[test]
    fn test_evolve_keeps_size_elites_and_bounds() {
        let mut rng = Pcg32::seed_from_u64(11);
        let population = evaluated(&[9.0, 7.0, 5.0, 3.0, 1.0, -1.0]);
        let evolver = evolver();
        evolver.validate(6).unwrap();

        let next = evolver.evolve(&population, &mut rng);
        assert_eq!(next.individuals().len(), 6);
        assert_eq!(next.individuals()[..2], population.individuals()[..2]);
        for ind in &next.individuals()[2..] {
            assert_eq!(ind.fitness(), f32::MIN);
            assert!(ind.weights().iter().all(|w| (-3.0..=3.0).contains(w)));
        }
    }

    #[test]
    #[should_panic(expected = "is_sorted_by")]
    fn test_evolve_requires_sorted_population() {
        let mut rng = Pcg32::seed_from_u64(12);
        let population = evaluated(&[1.0, 2.0]);
        let _ = evolver().evolve(&population, &mut rng);
    }

    #[test]
    fn test_full_tournament_picks_the_fittest() {
        let mut rng = Pcg32::seed_from_u64(13);
        let population = evaluated(&[1.0, 8.0, -3.0, 4.0]);
        for _ in 0..20 {
            let winner = tournament_select(population.individuals(), 4, &mut rng);
            assert_eq!(winner.fitness(), 8.0);
        }
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let evolver = evolver();
        assert_eq!(
            evolver.validate(1),
            Err(EvolverConfigError::EliteCountTooLarge {
                elite_count: 2,
                population_size: 1
            })
        );
        assert_eq!(
            PopulationEvolver {
                tournament_size: 0,
                ..evolver.clone()
            }
            .validate(10),
            Err(EvolverConfigError::InvalidTournamentSize {
                tournament_size: 0,
                population_size: 10
            })
        );
        let err = PopulationEvolver {
            mutation_rate: 1.5,
            ..evolver.clone()
        }
        .validate(10)
        .unwrap_err();
        assert_eq!(err.to_string(), "mutation_rate must be within [0, 1], got 1.5");
        assert!(
            PopulationEvolver {
                max_weight: f32::NAN,
                ..evolver
            }
            .validate(10)
            .is_err()
        );
    }
}

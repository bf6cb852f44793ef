//! Training hyperparameters, loaded once at startup.

use oxiflap_engine::CourseSeed;
use oxiflap_evaluator::network::NetworkShape;
use oxiflap_training::genetic::{EvolverConfigError, PopulationEvolver};
use serde::{Deserialize, Serialize};

/// Every field may be omitted from the JSON file; missing fields take the
/// values of [`TrainingConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    pub population_size: usize,
    pub generations: u32,
    pub hidden_neurons: usize,
    pub elite_count: usize,
    pub tournament_size: usize,
    pub mutation_rate: f32,
    pub mutation_sigma: f32,
    pub blx_alpha: f32,
    pub max_weight: f32,
    /// Training stops once a generation's best fitness reaches this value.
    pub fitness_threshold: Option<f32>,
    /// Ticks after which a generation is cut off even if birds survive.
    pub tick_limit: Option<u64>,
    /// Fly every generation through the same course.
    pub course_seed: Option<CourseSeed>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 50,
            hidden_neurons: 4,
            elite_count: 2,
            tournament_size: 3,
            mutation_rate: 0.2,
            mutation_sigma: 0.5,
            blx_alpha: 0.5,
            max_weight: 5.0,
            fitness_threshold: Some(100.0),
            tick_limit: Some(10_000),
            course_seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population size must be positive")]
    EmptyPopulation,
    #[display("tick limit must be positive")]
    ZeroTickLimit,
    #[display("{_0}")]
    Evolver(EvolverConfigError),
}

impl TrainingConfig {
    #[must_use]
    pub fn shape(&self) -> NetworkShape {
        NetworkShape::new(self.hidden_neurons)
    }

    #[must_use]
    pub fn evolver(&self) -> PopulationEvolver {
        PopulationEvolver {
            elite_count: self.elite_count,
            max_weight: self.max_weight,
            tournament_size: self.tournament_size,
            mutation_sigma: self.mutation_sigma,
            blx_alpha: self.blx_alpha,
            mutation_rate: self.mutation_rate,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.tick_limit == Some(0) {
            return Err(ConfigError::ZeroTickLimit);
        }
        self.evolver()
            .validate(self.population_size)
            .map_err(ConfigError::Evolver)
    }
}

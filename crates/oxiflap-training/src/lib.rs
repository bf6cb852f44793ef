//! Neuroevolution of flapping controllers.
//!
//! This crate plays the role of the controller population: it hands a set of
//! [`NetworkController`](oxiflap_evaluator::network::NetworkController)s to the
//! evaluation loop, reads back the fitness each one accumulated, and breeds
//! the next set from it.
//!
//! # How Training Works
//!
//! 1. **Population** - Random flat weight vectors, one per individual
//! 2. **Evaluation** - All individuals fly together through one generation
//! 3. **Fitness** - +0.15 per survived tick, -1 on collision, +5 to every
//!    survivor per passed obstacle
//! 4. **Selection & Reproduction** - Elitism, tournament selection, BLX-α
//!    crossover, Gaussian mutation
//! 5. **Repeat** - Until the generation budget is spent or the fitness
//!    threshold is reached
//!
//! # Architecture
//!
//! ```text
//! Trainer (owns the Session)
//!     ↓ drives
//! Population ──evaluate_fitness──► Generation (oxiflap-engine)
//!     ↓ sorted by fitness                ↓ queries
//! PopulationEvolver                NetworkController (oxiflap-evaluator)
//!     ↓ breeds
//! next Population
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use oxiflap_engine::NoopObserver;
//! use oxiflap_evaluator::network::NetworkShape;
//! use oxiflap_training::{
//!     genetic::{Population, PopulationEvolver},
//!     trainer::Trainer,
//! };
//!
//! let mut rng = rand::rng();
//! let population = Population::random(NetworkShape::new(6), 50, &mut rng, 3.0);
//! let evolver = PopulationEvolver {
//!     elite_count: 2,
//!     max_weight: 3.0,
//!     tournament_size: 3,
//!     mutation_sigma: 0.5,
//!     blx_alpha: 0.5,
//!     mutation_rate: 0.2,
//! };
//! let mut trainer = Trainer::new(population, evolver, 50)?.with_fitness_threshold(Some(100.0));
//! let summary = trainer.run(&mut NoopObserver, &mut rng)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod genetic;
pub mod statistics;
pub mod trainer;
pub mod weights;

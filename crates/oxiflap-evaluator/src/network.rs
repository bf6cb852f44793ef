//! Feed-forward network controllers.
//!
//! # Topology
//!
//! ```text
//! inputs (3) ──► hidden (H, tanh) ──► output (1, tanh)
//! ```
//!
//! With `H = 0` the inputs feed the output directly. Every neuron carries a
//! bias, and all weights live in one flat vector so that the genetic
//! operators in `oxiflap-training` can treat a network as a plain `Vec<f32>`.
//!
//! # Weight layout
//!
//! For each hidden neuron in turn, its input weights followed by its bias;
//! then, for each output neuron, its weights over the previous layer followed
//! by its bias.
//!
//! ```text
//! [h0·x0, h0·x1, h0·x2, h0·b, h1·x0, ..., o·h0, ..., o·h(H-1), o·b]
//! ```

use std::{array, iter};

use oxiflap_engine::{Action, Controller, Observation, PLAYFIELD_HEIGHT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkShape {
    hidden: usize,
}

impl NetworkShape {
    pub const INPUTS: usize = Observation::LEN;
    pub const OUTPUTS: usize = 1;

    #[must_use]
    pub const fn new(hidden: usize) -> Self {
        Self { hidden }
    }

    #[must_use]
    pub const fn hidden(&self) -> usize {
        self.hidden
    }

    /// Length of the flat weight vector, biases included.
    #[must_use]
    pub const fn weight_count(&self) -> usize {
        if self.hidden == 0 {
            (Self::INPUTS + 1) * Self::OUTPUTS
        } else {
            (Self::INPUTS + 1) * self.hidden + (self.hidden + 1) * Self::OUTPUTS
        }
    }

    /// Number of weights feeding one output neuron.
    const fn output_fan_in(&self) -> usize {
        if self.hidden == 0 {
            Self::INPUTS + 1
        } else {
            self.hidden + 1
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("network with {hidden} hidden neurons needs {expected} weights, got {actual}")]
pub struct NetworkShapeError {
    pub hidden: usize,
    pub expected: usize,
    pub actual: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedForwardNetwork {
    shape: NetworkShape,
    weights: Vec<f32>,
}

impl FeedForwardNetwork {
    /// Creates a network from flattened weights.
    ///
    /// Fails if `weights` does not match [`NetworkShape::weight_count`].
    pub fn new(shape: NetworkShape, weights: Vec<f32>) -> Result<Self, NetworkShapeError> {
        let expected = shape.weight_count();
        if weights.len() != expected {
            return Err(NetworkShapeError {
                hidden: shape.hidden(),
                expected,
                actual: weights.len(),
            });
        }
        Ok(Self { shape, weights })
    }

    #[must_use]
    pub fn shape(&self) -> NetworkShape {
        self.shape
    }

    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    #[must_use]
    pub fn activate(&self, inputs: &[f32; NetworkShape::INPUTS]) -> [f32; NetworkShape::OUTPUTS] {
        let split = (NetworkShape::INPUTS + 1) * self.shape.hidden();
        let (hidden_weights, output_weights) = self.weights.split_at(split);
        let mut output_neurons = output_weights.chunks_exact(self.shape.output_fan_in());

        array::from_fn(|_| {
            let Some(neuron) = output_neurons.next() else {
                unreachable!("output weights are sized by the shape");
            };
            if self.shape.hidden() == 0 {
                return activate_neuron(neuron, inputs.iter().copied());
            }
            let hidden = hidden_weights
                .chunks_exact(NetworkShape::INPUTS + 1)
                .map(|h| activate_neuron(h, inputs.iter().copied()));
            activate_neuron(neuron, hidden)
        })
    }
}

/// `tanh(Σ wᵢ·xᵢ + b)`, where the bias is the last weight.
fn activate_neuron<I>(weights: &[f32], inputs: I) -> f32
where
    I: IntoIterator<Item = f32>,
{
    let Some((bias, weights)) = weights.split_last() else {
        return 0.0;
    };
    let sum: f32 = iter::zip(weights, inputs).map(|(w, x)| w * x).sum();
    (sum + bias).tanh()
}

/// Drives an avatar with a [`FeedForwardNetwork`].
///
/// Observations are divided by the playfield height before activation, so
/// every input lies roughly in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct NetworkController {
    network: FeedForwardNetwork,
}

impl NetworkController {
    #[must_use]
    pub fn new(network: FeedForwardNetwork) -> Self {
        Self { network }
    }

    #[must_use]
    pub fn network(&self) -> &FeedForwardNetwork {
        &self.network
    }
}

impl Controller for NetworkController {
    fn observe_and_act(&mut self, observation: &Observation) -> Action {
        let inputs = observation.to_array().map(|v| v / PLAYFIELD_HEIGHT);
        Action::from_outputs(&self.network.activate(&inputs))
    }
}

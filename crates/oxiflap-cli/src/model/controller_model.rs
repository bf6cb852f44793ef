use anyhow::Context;
use chrono::{DateTime, Utc};
use oxiflap_evaluator::network::{FeedForwardNetwork, NetworkController, NetworkShape};
use oxiflap_training::trainer::TrainingSummary;
use serde::{Deserialize, Serialize};

/// A trained network, as written by `oxiflap train`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ControllerModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    /// Generation the network was evaluated in.
    pub generation: u32,
    /// Best score reached by any bird during training.
    pub best_score: u32,
    pub final_fitness: f32,
    pub hidden_neurons: usize,
    pub weights: Vec<f32>,
}

impl ControllerModel {
    pub fn from_summary(
        name: String,
        trained_at: DateTime<Utc>,
        shape: NetworkShape,
        summary: &TrainingSummary,
    ) -> Self {
        Self {
            name,
            trained_at,
            generation: summary.best_generation,
            best_score: summary.best_score,
            final_fitness: summary.best.fitness(),
            hidden_neurons: shape.hidden(),
            weights: summary.best.weights().to_vec(),
        }
    }

    pub fn into_controller(self) -> anyhow::Result<NetworkController> {
        let shape = NetworkShape::new(self.hidden_neurons);
        let network = FeedForwardNetwork::new(shape, self.weights)
            .with_context(|| format!("Model {:?} does not fit its network shape", self.name))?;
        Ok(NetworkController::new(network))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(hidden_neurons: usize, weights: Vec<f32>) -> ControllerModel {
        ControllerModel {
            name: "test".to_owned(),
            trained_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            generation: 12,
            best_score: 34,
            final_fitness: 56.5,
            hidden_neurons,
            weights,
        }
    }

    #[test]
    fn test_json_layout() {
        let json = serde_json::to_value(model(0, vec![0.0, 0.0, 0.0, 1.0])).unwrap();
        assert_eq!(json["name"], "test");
        assert_eq!(json["trained_at"], "2023-11-14T22:13:20Z");
        assert_eq!(json["generation"], 12);
        assert_eq!(json["hidden_neurons"], 0);
        assert_eq!(json["weights"].as_array().unwrap().len(), 4);

        let back: ControllerModel = serde_json::from_value(json).unwrap();
        assert_eq!(back, model(0, vec![0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_into_controller() {
        let controller = model(1, vec![0.0; 6]).into_controller().unwrap();
        assert_eq!(controller.network().shape(), NetworkShape::new(1));
    }

    #[test]
    fn test_weight_count_mismatch() {
        let err = model(2, vec![0.0; 4]).into_controller().unwrap_err();
        assert!(err.to_string().contains("\"test\""), "{err}");
    }
}

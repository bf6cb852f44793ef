//! Weight vector operations for the genetic algorithm.
//!
//! A network's weights are a flat `Vec<f32>` (see
//! [`oxiflap_evaluator::network`] for the layout). These operations are used by
//! [`genetic::PopulationEvolver`](crate::genetic::PopulationEvolver):
//!
//! - **Initialization**: [`random`] draws weights uniformly from `[-max_weight, max_weight]`
//! - **Crossover**: [`blx_alpha`] implements the BLX-α operator
//! - **Mutation**: [`mutate`] applies Gaussian noise to a fraction of the weights
//!
//! Every operation keeps each weight inside `[-max_weight, max_weight]`.
//! Network weights are signed, so there is no normalization step: a flipped
//! sign changes behavior, and `tanh` saturates large magnitudes anyway.

use rand::Rng;
use rand_distr::Normal;

/// Creates a weight vector by applying a function to each index.
///
/// # Examples
///
/// ```
/// use oxiflap_training::weights;
///
/// let weights = weights::from_fn(|i| 1.0 / (i as f32 + 1.0), 4);
/// assert_eq!(weights, vec![1.0, 0.5, 1.0 / 3.0, 0.25]);
/// ```
pub fn from_fn<F>(mut f: F, len: usize) -> Vec<f32>
where
    F: FnMut(usize) -> f32,
{
    (0..len).map(&mut f).collect()
}

/// Generates `len` weights sampled uniformly from `[-max_weight, max_weight]`.
pub fn random<R>(rng: &mut R, max_weight: f32, len: usize) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    from_fn(|_| rng.random_range(-max_weight..=max_weight), len)
}

/// BLX-α (blend) crossover between two parents.
///
/// For parents `x1` and `x2` at each position:
///
/// 1. Compute `d = |x2 - x1|`
/// 2. Expand the range to `[min - α·d, max + α·d]`
/// 3. Sample uniformly from the expanded range
/// 4. Clamp to `[-max_weight, max_weight]`
///
/// # Panics
///
/// Panics if the parents have different lengths.
pub fn blx_alpha<R>(p1: &[f32], p2: &[f32], alpha: f32, max_weight: f32, rng: &mut R) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    assert_eq!(p1.len(), p2.len());
    from_fn(
        |i| {
            let min = f32::min(p1[i], p2[i]);
            let max = f32::max(p1[i], p2[i]);
            let d = max - min;
            rng.random_range((min - alpha * d)..=(max + alpha * d))
                .clamp(-max_weight, max_weight)
        },
        p1.len(),
    )
}

/// Gaussian mutation in place.
///
/// Each weight, with probability `rate`, is perturbed by a sample from
/// `N(0, sigma)` and clamped to `[-max_weight, max_weight]`.
///
/// # Panics
///
/// Panics if `sigma` is negative or not finite, or if `rate` is outside `[0, 1]`.
pub fn mutate<R>(weights: &mut [f32], sigma: f32, max_weight: f32, rate: f32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let normal = Normal::new(0.0, sigma).expect("sigma must be finite and non-negative");
    for w in weights {
        if rng.random_bool(rate.into()) {
            *w = (*w + rng.sample(normal)).clamp(-max_weight, max_weight);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_random_is_bounded_and_signed() {
        let mut rng = Pcg32::seed_from_u64(1);
        let weights = random(&mut rng, 2.0, 1000);
        assert_eq!(weights.len(), 1000);
        assert!(weights.iter().all(|w| (-2.0..=2.0).contains(w)));
        assert!(weights.iter().any(|&w| w < 0.0));
        assert!(weights.iter().any(|&w| w > 0.0));
    }

    #[test]
    fn test_blx_alpha_stays_in_expanded_range() {
        let mut rng = Pcg32::seed_from_u64(2);
        let p1 = [-1.0, 0.0, 0.5];
        let p2 = [1.0, 0.0, 0.7];
        for _ in 0..1000 {
            let child = blx_alpha(&p1, &p2, 0.5, 10.0, &mut rng);
            assert!((-2.0..=2.0).contains(&child[0]));
            assert!(child[1].abs() < f32::EPSILON);
            assert!((0.4 - 1e-6..=0.8 + 1e-6).contains(&child[2]));
        }
    }

    #[test]
    fn test_blx_alpha_clamps() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..1000 {
            let child = blx_alpha(&[-1.0], &[1.0], 2.0, 1.5, &mut rng);
            assert!((-1.5..=1.5).contains(&child[0]));
        }
    }

    #[test]
    fn test_mutate_rate_zero_keeps_weights() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut weights = vec![0.1, -0.2, 0.3];
        mutate(&mut weights, 1.0, 5.0, 0.0, &mut rng);
        assert_eq!(weights, vec![0.1, -0.2, 0.3]);
    }

    #[test]
    fn test_mutate_rate_one_changes_and_clamps() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut weights = vec![0.0; 100];
        mutate(&mut weights, 10.0, 1.0, 1.0, &mut rng);
        assert!(weights.iter().all(|w| (-1.0..=1.0).contains(w)));
        assert!(weights.iter().filter(|w| w.abs() == 1.0).count() > 50);
    }
}

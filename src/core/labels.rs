//! Weak-supervision labels.
//!
//! Labels are Bernoulli draws from a heuristic propensity rather than a threshold on
//! it, so the training set carries controlled noise.

use crate::domain::model::FeatureVector;
use rand::Rng;

pub const REGION_WEIGHT: f64 = 0.4;
pub const INDUSTRY_WEIGHT: f64 = 0.4;
pub const BUDGET_WEIGHT: f64 = 0.2;

/// Guards the budget ratio when the company budget is zero or missing.
pub const BUDGET_EPSILON: f64 = 1e-6;

pub fn budget_similarity(lead_budget: f64, company_budget: f64) -> f64 {
    let ratio = 1.0 - (lead_budget - company_budget).abs() / (company_budget + BUDGET_EPSILON);
    ratio.clamp(0.0, 1.0)
}

/// Propensity `h` in `[0, 1]` that the pair is a match.
pub fn heuristic_propensity(features: &FeatureVector) -> f64 {
    let h = REGION_WEIGHT * features.region_match()
        + INDUSTRY_WEIGHT * features.industry_match()
        + BUDGET_WEIGHT * budget_similarity(features.lead_budget(), features.company_budget());
    h.clamp(0.0, 1.0)
}

pub fn draw_label<R: Rng + ?Sized>(propensity: f64, rng: &mut R) -> u8 {
    u8::from(rng.gen::<f64>() < propensity)
}

pub fn synthesize_label<R: Rng + ?Sized>(features: &FeatureVector, rng: &mut R) -> u8 {
    draw_label(heuristic_propensity(features), rng)
}

/// Flips one uniformly chosen label when every label is identical.
///
/// Returns the flipped index, if any.
pub fn ensure_class_balance<R: Rng + ?Sized>(labels: &mut [u8], rng: &mut R) -> Option<usize> {
    let first = *labels.first()?;
    if labels.iter().any(|&label| label != first) {
        return None;
    }

    let index = rng.gen_range(0..labels.len());
    labels[index] = 1 - labels[index];
    tracing::debug!("All {} labels were {}, flipped index {}", labels.len(), first, index);
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_budget_similarity() {
        assert_eq!(budget_similarity(10000.0, 10000.0), 1.0);
        assert!((budget_similarity(12000.0, 10000.0) - 0.8).abs() < 1e-6);
        assert_eq!(budget_similarity(50000.0, 10000.0), 0.0);
        // zero company budget stays finite
        assert_eq!(budget_similarity(0.0, 0.0), 1.0);
        assert_eq!(budget_similarity(100.0, 0.0), 0.0);
    }

    #[test]
    fn test_heuristic_propensity_weights() {
        let full = FeatureVector([5000.0, 5000.0, 1.0, 1.0]);
        assert!((heuristic_propensity(&full) - 1.0).abs() < 1e-9);

        let region_only = FeatureVector([0.0, 100_000.0, 1.0, 0.0]);
        assert!((heuristic_propensity(&region_only) - 0.4).abs() < 1e-9);

        let nothing = FeatureVector([100_000.0, 1.0, 0.0, 0.0]);
        assert_eq!(heuristic_propensity(&nothing), 0.0);
    }

    #[test]
    fn test_draw_label_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert_eq!(draw_label(0.0, &mut rng), 0);
            assert_eq!(draw_label(1.0, &mut rng), 1);
        }
    }

    #[test]
    fn test_draw_label_follows_propensity() {
        let mut rng = StdRng::seed_from_u64(11);
        let positives: usize = (0..10_000)
            .map(|_| draw_label(0.3, &mut rng) as usize)
            .sum();
        let rate = positives as f64 / 10_000.0;
        assert!((rate - 0.3).abs() < 0.03, "rate was {}", rate);
    }

    #[test]
    fn test_seeded_labels_are_reproducible() {
        let features = FeatureVector([12000.0, 10000.0, 1.0, 0.0]);
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|_| synthesize_label(&features, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn test_class_balance_flips_exactly_one() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut labels = vec![0u8; 10];

        let flipped = ensure_class_balance(&mut labels, &mut rng).unwrap();

        assert_eq!(labels.iter().filter(|&&l| l == 1).count(), 1);
        assert_eq!(labels[flipped], 1);
    }

    #[test]
    fn test_class_balance_leaves_mixed_labels_alone() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut labels = vec![0, 1, 1, 0];
        assert_eq!(ensure_class_balance(&mut labels, &mut rng), None);
        assert_eq!(labels, vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_class_balance_on_empty_labels() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut labels: Vec<u8> = Vec::new();
        assert_eq!(ensure_class_balance(&mut labels, &mut rng), None);
    }
}

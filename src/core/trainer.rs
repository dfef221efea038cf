use crate::core::features::encode;
use crate::core::labels::{ensure_class_balance, synthesize_label};
use crate::core::model::ScoringModel;
use crate::core::store::RecordStore;
use crate::domain::model::{CompanyRecord, LeadRecord, TrainingOutcome, TrainingSample};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};

pub const DEFAULT_SAMPLES_PER_LEAD: usize = 3;
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;
pub const DEFAULT_SPLIT_SEED: u64 = 42;
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Builds a weakly supervised training set from a store snapshot and fits the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trainer {
    samples_per_lead: usize,
    test_fraction: f64,
    split_seed: u64,
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new()
    }
}

impl Trainer {
    pub fn new() -> Self {
        Self {
            samples_per_lead: DEFAULT_SAMPLES_PER_LEAD,
            test_fraction: DEFAULT_TEST_FRACTION,
            split_seed: DEFAULT_SPLIT_SEED,
        }
    }

    pub fn with_samples_per_lead(mut self, samples_per_lead: usize) -> Self {
        self.samples_per_lead = samples_per_lead;
        self
    }

    pub fn with_test_fraction(mut self, test_fraction: f64) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    pub fn with_split_seed(mut self, split_seed: u64) -> Self {
        self.split_seed = split_seed;
        self
    }

    /// Pairs every lead with up to `samples_per_lead` distinct random companies and
    /// labels each pair. Both classes are present whenever two or more samples exist.
    pub fn build_samples<R: Rng + ?Sized>(
        &self,
        leads: &[LeadRecord],
        companies: &[CompanyRecord],
        rng: &mut R,
    ) -> Vec<TrainingSample> {
        let per_lead = self.samples_per_lead.min(companies.len());
        let mut features = Vec::with_capacity(leads.len() * per_lead);
        let mut labels = Vec::with_capacity(leads.len() * per_lead);

        for lead in leads {
            for company_index in index::sample(rng, companies.len(), per_lead) {
                let pair = encode(lead, &companies[company_index]);
                labels.push(synthesize_label(&pair, rng));
                features.push(pair);
            }
        }

        ensure_class_balance(&mut labels, rng);

        features
            .into_iter()
            .zip(labels)
            .map(|(features, label)| TrainingSample { features, label })
            .collect()
    }

    pub fn split(&self, samples: Vec<TrainingSample>) -> (Vec<TrainingSample>, Vec<TrainingSample>) {
        train_test_split(samples, self.test_fraction, self.split_seed)
    }

    /// Retrains from the current store contents.
    ///
    /// An empty lead or company snapshot is not an error: nothing is trained and the
    /// existing model is left alone.
    pub async fn train<S: Storage, R: Rng + Send>(
        &self,
        store: &RecordStore,
        model: &ScoringModel<S>,
        rng: &mut R,
    ) -> Result<TrainingOutcome> {
        let leads = store.leads();
        let companies = store.companies();
        if leads.is_empty() || companies.is_empty() {
            tracing::info!(
                "Skipping training: {} leads, {} companies in store",
                leads.len(),
                companies.len()
            );
            return Ok(TrainingOutcome::skipped());
        }

        let samples = self.build_samples(&leads, &companies, rng);
        let total = samples.len();
        let (train, test) = self.split(samples);
        tracing::debug!(
            "Built {} samples from {} leads x {} companies ({} train / {} test)",
            total,
            leads.len(),
            companies.len(),
            train.len(),
            test.len()
        );

        model.train(&train).await?;
        let accuracy = evaluate(model, &test)?;

        tracing::info!(
            "✅ Model trained on {} samples, accuracy: {}",
            train.len(),
            accuracy.map_or_else(|| "n/a".to_string(), |a| format!("{:.3}", a))
        );

        Ok(TrainingOutcome {
            trained: true,
            n_samples: train.len(),
            accuracy,
        })
    }
}

/// Shuffles with a fixed seed and splits off `ceil(n * test_fraction)` samples for
/// testing, always leaving at least one training sample.
pub fn train_test_split(
    samples: Vec<TrainingSample>,
    test_fraction: f64,
    seed: u64,
) -> (Vec<TrainingSample>, Vec<TrainingSample>) {
    let n = samples.len();
    let n_test = ((n as f64 * test_fraction).ceil() as usize).min(n.saturating_sub(1));
    let n_train = n - n_test;

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));

    let train = indices[..n_train].iter().map(|&i| samples[i]).collect();
    let test = indices[n_train..].iter().map(|&i| samples[i]).collect();
    (train, test)
}

/// Fraction of test samples whose thresholded prediction matches the label.
pub fn evaluate<S: Storage>(model: &ScoringModel<S>, test: &[TrainingSample]) -> Result<Option<f64>> {
    if test.is_empty() {
        return Ok(None);
    }

    let features: Vec<_> = test.iter().map(|s| s.features).collect();
    let probabilities = model.predict(&features)?;
    let correct = probabilities
        .iter()
        .zip(test)
        .filter(|(p, s)| u8::from(**p > DECISION_THRESHOLD) == s.label)
        .count();

    Ok(Some(correct as f64 / test.len() as f64))
}

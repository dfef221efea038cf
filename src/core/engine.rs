use crate::core::classifier::LogisticRegression;
use crate::core::model::ScoringModel;
use crate::core::ranking::{to_match_rows, RankingService};
use crate::core::store::RecordStore;
use crate::core::trainer::Trainer;
use crate::domain::model::{
    CompanyRecord, EngineStatus, LeadRanking, LeadRecord, TrainingOutcome,
};
use crate::domain::ports::{ConfigProvider, MatchSink, Storage};
use crate::utils::error::{Result, ScoringError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Owns the record store and the model, and runs ingest, train and score against them.
pub struct ScoringEngine<S: Storage> {
    store: RecordStore,
    model: ScoringModel<S>,
    trainer: Trainer,
    ranking: RankingService,
    label_seed: Option<u64>,
}

impl<S: Storage> ScoringEngine<S> {
    pub fn new(storage: S, model_path: impl Into<String>) -> Self {
        Self {
            store: RecordStore::new(),
            model: ScoringModel::new(storage, model_path, LogisticRegression::new()),
            trainer: Trainer::new(),
            ranking: RankingService::new(),
            label_seed: None,
        }
    }

    pub fn from_config<C: ConfigProvider>(storage: S, config: &C) -> Self {
        let classifier = LogisticRegression::new()
            .with_regularization(config.regularization())
            .with_max_iter(config.max_iter())
            .with_tolerance(config.tolerance());
        let trainer = Trainer::new()
            .with_samples_per_lead(config.samples_per_lead())
            .with_test_fraction(config.test_fraction())
            .with_split_seed(config.split_seed());

        Self {
            store: RecordStore::new(),
            model: ScoringModel::new(storage, config.model_path(), classifier),
            trainer,
            ranking: RankingService::new(),
            label_seed: config.label_seed(),
        }
    }

    /// Fixes the seed used for company sampling and label draws on every `train`.
    pub fn with_label_seed(mut self, seed: u64) -> Self {
        self.label_seed = Some(seed);
        self
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn model(&self) -> &ScoringModel<S> {
        &self.model
    }

    /// Loads a previously persisted model, if any. Meant to run once at startup.
    pub async fn load_model(&self) -> bool {
        self.model.load().await
    }

    pub fn ingest_leads(&self, leads: Vec<LeadRecord>) -> Result<usize> {
        if leads.is_empty() {
            return Err(ScoringError::missing_data("no leads provided"));
        }
        let added = self.store.add_many_leads(leads);
        tracing::info!("📥 Ingested {} leads", added);
        Ok(added)
    }

    pub fn ingest_companies(&self, companies: Vec<CompanyRecord>) -> Result<usize> {
        if companies.is_empty() {
            return Err(ScoringError::missing_data("no companies provided"));
        }
        let added = self.store.add_many_companies(companies);
        tracing::info!("📥 Ingested {} companies", added);
        Ok(added)
    }

    pub async fn train(&self) -> Result<TrainingOutcome> {
        let mut rng = match self.label_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.train_with_rng(&mut rng).await
    }

    pub async fn train_with_rng<R: Rng + Send>(&self, rng: &mut R) -> Result<TrainingOutcome> {
        self.trainer.train(&self.store, &self.model, rng).await
    }

    pub fn score(&self, leads: &[LeadRecord]) -> Result<Vec<LeadRanking>> {
        self.ranking.score(leads, &self.store, &self.model)
    }

    /// Hands scored pairs to `sink` as flat rows and returns how many were accepted.
    pub async fn forward<K: MatchSink + ?Sized>(
        &self,
        rankings: &[LeadRanking],
        sink: &K,
    ) -> Result<usize> {
        let rows = to_match_rows(rankings);
        if rows.is_empty() {
            tracing::info!("Nothing to forward");
            return Ok(0);
        }
        let forwarded = sink.forward(&rows).await?;
        tracing::info!("📤 Forwarded {} match rows", forwarded);
        Ok(forwarded)
    }

    pub fn status(&self) -> EngineStatus {
        let (lead_count, company_count) = self.store.counts();
        EngineStatus {
            lead_count,
            company_count,
            model_ready: self.model.is_trained(),
        }
    }
}

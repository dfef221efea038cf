use crate::core::classifier::{LogisticParams, LogisticRegression};
use crate::domain::model::{FeatureVector, TrainingSample};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ScoringError};
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Clone, PartialEq)]
pub enum ModelState {
    Untrained,
    Trained(LogisticParams),
}

/// The single process-wide scoring model.
///
/// Parameters live in one storage slot at `path`; every successful `train` overwrites
/// it. The in-memory state lock is never held across an `.await`.
pub struct ScoringModel<S: Storage> {
    storage: S,
    path: String,
    classifier: LogisticRegression,
    state: RwLock<ModelState>,
}

impl<S: Storage> ScoringModel<S> {
    pub fn new(storage: S, path: impl Into<String>, classifier: LogisticRegression) -> Self {
        Self {
            storage,
            path: path.into(),
            classifier,
            state: RwLock::new(ModelState::Untrained),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn state(&self) -> ModelState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_trained(&self) -> bool {
        matches!(
            *self.state.read().unwrap_or_else(PoisonError::into_inner),
            ModelState::Trained(_)
        )
    }

    fn set_state(&self, state: ModelState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Populates the model from storage. Any failure leaves the model untrained.
    pub async fn load(&self) -> bool {
        let bytes = match self.storage.read_file(&self.path).await {
            Ok(bytes) => bytes,
            Err(ScoringError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No stored model at {}, starting untrained", self.path);
                return false;
            }
            Err(e) => {
                tracing::warn!("⚠️ Could not read stored model at {}: {}", self.path, e);
                return false;
            }
        };

        match bincode::deserialize::<LogisticParams>(&bytes) {
            Ok(params) => {
                self.set_state(ModelState::Trained(params));
                tracing::info!("✅ Loaded scoring model from {}", self.path);
                true
            }
            Err(e) => {
                tracing::warn!("⚠️ Stored model at {} is unreadable: {}", self.path, e);
                false
            }
        }
    }

    /// Fits on `samples`, switches to the new parameters, then overwrites the slot.
    ///
    /// A storage failure is returned to the caller but the fitted parameters stay live.
    pub async fn train(&self, samples: &[TrainingSample]) -> Result<()> {
        let params = self.classifier.fit(samples)?;
        let bytes = bincode::serialize(&params)?;
        self.set_state(ModelState::Trained(params));

        self.storage
            .write_file(&self.path, &bytes)
            .await
            .map_err(|e| ScoringError::ModelPersistenceError {
                message: format!("failed to write {}: {}", self.path, e),
            })?;
        tracing::debug!("Persisted model ({} bytes) to {}", bytes.len(), self.path);
        Ok(())
    }

    pub fn predict(&self, features: &[FeatureVector]) -> Result<Vec<f64>> {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            ModelState::Untrained => Err(ScoringError::ModelNotTrained),
            ModelState::Trained(params) => {
                Ok(features.iter().map(|f| params.predict_proba(f)).collect())
            }
        }
    }
}

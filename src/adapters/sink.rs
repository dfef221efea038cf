use crate::core::{MatchRow, MatchSink, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Batch document in the shape the persistence collaborator ingests.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchBatch {
    pub matches: Vec<MatchRow>,
}

/// Writes match rows as one JSON document, replacing any previous batch at `path`.
pub struct JsonFileSink<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> JsonFileSink<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<S: Storage> MatchSink for JsonFileSink<S> {
    async fn forward(&self, rows: &[MatchRow]) -> Result<usize> {
        let batch = MatchBatch {
            matches: rows.to_vec(),
        };
        let data = serde_json::to_vec_pretty(&batch)?;
        self.storage.write_file(&self.path, &data).await?;
        tracing::debug!("Wrote {} match rows to {}", rows.len(), self.path);
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::tests::MockStorage;

    #[tokio::test]
    async fn test_forward_writes_match_batch() {
        let storage = MockStorage::new();
        let sink = JsonFileSink::new(storage.clone(), "out/matches.json");
        let rows = vec![
            MatchRow {
                lead_id: 1,
                company_id: 2,
                compatibility_score: 0.875,
            },
            MatchRow {
                lead_id: 1,
                company_id: 3,
                compatibility_score: 0.25,
            },
        ];

        assert_eq!(sink.forward(&rows).await.unwrap(), 2);

        let written = storage.get_file("out/matches.json").await.unwrap();
        let batch: MatchBatch = serde_json::from_slice(&written).unwrap();
        assert_eq!(batch.matches, rows);

        let raw: serde_json::Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(raw["matches"][0]["compatibility_score"], 0.875);
    }
}

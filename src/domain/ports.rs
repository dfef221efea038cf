use crate::domain::model::MatchRow;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn model_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn samples_per_lead(&self) -> usize;
    fn test_fraction(&self) -> f64;
    fn split_seed(&self) -> u64;
    fn label_seed(&self) -> Option<u64>;
    fn regularization(&self) -> f64;
    fn max_iter(&self) -> usize;
    fn tolerance(&self) -> f64;
}

/// Receives scored matches for persistence outside the engine.
#[async_trait]
pub trait MatchSink: Send + Sync {
    async fn forward(&self, rows: &[MatchRow]) -> Result<usize>;
}

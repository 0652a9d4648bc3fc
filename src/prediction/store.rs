use anyhow::Result;
use async_trait::async_trait;

use crate::models::PredictionRecord;

/// Durable sink for completed predictions.
#[async_trait]
pub trait PredictionStore: Send + Sync {
    /// Append one record, returning its storage id.
    async fn append(&self, record: PredictionRecord) -> Result<i64>;

    /// Up to `limit` records, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<PredictionRecord>>;
}

// Repository trait for chart persistence
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A chart as stored: type tag and parameters kept as plain text columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRow {
    pub id: i64,
    pub project: String,
    pub name: String,
    pub chart_type: String,
    pub parameters: String,
}

#[async_trait]
pub trait ChartRepository: Send + Sync {
    /// Insert a new row, ignoring `row.id`, and return the assigned id
    async fn insert(&self, row: ChartRow) -> anyhow::Result<i64>;

    /// Replace an existing row; returns false if no such chart exists
    async fn update(&self, row: ChartRow) -> anyhow::Result<bool>;

    /// Delete a chart; returns false if no such chart exists
    async fn delete(&self, project: &str, id: i64) -> anyhow::Result<bool>;

    async fn fetch(&self, project: &str, id: i64) -> anyhow::Result<Option<ChartRow>>;

    /// All charts of a project, ordered by id
    async fn list(&self, project: &str) -> anyhow::Result<Vec<ChartRow>>;
}

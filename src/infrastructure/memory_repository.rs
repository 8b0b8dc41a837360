// In-memory chart repository, optionally snapshotted to a JSON file
use crate::application::chart_repository::{ChartRepository, ChartRow};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ChartTable {
    next_id: i64,
    rows: BTreeMap<i64, ChartRow>,
}

#[derive(Debug, Default)]
pub struct InMemoryChartRepository {
    table: RwLock<ChartTable>,
    snapshot_path: Option<PathBuf>,
}

impl InMemoryChartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a repository backed by a snapshot file, loading it if it exists.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let exists = tokio::fs::try_exists(&path)
            .await
            .with_context(|| format!("Failed to check chart snapshot {}", path.display()))?;
        let table = if exists {
            let text = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read chart snapshot {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse chart snapshot {}", path.display()))?
        } else {
            ChartTable::default()
        };

        tracing::debug!(
            "Opened chart snapshot {} with {} charts",
            path.display(),
            table.rows.len()
        );

        Ok(Self {
            table: RwLock::new(table),
            snapshot_path: Some(path),
        })
    }

    /// Write the table to the snapshot file via a sibling temp file, so a
    /// crash mid-write never leaves a truncated snapshot behind.
    async fn persist(&self, table: &ChartTable) -> Result<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let data = serde_json::to_vec_pretty(table).context("Failed to encode chart snapshot")?;
        let staging = staging_path(path);
        tokio::fs::write(&staging, data)
            .await
            .with_context(|| format!("Failed to write chart snapshot {}", staging.display()))?;
        tokio::fs::rename(&staging, path)
            .await
            .with_context(|| format!("Failed to replace chart snapshot {}", path.display()))?;
        Ok(())
    }

    /// Apply `change` to a copy of the table and keep it only once persisted.
    async fn commit<T: Send>(
        &self,
        change: impl FnOnce(&mut ChartTable) -> Option<T> + Send,
    ) -> Result<Option<T>> {
        let mut table = self.table.write().await;
        let mut next = table.clone();
        let Some(outcome) = change(&mut next) else {
            return Ok(None);
        };
        self.persist(&next).await?;
        *table = next;
        Ok(Some(outcome))
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[async_trait]
impl ChartRepository for InMemoryChartRepository {
    async fn insert(&self, mut row: ChartRow) -> Result<i64> {
        let id = self
            .commit(|table| {
                table.next_id += 1;
                row.id = table.next_id;
                table.rows.insert(row.id, row);
                Some(table.next_id)
            })
            .await?
            .context("Insert produced no chart id")?;

        tracing::debug!("Inserted chart row {}", id);
        Ok(id)
    }

    async fn update(&self, row: ChartRow) -> Result<bool> {
        let updated = self
            .commit(|table| match table.rows.get_mut(&row.id) {
                Some(existing) if existing.project == row.project => {
                    *existing = row;
                    Some(())
                }
                _ => None,
            })
            .await?;
        Ok(updated.is_some())
    }

    async fn delete(&self, project: &str, id: i64) -> Result<bool> {
        let deleted = self
            .commit(|table| {
                let owned = table.rows.get(&id).is_some_and(|row| row.project == project);
                if owned { table.rows.remove(&id) } else { None }
            })
            .await?;
        Ok(deleted.is_some())
    }

    async fn fetch(&self, project: &str, id: i64) -> Result<Option<ChartRow>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .get(&id)
            .filter(|row| row.project == project)
            .cloned())
    }

    async fn list(&self, project: &str) -> Result<Vec<ChartRow>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|row| row.project == project)
            .cloned()
            .collect())
    }
}

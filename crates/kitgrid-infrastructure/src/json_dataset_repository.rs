//! File-backed record source and decision gateway.
//!
//! The dataset is a JSON array of PascalCase records. A batch decision
//! rewrites `OperationOrderStatus` of every listed record in one atomic
//! file replacement, or changes nothing.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use kitgrid_core::api::{BatchDecision, DecisionGateway, ListFilter, RecordSource};
use kitgrid_core::error::{GridError, Result};
use kitgrid_core::record::{Record, RecordId};
use tokio::sync::Mutex;

pub struct JsonDatasetRepository {
    path: PathBuf,
    /// Serializes read-modify-write cycles of the dataset file.
    write_lock: Mutex<()>,
}

impl JsonDatasetRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<Record>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| GridError::network("list fetch", format!("{:?}: {}", self.path, e)))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    async fn write_all(&self, records: &[Record]) -> Result<()> {
        let content = serde_json::to_string_pretty(records)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordSource for JsonDatasetRepository {
    async fn fetch(&self, filter: &ListFilter) -> Result<Vec<Record>> {
        let records: Vec<Record> = self
            .read_all()
            .await?
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect();
        tracing::debug!(
            "[JsonDatasetRepository] Fetched {} record(s) from {:?}",
            records.len(),
            self.path
        );
        Ok(records)
    }

    async fn fetch_detail(&self, id: RecordId) -> Result<Record> {
        self.read_all()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| GridError::not_found("Record", id))
    }
}

#[async_trait]
impl DecisionGateway for JsonDatasetRepository {
    async fn submit(&self, batch: &BatchDecision) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;

        let unknown: Vec<RecordId> = batch
            .ids
            .iter()
            .copied()
            .filter(|id| !records.iter().any(|r| r.id == *id))
            .collect();
        if !unknown.is_empty() {
            return Err(GridError::PartialBatchFailure { failed: unknown });
        }

        let status = batch.decision().resulting_status();
        for record in records.iter_mut().filter(|r| batch.ids.contains(&r.id)) {
            record.operation_order_status = Some(status.to_string());
        }
        self.write_all(&records).await?;

        tracing::info!(
            "[JsonDatasetRepository] Marked {} record(s) as {}",
            batch.ids.len(),
            status
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed(dir: &TempDir) -> JsonDatasetRepository {
        let path = dir.path().join("requests.json");
        std::fs::write(
            &path,
            r#"[
                {"Id": 1, "StoreRequestStatus": "Pending", "Project": "Lyon"},
                {"Id": 2, "StoreRequestStatus": "Pending", "Project": "Paris"},
                {"Id": 3, "StoreRequestStatus": "Pending", "OperationOrderStatus": "Approved", "Project": "Lyon"}
            ]"#,
        )
        .unwrap();
        JsonDatasetRepository::new(path)
    }

    #[tokio::test]
    async fn test_fetch_applies_filter() {
        let dir = TempDir::new().unwrap();
        let repo = seed(&dir);

        let all = repo.fetch(&ListFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let lyon = repo
            .fetch(&ListFilter::default().with_project("Lyon"))
            .await
            .unwrap();
        assert_eq!(lyon.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_missing_file_is_network_error() {
        let dir = TempDir::new().unwrap();
        let repo = JsonDatasetRepository::new(dir.path().join("absent.json"));
        let err = repo.fetch(&ListFilter::default()).await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_submit_rewrites_secondary_status() {
        let dir = TempDir::new().unwrap();
        let repo = seed(&dir);

        repo.submit(&BatchDecision {
            ids: vec![1, 2],
            approved: false,
        })
        .await
        .unwrap();

        let record = repo.fetch_detail(2).await.unwrap();
        assert_eq!(record.operation_order_status.as_deref(), Some("Rejected"));
        assert_eq!(record.text_field("Project").as_deref(), Some("Paris"));
    }

    #[tokio::test]
    async fn test_unknown_id_fails_whole_batch() {
        let dir = TempDir::new().unwrap();
        let repo = seed(&dir);

        let err = repo
            .submit(&BatchDecision {
                ids: vec![1, 9],
                approved: true,
            })
            .await
            .unwrap_err();

        assert_eq!(err, GridError::PartialBatchFailure { failed: vec![9] });
        let untouched = repo.fetch_detail(1).await.unwrap();
        assert_eq!(untouched.operation_order_status, None);
    }

    #[tokio::test]
    async fn test_fetch_detail_not_found() {
        let dir = TempDir::new().unwrap();
        let repo = seed(&dir);
        assert!(repo.fetch_detail(42).await.unwrap_err().is_not_found());
    }
}

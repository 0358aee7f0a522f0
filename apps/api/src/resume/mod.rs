// Resume Renderer: reads the saved record (or the sample) and serves it as
// an HTML page, a PDF download and JSON.

pub mod handlers;

use tracing::{info, warn};

use crate::form::validation::validate;
use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::render::RecordSource;
use crate::storage::{RecordStore, StorageError};

/// The saved record, or the sample when nothing has been saved.
pub async fn load_or_sample(
    store: &dyn RecordStore,
    key: &str,
) -> Result<(ResumeRecord, RecordSource), StorageError> {
    Ok(match store.load(key).await? {
        Some(record) => (record, RecordSource::Stored),
        None => (ResumeRecord::sample(), RecordSource::Sample),
    })
}

/// Like `load_or_sample`, but a corrupt stored value also falls back to the
/// sample so the pages keep working until the next save.
pub async fn load_for_display(
    store: &dyn RecordStore,
    key: &str,
) -> Result<(ResumeRecord, RecordSource), StorageError> {
    match load_or_sample(store, key).await {
        Err(StorageError::Corrupt { key, source }) => {
            warn!(key = %key, error = %source, "Stored resume is corrupt; showing sample");
            Ok((ResumeRecord::sample(), RecordSource::Sample))
        }
        other => other,
    }
}

/// Validates and saves a record wholesale under `key`.
pub async fn save_record(
    store: &dyn RecordStore,
    key: &str,
    record: &ResumeRecord,
) -> Result<(), AppError> {
    validate(record).map_err(AppError::Validation)?;
    store.save(key, record).await?;
    info!(
        key = %key,
        backend = store.backend(),
        items = record.item_count(),
        "Saved resume"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_sample_when_nothing_saved() {
        let store = MemoryStore::new();
        let (record, source) = load_or_sample(&store, "resumeData").await.unwrap();
        assert_eq!(source, RecordSource::Sample);
        assert_eq!(record, ResumeRecord::sample());
    }

    #[tokio::test]
    async fn test_saved_record_wins_over_sample() {
        let store = MemoryStore::new();
        let mut record = ResumeRecord::sample();
        record.name = "Ada Lovelace".into();
        save_record(&store, "resumeData", &record).await.unwrap();

        let (loaded, source) = load_or_sample(&store, "resumeData").await.unwrap();
        assert_eq!(source, RecordSource::Stored);
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_invalid_record_not_saved() {
        let store = MemoryStore::new();
        let err = save_record(&store, "resumeData", &ResumeRecord::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.load("resumeData").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_record_falls_back_for_display() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("resumeData.json"), "[1, 2").unwrap();
        let store = crate::storage::FileStore::open(tmp.path()).await.unwrap();

        assert!(load_or_sample(&store, "resumeData").await.is_err());
        let (record, source) = load_for_display(&store, "resumeData").await.unwrap();
        assert_eq!(source, RecordSource::Sample);
        assert_eq!(record.name, "John Doe");
    }
}

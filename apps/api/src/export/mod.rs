// Resume export: programmatic layout of the record, then PDF assembly.
// Both steps are CPU-bound and run inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod layout;
pub mod pdf;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;

pub use layout::{layout_resume, LaidOutDocument, PageGeometry};
pub use pdf::{render_pdf, DocumentInfo};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: the document has no pages")]
    EmptyDocument,
}

/// Lays out and serializes `record` as PDF bytes.
pub fn export_pdf_sync(
    record: &ResumeRecord,
    geometry: &PageGeometry,
) -> Result<Vec<u8>, ExportError> {
    let doc = layout_resume(record, geometry);
    debug!(pages = doc.page_count(), "Laid out resume");
    let info = DocumentInfo {
        title: document_title(record),
        author: record.name.clone(),
        created: Utc::now(),
    };
    render_pdf(&doc, &info)
}

/// Async entry point used by the handlers.
pub async fn export_pdf(record: ResumeRecord, geometry: PageGeometry) -> Result<Vec<u8>, AppError> {
    let bytes = tokio::task::spawn_blocking(move || export_pdf_sync(&record, &geometry))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF export: {e}")))??;

    info!(bytes = bytes.len(), "Rendered resume PDF");
    Ok(bytes)
}

fn document_title(record: &ResumeRecord) -> String {
    let name = record.name.trim();
    if name.is_empty() {
        "Resume".to_string()
    } else {
        format!("{name} - Resume")
    }
}

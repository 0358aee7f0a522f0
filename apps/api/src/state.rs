use std::sync::Arc;

use crate::config::Config;
use crate::export::PageGeometry;
use crate::render::Templates;
use crate::storage::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// File or Redis backed, chosen at startup from `REDIS_URL`.
    pub store: Arc<dyn RecordStore>,
    pub config: Config,
    pub templates: Arc<Templates>,
    /// Page size and margins for the PDF export. US letter with 40pt margins.
    pub geometry: PageGeometry,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: Config) -> Result<Self, tera::Error> {
        let templates = Templates::new(&config.pdf_filename)?;
        Ok(AppState {
            store,
            config,
            templates: Arc::new(templates),
            geometry: PageGeometry::letter(),
        })
    }

    pub fn storage_key(&self) -> &str {
        &self.config.storage_key
    }
}

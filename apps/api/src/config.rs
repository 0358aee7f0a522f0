use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use axum::http::HeaderValue;

use crate::storage::validate_key;

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory for the file store. Ignored when `redis_url` is set.
    pub storage_dir: PathBuf,
    /// The single key the resume is saved under.
    pub storage_key: String,
    pub redis_url: Option<String>,
    /// File name offered for the PDF download.
    pub pdf_filename: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            storage_dir: PathBuf::from("./data"),
            storage_key: "resumeData".to_string(),
            redis_url: None,
            pdf_filename: "resume.pdf".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => defaults.port,
        };

        let storage_key = var("STORAGE_KEY").unwrap_or(defaults.storage_key);
        validate_key(&storage_key).context("STORAGE_KEY is invalid")?;

        let pdf_filename = var("PDF_FILENAME").unwrap_or(defaults.pdf_filename);
        if pdf_filename.contains(['"', '/', '\\']) {
            bail!("PDF_FILENAME must be a plain file name, got '{pdf_filename}'");
        }
        if !pdf_filename.chars().all(|c| c == ' ' || c.is_ascii_graphic()) {
            bail!("PDF_FILENAME must be printable ASCII, got {pdf_filename:?}");
        }
        attachment_disposition(&pdf_filename).context("PDF_FILENAME is not a valid header value")?;

        Ok(Config {
            port,
            rust_log: var("RUST_LOG").unwrap_or(defaults.rust_log),
            storage_dir: var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            storage_key,
            redis_url: var("REDIS_URL"),
            pdf_filename,
        })
    }
}

/// `Content-Disposition` value offering a download named `filename`.
pub fn attachment_disposition(
    filename: &str,
) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
}

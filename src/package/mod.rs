//! Result packaging: single JSON files and ZIP archives.
//!
//! A single result becomes one pretty-printed JSON file. Several results
//! become a ZIP archive, requested from the conversion service first and
//! built locally when the service cannot provide it. Failed conversions are
//! never packaged.

mod archive;
mod remote;

pub use archive::build_archive;
pub use remote::{parse_archive_response, request_archive};

use std::path::{Path, PathBuf};

use crate::config::{ConverterConfig, DEFAULT_ARCHIVE_NAME};
use crate::detect::is_pdf_name;
use crate::error::{Error, Result};
use crate::extract::http_client;
use crate::model::{ConversionResult, DocumentRecord};

/// Media type of single-file artifacts.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Media type of archive artifacts.
pub const ZIP_MEDIA_TYPE: &str = "application/zip";

/// A named downloadable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Suggested file name
    pub name: String,

    /// File content
    pub bytes: Vec<u8>,

    /// MIME type of the content
    pub media_type: &'static str,
}

impl Artifact {
    /// Write the artifact into `dir` under its own name, creating `dir` if needed.
    pub async fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.name);
        tokio::fs::write(&path, &self.bytes).await?;
        Ok(path)
    }

    /// Write the artifact to an explicit path.
    pub async fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        tokio::fs::write(path, &self.bytes).await?;
        Ok(())
    }
}

/// Name of the JSON file produced for `filename`.
///
/// A trailing `.pdf` (any case) is replaced with `.json`; other names get
/// `.json` appended.
pub fn json_file_name(filename: &str) -> String {
    let stem = if is_pdf_name(filename) {
        &filename[..filename.len() - 4]
    } else {
        filename
    };
    format!("{}.json", stem)
}

/// Serialize a document as UTF-8 JSON with two-space indentation.
pub fn to_json_bytes(doc: &DocumentRecord) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(doc)?)
}

/// Turns conversion results into artifacts.
#[derive(Debug, Clone)]
pub struct Packager {
    remote: Option<(reqwest::Client, String)>,
    archive_name: String,
}

impl Packager {
    /// Create a packager that builds archives locally.
    pub fn new() -> Self {
        Self {
            remote: None,
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
        }
    }

    /// Create a packager using the configured packaging endpoint, if any.
    pub fn from_config(config: &ConverterConfig) -> Result<Self> {
        let remote = match config.packaging_endpoint() {
            Some(endpoint) => Some((http_client(&config.user_agent)?, endpoint.to_string())),
            None => None,
        };
        Ok(Self {
            remote,
            archive_name: config.archive_name.clone(),
        })
    }

    /// Package one successful result as a JSON file.
    pub fn package_single(&self, result: &ConversionResult) -> Result<Artifact> {
        let doc = result.data().ok_or_else(|| {
            Error::Packaging(format!(
                "{} was not converted: {}",
                result.filename(),
                result.error().unwrap_or_default()
            ))
        })?;

        Ok(Artifact {
            name: json_file_name(result.filename()),
            bytes: to_json_bytes(doc)?,
            media_type: JSON_MEDIA_TYPE,
        })
    }

    /// Package every successful result into one ZIP archive.
    ///
    /// Any remote failure falls back to building the archive locally; only a
    /// local failure is returned as an error.
    pub async fn package_all(&self, results: &[ConversionResult]) -> Result<Artifact> {
        let documents: Vec<(&str, &DocumentRecord)> = results
            .iter()
            .filter_map(|r| r.data().map(|data| (r.filename(), data)))
            .collect();

        if documents.is_empty() {
            return Err(Error::Packaging("no converted files to package".into()));
        }

        if let Some((client, endpoint)) = &self.remote {
            match request_archive(client, endpoint, &documents).await {
                Ok(bytes) => {
                    log::debug!("Archive of {} files built remotely", documents.len());
                    return Ok(self.archive(bytes));
                }
                Err(e) => log::warn!("Remote packaging failed, building archive locally: {}", e),
            }
        }

        let bytes = build_archive(documents.iter().map(|&(_, data)| data))?;
        Ok(self.archive(bytes))
    }

    fn archive(&self, bytes: Vec<u8>) -> Artifact {
        Artifact {
            name: self.archive_name.clone(),
            bytes,
            media_type: ZIP_MEDIA_TYPE,
        }
    }
}

impl Default for Packager {
    fn default() -> Self {
        Self::new()
    }
}

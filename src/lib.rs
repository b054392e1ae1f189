//! # pdfjson
//!
//! PDF to JSON conversion with a remote service path and a local fallback.
//!
//! Each PDF becomes a JSON document listing its pages with their text, word
//! count, and character count. Several documents can be packaged into one ZIP
//! archive.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfjson::{ConverterConfig, FileCandidate, Session};
//!
//! # async fn run() -> pdfjson::Result<()> {
//! let config = ConverterConfig::new().with_endpoint("http://localhost:8000/convert");
//! let mut session = Session::new(&config)?;
//!
//! session.add_files(vec![FileCandidate::from_path("report.pdf").await?]);
//! session.convert_all(|p| println!("{}/{}", p.index, p.total)).await;
//!
//! let archive = session.package_all().await?;
//! archive.write_to("out").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Conversion paths
//!
//! - **Remote**: when an endpoint is configured and answers a `HEAD` probe,
//!   files are uploaded to it.
//! - **Local**: otherwise, or when the upload fails, text is extracted
//!   in-process with lopdf.
//!
//! Files are processed strictly one at a time; a failing file is recorded and
//! the batch continues.

pub mod config;
pub mod convert;
pub mod detect;
pub mod error;
pub mod extract;
pub mod intake;
pub mod model;
pub mod package;
pub mod session;

// Re-export commonly used types
pub use config::ConverterConfig;
pub use convert::{ConversionDispatcher, Progress};
pub use detect::{detect_format_from_bytes, is_pdf_bytes, is_pdf_name, PdfFormat};
pub use error::{Error, Result};
pub use extract::{Extractor, LocalExtractor, RemoteExtractor};
pub use intake::{collect_candidates, FileCandidate, FileIntake, PendingFile};
pub use model::{ConversionResult, DocumentRecord, PageRecord};
pub use package::{json_file_name, Artifact, Packager};
pub use session::Session;

use std::path::Path;

/// Extract a PDF file locally into a document record.
///
/// # Example
///
/// ```no_run
/// let doc = pdfjson::extract_file("document.pdf").unwrap();
/// println!("Pages: {}", doc.total_pages());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<DocumentRecord> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    extract_bytes(&name, &data)
}

/// Extract PDF bytes locally into a document record named `filename`.
pub fn extract_bytes(filename: &str, data: &[u8]) -> Result<DocumentRecord> {
    LocalExtractor::new().extract_bytes(filename, data)
}

/// Convert a PDF file locally to pretty-printed JSON.
///
/// # Example
///
/// ```no_run
/// let json = pdfjson::to_json("document.pdf").unwrap();
/// std::fs::write("document.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = extract_file(path)?;
    Ok(serde_json::to_string_pretty(&doc)?)
}

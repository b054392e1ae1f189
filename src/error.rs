//! Error types for pdfjson library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfjson operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting or packaging PDF files.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The byte stream is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// Local text extraction failed for a file, including PDF structure errors.
    #[error("Error extracting text from PDF: {0}")]
    Extraction(String),

    /// The conversion service answered badly or could not be reached.
    #[error("Remote conversion error: {0}")]
    Remote(String),

    /// The availability probe could not reach the conversion service.
    #[error("Conversion service unavailable")]
    ProbeUnavailable,

    /// Building the download artifact failed.
    #[error("Packaging error: {0}")]
    Packaging(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Pending file index is out of range.
    #[error("File index {0} is out of range ({1} files pending)")]
    IndexOutOfRange(usize, usize),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Extraction(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Remote(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Packaging(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ProbeUnavailable;
        assert_eq!(err.to_string(), "Conversion service unavailable");

        let err = Error::Extraction("bad xref".into());
        assert_eq!(err.to_string(), "Error extracting text from PDF: bad xref");

        let err = Error::IndexOutOfRange(4, 2);
        assert_eq!(err.to_string(), "File index 4 is out of range (2 files pending)");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_lopdf_error_conversion() {
        let err: Error = lopdf::Document::load_mem(b"%PDF-1.7\n1 0 obj\n<<")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Extraction(_)));
        assert!(err.to_string().starts_with("Error extracting text from PDF:"));
    }

    #[test]
    fn test_zip_error_conversion() {
        let err: Error = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, Error::Packaging(_)));
    }
}

//! Per-file conversion outcome.

use super::DocumentRecord;
use serde::{Deserialize, Serialize};

/// Outcome of converting one file.
///
/// Either the file converted and carries its [`DocumentRecord`], or it failed
/// and carries a non-empty error message. On the wire this is the
/// `{filename, success, data?, error?}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireResult", into = "WireResult")]
pub struct ConversionResult {
    filename: String,
    outcome: Result<DocumentRecord, String>,
}

impl ConversionResult {
    /// A successful conversion.
    pub fn success(filename: impl Into<String>, data: DocumentRecord) -> Self {
        Self {
            filename: filename.into(),
            outcome: Ok(data),
        }
    }

    /// A failed conversion. An empty message is replaced with a generic one.
    pub fn failure(filename: impl Into<String>, error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "Unknown error".to_string();
        }
        Self {
            filename: filename.into(),
            outcome: Err(error),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The extracted document, if the conversion succeeded.
    pub fn data(&self) -> Option<&DocumentRecord> {
        self.outcome.as_ref().ok()
    }

    /// The failure message, if the conversion failed.
    pub fn error(&self) -> Option<&str> {
        self.outcome.as_ref().err().map(String::as_str)
    }

    /// Consume the result, yielding the document on success.
    pub fn into_data(self) -> Option<DocumentRecord> {
        self.outcome.ok()
    }
}

#[derive(Serialize, Deserialize)]
struct WireResult {
    filename: String,
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<DocumentRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl TryFrom<WireResult> for ConversionResult {
    type Error = String;

    fn try_from(wire: WireResult) -> Result<Self, Self::Error> {
        match (wire.success, wire.data, wire.error) {
            (true, Some(data), None) => Ok(Self::success(wire.filename, data)),
            (false, None, Some(error)) => Ok(Self::failure(wire.filename, error)),
            (true, None, _) => Err(format!("{}: success without data", wire.filename)),
            (true, Some(_), Some(_)) => Err(format!("{}: success with an error", wire.filename)),
            (false, Some(_), _) => Err(format!("{}: failure with data", wire.filename)),
            (false, None, None) => Err(format!("{}: failure without an error", wire.filename)),
        }
    }
}

impl From<ConversionResult> for WireResult {
    fn from(result: ConversionResult) -> Self {
        match result.outcome {
            Ok(data) => WireResult {
                filename: result.filename,
                success: true,
                data: Some(data),
                error: None,
            },
            Err(error) => WireResult {
                filename: result.filename,
                success: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

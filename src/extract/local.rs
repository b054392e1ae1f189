//! In-process extraction using lopdf.

use lopdf::Document as LopdfDocument;

use crate::detect::detect_format_from_bytes;
use crate::error::{Error, Result};
use crate::intake::PendingFile;
use crate::model::DocumentRecord;

use super::{BoxFuture, Extractor};

/// Extracts page text locally.
///
/// Each page's text is split into whitespace-delimited tokens and rejoined
/// with single spaces; layout, paragraphs and line breaks are not preserved.
#[derive(Debug, Clone, Default)]
pub struct LocalExtractor {
    _private: (),
}

impl LocalExtractor {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Extract a document record from raw PDF bytes.
    ///
    /// The first page that fails aborts the whole file.
    pub fn extract_bytes(&self, filename: &str, data: &[u8]) -> Result<DocumentRecord> {
        detect_format_from_bytes(data)
            .map_err(|_| Error::Extraction("file does not start with a PDF header".into()))?;

        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            log::warn!("{} is encrypted; extracted text may be empty", filename);
        }

        let page_count = doc.get_pages().len() as u32;
        log::debug!("Extracting {} pages from {}", page_count, filename);

        let mut record = DocumentRecord::new(filename);
        for page_number in 1..=page_count {
            let text = doc
                .extract_text(&[page_number])
                .map_err(|e| Error::Extraction(format!("page {}: {}", page_number, e)))?;
            record.push_tokens(text.split_whitespace());
        }

        Ok(record)
    }
}

impl Extractor for LocalExtractor {
    fn name(&self) -> &str {
        "local"
    }

    fn extract<'a>(&'a self, file: &'a PendingFile) -> BoxFuture<'a, Result<DocumentRecord>> {
        Box::pin(async move { self.extract_bytes(file.name(), file.data()) })
    }
}

//! Document-level records.

use super::PageRecord;
use serde::{Deserialize, Serialize};

/// Structured output for one PDF: its name and page records in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDocumentRecord")]
pub struct DocumentRecord {
    /// Original file name
    filename: String,

    /// Number of pages, always equal to `pages.len()`
    total_pages: usize,

    /// Pages in page-number order
    pages: Vec<PageRecord>,
}

impl DocumentRecord {
    /// Create an empty record for a file.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            total_pages: 0,
            pages: Vec::new(),
        }
    }

    /// Append the next page's text, numbering it after the last page.
    pub fn push_page(&mut self, content: impl Into<String>) -> &PageRecord {
        let page = PageRecord::new(self.next_page_number(), content);
        self.push(page)
    }

    /// Append the next page from raw text tokens joined by a single space.
    pub fn push_tokens<'a, I>(&mut self, tokens: I) -> &PageRecord
    where
        I: IntoIterator<Item = &'a str>,
    {
        let page = PageRecord::from_tokens(self.next_page_number(), tokens);
        self.push(page)
    }

    fn next_page_number(&self) -> u32 {
        self.pages.len() as u32 + 1
    }

    fn push(&mut self, page: PageRecord) -> &PageRecord {
        self.pages.push(page);
        self.total_pages = self.pages.len();
        &self.pages[self.total_pages - 1]
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Get the number of pages in the document.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_number: u32) -> Option<&PageRecord> {
        if page_number == 0 {
            return None;
        }
        self.pages.get((page_number - 1) as usize)
    }

    /// Total words across all pages.
    pub fn word_count(&self) -> usize {
        self.pages.iter().map(PageRecord::word_count).sum()
    }

    /// Total characters across all pages.
    pub fn character_count(&self) -> usize {
        self.pages.iter().map(PageRecord::character_count).sum()
    }
}

/// Unvalidated shape of a document record as it arrives over the wire.
#[derive(Deserialize)]
struct RawDocumentRecord {
    filename: String,
    total_pages: usize,
    pages: Vec<PageRecord>,
}

impl TryFrom<RawDocumentRecord> for DocumentRecord {
    type Error = String;

    fn try_from(raw: RawDocumentRecord) -> Result<Self, Self::Error> {
        if raw.total_pages != raw.pages.len() {
            return Err(format!(
                "total_pages is {} but {} pages were listed",
                raw.total_pages,
                raw.pages.len()
            ));
        }
        for (index, page) in raw.pages.iter().enumerate() {
            if page.page_number() as usize != index + 1 {
                return Err(format!(
                    "page at position {} is numbered {}",
                    index + 1,
                    page.page_number()
                ));
            }
        }
        Ok(Self {
            filename: raw.filename,
            total_pages: raw.total_pages,
            pages: raw.pages,
        })
    }
}

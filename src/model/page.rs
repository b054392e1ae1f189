//! Page-level records.

use serde::{Deserialize, Serialize};

/// Extracted text of a single page with its counts.
///
/// Counts are always derived from `content`: `character_count ==
/// content.chars().count()` and `word_count` is the number of maximal
/// non-whitespace runs. Deserialized records with other counts are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRecord")]
pub struct PageRecord {
    /// Page number (1-indexed)
    page_number: u32,

    /// Page text
    content: String,

    /// Number of whitespace-delimited words
    word_count: usize,

    /// Number of characters, whitespace included
    character_count: usize,
}

impl PageRecord {
    /// Build a page record, computing both counts from `content`.
    pub fn new(page_number: u32, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            page_number,
            word_count: count_words(&content),
            character_count: content.chars().count(),
            content,
        }
    }

    /// Build a page record from raw text tokens joined by a single space.
    ///
    /// Whitespace inside tokens also splits them, so runs of spaces collapse.
    pub fn from_tokens<'a, I>(page_number: u32, tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let content = tokens
            .into_iter()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(page_number, content)
    }

    /// Page number (1-indexed).
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Page text.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn character_count(&self) -> usize {
        self.character_count
    }

    /// Check if the page produced no text.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Count maximal runs of non-whitespace characters.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Unvalidated shape of a page record as it arrives over the wire.
#[derive(Deserialize)]
struct RawPageRecord {
    page_number: u32,
    content: String,
    word_count: usize,
    character_count: usize,
}

impl TryFrom<RawPageRecord> for PageRecord {
    type Error = String;

    fn try_from(raw: RawPageRecord) -> Result<Self, Self::Error> {
        let page = PageRecord::new(raw.page_number, raw.content);
        if raw.word_count != page.word_count {
            return Err(format!(
                "page {} has word_count {} but its content has {} words",
                page.page_number, raw.word_count, page.word_count
            ));
        }
        if raw.character_count != page.character_count {
            return Err(format!(
                "page {} has character_count {} but its content has {} characters",
                page.page_number, raw.character_count, page.character_count
            ));
        }
        Ok(page)
    }
}

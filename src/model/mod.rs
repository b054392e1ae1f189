//! Record types produced by a conversion run.
//!
//! These are the JSON shapes written to disk and exchanged with the
//! conversion service: page records inside a document record, wrapped in a
//! per-file conversion result.

mod document;
mod page;
mod result;

pub use document::DocumentRecord;
pub use page::{count_words, PageRecord};
pub use result::ConversionResult;

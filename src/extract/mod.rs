//! Extraction adapters turning PDF bytes into a [`DocumentRecord`].
//!
//! Two implementations share the [`Extractor`] trait: [`LocalExtractor`]
//! parses the file in-process with lopdf, and [`RemoteExtractor`] uploads it
//! to a conversion service. The dispatcher in [`crate::convert`] picks one per
//! file at runtime.

mod local;
mod remote;

pub use local::LocalExtractor;
pub use remote::{parse_conversion_response, RemoteExtractor};
pub(crate) use remote::http_client;

use std::future::Future;
use std::pin::Pin;

use crate::error::Result;
use crate::intake::PendingFile;
use crate::model::DocumentRecord;

/// Boxed future returned by [`Extractor`] methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Capability to turn one pending file into a document record.
pub trait Extractor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Best-effort check that the extractor can be used right now.
    ///
    /// Returns `false` instead of failing; unavailability is not an error.
    fn is_available(&self) -> BoxFuture<'_, bool> {
        Box::pin(async { true })
    }

    /// Extract every page of `file`, or fail without a partial record.
    fn extract<'a>(&'a self, file: &'a PendingFile) -> BoxFuture<'a, Result<DocumentRecord>>;
}

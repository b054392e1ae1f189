//! Conversion dispatcher: remote first, local fallback, one file at a time.
//!
//! For every pending file the dispatcher probes the primary (remote)
//! extractor, uses it when the probe succeeds, and falls back to the local
//! extractor when the probe fails or the remote attempt errors. Only a local
//! failure is recorded as a failed [`ConversionResult`]; it never stops the
//! rest of the batch.
//!
//! # Example
//!
//! ```no_run
//! use pdfjson::convert::ConversionDispatcher;
//! use pdfjson::{ConverterConfig, PendingFile};
//!
//! # async fn run() -> pdfjson::Result<()> {
//! let config = ConverterConfig::new().with_endpoint("http://localhost:8000/convert");
//! let dispatcher = ConversionDispatcher::from_config(&config)?;
//!
//! let files = vec![PendingFile::new("report.pdf", std::fs::read("report.pdf")?)];
//! let results = dispatcher
//!     .convert_all(&files, |p| println!("{}/{} {}", p.index, p.total, p.filename))
//!     .await;
//! assert_eq!(results.len(), 1);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::config::ConverterConfig;
use crate::error::Result;
use crate::extract::{Extractor, LocalExtractor, RemoteExtractor};
use crate::intake::PendingFile;
use crate::model::ConversionResult;

/// Progress report emitted once per file, after its result is known.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// Position of the file in the batch (1-indexed)
    pub index: usize,

    /// Number of files in the batch
    pub total: usize,

    pub filename: &'a str,

    pub result: &'a ConversionResult,
}

/// Chooses an extractor per file and collects the results.
pub struct ConversionDispatcher {
    primary: Option<Arc<dyn Extractor>>,
    fallback: Arc<dyn Extractor>,
}

impl ConversionDispatcher {
    /// Create a dispatcher that only uses `fallback`.
    pub fn new(fallback: Arc<dyn Extractor>) -> Self {
        Self {
            primary: None,
            fallback,
        }
    }

    /// Try `primary` first for every file.
    pub fn with_primary(mut self, primary: Arc<dyn Extractor>) -> Self {
        self.primary = Some(primary);
        self
    }

    /// Build the standard remote-then-local dispatcher from configuration.
    ///
    /// Fails only when the HTTP client for the configured endpoint cannot be
    /// built.
    pub fn from_config(config: &ConverterConfig) -> Result<Self> {
        let dispatcher = Self::default();
        Ok(match config.endpoint.as_deref() {
            Some(endpoint) => {
                let remote = RemoteExtractor::new(endpoint, &config.user_agent)?;
                dispatcher.with_primary(Arc::new(remote))
            }
            None => dispatcher,
        })
    }

    /// Convert a single file.
    pub async fn convert_one(&self, file: &PendingFile) -> ConversionResult {
        log::debug!("Converting {} ({} bytes)", file.name(), file.size());

        if let Some(primary) = &self.primary {
            if primary.is_available().await {
                match primary.extract(file).await {
                    Ok(data) => {
                        log::debug!("Converted {} with {}", file.name(), primary.name());
                        return ConversionResult::success(file.name(), data);
                    }
                    Err(e) => log::warn!(
                        "{} conversion of {} failed, using {}: {}",
                        primary.name(),
                        file.name(),
                        self.fallback.name(),
                        e
                    ),
                }
            } else {
                log::debug!(
                    "{} extractor unavailable, using {} for {}",
                    primary.name(),
                    self.fallback.name(),
                    file.name()
                );
            }
        }

        match self.fallback.extract(file).await {
            Ok(data) => ConversionResult::success(file.name(), data),
            Err(e) => {
                log::warn!("Failed to convert {}: {}", file.name(), e);
                ConversionResult::failure(file.name(), e.to_string())
            }
        }
    }

    /// Convert every file in order, strictly one at a time.
    ///
    /// Returns one result per input, in input order. `on_progress` is called
    /// exactly once per file.
    pub async fn convert_all<F>(
        &self,
        files: &[PendingFile],
        mut on_progress: F,
    ) -> Vec<ConversionResult>
    where
        F: FnMut(Progress<'_>),
    {
        let total = files.len();
        let mut results = Vec::with_capacity(total);

        for (i, file) in files.iter().enumerate() {
            let result = self.convert_one(file).await;
            on_progress(Progress {
                index: i + 1,
                total,
                filename: file.name(),
                result: &result,
            });
            results.push(result);
        }

        let succeeded = results.iter().filter(|r| r.is_success()).count();
        log::info!("Converted {}/{} files", succeeded, total);
        results
    }
}

impl Default for ConversionDispatcher {
    /// A local-only dispatcher.
    fn default() -> Self {
        Self::new(Arc::new(LocalExtractor::new()))
    }
}

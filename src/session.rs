//! Conversion session: the pending files and the last batch of results.

use crate::config::ConverterConfig;
use crate::convert::{ConversionDispatcher, Progress};
use crate::error::{Error, Result};
use crate::intake::{FileCandidate, FileIntake};
use crate::model::ConversionResult;
use crate::package::{Artifact, Packager};

/// Owns the state of one interactive conversion session.
///
/// Files are added and removed through the session; a conversion run
/// replaces the previous results.
pub struct Session {
    intake: FileIntake,
    results: Vec<ConversionResult>,
    dispatcher: ConversionDispatcher,
    packager: Packager,
}

impl Session {
    /// Create a session from configuration.
    pub fn new(config: &ConverterConfig) -> Result<Self> {
        Ok(Self::with_parts(
            ConversionDispatcher::from_config(config)?,
            Packager::from_config(config)?,
        ))
    }

    /// Create a session from explicit components.
    pub fn with_parts(dispatcher: ConversionDispatcher, packager: Packager) -> Self {
        Self {
            intake: FileIntake::new(),
            results: Vec::new(),
            dispatcher,
            packager,
        }
    }

    /// Add candidates; non-PDFs are ignored. Returns the accepted count.
    pub fn add_files<I>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = FileCandidate>,
    {
        self.intake.add_files(candidates)
    }

    /// Remove a pending file by index.
    pub fn remove_at(&mut self, index: usize) -> Result<()> {
        self.intake.remove_at(index).map(|_| ())
    }

    /// Number of pending files.
    pub fn count(&self) -> usize {
        self.intake.count()
    }

    pub fn intake(&self) -> &FileIntake {
        &self.intake
    }

    /// Results of the last conversion run.
    pub fn results(&self) -> &[ConversionResult] {
        &self.results
    }

    /// Drop pending files and results.
    pub fn reset(&mut self) {
        self.intake.clear();
        self.results.clear();
    }

    /// Convert all pending files, replacing any previous results.
    pub async fn convert_all<F>(&mut self, on_progress: F) -> &[ConversionResult]
    where
        F: FnMut(Progress<'_>),
    {
        self.results = self
            .dispatcher
            .convert_all(self.intake.files(), on_progress)
            .await;
        &self.results
    }

    /// Package the result at `index` as a JSON file.
    pub fn package_result(&self, index: usize) -> Result<Artifact> {
        let result = self
            .results
            .get(index)
            .ok_or(Error::IndexOutOfRange(index, self.results.len()))?;
        self.packager.package_single(result)
    }

    /// Package every successful result into one archive.
    pub async fn package_all(&self) -> Result<Artifact> {
        self.packager.package_all(&self.results).await
    }
}

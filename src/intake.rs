//! File intake: the ordered list of files waiting to be converted.

use std::path::{Path, PathBuf};

use crate::detect::{is_pdf_media_type, is_pdf_name, sniff_media_type};
use crate::error::{Error, Result};

/// A file offered for conversion, before PDF filtering.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    /// Display name (usually the file name without directories)
    pub name: String,

    /// Declared media type, when the source provides one
    pub media_type: Option<String>,

    /// Raw file content
    pub data: Vec<u8>,
}

impl FileCandidate {
    /// Create a candidate from in-memory content.
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            media_type: None,
            data: data.into(),
        }
    }

    /// Set the declared media type.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Read a candidate from disk.
    ///
    /// The media type is sniffed from the content, so a PDF saved without a
    /// `.pdf` suffix is still recognized.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let media_type = sniff_media_type(&data).map(str::to_string);
        Ok(Self {
            name,
            media_type,
            data,
        })
    }

    /// Check whether this candidate is accepted as a PDF.
    ///
    /// Either signal is enough: the declared type can be missing or generic
    /// for dropped files, and the name can lack an extension.
    pub fn is_pdf(&self) -> bool {
        self.media_type.as_deref().is_some_and(is_pdf_media_type) || is_pdf_name(&self.name)
    }
}

/// A file accepted for conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    name: String,
    data: Vec<u8>,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size of the file in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

impl From<FileCandidate> for PendingFile {
    fn from(candidate: FileCandidate) -> Self {
        Self::new(candidate.name, candidate.data)
    }
}

/// Ordered collection of pending files.
///
/// Duplicates are kept as independent entries.
#[derive(Debug, Clone, Default)]
pub struct FileIntake {
    files: Vec<PendingFile>,
}

impl FileIntake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every PDF candidate in arrival order; returns how many were accepted.
    pub fn add_files<I>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = FileCandidate>,
    {
        let before = self.files.len();
        for candidate in candidates {
            if candidate.is_pdf() {
                self.files.push(candidate.into());
            } else {
                log::debug!("Skipping non-PDF file: {}", candidate.name);
            }
        }
        self.files.len() - before
    }

    /// Remove the file at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<PendingFile> {
        if index >= self.files.len() {
            return Err(Error::IndexOutOfRange(index, self.files.len()));
        }
        Ok(self.files.remove(index))
    }

    pub fn count(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> &[PendingFile] {
        &self.files
    }

    /// Remove every pending file.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Drain the pending list, leaving the intake empty.
    pub fn take(&mut self) -> Vec<PendingFile> {
        std::mem::take(&mut self.files)
    }
}

/// Read candidates from files and directories.
///
/// Directories contribute their direct children (not recursive), in name
/// order. Unreadable entries inside a directory are skipped with a warning;
/// an unreadable top-level path is an error.
pub async fn collect_candidates<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<FileCandidate>> {
    let mut candidates = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if tokio::fs::metadata(path).await?.is_dir() {
            for entry in list_dir(path).await? {
                match FileCandidate::from_path(&entry).await {
                    Ok(candidate) => candidates.push(candidate),
                    Err(e) => log::warn!("Skipping {}: {}", entry.display(), e),
                }
            }
        } else {
            candidates.push(FileCandidate::from_path(path).await?);
        }
    }
    Ok(candidates)
}

async fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    let mut reader = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = reader.next_entry().await? {
        if entry.file_type().await?.is_file() {
            entries.push(entry.path());
        }
    }
    entries.sort();
    Ok(entries)
}

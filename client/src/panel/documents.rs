// RAG document selection
// Local file list, the "database generated" gate and the decorative progress display

use crate::error::SelectionError;
use crate::store::FileSummary;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Extensions the backend indexes (lower case)
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["txt", "pdf", "docx", "csv", "xlsx"];

/// Labels shown while a vector database is being generated
pub const INGEST_STAGES: [&str; 5] = [
    "Uploading files",
    "Processing files",
    "Creating embeddings",
    "Generating database",
    "Connecting database to agent",
];

/// A local file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name sent to the backend
    pub name: String,
    /// Location on disk
    pub path: PathBuf,
    /// Size in bytes at selection time
    pub size: u64,
}

impl SelectedFile {
    /// Describe the file at `path`, reading its size from the file system
    pub fn from_path(path: &Path) -> Result<Self, SelectionError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        check_extension(&name)?;

        let metadata = std::fs::metadata(path).map_err(|source| SelectionError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            name,
            path: path.to_path_buf(),
            size: metadata.len(),
        })
    }
}

fn check_extension(name: &str) -> Result<(), SelectionError> {
    let extension = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());
    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(SelectionError::UnsupportedExtension(name.to_string())),
    }
}

/// Timer-driven progress labels for vector database generation
///
/// Purely decorative: the stage only depends on elapsed time, never on what
/// the backend is actually doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestProgress {
    started: Instant,
    interval: Duration,
}

impl IngestProgress {
    /// Start the display at `started`
    pub fn start(started: Instant, interval: Duration) -> Self {
        Self { started, interval }
    }

    /// Stage index at `now`, clamped to the last stage
    pub fn stage_at(&self, now: Instant) -> usize {
        let last = INGEST_STAGES.len() - 1;
        let interval_ms = self.interval.as_millis();
        if interval_ms == 0 {
            return last;
        }
        let elapsed_ms = now.saturating_duration_since(self.started).as_millis();
        usize::try_from(elapsed_ms / interval_ms)
            .unwrap_or(last)
            .min(last)
    }

    /// Stage label at `now`
    pub fn label_at(&self, now: Instant) -> &'static str {
        INGEST_STAGES[self.stage_at(now)]
    }

    /// Displayed percentage at `now` (25 per stage, capped at 100)
    pub fn percent_at(&self, now: Instant) -> u8 {
        (self.stage_at(now) * 25).min(100) as u8
    }
}

/// Files selected on the RAG panel
#[derive(Debug, Clone)]
pub struct DocumentSet {
    files: Vec<SelectedFile>,
    generated: bool,
    /// Bumped on every selection change so late results can be recognized
    revision: u64,
    progress: Option<IngestProgress>,
    progress_interval: Duration,
    last_error: Option<String>,
}

impl DocumentSet {
    /// Create an empty selection
    pub fn new(progress_interval: Duration) -> Self {
        Self {
            files: Vec::new(),
            generated: false,
            revision: 0,
            progress: None,
            progress_interval,
            last_error: None,
        }
    }

    /// Add a file; resets the generated flag
    pub fn add(&mut self, file: SelectedFile) -> Result<(), SelectionError> {
        check_extension(&file.name)?;
        if self.files.iter().any(|f| f.path == file.path) {
            return Err(SelectionError::AlreadySelected(file.path.display().to_string()));
        }
        self.files.push(file);
        self.selection_changed();
        Ok(())
    }

    /// Remove the file at `index`; resets the generated flag
    pub fn remove(&mut self, index: usize) -> Option<SelectedFile> {
        if index >= self.files.len() {
            return None;
        }
        let removed = self.files.remove(index);
        self.selection_changed();
        Some(removed)
    }

    /// Selected files, in selection order
    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    /// True if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// True once a vector database was built for the current selection
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Selection revision
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Generation allowed: files selected and no database built for them yet
    pub fn can_generate(&self) -> bool {
        !self.files.is_empty() && !self.generated
    }

    /// Summary of the local selection
    pub fn summary(&self) -> FileSummary {
        FileSummary::from_named_sizes(self.files.iter().map(|f| (f.name.clone(), f.size)))
    }

    /// `(name, path)` pairs for reading the files before upload
    pub fn upload_paths(&self) -> Vec<(String, PathBuf)> {
        self.files
            .iter()
            .map(|f| (f.name.clone(), f.path.clone()))
            .collect()
    }

    /// Decorative progress, while a generation is running
    pub fn progress(&self) -> Option<&IngestProgress> {
        self.progress.as_ref()
    }

    /// Failure text of the last generation attempt
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub(crate) fn start_progress(&mut self, now: Instant) {
        self.progress = Some(IngestProgress::start(now, self.progress_interval));
        self.last_error = None;
    }

    pub(crate) fn finish(&mut self, revision: u64, result: Result<(), String>) {
        self.progress = None;
        match result {
            // A result for an older selection says nothing about the current one
            Ok(()) if revision == self.revision => self.generated = true,
            Ok(()) => {}
            Err(message) => self.last_error = Some(message),
        }
    }

    pub(crate) fn mark_generated(&mut self) {
        self.generated = true;
    }

    fn selection_changed(&mut self) {
        self.generated = false;
        self.revision += 1;
    }
}

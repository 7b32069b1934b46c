use crate::error::ExtractError;
use crate::ui::ProgressManager;
use crate::RunSummary;
use std::cell::RefCell;
use std::path::PathBuf;

/// Everything a run tells the outside world about.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    DocumentsFound { root: PathBuf, count: usize },
    NoDocuments { root: PathBuf, extensions: Vec<String> },
    DocumentStarted { path: PathBuf },
    DirectoryCreated { path: PathBuf },
    WouldCreateDirectory { path: PathBuf },
    FileCreated { path: PathBuf },
    WouldWriteFile { path: PathBuf },
    NoBlocks { path: PathBuf, language: String },
    Failure { message: String, path: Option<PathBuf> },
    Debug { message: String },
    Completed(RunSummary),
}

impl RunEvent {
    pub fn failure(error: &ExtractError) -> Self {
        RunEvent::Failure {
            message: error.to_string(),
            path: error.path().map(|p| p.to_path_buf()),
        }
    }
}

/// Sink for run events. The console implementation is `OutputFormatter`.
pub trait Reporter {
    fn report(&self, event: &RunEvent);
}

/// Collects events in memory, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: RefCell<Vec<RunEvent>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RunEvent> {
        self.events.borrow().clone()
    }

    pub fn failures(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                RunEvent::Failure { message, .. } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, event: &RunEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Hides the progress bar while an event is printed.
pub struct ProgressAwareReporter<'a> {
    inner: &'a dyn Reporter,
    progress: &'a ProgressManager,
}

impl<'a> ProgressAwareReporter<'a> {
    pub fn new(inner: &'a dyn Reporter, progress: &'a ProgressManager) -> Self {
        Self { inner, progress }
    }
}

impl Reporter for ProgressAwareReporter<'_> {
    fn report(&self, event: &RunEvent) {
        self.progress.suspend(|| self.inner.report(event));
    }
}

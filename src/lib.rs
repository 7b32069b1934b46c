pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, DiagramConfig, OutputConfig, ScanConfig};
pub use error::{ExtractError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{Block, BlockExtractor, DocumentOutcome, OutputWriter};
pub use scanner::{Document, DocumentScanner, FileFilter};
pub use ui::{
    MemoryReporter, OutputFormatter, OutputMode, ProgressAwareReporter, ProgressManager,
    Reporter, RunEvent,
};

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Totals for one run. Partial failures are counted, never fatal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub documents_found: usize,
    pub documents_processed: usize,
    pub blocks_found: usize,
    pub files_written: usize,
    pub failures: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    fn absorb(&mut self, outcome: &DocumentOutcome) {
        self.documents_processed += 1;
        self.blocks_found += outcome.blocks_found;
        self.files_written += outcome.files_written;
        self.failures += outcome.failures;
    }
}

/// Walks a folder and turns every fenced diagram block into a file.
pub struct Extractor {
    config: Config,
    scanner: DocumentScanner,
    blocks: BlockExtractor,
    writer: OutputWriter,
    progress: ProgressManager,
}

impl Extractor {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            scanner: DocumentScanner::new(&config.scan),
            blocks: BlockExtractor::new(&config.diagram)?,
            writer: OutputWriter::new(&config.output),
            progress: ProgressManager::default(),
            config,
        })
    }

    /// Create an Extractor from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;

        Ok(Self::new(config)?
            .with_dry_run(cli_args.dry_run)
            .with_progress(ProgressManager::new(cli_args.wants_progress_bar())))
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.writer = OutputWriter::new(&self.config.output).with_dry_run(dry_run);
        self
    }

    pub fn with_progress(mut self, progress: ProgressManager) -> Self {
        self.progress = progress;
        self
    }

    /// Runs the whole extraction. Only an unusable root is an error; every
    /// per-document and per-file failure is reported and counted instead.
    pub fn run(&self, root: &Path, reporter: &dyn Reporter) -> Result<RunSummary> {
        let start_time = Instant::now();
        let root = resolve_root(root)?;

        let scan = self.scanner.scan_directory(&root)?;
        let mut summary = RunSummary {
            documents_found: scan.documents.len(),
            ..RunSummary::default()
        };

        for error in &scan.errors {
            reporter.report(&RunEvent::failure(error));
            summary.failures += 1;
        }

        for path in &scan.symlink_loops {
            reporter.report(&RunEvent::Debug {
                message: format!("Skipped symbolic link loop: {}", path.display()),
            });
        }

        if scan.documents.is_empty() {
            reporter.report(&RunEvent::NoDocuments {
                root,
                extensions: self.config.scan.extensions.clone(),
            });
            summary.elapsed = start_time.elapsed();
            return Ok(summary);
        }

        reporter.report(&RunEvent::DocumentsFound {
            root: root.clone(),
            count: scan.documents.len(),
        });
        reporter.report(&RunEvent::Debug {
            message: self
                .scanner
                .get_statistics(&scan.documents)
                .display_summary(),
        });

        let progress_bar = self
            .progress
            .create_document_progress(scan.documents.len() as u64);
        let reporter = ProgressAwareReporter::new(reporter, &self.progress);

        for document in &scan.documents {
            progress_bar.set_message(document.filename.clone());
            self.process_document(document, &reporter, &mut summary);
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();
        summary.elapsed = start_time.elapsed();
        reporter.report(&RunEvent::Completed(summary.clone()));

        Ok(summary)
    }

    fn process_document(
        &self,
        document: &Document,
        reporter: &dyn Reporter,
        summary: &mut RunSummary,
    ) {
        reporter.report(&RunEvent::DocumentStarted {
            path: document.path.clone(),
        });

        let text = match std::fs::read_to_string(&document.path) {
            Ok(text) => text,
            // Invalid UTF-8 counts as unreadable; other encodings are not supported.
            Err(source) => {
                let error = ExtractError::ReadDocument {
                    path: document.path.clone(),
                    source,
                };
                reporter.report(&RunEvent::failure(&error));
                summary.failures += 1;
                return;
            }
        };

        match self
            .writer
            .write_blocks(document, self.blocks.blocks(&text), reporter)
        {
            Ok(outcome) => {
                if outcome.blocks_found == 0 {
                    reporter.report(&RunEvent::NoBlocks {
                        path: document.path.clone(),
                        language: self.config.diagram.language.clone(),
                    });
                }
                summary.absorb(&outcome);
            }
            Err(error) => {
                reporter.report(&RunEvent::failure(&error));
                summary.failures += 1;
            }
        }
    }
}

/// Makes `root` absolute and checks that it is a folder.
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(root).map_err(|_| ExtractError::InvalidRoot {
        path: root.to_path_buf(),
    })?;

    if !absolute.is_dir() {
        return Err(ExtractError::InvalidRoot { path: absolute });
    }

    Ok(absolute)
}

use crate::config::OutputConfig;
use crate::error::{ExtractError, Result};
use crate::extractor::Block;
use crate::scanner::Document;
use crate::ui::{Reporter, RunEvent};
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to one document's blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentOutcome {
    pub blocks_found: usize,
    pub files_written: usize,
    pub failures: usize,
}

pub struct OutputWriter {
    directory_name: String,
    file_extension: String,
    dry_run: bool,
}

impl OutputWriter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            directory_name: config.directory_name.clone(),
            file_extension: config.file_extension.clone(),
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// `<document dir>/<directory_name>`
    pub fn output_directory(&self, document: &Document) -> PathBuf {
        document.directory().join(&self.directory_name)
    }

    /// `<document dir>/<directory_name>/<base>_<ordinal>.<ext>`
    pub fn output_path(&self, document: &Document, ordinal: usize) -> PathBuf {
        self.output_directory(document).join(format!(
            "{}_{}.{}",
            document.base_name(),
            ordinal,
            self.file_extension
        ))
    }

    /// Creates the output folder if it is missing. Only one level is created:
    /// the document's own folder always exists.
    pub fn ensure_output_directory(
        &self,
        document: &Document,
        reporter: &dyn Reporter,
    ) -> Result<PathBuf> {
        let dir = self.output_directory(document);

        if dir.exists() {
            return Ok(dir);
        }

        if self.dry_run {
            reporter.report(&RunEvent::WouldCreateDirectory { path: dir.clone() });
            return Ok(dir);
        }

        fs::create_dir(&dir).map_err(|source| ExtractError::CreateDirectory {
            path: dir.clone(),
            source,
        })?;
        reporter.report(&RunEvent::DirectoryCreated { path: dir.clone() });

        Ok(dir)
    }

    /// Writes every block of `document`. Fails only when the output folder
    /// cannot be created; individual write failures are reported and skipped.
    pub fn write_blocks<'t, I>(
        &self,
        document: &Document,
        blocks: I,
        reporter: &dyn Reporter,
    ) -> Result<DocumentOutcome>
    where
        I: IntoIterator<Item = Block<'t>>,
    {
        self.ensure_output_directory(document, reporter)?;

        let mut outcome = DocumentOutcome::default();

        for block in blocks {
            outcome.blocks_found += 1;
            let path = self.output_path(document, block.ordinal);

            match self.write_file(&path, &block.source) {
                Ok(()) => {
                    outcome.files_written += 1;
                    let event = if self.dry_run {
                        RunEvent::WouldWriteFile { path }
                    } else {
                        RunEvent::FileCreated { path }
                    };
                    reporter.report(&event);
                }
                Err(e) => {
                    outcome.failures += 1;
                    reporter.report(&RunEvent::failure(&e));
                }
            }
        }

        Ok(outcome)
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }

        fs::write(path, contents).map_err(|source| ExtractError::WriteFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

use crate::config::ScanConfig;
use crate::error::{ExtractError, Result};
use crate::scanner::file_filter::FileFilter;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A Markdown file found under the scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub filename: String,
    pub size: u64,
}

impl Document {
    pub fn new(path: PathBuf, relative_path: PathBuf, size: u64) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            path,
            relative_path,
            filename,
            size,
        }
    }

    /// File name without its final extension (`notes.v2.md` -> `notes.v2`).
    pub fn base_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.filename.clone())
    }

    /// Folder holding the document; output folders are created next to it.
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Documents found by a scan, plus the entries that could not be visited.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub documents: Vec<Document>,
    pub errors: Vec<ExtractError>,
    /// Symlinks pointing back at an ancestor; skipped, not failures.
    pub symlink_loops: Vec<PathBuf>,
}

pub struct DocumentScanner {
    filter: FileFilter,
    max_depth: Option<usize>,
}

impl DocumentScanner {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
            max_depth: config.max_depth,
        }
    }

    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<ScanOutcome> {
        let root_path = root.as_ref();

        if !root_path.is_dir() {
            return Err(ExtractError::InvalidRoot {
                path: root_path.to_path_buf(),
            });
        }

        let mut outcome = ScanOutcome::default();
        let mut visited: HashSet<PathBuf> = HashSet::new();

        let mut walker = WalkDir::new(root_path)
            .follow_links(true)
            .sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let entries = walker
            .into_iter()
            .filter_entry(|e| self.should_traverse(e, &mut visited));

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.loop_ancestor().is_some() => {
                    if let Some(path) = err.path() {
                        outcome.symlink_loops.push(path.to_path_buf());
                    }
                    continue;
                }
                Err(err) => {
                    outcome.errors.push(err.into());
                    continue;
                }
            };

            if entry.file_type().is_file() && self.filter.is_document(entry.path()) {
                outcome.documents.push(self.make_document(&entry, root_path));
            }
        }

        Ok(outcome)
    }

    fn should_traverse(&self, entry: &DirEntry, visited: &mut HashSet<PathBuf>) -> bool {
        if !entry.file_type().is_dir() {
            return true;
        }

        if entry.depth() > 0 && !self.filter.should_traverse_directory(entry.path()) {
            return false;
        }

        // Symlinked directories may reach the same folder twice.
        match entry.path().canonicalize() {
            Ok(canonical) => visited.insert(canonical),
            Err(_) => true,
        }
    }

    fn make_document(&self, entry: &DirEntry, root_path: &Path) -> Document {
        let path = entry.path().to_path_buf();
        let relative_path = path
            .strip_prefix(root_path)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.clone());
        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);

        Document::new(path, relative_path, size)
    }

    pub fn get_statistics(&self, documents: &[Document]) -> ScanStatistics {
        let mut files_by_directory = BTreeMap::new();
        for doc in documents {
            let dir = doc
                .relative_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ".".to_string());
            *files_by_directory.entry(dir).or_insert(0) += 1;
        }

        ScanStatistics {
            total_files: documents.len(),
            total_size: documents.iter().map(|d| d.size).sum(),
            files_by_directory,
            extensions: self.filter.get_extensions().to_vec(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanStatistics {
    pub total_files: usize,
    pub total_size: u64,
    pub files_by_directory: BTreeMap<String, usize>,
    pub extensions: Vec<String>,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Scan results ({}): {} files, {}",
            self.extensions.join(", "),
            self.total_files,
            format_bytes(self.total_size)
        );

        for (dir, count) in &self.files_by_directory {
            summary.push_str(&format!("\n    {}: {} files", dir, count));
        }

        summary
    }
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn found_names(outcome: &ScanOutcome) -> Vec<String> {
        let mut names: Vec<String> = outcome
            .documents
            .iter()
            .map(|d| d.relative_path.to_string_lossy().replace('\\', "/"))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_document_naming() {
        let doc = Document::new(
            PathBuf::from("/docs/guide/notes.v2.md"),
            PathBuf::from("guide/notes.v2.md"),
            10,
        );

        assert_eq!(doc.filename, "notes.v2.md");
        assert_eq!(doc.base_name(), "notes.v2");
        assert_eq!(doc.directory(), Path::new("/docs/guide"));
    }

    #[test]
    fn test_scan_finds_documents_at_every_depth() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::write(root.join("top.md"), "# top").unwrap();
        fs::write(root.join("a/one.MD"), "# one").unwrap();
        fs::write(root.join("a/b/c/deep.Md"), "# deep").unwrap();
        fs::write(root.join("b.txt"), "ignored").unwrap();
        fs::write(root.join("a/b/diagram.puml"), "ignored").unwrap();
        fs::create_dir(root.join("dir.md")).unwrap();

        let scanner = DocumentScanner::new(&ScanConfig::default());
        let outcome = scanner.scan_directory(root).unwrap();

        assert_eq!(
            found_names(&outcome),
            vec!["a/b/c/deep.Md", "a/one.MD", "top.md"]
        );
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_scan_empty_directory_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "plain").unwrap();

        let scanner = DocumentScanner::new(&ScanConfig::default());
        let outcome = scanner.scan_directory(temp_dir.path()).unwrap();

        assert!(outcome.documents.is_empty());
    }

    #[test]
    fn test_scan_rejects_missing_or_file_root() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.md");
        fs::write(&file, "x").unwrap();

        let scanner = DocumentScanner::new(&ScanConfig::default());

        assert!(matches!(
            scanner.scan_directory(temp_dir.path().join("missing")),
            Err(ExtractError::InvalidRoot { .. })
        ));
        assert!(matches!(
            scanner.scan_directory(&file),
            Err(ExtractError::InvalidRoot { .. })
        ));
    }

    #[test]
    fn test_scan_respects_exclusions_and_depth() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join("docs/nested")).unwrap();
        fs::write(root.join("node_modules/pkg/README.md"), "x").unwrap();
        fs::write(root.join("docs/guide.md"), "x").unwrap();
        fs::write(root.join("docs/nested/deep.md"), "x").unwrap();

        let config = ScanConfig {
            exclude_dirs: vec!["node_modules".to_string()],
            max_depth: Some(2),
            ..ScanConfig::default()
        };
        let scanner = DocumentScanner::new(&config);
        let outcome = scanner.scan_directory(root).unwrap();

        assert_eq!(found_names(&outcome), vec!["docs/guide.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_survives_symlink_cycles() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("docs/a.md"), "x").unwrap();
        std::os::unix::fs::symlink(root, root.join("docs/loop")).unwrap();
        std::os::unix::fs::symlink(root.join("docs"), root.join("alias")).unwrap();

        let scanner = DocumentScanner::new(&ScanConfig::default());
        let outcome = scanner.scan_directory(root).unwrap();

        assert_eq!(outcome.documents.len(), 1);
        assert!(outcome.errors.is_empty());
        assert!(!outcome.symlink_loops.is_empty());
    }

    #[test]
    fn test_scan_statistics() {
        let documents = vec![
            Document::new(PathBuf::from("/r/a.md"), PathBuf::from("a.md"), 100),
            Document::new(PathBuf::from("/r/x/b.md"), PathBuf::from("x/b.md"), 200),
            Document::new(PathBuf::from("/r/x/c.md"), PathBuf::from("x/c.md"), 300),
        ];

        let scanner = DocumentScanner::new(&ScanConfig::default());
        let stats = scanner.get_statistics(&documents);

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_size, 600);
        assert_eq!(stats.files_by_directory.get("."), Some(&1));
        assert_eq!(stats.files_by_directory.get("x"), Some(&2));
        assert!(stats.display_summary().contains("3 files"));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(2 * 1024 * 1024), "2.0 MB");
    }
}

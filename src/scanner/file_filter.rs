use crate::config::ScanConfig;
use std::path::Path;

pub struct FileFilter {
    doc_extensions: Vec<String>,
    exclude_dirs: Vec<String>,
}

impl FileFilter {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            doc_extensions: config
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            exclude_dirs: config
                .exclude_dirs
                .iter()
                .map(|d| d.to_lowercase())
                .collect(),
        }
    }

    pub fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| self.doc_extensions.contains(&ext.to_lowercase()))
    }

    pub fn should_traverse_directory(&self, path: &Path) -> bool {
        match path.file_name().and_then(|s| s.to_str()) {
            Some(dir_name) => {
                let dir_name_lower = dir_name.to_lowercase();
                !self.exclude_dirs.contains(&dir_name_lower)
            }
            None => true,
        }
    }

    pub fn get_extensions(&self) -> &[String] {
        &self.doc_extensions
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new(&ScanConfig::default())
    }
}

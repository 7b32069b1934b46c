pub mod document_scanner;
pub mod file_filter;

pub use document_scanner::{Document, DocumentScanner, ScanOutcome, ScanStatistics};
pub use file_filter::FileFilter;

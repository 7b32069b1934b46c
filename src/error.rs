use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Folder does not exist or is not a directory: {}", path.display())]
    InvalidRoot { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create folder {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Scan error at {path}: {message}")]
    Scan { path: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid fence pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl ExtractError {
    /// Path of the file or folder the error is about, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ExtractError::InvalidRoot { path }
            | ExtractError::ReadDocument { path, .. }
            | ExtractError::CreateDirectory { path, .. }
            | ExtractError::WriteFile { path, .. } => Some(path),
            _ => None,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ExtractError {
    fn user_message(&self) -> String {
        match self {
            ExtractError::InvalidRoot { path } => {
                format!(
                    "The given folder does not exist or is not a directory: {}",
                    path.display()
                )
            }
            ExtractError::ReadDocument { path, source } => {
                format!("Could not read {}: {}", path.display(), source)
            }
            ExtractError::CreateDirectory { path, source } => {
                format!("Could not create folder {}: {}", path.display(), source)
            }
            ExtractError::WriteFile { path, source } => {
                format!("Could not write {}: {}", path.display(), source)
            }
            ExtractError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ExtractError::InvalidRoot { .. } => Some(
                "Pass the path of an existing folder, e.g. plantuml-extract ./docs".to_string(),
            ),
            ExtractError::Config { .. } => Some(
                "Check your configuration file syntax, or run with --generate-config to get a fresh sample."
                    .to_string(),
            ),
            ExtractError::Pattern(_) => Some(
                "Use a plain word as the fence language, e.g. --language plantuml".to_string(),
            ),
            ExtractError::CreateDirectory { .. } | ExtractError::WriteFile { .. } => Some(
                "Ensure you have write permission next to the Markdown files.".to_string(),
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ExtractError {
    fn from(error: toml::de::Error) -> Self {
        ExtractError::Config {
            message: error.to_string(),
        }
    }
}

impl From<walkdir::Error> for ExtractError {
    fn from(error: walkdir::Error) -> Self {
        let path = error
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());

        let message = if error.loop_ancestor().is_some() {
            "symbolic link loop detected".to_string()
        } else if error
            .io_error()
            .is_some_and(|e| e.kind() == std::io::ErrorKind::PermissionDenied)
        {
            "permission denied".to_string()
        } else {
            error.to_string()
        };

        ExtractError::Scan { path, message }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;

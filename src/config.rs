use crate::error::{ExtractError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub diagram: DiagramConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Document extensions, compared case-insensitively.
    pub extensions: Vec<String>,
    /// Directory names that are never descended into.
    pub exclude_dirs: Vec<String>,
    /// Unlimited when absent.
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Fence info string that marks a diagram block.
    pub language: String,
    pub start_directive: String,
    pub end_directive: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Name of the folder created next to each document.
    pub directory_name: String,
    pub file_extension: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string()],
            exclude_dirs: Vec::new(),
            max_depth: None,
        }
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            language: "plantuml".to_string(),
            start_directive: "@startuml".to_string(),
            end_directive: "@enduml".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory_name: "resources".to_string(),
            file_extension: "puml".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ExtractError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ExtractError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ExtractError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["plantuml-extract.toml", ".plantuml-extract.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref extensions) = cli_args.extensions {
            self.scan.extensions = extensions
                .split(',')
                .map(|s| s.trim().trim_start_matches('.').to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(ref exclude) = cli_args.exclude {
            self.scan.exclude_dirs.extend(exclude.iter().cloned());
        }

        if let Some(max_depth) = cli_args.max_depth {
            self.scan.max_depth = Some(max_depth);
        }

        if let Some(ref language) = cli_args.language {
            self.diagram.language = language.clone();
        }

        if let Some(ref name) = cli_args.output_dir_name {
            self.output.directory_name = name.clone();
        }

        if let Some(ref extension) = cli_args.diagram_extension {
            self.output.file_extension = extension.trim_start_matches('.').to_string();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ExtractError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ExtractError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan.extensions.is_empty() {
            return Err(ExtractError::Config {
                message: "At least one document extension must be specified".to_string(),
            });
        }

        if self.scan.max_depth == Some(0) {
            return Err(ExtractError::Config {
                message: "Maximum directory depth must be greater than 0".to_string(),
            });
        }

        if self.diagram.language.trim().is_empty() {
            return Err(ExtractError::Config {
                message: "Diagram fence language must not be empty".to_string(),
            });
        }

        if self.diagram.start_directive.trim().is_empty()
            || self.diagram.end_directive.trim().is_empty()
        {
            return Err(ExtractError::Config {
                message: "Start and end directives must not be empty".to_string(),
            });
        }

        if !is_plain_name(&self.output.directory_name) {
            return Err(ExtractError::Config {
                message: format!(
                    "Output folder name must be a single path component: {:?}",
                    self.output.directory_name
                ),
            });
        }

        if !is_plain_name(&self.output.file_extension) {
            return Err(ExtractError::Config {
                message: format!(
                    "Diagram file extension is not valid: {:?}",
                    self.output.file_extension
                ),
            });
        }

        Ok(())
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.chars().any(char::is_control)
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub extensions: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub language: Option<String>,
    pub output_dir_name: Option<String>,
    pub diagram_extension: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extensions(mut self, extensions: Option<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_exclude(mut self, exclude: Option<Vec<String>>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    pub fn with_output_dir_name(mut self, name: Option<String>) -> Self {
        self.output_dir_name = name;
        self
    }

    pub fn with_diagram_extension(mut self, extension: Option<String>) -> Self {
        self.diagram_extension = extension;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scan.extensions, vec!["md"]);
        assert!(config.scan.exclude_dirs.is_empty());
        assert_eq!(config.scan.max_depth, None);
        assert_eq!(config.diagram.language, "plantuml");
        assert_eq!(config.diagram.start_directive, "@startuml");
        assert_eq!(config.diagram.end_directive, "@enduml");
        assert_eq!(config.output.directory_name, "resources");
        assert_eq!(config.output.file_extension, "puml");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.scan.extensions.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.directory_name = "../out".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scan.max_depth = Some(0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.diagram.language = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.output.file_extension = "plantuml".to_string();
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.output.file_extension, "plantuml");
        assert_eq!(loaded_config.diagram.language, "plantuml");
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[output]\ndirectory_name = \"diagrams\"").unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.output.directory_name, "diagrams");
        assert_eq!(config.output.file_extension, "puml");
        assert_eq!(config.scan.extensions, vec!["md"]);
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(ExtractError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_extensions(Some("MD, .markdown".to_string()))
            .with_exclude(Some(vec!["node_modules".to_string()]))
            .with_max_depth(Some(3))
            .with_language(Some("puml".to_string()))
            .with_diagram_extension(Some(".pu".to_string()));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.scan.extensions, vec!["md", "markdown"]);
        assert_eq!(config.scan.exclude_dirs, vec!["node_modules"]);
        assert_eq!(config.scan.max_depth, Some(3));
        assert_eq!(config.diagram.language, "puml");
        assert_eq!(config.output.file_extension, "pu");
        assert_eq!(config.output.directory_name, "resources");
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_file = NamedTempFile::new().unwrap();
        Config::default().save_to_file(temp_file.path()).unwrap();

        let sample = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(sample.contains("[scan]"));
        assert!(sample.contains("[diagram]"));
        assert!(sample.contains("[output]"));
        assert!(sample.contains("@startuml"));
    }
}

use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::{OutputFormatter, OutputMode};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "plantuml-extract")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract PlantUML diagrams from Markdown documents")]
#[command(
    long_about = "plantuml-extract walks a folder, finds ```plantuml fenced blocks in Markdown \
                  documents and writes each one to resources/<document>_<n>.puml next to the document."
)]
#[command(after_help = "EXAMPLES:\n  \
    plantuml-extract ./docs\n  \
    plantuml-extract ./docs --dry-run\n  \
    plantuml-extract ./docs --extensions md,markdown --exclude node_modules\n  \
    plantuml-extract ./docs --config plantuml-extract.toml --output-format json")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Folder to search for documents
    #[arg(required_unless_present = "generate_config")]
    pub root: Option<PathBuf>,

    /// Document extensions (comma-separated)
    #[arg(long, help = "Document extensions to scan (e.g., md,markdown)")]
    pub extensions: Option<String>,

    /// Fence language that marks a diagram block
    #[arg(short, long, help = "Fence language of diagram blocks (default: plantuml)")]
    pub language: Option<String>,

    /// Extension of the generated diagram files
    #[arg(long, help = "Extension of generated files (default: puml)")]
    pub diagram_extension: Option<String>,

    /// Name of the folder created next to each document
    #[arg(long, help = "Output folder name (default: resources)")]
    pub output_dir_name: Option<String>,

    /// Directories to skip
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Maximum directory depth
    #[arg(long, help = "Maximum folder depth to descend into")]
    pub max_depth: Option<usize>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for messages
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors are printed)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be written without touching the disk)
    #[arg(long, help = "Report the files that would be written without writing them")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_extensions(self.extensions.clone())
            .with_exclude(self.exclude.clone())
            .with_max_depth(self.max_depth)
            .with_language(self.language.clone())
            .with_output_dir_name(self.output_dir_name.clone())
            .with_diagram_extension(self.diagram_extension.clone())
    }

    pub fn output_mode(&self) -> OutputMode {
        match self.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }

    pub fn output_formatter(&self) -> OutputFormatter {
        OutputFormatter::new(self.output_mode(), self.verbosity_level(), self.quiet)
    }

    /// The bar shares the terminal with the log lines, so it is only drawn
    /// for interactive human output.
    pub fn wants_progress_bar(&self) -> bool {
        !self.quiet
            && self.output_mode() == OutputMode::Human
            && console::Term::stderr().features().is_attended()
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root_only() {
        let cli = Cli::try_parse_from(["plantuml-extract", "docs"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("docs")));
        assert!(!cli.dry_run);
        assert_eq!(cli.output_mode(), OutputMode::Human);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        assert!(Cli::try_parse_from(["plantuml-extract"]).is_err());
        assert!(Cli::try_parse_from(["plantuml-extract", "--dry-run"]).is_err());
    }

    #[test]
    fn test_generate_config_needs_no_root() {
        let cli = Cli::try_parse_from(["plantuml-extract", "--generate-config"]).unwrap();
        assert!(cli.generate_config);
        assert!(cli.root.is_none());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["plantuml-extract", "docs", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_overrides_reach_config() {
        let cli = Cli::try_parse_from([
            "plantuml-extract",
            "docs",
            "--extensions",
            "md,MARKDOWN",
            "--exclude",
            "node_modules,target",
            "--diagram-extension",
            "pu",
            "--output-format",
            "plain",
            "-vv",
        ])
        .unwrap();

        let mut config = Config::default();
        config.merge_with_cli_args(&cli.create_cli_overrides());

        assert_eq!(config.scan.extensions, vec!["md", "markdown"]);
        assert_eq!(config.scan.exclude_dirs, vec!["node_modules", "target"]);
        assert_eq!(config.output.file_extension, "pu");
        assert_eq!(cli.output_mode(), OutputMode::Plain);
        assert_eq!(cli.verbosity_level(), 2);
        assert!(!cli.wants_progress_bar());
    }
}

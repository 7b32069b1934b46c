use crate::error::{ExtractError, UserFriendlyError};
use crate::ui::reporter::{Reporter, RunEvent};
use crate::RunSummary;
use console::{style, Emoji, Term};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static PAGE: Emoji = Emoji("📄 ", "> ");
static FOLDER: Emoji = Emoji("📁 ", "+ ");

/// Console reporter: progress on stdout, failures on stderr.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    // Core messaging methods
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_document(&self, path: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => {
                    println!();
                    if self.use_colors {
                        println!("{}{}", PAGE, style(format!("Processing file: {}", path)).bold());
                    } else {
                        println!("Processing file: {}", path);
                    }
                }
                OutputMode::Json => self.print_json_message("document_start", path),
                OutputMode::Plain => println!("PROCESSING: {}", path),
            }
        }
    }

    pub fn created(&self, what: &str, path: &str) {
        if self.should_show_message(0) {
            let message = format!("Created {}: {}", what, path);
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        let emoji = if what == "folder" { FOLDER } else { CHECKMARK };
                        println!("  {}{}", emoji, style(message).green());
                    } else {
                        println!("  {}", message);
                    }
                }
                OutputMode::Json => self.print_json_object(&serde_json::json!({
                    "type": "created",
                    "kind": what,
                    "path": path,
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
                OutputMode::Plain => println!("CREATED: {}", path),
            }
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &ExtractError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    eprintln!(
                        "{}",
                        serde_json::json!({
                            "type": "suggestion",
                            "message": suggestion
                        })
                    );
                }
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    pub fn print_run_summary(&self, summary: &RunSummary) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => self.print_human_summary(summary),
            OutputMode::Json => self.print_json_summary(summary),
            OutputMode::Plain => self.print_plain_summary(summary),
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => println!("{}", "-".repeat(60)),
            OutputMode::Json => {}
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            match msg_type {
                MessageType::Error => eprintln!("{}", message),
                _ => println!("{}", message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        let obj = serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if level == "error" {
            eprintln!("{}", obj);
        } else {
            self.print_json_object(&obj);
        }
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_summary(&self, summary: &RunSummary) {
        println!();
        self.print_separator();

        let headline = if summary.failures == 0 {
            "Diagram extraction completed!"
        } else {
            "Diagram extraction completed with errors"
        };
        if self.use_colors {
            println!("{}{}", CHECKMARK, style(headline).green().bold());
        } else {
            println!("{}", headline);
        }

        println!("  Documents:       {}", summary.documents_found);
        println!("  Blocks found:    {}", summary.blocks_found);
        println!("  Files written:   {}", summary.files_written);
        println!("  Time taken:      {}", format_duration(summary.elapsed));
        if summary.failures > 0 {
            println!("  Errors:          {}", summary.failures);
        }

        self.print_separator();
    }

    fn print_json_summary(&self, summary: &RunSummary) {
        self.print_json_object(&serde_json::json!({
            "type": "summary",
            "documents_found": summary.documents_found,
            "documents_processed": summary.documents_processed,
            "blocks_found": summary.blocks_found,
            "files_written": summary.files_written,
            "errors": summary.failures,
            "duration_ms": summary.elapsed.as_millis() as u64,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_plain_summary(&self, summary: &RunSummary) {
        println!("COMPLETED: Diagram extraction");
        println!("Documents: {}", summary.documents_found);
        println!("Blocks: {}", summary.blocks_found);
        println!("Files written: {}", summary.files_written);
        println!("Duration: {:?}", summary.elapsed);
        if summary.failures > 0 {
            println!("Errors: {}", summary.failures);
        }
    }
}

impl Reporter for OutputFormatter {
    fn report(&self, event: &RunEvent) {
        match event {
            RunEvent::DocumentsFound { count, .. } => {
                self.info(&format!("Found {} document(s).", count));
            }
            RunEvent::NoDocuments { root, extensions } => {
                self.info(&format!(
                    "No .{} documents found in folder: {}",
                    extensions.join("/."),
                    root.display()
                ));
            }
            RunEvent::DocumentStarted { path } => {
                self.start_document(&path.display().to_string());
            }
            RunEvent::DirectoryCreated { path } => {
                self.created("folder", &path.display().to_string());
            }
            RunEvent::FileCreated { path } => {
                self.created("file", &path.display().to_string());
            }
            RunEvent::WouldCreateDirectory { path } => {
                self.info(&format!("  Would create folder: {}", path.display()));
            }
            RunEvent::WouldWriteFile { path } => {
                self.info(&format!("  Would create file: {}", path.display()));
            }
            RunEvent::NoBlocks { language, .. } => {
                self.warning(&format!("  No {} blocks found in file.", language));
            }
            RunEvent::Failure { message, .. } => self.error(message),
            RunEvent::Debug { message } => self.debug(message),
            RunEvent::Completed(summary) => self.print_run_summary(summary),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Error,
    Warning,
    Info,
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

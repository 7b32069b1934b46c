use clap::Parser;
use plantuml_extract::{Cli, Config, Extractor, UserFriendlyError};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return code;
        }
    };

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let formatter = cli.output_formatter();

    let Some(root) = cli.root.as_deref() else {
        formatter.error("Usage: plantuml-extract <FOLDER>");
        return 1;
    };

    let extractor = match Extractor::from_cli(&cli) {
        Ok(extractor) => extractor,
        Err(e) => {
            formatter.print_user_friendly_error(&e);
            return 1;
        }
    };

    // Per-document failures are already reported; only a bad root is fatal.
    match extractor.run(root, &formatter) {
        Ok(_) => 0,
        Err(e) => {
            formatter.print_user_friendly_error(&e);
            1
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| "plantuml-extract.toml".into());

    match Config::default().save_to_file(&config_path) {
        Ok(()) => {
            println!(
                "Generated sample configuration file: {}",
                config_path.display()
            );
            println!("\nTo use this configuration:");
            println!(
                "  plantuml-extract <folder> --config {}",
                config_path.display()
            );
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

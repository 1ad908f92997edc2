//! iFixDocs CLI: run the extractor on local Python files.
//!
//! Calls `ifixdocs-core` directly with no server, clone or git history.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use ifixdocs_core::{extract, render_markdown, ExtractionResult};

/// iFixDocs CLI: per-file Markdown docs from the terminal.
#[derive(Parser)]
#[command(name = "ifd", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of Markdown / plain text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the documentation page for each file
    Extract {
        /// Python source files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List the classes and functions declared in a file
    Outline {
        /// Python source file
        file: PathBuf,
    },
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_or_exit(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Could not read {}: {e}", path.display());
        std::process::exit(1);
    })
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Could not serialize output: {e}");
            std::process::exit(1);
        }
    }
}

fn outline_lines(result: &ExtractionResult) -> Vec<String> {
    let mut lines = Vec::with_capacity(result.classes.len() + result.functions.len());
    lines.extend(result.classes.iter().map(|c| format!("class {c}")));
    lines.extend(result.functions.iter().map(|f| format!("def   {f}")));
    lines
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { files } => {
            let mut pages = serde_json::Map::new();
            for (i, path) in files.iter().enumerate() {
                let content = read_or_exit(path);
                let result = extract(&content);
                tracing::debug!(path = %path.display(), names = result.len(), "Extracted");

                if cli.json {
                    let value = serde_json::to_value(&result).unwrap_or_default();
                    pages.insert(path.display().to_string(), value);
                } else {
                    if i > 0 {
                        println!();
                    }
                    print!("{}", render_markdown(&file_label(path), &result, ""));
                }
            }
            if cli.json {
                print_json(&serde_json::Value::Object(pages));
            }
        }
        Commands::Outline { file } => {
            let content = read_or_exit(&file);
            let result = extract(&content);

            if cli.json {
                print_json(&serde_json::json!({
                    "file": file.display().to_string(),
                    "class_names": result.classes,
                    "function_names": result.functions,
                }));
            } else {
                let lines = outline_lines(&result);
                if lines.is_empty() {
                    eprintln!("No classes or functions in {}", file.display());
                }
                for line in lines {
                    println!("{line}");
                }
            }
        }
    }
}

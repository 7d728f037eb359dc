//! Quire - Main Entry Point
//!
//! Command-line front end for the search engine: finds a term across files
//! and directory trees and prints grep-style results with line previews.

use log::{debug, error, info};
use quire::{
    collect_sources, load_settings, DiskStore, DocumentSource, EditorSessionCoordinator,
    SearchOptions,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Application name constant.
const APP_NAME: &str = "quire";

/// Parsed command line: search term, candidate paths, and match options.
struct CliArgs {
    term: String,
    paths: Vec<PathBuf>,
    options: SearchOptions,
}

fn print_usage() {
    eprintln!("Usage: {} [OPTIONS] <TERM> <PATH>...", APP_NAME);
    eprintln!();
    eprintln!("Search for TERM in the given files and directory trees.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --case-sensitive   Match case exactly");
    eprintln!("  -w, --word             Match whole words only");
    eprintln!("  -r, --regex            Treat TERM as a regular expression");
    eprintln!("  -h, --help             Show this help");
}

fn parse_args(
    args: impl Iterator<Item = String>,
    defaults: SearchOptions,
) -> Result<CliArgs, String> {
    let mut term = None;
    let mut paths = Vec::new();
    let mut options = defaults;

    for arg in args {
        match arg.as_str() {
            "-s" | "--case-sensitive" => options.case_sensitive = true,
            "-w" | "--word" => options.whole_word = true,
            "-r" | "--regex" => options.use_regex = true,
            "-h" | "--help" => return Err(String::new()),
            flag if flag.starts_with('-') => {
                return Err(format!("Unknown option: {}", flag));
            }
            value => {
                if term.is_none() {
                    term = Some(value.to_string());
                } else {
                    paths.push(PathBuf::from(value));
                }
            }
        }
    }

    let term = term.ok_or_else(|| "Missing search term".to_string())?;
    if paths.is_empty() {
        return Err("No files or directories given".to_string());
    }
    Ok(CliArgs {
        term,
        paths,
        options,
    })
}

/// Expand the argument paths into searchable sources.
///
/// Directories are walked for text files; plain files are taken as-is under
/// their own name.
fn gather_sources(paths: &[PathBuf]) -> Vec<DocumentSource> {
    let mut sources = Vec::new();
    for path in paths {
        if path.is_dir() {
            match collect_sources(path) {
                Ok(found) => {
                    debug!("{}: {} candidate file(s)", path.display(), found.len());
                    sources.extend(found);
                }
                Err(e) => error!("Cannot walk '{}': {}", path.display(), e),
            }
        } else {
            sources.push(DocumentSource {
                name: path.to_string_lossy().into_owned(),
                path: path.clone(),
            });
        }
    }
    sources
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Load settings for default match options and the preview budget
    let settings = load_settings();

    let cli = match parse_args(std::env::args().skip(1), settings.default_search) {
        Ok(cli) => cli,
        Err(message) => {
            if !message.is_empty() {
                eprintln!("{}", message);
                eprintln!();
            }
            print_usage();
            return ExitCode::from(2);
        }
    };

    info!("Searching for '{}' in {} path(s)", cli.term, cli.paths.len());

    let sources = gather_sources(&cli.paths);
    let store = DiskStore;
    let mut coordinator = EditorSessionCoordinator::with_settings(settings);

    let total = match coordinator.search_project(&sources, &cli.term, cli.options, &store) {
        Ok(total) => total,
        Err(e) => {
            error!("Search failed: {}", e);
            return ExitCode::from(2);
        }
    };

    for document in coordinator.matches() {
        for (span, preview) in document.spans.iter().zip(document.previews.iter()) {
            println!("{}:{}: {}", document.name, span.line, preview);
        }
    }

    info!("{} match(es) in {} document(s)", total, coordinator.matches().len());
    if total > 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

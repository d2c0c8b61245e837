//! listener-lens command-line entry point
//!
//! Reads captured listener records, optionally re-indents their (often
//! minified) source, highlights terms from a user-defined rule set, and
//! writes the result as console text, JSON, or an HTML review panel.

use clap::Parser;
use listener_lens::cli::Cli;
use listener_lens::core::{load_records, RenderSession};
use listener_lens::export::{create_exporter, get_output_writer};
use listener_lens::rules::{load_rules, save_rules, RuleSet};
use std::io::Write;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Parse command line arguments
    let cli = Cli::parse();

    // Convert to config
    let config = match cli.into_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    init_tracing(config.verbose);

    // Progress callback for logging
    let quiet = config.quiet;
    let progress = |msg: &str| {
        if !quiet {
            eprintln!("{}", msg);
        }
    };

    // === Phase 1: Load Rules ===
    let rules = match &config.rules_path {
        Some(path) => match load_rules(path) {
            Ok(r) => {
                if r.is_empty() {
                    warn!(path = %path.display(), "rules file defines no terms");
                }
                progress(&format!(
                    "Loaded {} highlight terms in {} categories",
                    r.term_count(),
                    r.len()
                ));
                r
            }
            Err(e) => {
                eprintln!("Error loading rules: {}", e);
                return ExitCode::from(2);
            }
        },
        None => RuleSet::new(),
    };

    // === Phase 1.5: Save Rules ===
    if let Some(ref save_path) = config.save_rules_path {
        if let Err(e) = save_rules(&rules, save_path) {
            eprintln!("Error saving rules: {}", e);
            return ExitCode::from(2);
        }
        progress(&format!("Saved rule set to '{}'", save_path.display()));
    }

    // === Phase 2: Load Listener Records ===
    let records = match load_records(&config.input_filename) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };
    progress(&format!("Loaded {} listener records", records.len()));

    // === Phase 3: Render ===
    let mut session = RenderSession::new(config, rules);
    let result = match session.render(&records, &progress) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    // === Phase 4: Export Results ===
    let config = session.config();
    let exporter = create_exporter(config.output_format);
    let mut writer = match get_output_writer(&config.output_filename) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error creating output: {}", e);
            return ExitCode::from(2);
        }
    };

    if let Err(e) = exporter.export(&result, config, &mut *writer) {
        eprintln!("Error writing output: {}", e);
        return ExitCode::from(2);
    }

    if let Err(e) = writer.flush() {
        eprintln!("Error flushing output: {}", e);
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}

/// Install the stderr diagnostics subscriber; `RUST_LOG` overrides the default level
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

//! CLI argument parsing using clap

use crate::config::{
    Config, OutputFormat, DEFAULT_CACHE_CAPACITY, DEFAULT_MAX_FORMAT_CHARS,
};
use crate::error::{LensError, Result};
use clap::Parser;
use std::path::PathBuf;

/// Listener source renderer
#[derive(Parser, Debug)]
#[command(name = "listener-lens")]
#[command(version)]
#[command(about = "Reformat and highlight captured event-listener source", long_about = None)]
pub struct Cli {
    /// JSON file containing an array of listener records
    /// Use "-" to read from stdin
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Output file for results (use "-" for stdout)
    #[arg(value_name = "OUTPUT", default_value = "-")]
    pub output: String,

    /// Highlight rules: rule-definition text, or a saved rule set (.json)
    #[arg(short = 'r', long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Save the active rule set as JSON
    #[arg(long = "save-rules", value_name = "FILE")]
    pub save_rules: Option<PathBuf>,

    /// Reformat listener source before highlighting
    #[arg(long = "prettify")]
    pub prettify: bool,

    /// Spaces per indent level when reformatting
    #[arg(long = "indent", value_name = "N", default_value = "4")]
    pub indent: usize,

    /// Maximum number of formatted results to cache (0 disables caching)
    #[arg(long = "cache-size", value_name = "N", default_value_t = DEFAULT_CACHE_CAPACITY)]
    pub cache_size: usize,

    /// Sources longer than N characters are not reformatted
    #[arg(long = "max-format-size", value_name = "N", default_value_t = DEFAULT_MAX_FORMAT_CHARS)]
    pub max_format_size: usize,

    /// Collapse code blocks longer than N characters
    #[arg(long = "expand-threshold", value_name = "N", default_value = "1000")]
    pub expand_threshold: usize,

    /// Collapse code blocks with more than N lines
    #[arg(long = "max-lines", value_name = "N", default_value = "15")]
    pub max_lines: usize,

    /// Number of threads for parallel highlighting
    #[arg(short = 'j', long = "threads", value_name = "N")]
    pub threads: Option<usize>,

    /// Output in JSON format
    #[arg(long = "json")]
    pub json: bool,

    /// Output an HTML review panel
    #[arg(long = "html")]
    pub html: bool,

    /// Suppress progress messages
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Show debug diagnostics
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Parse command line arguments into a Config
    pub fn into_config(self) -> Result<Config> {
        // Check for conflicting output format options
        if self.json && self.html {
            return Err(LensError::OutputFormatConflict);
        }

        if self.threads == Some(0) {
            return Err(LensError::InvalidConfig(
                "--threads must be at least 1".to_string(),
            ));
        }

        let output_format = if self.json {
            OutputFormat::Json
        } else if self.html {
            OutputFormat::Html
        } else {
            OutputFormat::Console
        };

        Ok(Config {
            indent_unit: " ".repeat(self.indent),
            cache_capacity: self.cache_size,
            max_format_chars: self.max_format_size,
            prettify_enabled: self.prettify,
            expand_threshold: self.expand_threshold,
            max_lines: self.max_lines,
            num_threads: self.threads.unwrap_or_else(num_cpus::get),
            output_format,
            input_filename: self.input,
            output_filename: self.output,
            rules_path: self.rules,
            save_rules_path: self.save_rules,
            quiet: self.quiet,
            verbose: self.verbose,
        })
    }
}

//! Configuration types for listener-lens

use std::hash::{Hash, Hasher};
use std::path::PathBuf;

/// Default indent unit used by the reformatter
pub const DEFAULT_INDENT: &str = "    ";

/// Default number of formatted results kept in the format cache
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Sources longer than this many characters bypass formatting and caching
pub const DEFAULT_MAX_FORMAT_CHARS: usize = 10_000;

/// Output format for rendered listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable console output
    #[default]
    Console,
    /// JSON output with structured data
    Json,
    /// Self-contained HTML review panel
    Html,
}

/// Configuration options for listener-lens
#[derive(Debug, Clone)]
pub struct Config {
    /// String repeated once per indent level by the reformatter (default: 4 spaces)
    pub indent_unit: String,

    /// Maximum number of entries in the format cache (default: 100)
    /// Zero disables caching
    pub cache_capacity: usize,

    /// Size ceiling in UTF-16 code units (default: 10,000)
    /// Longer sources are rendered as-is, without formatting or caching
    pub max_format_chars: usize,

    /// Reformat listener source before highlighting
    pub prettify_enabled: bool,

    /// Display text longer than this many characters starts truncated (default: 1000)
    pub expand_threshold: usize,

    /// Display text with more than this many lines starts truncated (default: 15)
    pub max_lines: usize,

    /// Number of threads for parallel highlighting (default: num_cpus)
    pub num_threads: usize,

    /// Output format (console, json, or html)
    pub output_format: OutputFormat,

    /// Path to the listener records (or "-" for stdin)
    pub input_filename: String,

    /// Path to output file (or "-" for stdout)
    pub output_filename: String,

    /// Rules file: rule-definition text, or a persisted rule set if it ends in `.json`
    pub rules_path: Option<PathBuf>,

    /// Path to save the active rule set as JSON
    pub save_rules_path: Option<PathBuf>,

    /// Suppress progress messages
    pub quiet: bool,

    /// Enable debug diagnostics
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_unit: String::from(DEFAULT_INDENT),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            max_format_chars: DEFAULT_MAX_FORMAT_CHARS,
            prettify_enabled: false,
            expand_threshold: 1000,
            max_lines: 15,
            num_threads: num_cpus::get(),
            output_format: OutputFormat::Console,
            input_filename: String::from("-"),
            output_filename: String::from("-"),
            rules_path: None,
            save_rules_path: None,
            quiet: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Compute a hash of config options that affect formatted output.
    /// Used for cache invalidation - if this changes, cached results are stale.
    pub fn format_settings_hash(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.prettify_enabled.hash(&mut hasher);
        self.indent_unit.hash(&mut hasher);
        hasher.finish()
    }

    /// Whether a rendered code block should start collapsed
    pub fn should_truncate(&self, display_text: &str) -> bool {
        display_text.chars().count() > self.expand_threshold
            || display_text.split('\n').count() > self.max_lines
    }
}

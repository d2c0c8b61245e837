//! Rendering session: reformat, then highlight, every listener record

use crate::config::Config;
use crate::core::ListenerRecord;
use crate::error::{LensError, Result};
use crate::format::{CachingFormatter, FormatOutcome};
use crate::highlight::Highlighter;
use crate::rules::RuleSet;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// One listener ready for display
#[derive(Debug, Clone, Serialize)]
pub struct RenderedListener {
    /// 1-based position in the input
    pub index: usize,
    pub domain: String,
    pub window_text: String,
    pub stack: String,
    /// Original source text, kept for re-rendering
    pub source: String,
    /// Text after optional reformatting
    pub display_text: String,
    /// Escaped HTML with highlighted terms
    pub markup: String,
    /// Whether the code block starts collapsed
    pub truncated: bool,
    /// Whether the source went through the reformatter
    pub formatted: bool,
    /// Whether the source was too large to reformat
    pub skipped_for_size: bool,
}

/// Totals for one render pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    pub listeners_rendered: usize,
    pub formatted: usize,
    pub skipped_for_size: usize,
    pub truncated: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
}

/// Result of rendering a batch of records
#[derive(Debug)]
pub struct RenderResult {
    pub listeners: Vec<RenderedListener>,
    pub summary: RenderSummary,
}

/// Per-session rendering state.
///
/// Owns the format cache and the active rules. The cache is cleared whenever
/// settings that change formatted output are updated.
pub struct RenderSession {
    config: Config,
    rules: RuleSet,
    highlighter: Highlighter,
    formatter: CachingFormatter,
    /// Settings hash the cache contents were produced under
    settings_hash: u64,
}

impl RenderSession {
    pub fn new(config: Config, rules: RuleSet) -> Self {
        let highlighter = Highlighter::new(&rules);
        let formatter = CachingFormatter::from_config(&config);
        let settings_hash = config.format_settings_hash();
        Self {
            config,
            rules,
            highlighter,
            formatter,
            settings_hash,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn formatter(&self) -> &CachingFormatter {
        &self.formatter
    }

    /// Replace the active rules. Formatting results stay cached.
    pub fn set_rules(&mut self, rules: RuleSet) {
        self.highlighter = Highlighter::new(&rules);
        self.rules = rules;
    }

    /// Apply new settings, clearing the cache if formatted output would change.
    ///
    /// Returns true when the cache was invalidated.
    pub fn update_settings(&mut self, config: Config) -> bool {
        let new_hash = config.format_settings_hash();
        let formatter_changed = config.indent_unit != self.config.indent_unit
            || config.cache_capacity != self.config.cache_capacity
            || config.max_format_chars != self.config.max_format_chars;

        self.config = config;

        if formatter_changed {
            self.formatter = CachingFormatter::from_config(&self.config);
        }

        if new_hash != self.settings_hash {
            debug!("format settings changed, invalidating format cache");
            self.formatter.clear_cache();
            self.settings_hash = new_hash;
            return true;
        }
        formatter_changed
    }

    /// Render `records` in order.
    ///
    /// Formatting runs sequentially through the session cache; highlighting
    /// runs on a thread pool since the highlighter is immutable.
    pub fn render(
        &mut self,
        records: &[ListenerRecord],
        progress: &impl Fn(&str),
    ) -> Result<RenderResult> {
        let stats_before = self.formatter.cache().stats();

        let prepared: Vec<FormatOutcome> = records
            .iter()
            .map(|record| self.display_text(record.source()))
            .collect();

        let stats_after = self.formatter.cache().stats();

        if self.config.prettify_enabled {
            progress(&format!(
                "Format cache: {} hits, {} misses",
                stats_after.hits - stats_before.hits,
                stats_after.misses - stats_before.misses
            ));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.num_threads)
            .build()
            .map_err(|e| LensError::Other(format!("Failed to create thread pool: {}", e)))?;

        let highlighter = &self.highlighter;
        let markup: Vec<String> = pool.install(|| {
            prepared
                .par_iter()
                .map(|outcome| highlighter.highlight(&outcome.text))
                .collect()
        });

        let prettify = self.config.prettify_enabled;
        let listeners: Vec<RenderedListener> = records
            .iter()
            .zip(prepared)
            .zip(markup)
            .enumerate()
            .map(|(i, ((record, outcome), markup))| RenderedListener {
                index: i + 1,
                domain: record.domain().to_string(),
                window_text: record.window_text(),
                stack: record.stack().to_string(),
                source: record.source().to_string(),
                truncated: self.config.should_truncate(&outcome.text),
                formatted: prettify && !outcome.skipped_for_size,
                skipped_for_size: outcome.skipped_for_size,
                display_text: outcome.text,
                markup,
            })
            .collect();

        let summary = RenderSummary {
            listeners_rendered: listeners.len(),
            formatted: listeners.iter().filter(|l| l.formatted).count(),
            skipped_for_size: listeners.iter().filter(|l| l.skipped_for_size).count(),
            truncated: listeners.iter().filter(|l| l.truncated).count(),
            cache_hits: stats_after.hits - stats_before.hits,
            cache_misses: stats_after.misses - stats_before.misses,
        };

        Ok(RenderResult { listeners, summary })
    }

    fn display_text(&mut self, source: &str) -> FormatOutcome {
        if self.config.prettify_enabled {
            self.formatter.format(source)
        } else {
            FormatOutcome {
                text: source.to_string(),
                skipped_for_size: false,
                cache_hit: false,
            }
        }
    }
}

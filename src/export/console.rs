//! Console (human-readable) exporter

use crate::config::Config;
use crate::core::RenderResult;
use crate::error::Result;
use crate::export::Exporter;
use std::io::Write;

/// Human-readable console output exporter
pub struct ConsoleExporter;

impl Exporter for ConsoleExporter {
    fn export(&self, result: &RenderResult, config: &Config, writer: &mut dyn Write) -> Result<()> {
        for listener in &result.listeners {
            writeln!(
                writer,
                "#{} {}  {}",
                listener.index, listener.domain, listener.window_text
            )?;
            writeln!(writer, "  {}", listener.stack)?;
            writeln!(writer)?;

            // Output the display text (indented)
            for line in listener.display_text.lines() {
                writeln!(writer, "  {}", line)?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, "Configuration:")?;
        writeln!(
            writer,
            "  Prettify: {}",
            if config.prettify_enabled { "on" } else { "off" }
        )?;
        writeln!(
            writer,
            "  Format size ceiling: {} chars",
            config.max_format_chars
        )?;
        writeln!(writer)?;

        let summary = &result.summary;
        writeln!(writer, "Summary:")?;
        writeln!(writer, "  Listeners rendered: {}", summary.listeners_rendered)?;
        writeln!(writer, "  Formatted: {}", summary.formatted)?;
        writeln!(writer, "  Skipped for size: {}", summary.skipped_for_size)?;
        writeln!(writer, "  Truncated: {}", summary.truncated)?;
        if config.prettify_enabled {
            writeln!(
                writer,
                "  Format cache: {} hits, {} misses",
                summary.cache_hits, summary.cache_misses
            )?;
        }

        Ok(())
    }
}

//! JSON exporter

use crate::config::Config;
use crate::core::{RenderResult, RenderSummary, RenderedListener};
use crate::error::{LensError, Result};
use crate::export::Exporter;
use serde::Serialize;
use std::io::Write;

/// JSON output exporter
pub struct JsonExporter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    listeners: &'a [RenderedListener],
    summary: &'a RenderSummary,
    settings: JsonSettings,
}

#[derive(Serialize)]
struct JsonSettings {
    prettify: bool,
    indent_width: usize,
    max_format_chars: usize,
}

impl Exporter for JsonExporter {
    fn export(&self, result: &RenderResult, config: &Config, writer: &mut dyn Write) -> Result<()> {
        let output = JsonOutput {
            listeners: &result.listeners,
            summary: &result.summary,
            settings: JsonSettings {
                prettify: config.prettify_enabled,
                indent_width: config.indent_unit.chars().count(),
                max_format_chars: config.max_format_chars,
            },
        };

        let json =
            serde_json::to_string_pretty(&output).map_err(|e| LensError::Other(e.to_string()))?;
        writeln!(writer, "{}", json)?;

        Ok(())
    }
}

//! Export system for rendered listeners

mod console;
mod html;
mod json;

use crate::config::{Config, OutputFormat};
use crate::core::RenderResult;
use crate::error::{LensError, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};

pub use console::ConsoleExporter;
pub use html::HtmlExporter;
pub use json::JsonExporter;

/// Trait for output formatting
pub trait Exporter {
    /// Write the complete output for the given result
    fn export(&self, result: &RenderResult, config: &Config, writer: &mut dyn Write) -> Result<()>;
}

/// Create an appropriate exporter based on configuration
pub fn create_exporter(format: OutputFormat) -> Box<dyn Exporter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleExporter),
        OutputFormat::Json => Box::new(JsonExporter),
        OutputFormat::Html => Box::new(HtmlExporter),
    }
}

/// Get a writer for the output (file or stdout)
pub fn get_output_writer(path: &str) -> Result<Box<dyn Write>> {
    if path == "-" {
        Ok(Box::new(BufWriter::new(io::stdout())))
    } else {
        let file = File::create(path).map_err(LensError::Io)?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

#[cfg(test)]
pub(crate) fn sample_result() -> RenderResult {
    use crate::core::{RenderSummary, RenderedListener};

    let listeners = vec![
        RenderedListener {
            index: 1,
            domain: "example.com".to_string(),
            window_text: "top direct".to_string(),
            stack: "at https://example.com/app.js:1:20".to_string(),
            source: "if(e.origin){eval(e.data);}".to_string(),
            display_text: "if(e.origin){\n    eval(e.data);\n}".to_string(),
            markup: "if(e.origin){\n    <span class=\"highlight-red\">eval</span>(e.data);\n}"
                .to_string(),
            truncated: false,
            formatted: true,
            skipped_for_size: false,
        },
        RenderedListener {
            index: 2,
            domain: "<evil>".to_string(),
            window_text: "direct".to_string(),
            stack: "Unknown stack".to_string(),
            source: "x<y".to_string(),
            display_text: "x<y".to_string(),
            markup: "x&lt;y".to_string(),
            truncated: true,
            formatted: true,
            skipped_for_size: false,
        },
    ];

    RenderResult {
        summary: RenderSummary {
            listeners_rendered: 2,
            formatted: 2,
            skipped_for_size: 0,
            truncated: 1,
            cache_hits: 0,
            cache_misses: 2,
        },
        listeners,
    }
}

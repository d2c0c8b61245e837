//! HTML review panel exporter

use crate::config::Config;
use crate::core::RenderResult;
use crate::error::Result;
use crate::export::Exporter;
use crate::highlight::escape_html;
use std::io::Write;

/// HTML output exporter
pub struct HtmlExporter;

/// Categories are usually named after the color they should render in
const CATEGORY_COLORS: &[&str] = &[
    "red", "orange", "yellow", "green", "blue", "purple", "pink", "cyan", "gray",
];

const BASE_STYLE: &str = "\
body { font-family: sans-serif; margin: 1em; }
.listener-item { border: 1px solid #ccc; border-radius: 4px; margin-bottom: 1em; }
.listener-header { display: flex; gap: 1em; padding: 0.5em; background: #f4f4f4; }
.index-number { font-weight: bold; }
.stack-trace { padding: 0.25em 0.5em; color: #666; font-size: 0.9em; }
.code-block pre { margin: 0; padding: 0.5em; white-space: pre-wrap; }
.code-block.truncated pre { max-height: 12em; overflow: hidden; }
";

impl Exporter for HtmlExporter {
    fn export(&self, result: &RenderResult, _config: &Config, writer: &mut dyn Write) -> Result<()> {
        writeln!(writer, "<!DOCTYPE html>")?;
        writeln!(writer, "<html>")?;
        writeln!(writer, "<head>")?;
        writeln!(writer, r#"<meta charset="utf-8">"#)?;
        writeln!(writer, "<title>Listeners</title>")?;
        writeln!(writer, "<style>")?;
        write!(writer, "{}", BASE_STYLE)?;
        for color in CATEGORY_COLORS {
            writeln!(
                writer,
                ".highlight-{} {{ color: {}; font-weight: bold; }}",
                color, color
            )?;
        }
        writeln!(writer, "</style>")?;
        writeln!(writer, "</head>")?;
        writeln!(writer, "<body>")?;

        let summary = &result.summary;
        writeln!(
            writer,
            r#"<div id="listener-count">{} listener{}</div>"#,
            summary.listeners_rendered,
            if summary.listeners_rendered == 1 { "" } else { "s" }
        )?;

        if result.listeners.is_empty() {
            writeln!(writer, r#"<div class="empty-state">No listeners detected</div>"#)?;
        }

        for listener in &result.listeners {
            writeln!(writer, r#"<div class="listener-item">"#)?;
            writeln!(writer, r#"  <div class="listener-header">"#)?;
            writeln!(
                writer,
                r#"    <div class="index-number">{}</div>"#,
                listener.index
            )?;
            writeln!(
                writer,
                r#"    <div class="domain-name">{}</div>"#,
                escape_html(&listener.domain)
            )?;
            writeln!(
                writer,
                r#"    <div class="window-info">{}</div>"#,
                escape_html(&listener.window_text)
            )?;
            writeln!(writer, "  </div>")?;
            writeln!(
                writer,
                r#"  <div class="stack-trace">{}</div>"#,
                escape_html(&listener.stack)
            )?;

            let class = if listener.truncated {
                "code-block truncated"
            } else {
                "code-block"
            };
            writeln!(
                writer,
                r#"  <div class="{}"><pre>{}</pre></div>"#,
                class, listener.markup
            )?;
            writeln!(writer, "</div>")?;
        }

        writeln!(writer, "</body>")?;
        writeln!(writer, "</html>")?;

        Ok(())
    }
}

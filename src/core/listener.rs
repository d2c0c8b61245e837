//! Captured listener records

use crate::error::{LensError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};

/// Stand-in source for records captured without a function body
pub const MISSING_SOURCE: &str = "function() { /* code not available */ }";

/// A captured event listener: its source text plus where it came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerRecord {
    /// Source text of the listener function
    pub listener: Option<String>,
    /// Domain the listener was registered on
    pub domain: Option<String>,
    /// Frame the listener lives in
    pub window: Option<String>,
    /// Frame path between the top window and the listener's frame
    pub hops: Option<String>,
    /// Top stack frame at registration time
    pub stack: Option<String>,
    /// Full registration stack
    pub fullstack: Option<Vec<String>>,
}

impl ListenerRecord {
    /// Source text to render, falling back to a stand-in when missing
    pub fn source(&self) -> &str {
        match self.listener.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => MISSING_SOURCE,
        }
    }

    pub fn domain(&self) -> &str {
        match self.domain.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => "unknown",
        }
    }

    pub fn stack(&self) -> &str {
        match self.stack.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => "Unknown stack",
        }
    }

    /// Human-readable frame description.
    ///
    /// Combines `window` and `hops` (or "direct"), dropping URL-encoded JSON
    /// payloads (`%7B...%7D`) that frame names sometimes carry.
    pub fn window_text(&self) -> String {
        let mut text = String::new();
        if let Some(window) = self.window.as_deref().filter(|w| !w.is_empty()) {
            text.push_str(window);
            text.push(' ');
        }
        match self.hops.as_deref().filter(|h| !h.is_empty()) {
            Some(hops) => text.push_str(hops),
            None => text.push_str("direct"),
        }

        let cleaned = strip_encoded_json(&text);
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            String::from("direct")
        } else {
            cleaned.to_string()
        }
    }
}

/// Remove `%7B ... %7D` runs (no literal `}` inside) and the whitespace after them
fn strip_encoded_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("%7B") {
        let after = &rest[start + 3..];
        let limit = after.find('}').unwrap_or(after.len());
        match after[..limit].rfind("%7D") {
            Some(end) => {
                out.push_str(&rest[..start]);
                rest = after[end + 3..].trim_start();
            }
            None => {
                out.push_str(&rest[..start + 3]);
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Load listener records from a JSON array in `path` (or stdin if "-")
pub fn load_records(path: &str) -> Result<Vec<ListenerRecord>> {
    let reader: Box<dyn Read> = if path == "-" {
        Box::new(std::io::stdin().lock())
    } else {
        let file = File::open(path).map_err(|e| LensError::FileNotFound {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Box::new(BufReader::new(file))
    };

    serde_json::from_reader(reader).map_err(|e| LensError::InvalidRecords {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

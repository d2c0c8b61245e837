//! Heuristic re-indenter for listener source text
//!
//! A single left-to-right scan that breaks lines at braces, semicolons and
//! newlines and indents by brace depth. It is not a parser: regex literals,
//! comments and template interpolation get no special treatment, and an
//! escaped backslash right before a quote is read as escaping the quote.

use crate::config::DEFAULT_INDENT;

/// Re-indents source text by brace depth
#[derive(Debug, Clone)]
pub struct Reformatter {
    indent_unit: String,
}

impl Default for Reformatter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl Reformatter {
    pub fn new(indent_unit: &str) -> Self {
        Self {
            indent_unit: indent_unit.to_string(),
        }
    }

    /// The string emitted once per indent level
    pub fn indent_unit(&self) -> &str {
        &self.indent_unit
    }

    /// Reformat `source` into indented lines joined by `\n`.
    ///
    /// Total: empty input is returned unchanged and malformed input produces
    /// best-effort output.
    pub fn reformat(&self, source: &str) -> String {
        if source.is_empty() {
            return String::new();
        }

        let chars: Vec<char> = source.chars().collect();
        let mut state = ScanState::new(&self.indent_unit);

        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();
            let prev = if i > 0 { Some(chars[i - 1]) } else { None };
            i += 1;

            if is_quote(c) && prev != Some('\\') {
                match state.quote {
                    None => state.quote = Some(c),
                    Some(q) if q == c => state.quote = None,
                    Some(_) => {}
                }
                state.buffer.push(c);
                continue;
            }

            // String contents never affect structure
            if state.quote.is_some() {
                state.buffer.push(c);
                continue;
            }

            match c {
                '{' => {
                    state.buffer.push(c);
                    if next == Some('}') {
                        // `{}` is kept whole and waits for a later flush
                        state.buffer.push('}');
                        i += 1;
                    } else {
                        state.flush();
                        state.indent += 1;
                    }
                }
                '}' => {
                    if state.has_content() {
                        state.flush();
                    }
                    state.indent = state.indent.saturating_sub(1);
                    state.buffer.push(c);
                    if next.map_or(false, |n| !matches!(n, ',' | ';' | ')' | '}')) {
                        state.flush();
                    }
                }
                ';' => {
                    state.buffer.push(c);
                    if next.map_or(false, |n| !matches!(n, ' ' | '\n' | '\r')) {
                        state.flush();
                    }
                }
                '\n' | '\r' => {
                    if state.has_content() {
                        state.flush();
                    }
                }
                _ => state.buffer.push(c),
            }
        }

        if state.has_content() {
            state.flush();
        }

        state
            .lines
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[inline]
fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'' | '`')
}

/// Mutable scan state for one `reformat` call
struct ScanState<'a> {
    indent_unit: &'a str,
    indent: usize,
    buffer: String,
    lines: Vec<String>,
    /// Active string terminator, if inside a string literal
    quote: Option<char>,
}

impl<'a> ScanState<'a> {
    fn new(indent_unit: &'a str) -> Self {
        Self {
            indent_unit,
            indent: 0,
            buffer: String::new(),
            lines: Vec::new(),
            quote: None,
        }
    }

    fn has_content(&self) -> bool {
        !self.buffer.trim().is_empty()
    }

    /// Emit the buffer as one indented line and reset it
    fn flush(&mut self) {
        let mut line = self.indent_unit.repeat(self.indent);
        line.push_str(self.buffer.trim());
        self.lines.push(line);
        self.buffer.clear();
    }
}

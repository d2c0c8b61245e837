//! Multi-term highlighter
//!
//! Terms from every category are matched longest first. Each match is cut out
//! of the working text into a marked segment before the next term runs, so a
//! shorter term can never match inside (or across) an earlier match. The
//! marked segments play the role of collision-free placeholders: they live
//! outside the text entirely and cannot be forged by source content.

use super::escape::{decode_html, escape_html};
use crate::rules::RuleSet;
use std::cmp::Reverse;

/// A term ready to be matched, with its pre-rendered markup
#[derive(Debug, Clone)]
struct MarkedTerm {
    term: String,
    category: String,
    markup: String,
}

/// Working text split into unmatched text and matched terms
enum Segment {
    Text(String),
    /// Index into `Highlighter::terms`
    Marked(usize),
}

/// Highlighter compiled from a rule set.
///
/// Immutable once built, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct Highlighter {
    /// Terms sorted by descending character count; ties keep rule order
    terms: Vec<MarkedTerm>,
}

impl Highlighter {
    pub fn new(rules: &RuleSet) -> Self {
        let mut terms: Vec<MarkedTerm> = rules
            .categories()
            .iter()
            .flat_map(|category| {
                category
                    .terms
                    .iter()
                    .map(|t| t.trim())
                    .filter(|t| !t.is_empty())
                    .map(move |term| MarkedTerm {
                        term: term.to_string(),
                        category: category.name.clone(),
                        markup: render_span(&category.name, term),
                    })
            })
            .collect();

        // Stable: equal lengths keep rule order, so the earlier rule wins
        terms.sort_by_cached_key(|t| Reverse(t.term.chars().count()));

        Self { terms }
    }

    /// True when no term would ever be highlighted
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in match order, paired with their category
    pub fn terms(&self) -> impl Iterator<Item = (&str, &str)> {
        self.terms
            .iter()
            .map(|t| (t.term.as_str(), t.category.as_str()))
    }

    /// Render `text` as HTML with every recognized term wrapped in a span.
    ///
    /// Without terms the text is only escaped. Otherwise existing character
    /// references are decoded first, so already-escaped input is not escaped
    /// twice.
    pub fn highlight(&self, text: &str) -> String {
        if self.terms.is_empty() {
            return escape_html(text);
        }

        let mut segments = vec![Segment::Text(decode_html(text))];

        for (idx, marked) in self.terms.iter().enumerate() {
            let mut next = Vec::with_capacity(segments.len());
            for segment in segments {
                match segment {
                    Segment::Text(s) if s.contains(marked.term.as_str()) => {
                        split_matches(&s, &marked.term, idx, &mut next);
                    }
                    other => next.push(other),
                }
            }
            segments = next;
        }

        let mut out = String::with_capacity(text.len() * 2);
        for segment in &segments {
            match segment {
                Segment::Text(s) => out.push_str(&escape_html(s)),
                Segment::Marked(idx) => out.push_str(&self.terms[*idx].markup),
            }
        }
        out
    }
}

/// Highlight `text` with a one-off highlighter built from `rules`
pub fn highlight(text: &str, rules: &RuleSet) -> String {
    Highlighter::new(rules).highlight(text)
}

/// Split `s` around non-overlapping, left-to-right matches of `term`
fn split_matches(s: &str, term: &str, idx: usize, out: &mut Vec<Segment>) {
    let mut last = 0;
    for (start, _) in s.match_indices(term) {
        if start > last {
            out.push(Segment::Text(s[last..start].to_string()));
        }
        out.push(Segment::Marked(idx));
        last = start + term.len();
    }
    if last < s.len() {
        out.push(Segment::Text(s[last..].to_string()));
    }
}

fn render_span(category: &str, term: &str) -> String {
    format!(
        r#"<span class="highlight-{}">{}</span>"#,
        escape_html(category),
        escape_html(term)
    )
}

//! Rule-definition text parser

use super::RuleSet;

/// Parse rule-definition text into a rule set.
///
/// Lines are trimmed and blank lines skipped. A `[name]` line (word characters
/// only) opens or reopens a category; any other line is a comma-separated term
/// list appended to the current category. Lines before the first header are
/// dropped. Never fails: malformed input yields whatever could be parsed.
pub fn parse_rules(text: &str) -> RuleSet {
    let mut rules = RuleSet::new();
    let mut current: Option<usize> = None;

    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(name) = category_header(trimmed) {
            current = Some(rules.open_category(name));
            continue;
        }

        if let Some(idx) = current {
            rules.push_terms(idx, trimmed.split(','));
        }
    }

    rules
}

/// Extract the name from a `[word]` header line
fn category_header(line: &str) -> Option<&str> {
    let name = line.strip_prefix('[')?.strip_suffix(']')?;
    if !name.is_empty() && name.chars().all(is_word_char) {
        Some(name)
    } else {
        None
    }
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

//! Highlight rules: categories of literal terms
//!
//! Rules are edited as line-oriented text (`[category]` headers followed by
//! comma-separated terms) and persisted as an ordered JSON rule set.

mod parser;
mod storage;

pub use parser::parse_rules;
pub use storage::{load_rules, save_rules};

use serde::{Deserialize, Serialize};

/// A named highlight category and its literal terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Lower-cased category name
    pub name: String,
    /// Trimmed, non-empty terms in definition order (duplicates allowed)
    pub terms: Vec<String>,
}

impl Category {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            terms: Vec::new(),
        }
    }
}

/// Ordered sequence of highlight categories
///
/// Deserialized sets pass through the same normalization as parsed text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRuleSet")]
pub struct RuleSet {
    categories: Vec<Category>,
}

/// Rule set as it appears on the wire, before normalization
#[derive(Deserialize)]
struct RawRuleSet {
    categories: Vec<Category>,
}

impl From<RawRuleSet> for RuleSet {
    fn from(raw: RawRuleSet) -> Self {
        RuleSet {
            categories: raw.categories,
        }
        .normalized()
    }
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// All categories in definition order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by (case-insensitive) name
    pub fn category(&self, name: &str) -> Option<&Category> {
        let name = name.to_lowercase();
        self.categories.iter().find(|c| c.name == name)
    }

    /// Open a category, or reopen an existing one, returning its index
    pub fn open_category(&mut self, name: &str) -> usize {
        let name = name.to_lowercase();
        if let Some(idx) = self.categories.iter().position(|c| c.name == name) {
            return idx;
        }
        self.categories.push(Category::new(&name));
        self.categories.len() - 1
    }

    /// Append terms to the category at `idx`, trimming and dropping empty ones
    pub fn push_terms<'a>(&mut self, idx: usize, terms: impl IntoIterator<Item = &'a str>) {
        if let Some(category) = self.categories.get_mut(idx) {
            category.terms.extend(
                terms
                    .into_iter()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
            );
        }
    }

    /// Number of categories, including empty ones
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// True when no category contributes any highlighting
    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|c| c.terms.is_empty())
    }

    /// Total number of terms across all categories
    pub fn term_count(&self) -> usize {
        self.categories.iter().map(|c| c.terms.len()).sum()
    }

    /// Rebuild the set through the same normalization the text parser applies.
    ///
    /// Used for rule sets that arrive from outside the parser (persisted JSON).
    pub fn normalized(self) -> Self {
        let mut rules = RuleSet::new();
        for category in self.categories {
            let idx = rules.open_category(&category.name);
            rules.push_terms(idx, category.terms.iter().map(String::as_str));
        }
        rules
    }
}

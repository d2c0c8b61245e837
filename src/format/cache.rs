//! Bounded FIFO cache of formatted source

use super::Reformatter;
use crate::config::Config;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Hit/miss counters for a format cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub evictions: usize,
}

/// Formatted results keyed by exact source text.
///
/// Eviction is first-in-first-out: a hit does not refresh an entry's position.
#[derive(Debug)]
pub struct FormatCache {
    entries: HashMap<String, String>,
    /// Keys in insertion order, oldest first
    order: VecDeque<String>,
    capacity: usize,
    stats: CacheStats,
}

impl FormatCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
            stats: CacheStats::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, source: &str) -> bool {
        self.entries.contains_key(source)
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Look up a cached result, counting the hit or miss
    pub fn get(&mut self, source: &str) -> Option<&str> {
        match self.entries.get(source) {
            Some(formatted) => {
                self.stats.hits += 1;
                Some(formatted.as_str())
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Insert a result, evicting the oldest entry when full.
    ///
    /// A zero-capacity cache stores nothing.
    pub fn insert(&mut self, source: String, formatted: String) {
        if self.capacity == 0 {
            return;
        }

        if let Some(existing) = self.entries.get_mut(&source) {
            *existing = formatted;
            return;
        }

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                self.stats.evictions += 1;
                debug!(chars = oldest.len(), "evicted oldest format cache entry");
            }
        }

        self.order.push_back(source.clone());
        self.entries.insert(source, formatted);
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            debug!(entries = self.entries.len(), "clearing format cache");
        }
        self.entries.clear();
        self.order.clear();
    }
}

/// Result of formatting one source through the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOutcome {
    /// Formatted text, or the source unchanged when formatting was bypassed
    pub text: String,
    /// Source exceeded the size ceiling and was left as-is
    pub skipped_for_size: bool,
    /// Result came from the cache
    pub cache_hit: bool,
}

/// Reformatter fronted by a FIFO cache and a size ceiling
#[derive(Debug)]
pub struct CachingFormatter {
    reformatter: Reformatter,
    cache: FormatCache,
    max_input_chars: usize,
}

impl CachingFormatter {
    pub fn new(reformatter: Reformatter, cache_capacity: usize, max_input_chars: usize) -> Self {
        Self {
            reformatter,
            cache: FormatCache::new(cache_capacity),
            max_input_chars,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Reformatter::new(&config.indent_unit),
            config.cache_capacity,
            config.max_format_chars,
        )
    }

    pub fn cache(&self) -> &FormatCache {
        &self.cache
    }

    /// Format `source`, reporting whether it was skipped or served from cache
    pub fn format(&mut self, source: &str) -> FormatOutcome {
        if source.is_empty() {
            return FormatOutcome {
                text: String::new(),
                skipped_for_size: false,
                cache_hit: false,
            };
        }

        if self.exceeds_ceiling(source) {
            debug!(
                units = utf16_len(source),
                max = self.max_input_chars,
                "skipping formatting for large code block"
            );
            return FormatOutcome {
                text: source.to_string(),
                skipped_for_size: true,
                cache_hit: false,
            };
        }

        if let Some(cached) = self.cache.get(source) {
            return FormatOutcome {
                text: cached.to_string(),
                skipped_for_size: false,
                cache_hit: true,
            };
        }

        let formatted = self.reformatter.reformat(source);
        self.cache.insert(source.to_string(), formatted.clone());

        FormatOutcome {
            text: formatted,
            skipped_for_size: false,
            cache_hit: false,
        }
    }

    /// Format `source` through the cache, returning only the text
    pub fn format_cached(&mut self, source: &str) -> String {
        self.format(source).text
    }

    /// Invalidate all cached results
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn exceeds_ceiling(&self, source: &str) -> bool {
        // Length is measured in UTF-16 code units; byte length bounds it from above
        source.len() > self.max_input_chars && utf16_len(source) > self.max_input_chars
    }
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter(capacity: usize, max_chars: usize) -> CachingFormatter {
        CachingFormatter::new(Reformatter::default(), capacity, max_chars)
    }

    #[test]
    fn test_cache_hit_on_second_call() {
        let mut fmt = formatter(10, 10_000);
        let source = "if(x){a();b();}";

        let first = fmt.format(source);
        assert!(!first.cache_hit);
        assert_eq!(first.text, Reformatter::default().reformat(source));

        let second = fmt.format(source);
        assert!(second.cache_hit);
        assert_eq!(second.text, first.text);
        assert_eq!(fmt.cache().stats().hits, 1);
        assert_eq!(fmt.cache().stats().misses, 1);
    }

    #[test]
    fn test_oversized_source_bypasses_cache() {
        let mut fmt = formatter(10, 8);
        let source = "a();b();c();";

        let outcome = fmt.format(source);
        assert!(outcome.skipped_for_size);
        assert_eq!(outcome.text, source);
        assert!(fmt.cache().is_empty());
        assert_eq!(fmt.cache().stats(), CacheStats::default());
    }

    #[test]
    fn test_ceiling_counts_code_units_not_bytes() {
        // 6 code units, 9 bytes
        let mut fmt = formatter(10, 6);
        let outcome = fmt.format("é;é;é;");
        assert!(!outcome.skipped_for_size);
        assert_eq!(outcome.text, "é;\né;\né;");
    }

    #[test]
    fn test_ceiling_counts_astral_chars_twice() {
        // 4 chars, 6 UTF-16 code units
        let mut fmt = formatter(10, 5);
        let outcome = fmt.format("😀;😀;");
        assert!(outcome.skipped_for_size);
        assert_eq!(outcome.text, "😀;😀;");

        let mut fmt = formatter(10, 6);
        assert!(!fmt.format("😀;😀;").skipped_for_size);
    }

    #[test]
    fn test_source_at_ceiling_is_formatted() {
        let mut fmt = formatter(10, 4);
        let outcome = fmt.format("a;b;");
        assert!(!outcome.skipped_for_size);
        assert_eq!(outcome.text, "a;\nb;");
    }

    #[test]
    fn test_empty_source_untouched() {
        let mut fmt = formatter(10, 100);
        assert_eq!(fmt.format_cached(""), "");
        assert!(fmt.cache().is_empty());
        assert_eq!(fmt.cache().stats(), CacheStats::default());
    }

    #[test]
    fn test_fifo_eviction() {
        let mut fmt = formatter(3, 100);
        for src in ["a;", "b;", "c;"] {
            fmt.format(src);
        }
        assert_eq!(fmt.cache().len(), 3);

        // Hit on the oldest does not protect it (FIFO, not LRU)
        assert!(fmt.format("a;").cache_hit);

        fmt.format("d;");
        assert_eq!(fmt.cache().len(), 3);
        assert!(!fmt.cache().contains("a;"));
        assert!(fmt.cache().contains("b;"));
        assert!(fmt.cache().contains("d;"));
        assert_eq!(fmt.cache().stats().evictions, 1);

        // Evicted source is recomputed
        assert!(!fmt.format("a;").cache_hit);
        assert!(!fmt.cache().contains("b;"));
    }

    #[test]
    fn test_clear_cache() {
        let mut fmt = formatter(10, 100);
        fmt.format("a;b;");
        assert_eq!(fmt.cache().len(), 1);

        fmt.clear_cache();
        assert!(fmt.cache().is_empty());
        assert!(!fmt.format("a;b;").cache_hit);
    }

    #[test]
    fn test_zero_capacity_disables_caching() {
        let mut fmt = formatter(0, 100);
        fmt.format("a;b;");
        assert!(!fmt.format("a;b;").cache_hit);
        assert!(fmt.cache().is_empty());
    }

    #[test]
    fn test_insert_existing_key_keeps_position() {
        let mut cache = FormatCache::new(2);
        cache.insert("a".to_string(), "1".to_string());
        cache.insert("b".to_string(), "2".to_string());
        cache.insert("a".to_string(), "3".to_string());
        assert_eq!(cache.len(), 2);

        cache.insert("c".to_string(), "4".to_string());
        assert!(!cache.contains("a"));
        assert_eq!(cache.get("b"), Some("2"));
    }
}

//! Source reformatting for display
//!
//! Listener source is frequently minified onto a single line. This module
//! re-indents it by brace depth and memoizes the results in a bounded cache
//! owned by the rendering session.

mod cache;
mod reformatter;

pub use cache::{CacheStats, CachingFormatter, FormatCache, FormatOutcome};
pub use reformatter::Reformatter;

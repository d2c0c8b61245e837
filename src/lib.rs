//! listener-lens - Review captured event-listener source
//!
//! The rendering pipeline turns captured listener source into reviewable
//! markup in two steps: an optional heuristic re-indent (memoized per
//! session) and a collision-safe multi-term highlight driven by a
//! user-edited rule set.
//!
//! ```text
//! source ──► format::CachingFormatter ──► highlight::Highlighter ──► markup
//!                                               ▲
//! rule text ──► rules::parse_rules ─────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod format;
pub mod highlight;
pub mod rules;

pub use config::Config;
pub use error::{LensError, Result};
pub use format::{CachingFormatter, Reformatter};
pub use highlight::{highlight, Highlighter};
pub use rules::{parse_rules, RuleSet};

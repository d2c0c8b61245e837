//! Term highlighting and HTML escaping

mod escape;
mod highlighter;

pub use escape::{decode_html, escape_html};
pub use highlighter::{highlight, Highlighter};

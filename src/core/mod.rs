//! Listener records and the rendering session that turns them into markup

pub mod listener;
pub mod render;

pub use listener::{load_records, ListenerRecord};
pub use render::{RenderResult, RenderSession, RenderSummary, RenderedListener};

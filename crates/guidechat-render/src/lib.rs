//! Content renderer for structured chat replies.
//!
//! Turns the recursive [`ContentBlock`](guidechat_core::ContentBlock) model
//! into a tree of [`ViewNode`]s ready for a presentation layer. Rendering is
//! pure and deterministic: the same blocks always produce the same nodes.

pub mod error;
pub mod plain;
pub mod renderer;
pub mod view;

pub use error::RenderError;
pub use plain::to_plain_text;
pub use renderer::{render, render_block, render_nested};
pub use view::{EntryRole, HeadingLevel, LabeledGroup, ListEntry, ViewNode};

//! # Scribe Editor
//!
//! The update driver over the document tree core (`scribe-doc`): owns one
//! document, scopes all structural mutations inside single-writer edit
//! contexts, and versions the committed state.
//!
//! ## Usage
//!
//! ```rust
//! use scribe_editor::Editor;
//! use scribe_doc::{HeadingTag, NodeKey};
//!
//! let mut editor = Editor::new();
//!
//! // All mutations run inside a scoped update: commit on Ok, full
//! // rollback on Err.
//! let heading = editor.update(|ctx| {
//!     let heading = ctx.create_heading(HeadingTag::H1)?;
//!     ctx.append(NodeKey::ROOT, &[heading])?;
//!     Ok(heading)
//! }).unwrap();
//!
//! // The user presses Enter at the end of the heading.
//! editor.update(|ctx| ctx.insert_new_after(heading, None)).unwrap();
//! ```

mod context;
mod editor;

pub use context::EditContext;
pub use editor::Editor;

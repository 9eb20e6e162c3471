//! # Scribe Document Tree
//!
//! The node tree and mutation core underlying a structured rich-text
//! editor: a keyed, type-discriminated tree of content nodes with safe
//! structural edits, type-tagged serialization, and style-attribute
//! resolution for rendering.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ editor crate: edit contexts + versioning    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ doc: node tree core                         │
//! │  - DocTree: key registry + topology         │
//! │  - Node: tagged variants, clone, payloads   │
//! │  - structural ops (append/insert/replace)   │
//! │  - editing reactions (split, collapse)      │
//! │  - Theme: style-key → attribute resolution  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ layout/rendering (external): consumes       │
//! │ resolved attribute dictionaries             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core principles
//!
//! 1. **Topology lives in the registry**: nodes hold only scalar fields and
//!    reference each other by [`NodeKey`], never by owning pointer.
//! 2. **Closed variant set**: every node is one arm of [`Node`]; editing
//!    reactions and style resolution are exhaustive matches, checked when a
//!    variant is added.
//! 3. **Reject, don't ignore**: forbidden operations (anything that would
//!    detach or replace the root, or break parent/child consistency) fail
//!    loudly and mutate nothing.
//! 4. **Keys are runtime identity**: payloads carry a `type` discriminator
//!    and variant fields, never keys; decode assigns fresh keys.

mod edits;
mod error;
mod key;
mod node;
mod ops;
mod selection;
mod serial;
mod theme;
mod tree;

pub use edits::{collapse_at_start, insert_new_after};
pub use error::{DocError, DocResult};
pub use key::NodeKey;
pub use node::{
    BlockFormat, CharFormat, Direction, ElementFields, HeadingNode, HeadingTag, Node, NodeKind,
    ParagraphNode, RootNode, TextNode,
};
pub use selection::{Point, RangeSelection};
pub use serial::{decode_subtree, encode_document, encode_subtree};
pub use theme::{AttributeDict, StyleKey, StyleProp, StyleValue, Theme};
pub use tree::DocTree;

//! # Editing reactions
//!
//! What a node variant does when the selection driver signals a structural
//! edit: "split/continue after this block" ([`insert_new_after`]) and "merge
//! this block backward into plain content" ([`collapse_at_start`]). Each
//! reaction is exhaustive dispatch over [`NodeKind`], so adding a variant
//! forces a decision here at compile time.
//!
//! The selection is an optional hint; the variants shipped here ignore its
//! contents.

use tracing::debug;

use crate::error::{DocError, DocResult};
use crate::key::NodeKey;
use crate::node::{Node, NodeKind, ParagraphNode};
use crate::selection::RangeSelection;
use crate::tree::DocTree;

/// React to "split/continue after this block".
///
/// Heading and paragraph blocks always produce a fresh, empty paragraph
/// carrying the source block's text direction, inserted immediately after
/// the target; existing content is never inspected or moved, wherever the
/// selection sits. Returns the new block's key, or `None` for variants with
/// no continuation block (root, text).
pub fn insert_new_after(
    tree: &mut DocTree,
    key: NodeKey,
    _selection: Option<&RangeSelection>,
) -> DocResult<Option<NodeKey>> {
    let node = tree.lookup(key)?;
    let kind = node.kind();
    let direction = node.element().map(|e| e.direction).unwrap_or_default();
    match kind {
        NodeKind::Heading | NodeKind::Paragraph => {
            // Validate up front: registering the paragraph must not leave an
            // orphan behind if the target turns out to be detached.
            if tree.parent_of(key)?.is_none() {
                return Err(DocError::NotAttached(key));
            }

            let mut paragraph = ParagraphNode::new();
            paragraph.element.direction = direction;
            let new_key = tree.register(Node::Paragraph(paragraph))?;
            tree.insert_after(key, new_key)?;
            debug!(target = %key, new = %new_key, "insert new block after");
            Ok(Some(new_key))
        }
        NodeKind::Root | NodeKind::Text => Ok(None),
    }
}

/// React to "merge this block backward into plain content" (for example,
/// deleting at offset zero).
///
/// A heading collapses into a fresh paragraph: every child moves across in
/// original order, the paragraph takes the heading's place in the tree, and
/// the heading is detached and destroyed. Returns `true` when the tree
/// changed. Total: a childless heading still yields a valid empty paragraph.
pub fn collapse_at_start(
    tree: &mut DocTree,
    key: NodeKey,
    _selection: Option<&RangeSelection>,
) -> DocResult<bool> {
    let kind = tree.lookup(key)?.kind();
    match kind {
        NodeKind::Heading => {
            if tree.parent_of(key)?.is_none() {
                return Err(DocError::NotAttached(key));
            }

            let paragraph = tree.register(Node::Paragraph(ParagraphNode::new()))?;
            tree.replace(key, paragraph, true)?;
            debug!(collapsed = %key, into = %paragraph, "collapse heading at start");
            Ok(true)
        }
        NodeKind::Root | NodeKind::Paragraph | NodeKind::Text => Ok(false),
    }
}

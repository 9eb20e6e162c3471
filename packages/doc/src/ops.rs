//! # Structural operations
//!
//! Container semantics over the registry: append, insert-before/after,
//! replace, remove. Every operation validates first and only then relinks,
//! so either the full set of parent/child updates applies or none do; a
//! failed operation leaves the tree exactly as it was, never a silent no-op.
//!
//! Root invariants are enforced here by rejection: the root cannot be
//! detached, replaced, or given siblings. It anchors the absolute start and
//! end of the document, so there must always be exactly one, always attached
//! at the top.

use tracing::debug;

use crate::error::{DocError, DocResult};
use crate::key::NodeKey;
use crate::tree::DocTree;

impl DocTree {
    /// Append `nodes` to the end of `parent`'s children, in order.
    ///
    /// Every node must be registered, detached, distinct, and not an
    /// ancestor of `parent`.
    pub fn append(&mut self, parent: NodeKey, nodes: &[NodeKey]) -> DocResult<()> {
        let mut index = self.children_of(parent)?.len();
        for (offset, &node) in nodes.iter().enumerate() {
            if nodes[..offset].contains(&node) {
                return Err(DocError::Structural(format!(
                    "node {node} appears twice in one append"
                )));
            }
            // Final indices are contiguous from the current end, so the gap
            // check only needs the starting index.
            self.validate_link(parent, node, index)?;
        }
        for &node in nodes {
            self.link_unchecked(parent, node, index);
            index += 1;
        }
        Ok(())
    }

    /// Insert `node` as the sibling immediately before `target`.
    ///
    /// Returns the inserted key for chaining. Fails on the root: nothing
    /// may precede it.
    pub fn insert_before(&mut self, target: NodeKey, node: NodeKey) -> DocResult<NodeKey> {
        self.insert_adjacent(target, node, 0, "insertBefore")
    }

    /// Insert `node` as the sibling immediately after `target`.
    pub fn insert_after(&mut self, target: NodeKey, node: NodeKey) -> DocResult<NodeKey> {
        self.insert_adjacent(target, node, 1, "insertAfter")
    }

    fn insert_adjacent(
        &mut self,
        target: NodeKey,
        node: NodeKey,
        offset: usize,
        op: &'static str,
    ) -> DocResult<NodeKey> {
        if target == NodeKey::ROOT {
            return Err(DocError::RootViolation(op));
        }
        let parent = self
            .parent_of(target)?
            .ok_or(DocError::NotAttached(target))?;
        let index = self.position_in_parent(parent, target) + offset;
        self.validate_link(parent, node, index)?;
        self.link_unchecked(parent, node, index);
        debug!(op, target = %target, node = %node, "insert sibling");
        Ok(node)
    }

    /// Replace `target` with `replacement` at the same position.
    ///
    /// With `include_children`, the target's children move onto the
    /// replacement preserving order (the replacement must be able to own
    /// them). The target is detached and destroyed; its key becomes stale.
    /// Returns the replacement key for chaining.
    pub fn replace(
        &mut self,
        target: NodeKey,
        replacement: NodeKey,
        include_children: bool,
    ) -> DocResult<NodeKey> {
        if target == NodeKey::ROOT {
            return Err(DocError::RootViolation("replace"));
        }
        let parent = self
            .parent_of(target)?
            .ok_or(DocError::NotAttached(target))?;
        let index = self.position_in_parent(parent, target);
        self.validate_link(parent, replacement, index)?;
        if include_children && !self.lookup(replacement)?.is_element() {
            return Err(DocError::Structural(format!(
                "node {replacement} cannot adopt the children of {target}"
            )));
        }

        self.unlink_unchecked(parent, target);
        self.link_unchecked(parent, replacement, index);
        if include_children {
            self.move_children_unchecked(target, replacement);
        }
        self.destroy_detached(target);
        debug!(target = %target, replacement = %replacement, include_children, "replace node");
        Ok(replacement)
    }

    /// Detach `node` from the tree and destroy it together with its
    /// subtree. Fails on the root and on detached nodes.
    pub fn remove(&mut self, node: NodeKey) -> DocResult<()> {
        if node == NodeKey::ROOT {
            return Err(DocError::RootViolation("remove"));
        }
        let parent = self.parent_of(node)?.ok_or(DocError::NotAttached(node))?;
        self.unlink_unchecked(parent, node);
        self.destroy_detached(node);
        debug!(node = %node, "remove node");
        Ok(())
    }

    /// Index of `child` within `parent`'s sequence.
    /// Caller guarantees the link exists (parent came from `parent_of`).
    fn position_in_parent(&self, parent: NodeKey, child: NodeKey) -> usize {
        self.children_of(parent)
            .ok()
            .and_then(|children| children.iter().position(|&k| k == child))
            .expect("parent/children relation is mutually consistent")
    }
}

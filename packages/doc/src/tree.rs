//! # Node key registry
//!
//! The single arena for one document. Topology (who is whose parent or
//! child) lives here, not in node references: nodes address each other only
//! by [`NodeKey`], which rules out reference cycles and lets a structural
//! edit update both sides of the parent/child relation in one place.
//!
//! Every topology mutation is immediately visible document-wide. Staging and
//! batching are the edit context's job (see the editor crate); the registry
//! itself has no internal locking; callers must not run concurrent edits on
//! the same document.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{DocError, DocResult};
use crate::key::NodeKey;
use crate::node::{Node, NodeKind, RootNode};

/// One registered node plus its links.
///
/// Invariant: `parent` and the parent slot's `children` are mutually
/// consistent: a key appears in its parent's child sequence iff its slot
/// names that parent.
#[derive(Debug, Clone)]
struct Slot {
    node: Node,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

/// Arena and link table for one document's nodes.
///
/// Created with the root pre-registered under [`NodeKey::ROOT`]; the root is
/// never unlinked or destroyed. Keys are allocated monotonically and never
/// reused, so a lookup through a stale key fails with
/// [`DocError::NotFound`] instead of aliasing a newer node.
#[derive(Debug, Clone)]
pub struct DocTree {
    slots: HashMap<NodeKey, Slot>,
    next_key: u32,
}

impl DocTree {
    /// Create a tree containing only the root node.
    pub fn new() -> Self {
        let mut root = Node::Root(RootNode::new());
        root.set_key(NodeKey::ROOT);

        let mut slots = HashMap::new();
        slots.insert(
            NodeKey::ROOT,
            Slot {
                node: root,
                parent: None,
                children: Vec::new(),
            },
        );

        Self { slots, next_key: 1 }
    }

    /// Allocate a fresh, unused key.
    pub fn allocate(&mut self) -> NodeKey {
        let key = NodeKey(self.next_key);
        self.next_key += 1;
        key
    }

    /// Register a node under a fresh key and return the key.
    ///
    /// The key is stamped into the node. A second root can never be
    /// registered.
    pub fn register(&mut self, mut node: Node) -> DocResult<NodeKey> {
        if node.kind() == NodeKind::Root {
            return Err(DocError::Structural(
                "a document has exactly one root node".to_string(),
            ));
        }

        let key = self.allocate();
        node.set_key(key);
        debug!(key = %key, kind = ?node.kind(), "register node");
        self.slots.insert(
            key,
            Slot {
                node,
                parent: None,
                children: Vec::new(),
            },
        );
        Ok(key)
    }

    /// Install a revised node under a key that is already live.
    ///
    /// This is the commit half of the clone-then-revise flow: the clone
    /// carries the original key, the caller mutates its scalar fields, and
    /// this swaps it in. Topology is untouched: children stay linked against
    /// the key. The variant must not change, and the root slot only accepts a
    /// root node.
    pub fn register_with_key(&mut self, key: NodeKey, mut node: Node) -> DocResult<()> {
        let slot = self.slots.get_mut(&key).ok_or(DocError::NotFound(key))?;
        if slot.node.kind() != node.kind() {
            return Err(DocError::Structural(format!(
                "cannot re-register node {key} as a different variant"
            )));
        }
        node.set_key(key);
        slot.node = node;
        Ok(())
    }

    /// Look up a node. Fails for keys never allocated or already removed.
    pub fn lookup(&self, key: NodeKey) -> DocResult<&Node> {
        self.slots
            .get(&key)
            .map(|slot| &slot.node)
            .ok_or(DocError::NotFound(key))
    }

    /// Mutable lookup for variant-defined scalar mutation.
    pub fn lookup_mut(&mut self, key: NodeKey) -> DocResult<&mut Node> {
        self.slots
            .get_mut(&key)
            .map(|slot| &mut slot.node)
            .ok_or(DocError::NotFound(key))
    }

    /// Whether a key is currently registered.
    pub fn contains(&self, key: NodeKey) -> bool {
        self.slots.contains_key(&key)
    }

    /// The parent of a node, if it is attached.
    pub fn parent_of(&self, key: NodeKey) -> DocResult<Option<NodeKey>> {
        self.slots
            .get(&key)
            .map(|slot| slot.parent)
            .ok_or(DocError::NotFound(key))
    }

    /// Materialized child-key sequence, in authoritative document order.
    ///
    /// A read view, not a live reference: later mutations do not change a
    /// previously returned sequence.
    pub fn children_of(&self, key: NodeKey) -> DocResult<Vec<NodeKey>> {
        self.slots
            .get(&key)
            .map(|slot| slot.children.clone())
            .ok_or(DocError::NotFound(key))
    }

    /// Number of live nodes (including the root).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Link `child` under `parent` at `index`, updating both sides.
    ///
    /// Fails if either key is stale, if the child already has a parent, if
    /// the child is the root, if the parent cannot own children, if the
    /// index would leave a gap, or if the link would create a cycle. On
    /// failure nothing is changed.
    pub fn link(&mut self, parent: NodeKey, child: NodeKey, index: usize) -> DocResult<()> {
        self.validate_link(parent, child, index)?;
        self.link_unchecked(parent, child, index);
        Ok(())
    }

    /// Detach `child` from its parent, updating both sides.
    ///
    /// The child and its subtree stay registered; only the link is removed.
    pub fn unlink(&mut self, child: NodeKey) -> DocResult<()> {
        if child == NodeKey::ROOT {
            return Err(DocError::RootViolation("unlink"));
        }
        let parent = self
            .parent_of(child)?
            .ok_or(DocError::NotAttached(child))?;
        self.unlink_unchecked(parent, child);
        Ok(())
    }

    /// Validation half of [`DocTree::link`]; performs no mutation.
    pub(crate) fn validate_link(
        &self,
        parent: NodeKey,
        child: NodeKey,
        index: usize,
    ) -> DocResult<()> {
        if child == NodeKey::ROOT {
            return Err(DocError::RootViolation("link"));
        }
        let parent_slot = self.slots.get(&parent).ok_or(DocError::NotFound(parent))?;
        let child_slot = self.slots.get(&child).ok_or(DocError::NotFound(child))?;

        if !parent_slot.node.is_element() {
            return Err(DocError::Structural(format!(
                "node {parent} cannot own children"
            )));
        }
        if child_slot.parent.is_some() {
            return Err(DocError::AlreadyAttached(child));
        }
        if index > parent_slot.children.len() {
            return Err(DocError::Structural(format!(
                "index {index} would leave a gap in the children of {parent}"
            )));
        }
        // A detached node may still own a subtree; walking up from the
        // parent catches the case where that subtree contains the parent.
        let mut cursor = Some(parent);
        while let Some(key) = cursor {
            if key == child {
                return Err(DocError::Structural(format!(
                    "linking {child} under {parent} would create a cycle"
                )));
            }
            cursor = self.slots.get(&key).and_then(|slot| slot.parent);
        }
        Ok(())
    }

    /// Mutation half of [`DocTree::link`]; caller must have validated.
    pub(crate) fn link_unchecked(&mut self, parent: NodeKey, child: NodeKey, index: usize) {
        debug!(parent = %parent, child = %child, index, "link");
        let parent_slot = self.slots.get_mut(&parent).expect("validated parent");
        parent_slot.children.insert(index, child);
        let child_slot = self.slots.get_mut(&child).expect("validated child");
        child_slot.parent = Some(parent);
    }

    /// Mutation half of [`DocTree::unlink`]; caller must have validated.
    pub(crate) fn unlink_unchecked(&mut self, parent: NodeKey, child: NodeKey) {
        debug!(parent = %parent, child = %child, "unlink");
        let parent_slot = self.slots.get_mut(&parent).expect("validated parent");
        parent_slot.children.retain(|&k| k != child);
        let child_slot = self.slots.get_mut(&child).expect("validated child");
        child_slot.parent = None;
    }

    /// Drop a detached node and its entire subtree from the registry.
    ///
    /// Stale keys into the destroyed subtree fail subsequent lookups, which
    /// is how external collaborators holding references (a selection) learn
    /// the target no longer exists.
    pub(crate) fn destroy_detached(&mut self, key: NodeKey) {
        debug_assert!(
            self.slots
                .get(&key)
                .map_or(true, |slot| slot.parent.is_none()),
            "destroy_detached requires a detached node"
        );
        let mut stack = vec![key];
        while let Some(key) = stack.pop() {
            if let Some(slot) = self.slots.remove(&key) {
                debug!(key = %key, "destroy node");
                stack.extend(slot.children);
            }
        }
    }

    /// Move every child of `from` to the end of `to`, preserving order.
    /// Caller must have validated that `to` is an element.
    pub(crate) fn move_children_unchecked(&mut self, from: NodeKey, to: NodeKey) {
        let children = std::mem::take(
            &mut self.slots.get_mut(&from).expect("validated source").children,
        );
        for &child in &children {
            self.slots.get_mut(&child).expect("validated child").parent = Some(to);
        }
        self.slots
            .get_mut(&to)
            .expect("validated target")
            .children
            .extend(children);
    }
}

impl Default for DocTree {
    fn default() -> Self {
        Self::new()
    }
}

//! # Edit context
//!
//! The single-writer mutation surface inside one [`Editor::update`] scope.
//! Structural mutations only happen through a context; the `&mut` receiver
//! chain makes concurrent contexts on one document unrepresentable, so the
//! registry needs no internal locking.
//!
//! Within a context, operations apply in call order and each sees the
//! effects of the previous one. Whether any of it becomes visible outside
//! the context is decided when the update closure returns; see
//! [`Editor::update`].
//!
//! [`Editor::update`]: crate::Editor::update

use scribe_doc::{
    collapse_at_start, insert_new_after, DocResult, DocTree, HeadingNode, HeadingTag, Node,
    NodeKey, ParagraphNode, RangeSelection, TextNode,
};

/// Mutation handle bound to one document and one logical thread of control.
#[derive(Debug)]
pub struct EditContext<'a> {
    tree: &'a mut DocTree,
}

impl<'a> EditContext<'a> {
    pub(crate) fn new(tree: &'a mut DocTree) -> Self {
        Self { tree }
    }

    /// Read access to the in-progress state.
    pub fn tree(&self) -> &DocTree {
        self.tree
    }

    /// Register a node under a fresh key, detached.
    pub fn register(&mut self, node: Node) -> DocResult<NodeKey> {
        self.tree.register(node)
    }

    /// Register a fresh empty paragraph.
    pub fn create_paragraph(&mut self) -> DocResult<NodeKey> {
        self.tree.register(Node::Paragraph(ParagraphNode::new()))
    }

    /// Register a fresh empty heading of the given level.
    pub fn create_heading(&mut self, tag: HeadingTag) -> DocResult<NodeKey> {
        self.tree.register(Node::Heading(HeadingNode::new(tag)))
    }

    /// Register a fresh text run.
    pub fn create_text(&mut self, text: impl Into<String>) -> DocResult<NodeKey> {
        self.tree.register(Node::Text(TextNode::new(text)))
    }

    /// Append `nodes` to `parent` in order.
    pub fn append(&mut self, parent: NodeKey, nodes: &[NodeKey]) -> DocResult<()> {
        self.tree.append(parent, nodes)
    }

    /// Insert `node` immediately before `target`.
    pub fn insert_before(&mut self, target: NodeKey, node: NodeKey) -> DocResult<NodeKey> {
        self.tree.insert_before(target, node)
    }

    /// Insert `node` immediately after `target`.
    pub fn insert_after(&mut self, target: NodeKey, node: NodeKey) -> DocResult<NodeKey> {
        self.tree.insert_after(target, node)
    }

    /// Replace `target` with `replacement`, optionally moving its children.
    pub fn replace(
        &mut self,
        target: NodeKey,
        replacement: NodeKey,
        include_children: bool,
    ) -> DocResult<NodeKey> {
        self.tree.replace(target, replacement, include_children)
    }

    /// Remove `node` and its subtree.
    pub fn remove(&mut self, node: NodeKey) -> DocResult<()> {
        self.tree.remove(node)
    }

    /// Mutable access to a node's scalar fields.
    pub fn node_mut(&mut self, key: NodeKey) -> DocResult<&mut Node> {
        self.tree.lookup_mut(key)
    }

    /// Variant reaction: "split/continue after this block".
    pub fn insert_new_after(
        &mut self,
        key: NodeKey,
        selection: Option<&RangeSelection>,
    ) -> DocResult<Option<NodeKey>> {
        insert_new_after(self.tree, key, selection)
    }

    /// Variant reaction: "merge this block backward into plain content".
    pub fn collapse_at_start(
        &mut self,
        key: NodeKey,
        selection: Option<&RangeSelection>,
    ) -> DocResult<bool> {
        collapse_at_start(self.tree, key, selection)
    }
}

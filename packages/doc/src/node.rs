//! # Node variants
//!
//! The document tree is a closed set of tagged variants rather than an open
//! class hierarchy: every node is one arm of [`Node`], and variant-specific
//! behavior (editing reactions, style resolution, persisted fields) is
//! exhaustive dispatch over [`NodeKind`]. Adding a variant is a compile-time
//! checklist, not a runtime override.
//!
//! Nodes own only their scalar fields. Parent/child topology lives in the
//! registry ([`DocTree`](crate::DocTree)) and is addressed by [`NodeKey`];
//! cloning a node copies a key, never a subtree.

use crate::key::NodeKey;
use crate::theme::{AttributeDict, StyleKey, Theme};
use serde::{Deserialize, Serialize};

/// Variant discriminant, constant per concrete variant.
///
/// Used for serialization dispatch and default-theme lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Paragraph,
    Heading,
    Text,
}

/// Text direction carried by element variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
    #[default]
    Unspecified,
}

/// Block-level alignment format for element variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockFormat {
    #[default]
    None,
    Left,
    Center,
    Right,
    Justify,
}

/// Character format flags for text runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CharFormat {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

/// Scalar fields shared by every container variant.
///
/// These are the base fields of the persisted payload: they are written
/// before variant-specific fields when a variant is encoded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementFields {
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub format: BlockFormat,
}

/// Heading level, fixed at construction and immutable afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingTag {
    H1,
    H2,
    H3,
    H4,
    H5,
}

impl HeadingTag {
    /// Built-in default font-size class for this level.
    pub fn default_font_size(self) -> f32 {
        match self {
            HeadingTag::H1 => 36.0,
            HeadingTag::H2 => 32.0,
            HeadingTag::H3 => 28.0,
            HeadingTag::H4 => 24.0,
            HeadingTag::H5 => 20.0,
        }
    }

    /// The theme style key owned by this level.
    pub fn style_key(self) -> StyleKey {
        match self {
            HeadingTag::H1 => StyleKey::Heading1,
            HeadingTag::H2 => StyleKey::Heading2,
            HeadingTag::H3 => StyleKey::Heading3,
            HeadingTag::H4 => StyleKey::Heading4,
            HeadingTag::H5 => StyleKey::Heading5,
        }
    }
}

/// The document's unique entry point.
///
/// Created once when a tree is initialized, registered under
/// [`NodeKey::ROOT`], and never destroyed while the document exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootNode {
    #[serde(skip)]
    key: NodeKey,
    #[serde(flatten)]
    pub element: ElementFields,
}

impl RootNode {
    /// Canonical constructor.
    pub fn new() -> Self {
        Self {
            key: NodeKey::UNSET,
            element: ElementFields::default(),
        }
    }
}

impl Default for RootNode {
    fn default() -> Self {
        Self::new()
    }
}

/// A plain content block, the node other variants collapse into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphNode {
    #[serde(skip)]
    key: NodeKey,
    #[serde(flatten)]
    pub element: ElementFields,
}

impl ParagraphNode {
    /// Canonical constructor. Structural helpers that need "a fresh plain
    /// block" call this and nothing else.
    pub fn new() -> Self {
        Self {
            key: NodeKey::UNSET,
            element: ElementFields::default(),
        }
    }
}

impl Default for ParagraphNode {
    fn default() -> Self {
        Self::new()
    }
}

/// A heading block, one of five levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingNode {
    #[serde(skip)]
    key: NodeKey,
    #[serde(flatten)]
    pub element: ElementFields,
    tag: HeadingTag,
}

impl HeadingNode {
    /// Canonical constructor.
    pub fn new(tag: HeadingTag) -> Self {
        Self {
            key: NodeKey::UNSET,
            element: ElementFields::default(),
            tag,
        }
    }

    pub fn tag(&self) -> HeadingTag {
        self.tag
    }
}

/// A leaf text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    #[serde(skip)]
    key: NodeKey,
    pub text: String,
    #[serde(default)]
    pub format: CharFormat,
}

impl TextNode {
    /// Canonical constructor.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            key: NodeKey::UNSET,
            text: text.into(),
            format: CharFormat::default(),
        }
    }
}

/// A document tree node.
///
/// The persisted payload is internally tagged: the `type` discriminator is
/// written first and decode routes on it, so an unknown or missing tag is a
/// hard decode failure. The key is deliberately not persisted: keys are
/// runtime identities, reassigned on load.
///
/// `Clone` is pure data duplication: the clone carries the *same key* and
/// the same scalar fields, signalling "a revised version of the same logical
/// node". It performs no registry side effects: children stay linked through
/// the registry against that key, and registering the revision is the
/// caller's separate step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Root(RootNode),
    Paragraph(ParagraphNode),
    Heading(HeadingNode),
    Text(TextNode),
}

impl Node {
    /// Variant discriminant.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Root(_) => NodeKind::Root,
            Node::Paragraph(_) => NodeKind::Paragraph,
            Node::Heading(_) => NodeKind::Heading,
            Node::Text(_) => NodeKind::Text,
        }
    }

    /// Runtime identity. [`NodeKey::UNSET`] until registered.
    pub fn key(&self) -> NodeKey {
        match self {
            Node::Root(n) => n.key,
            Node::Paragraph(n) => n.key,
            Node::Heading(n) => n.key,
            Node::Text(n) => n.key,
        }
    }

    pub(crate) fn set_key(&mut self, key: NodeKey) {
        match self {
            Node::Root(n) => n.key = key,
            Node::Paragraph(n) => n.key = key,
            Node::Heading(n) => n.key = key,
            Node::Text(n) => n.key = key,
        }
    }

    /// Whether this variant can own an ordered sequence of children.
    pub fn is_element(&self) -> bool {
        !matches!(self, Node::Text(_))
    }

    /// Shared container fields, if this is an element variant.
    pub fn element(&self) -> Option<&ElementFields> {
        match self {
            Node::Root(n) => Some(&n.element),
            Node::Paragraph(n) => Some(&n.element),
            Node::Heading(n) => Some(&n.element),
            Node::Text(_) => None,
        }
    }

    /// Mutable container fields, if this is an element variant.
    pub fn element_mut(&mut self) -> Option<&mut ElementFields> {
        match self {
            Node::Root(n) => Some(&mut n.element),
            Node::Paragraph(n) => Some(&mut n.element),
            Node::Heading(n) => Some(&mut n.element),
            Node::Text(_) => None,
        }
    }

    /// Text wrapped before this node's content.
    ///
    /// Permanently empty for the root: if the root carried a preamble there
    /// would be no stable selection target for the absolute start of the
    /// document. The same holds for [`Node::postamble`].
    pub fn preamble(&self) -> &str {
        match self {
            Node::Root(_) => "",
            Node::Paragraph(_) | Node::Heading(_) | Node::Text(_) => "",
        }
    }

    /// Text wrapped after this node's content. See [`Node::preamble`].
    pub fn postamble(&self) -> &str {
        match self {
            Node::Root(_) => "",
            Node::Paragraph(_) | Node::Heading(_) | Node::Text(_) => "",
        }
    }

    /// Resolve this node's rendering attributes against a theme.
    ///
    /// Pure function of the variant (and heading tag) and the supplied
    /// theme; no node or theme state is mutated.
    pub fn resolve_style_attributes(&self, theme: &Theme) -> AttributeDict {
        let style_key = match self {
            Node::Root(_) => StyleKey::Root,
            Node::Paragraph(_) => StyleKey::Paragraph,
            Node::Heading(n) => n.tag.style_key(),
            Node::Text(_) => StyleKey::Text,
        };
        theme.attributes(style_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_constant_per_variant() {
        assert_eq!(Node::Root(RootNode::new()).kind(), NodeKind::Root);
        assert_eq!(
            Node::Heading(HeadingNode::new(HeadingTag::H2)).kind(),
            NodeKind::Heading
        );
        assert_eq!(Node::Text(TextNode::new("a")).kind(), NodeKind::Text);
    }

    #[test]
    fn test_clone_reuses_key_and_fields() {
        let mut node = Node::Heading(HeadingNode::new(HeadingTag::H3));
        node.set_key(NodeKey(42));

        let cloned = node.clone();
        assert_eq!(cloned.key(), NodeKey(42));
        assert_eq!(cloned, node);

        // Distinct instance: mutating the clone leaves the original alone.
        let mut cloned = cloned;
        cloned.element_mut().unwrap().direction = Direction::Rtl;
        assert_ne!(cloned, node);
        assert_eq!(
            node.element().unwrap().direction,
            Direction::Unspecified
        );
    }

    #[test]
    fn test_root_preamble_and_postamble_are_empty() {
        let root = Node::Root(RootNode::new());
        assert_eq!(root.preamble(), "");
        assert_eq!(root.postamble(), "");
    }

    #[test]
    fn test_heading_default_font_sizes_descend_by_level() {
        let sizes: Vec<f32> = [
            HeadingTag::H1,
            HeadingTag::H2,
            HeadingTag::H3,
            HeadingTag::H4,
            HeadingTag::H5,
        ]
        .iter()
        .map(|t| t.default_font_size())
        .collect();
        assert_eq!(sizes, vec![36.0, 32.0, 28.0, 24.0, 20.0]);
    }

    #[test]
    fn test_text_is_not_an_element() {
        let text = Node::Text(TextNode::new("hello"));
        assert!(!text.is_element());
        assert!(text.element().is_none());
    }

    #[test]
    fn test_discriminator_is_written() {
        let node = Node::Heading(HeadingNode::new(HeadingTag::H4));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "heading");
        assert_eq!(value["tag"], "h4");
        // The key never reaches the payload.
        assert!(value.get("key").is_none());
    }

    #[test]
    fn test_unknown_discriminator_is_rejected() {
        let payload = serde_json::json!({ "type": "marquee" });
        let result: Result<Node, _> = serde_json::from_value(payload);
        assert!(result.is_err());
    }
}

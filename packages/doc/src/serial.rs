//! # Serialization
//!
//! Persisted form of a subtree: each record is the node's internally tagged
//! payload (`type` discriminator first, base element fields before variant
//! fields) plus a `children` array for element variants. Keys never appear
//! in payloads; decode routes on the discriminator, builds each variant
//! through its canonical constructor path, and registers it under a fresh
//! key.
//!
//! Malformed input is a hard failure of the whole decode call: no partial
//! tree is ever constructed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{DocError, DocResult};
use crate::key::NodeKey;
use crate::node::{Node, NodeKind};
use crate::tree::DocTree;

/// One node record with its nested children, as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Record {
    #[serde(flatten)]
    node: Node,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Record>,
}

/// Encode the subtree rooted at `key` into its persisted payload.
pub fn encode_subtree(tree: &DocTree, key: NodeKey) -> DocResult<Value> {
    let record = to_record(tree, key)?;
    Ok(serde_json::to_value(record)?)
}

/// Encode the whole document (the subtree under the root).
pub fn encode_document(tree: &DocTree) -> DocResult<Value> {
    encode_subtree(tree, NodeKey::ROOT)
}

fn to_record(tree: &DocTree, key: NodeKey) -> DocResult<Record> {
    let node = tree.lookup(key)?.clone();
    let mut children = Vec::new();
    if node.is_element() {
        for child in tree.children_of(key)? {
            children.push(to_record(tree, child)?);
        }
    }
    Ok(Record { node, children })
}

/// Decode a persisted payload into `tree`, returning the new subtree's key.
///
/// Non-root payloads are registered detached; linking the result into the
/// document is the caller's step. A root payload re-imports the document:
/// it is only accepted into an empty tree, where it restores the root's
/// fields and rebuilds its children in order.
pub fn decode_subtree(tree: &mut DocTree, payload: &Value) -> DocResult<NodeKey> {
    let record: Record = serde_json::from_value(payload.clone())?;

    if record.node.kind() == NodeKind::Root {
        if !tree.children_of(NodeKey::ROOT)?.is_empty() || tree.len() > 1 {
            return Err(DocError::Structural(
                "a root payload can only be decoded into an empty document".to_string(),
            ));
        }
        for child in &record.children {
            validate_record(child)?;
        }
        tree.register_with_key(NodeKey::ROOT, record.node)?;
        let children = instantiate_children(tree, record.children)?;
        tree.append(NodeKey::ROOT, &children)?;
        debug!(children = children.len(), "decoded document payload");
        return Ok(NodeKey::ROOT);
    }

    validate_record(&record)?;
    instantiate(tree, record)
}

/// Structural validation of a parsed payload, before anything is
/// registered. Decode is all-or-nothing: a bad record anywhere in the
/// subtree must not leave partial registrations behind.
fn validate_record(record: &Record) -> DocResult<()> {
    if record.node.kind() == NodeKind::Root {
        return Err(DocError::Structural(
            "root payloads cannot be nested".to_string(),
        ));
    }
    if !record.children.is_empty() && !record.node.is_element() {
        return Err(DocError::Structural(
            "leaf payload carries children".to_string(),
        ));
    }
    for child in &record.children {
        validate_record(child)?;
    }
    Ok(())
}

fn instantiate(tree: &mut DocTree, record: Record) -> DocResult<NodeKey> {
    let key = tree.register(record.node)?;
    let children = instantiate_children(tree, record.children)?;
    tree.append(key, &children)?;
    Ok(key)
}

fn instantiate_children(tree: &mut DocTree, records: Vec<Record>) -> DocResult<Vec<NodeKey>> {
    let mut keys = Vec::with_capacity(records.len());
    for record in records {
        keys.push(instantiate(tree, record)?);
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Direction, HeadingNode, HeadingTag, ParagraphNode, TextNode};

    #[test]
    fn test_round_trip_preserves_variant_fields() {
        let mut tree = DocTree::new();
        let mut heading = HeadingNode::new(HeadingTag::H4);
        heading.element.direction = Direction::Rtl;
        let h = tree.register(Node::Heading(heading)).unwrap();
        let t = tree.register(Node::Text(TextNode::new("title"))).unwrap();
        tree.append(NodeKey::ROOT, &[h]).unwrap();
        tree.append(h, &[t]).unwrap();

        let payload = encode_subtree(&tree, h).unwrap();

        let mut restored = DocTree::new();
        let new_key = decode_subtree(&mut restored, &payload).unwrap();

        // Fresh key, same variant fields.
        let node = restored.lookup(new_key).unwrap();
        match node {
            Node::Heading(n) => {
                assert_eq!(n.tag(), HeadingTag::H4);
                assert_eq!(n.element.direction, Direction::Rtl);
            }
            other => panic!("expected heading, got {:?}", other.kind()),
        }

        let children = restored.children_of(new_key).unwrap();
        assert_eq!(children.len(), 1);
        match restored.lookup(children[0]).unwrap() {
            Node::Text(n) => assert_eq!(n.text, "title"),
            other => panic!("expected text, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_round_trip_every_variant() {
        let mut tree = DocTree::new();
        let p = tree.register(Node::Paragraph(ParagraphNode::new())).unwrap();
        let h = tree
            .register(Node::Heading(HeadingNode::new(HeadingTag::H1)))
            .unwrap();
        let t = tree.register(Node::Text(TextNode::new("x"))).unwrap();
        tree.append(NodeKey::ROOT, &[p, h]).unwrap();
        tree.append(p, &[t]).unwrap();

        let payload = encode_document(&tree).unwrap();

        let mut restored = DocTree::new();
        decode_subtree(&mut restored, &payload).unwrap();

        let children = restored.children_of(NodeKey::ROOT).unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(
            restored.lookup(children[0]).unwrap().kind(),
            NodeKind::Paragraph
        );
        assert_eq!(
            restored.lookup(children[1]).unwrap().kind(),
            NodeKind::Heading
        );
    }

    #[test]
    fn test_keys_are_not_persisted() {
        let mut tree = DocTree::new();
        let p = tree.register(Node::Paragraph(ParagraphNode::new())).unwrap();
        tree.append(NodeKey::ROOT, &[p]).unwrap();

        let payload = encode_subtree(&tree, p).unwrap();
        assert!(payload.get("key").is_none());
        assert_eq!(payload["type"], "paragraph");
    }

    #[test]
    fn test_unknown_discriminator_fails_decode() {
        let mut tree = DocTree::new();
        let payload = serde_json::json!({
            "type": "blockquote",
            "children": [],
        });
        let before = tree.len();
        let err = decode_subtree(&mut tree, &payload).unwrap_err();
        assert!(matches!(err, DocError::Decode(_)));
        // No partial tree was constructed.
        assert_eq!(tree.len(), before);
    }

    #[test]
    fn test_missing_discriminator_fails_decode() {
        let mut tree = DocTree::new();
        let payload = serde_json::json!({ "tag": "h1" });
        assert!(matches!(
            decode_subtree(&mut tree, &payload),
            Err(DocError::Decode(_))
        ));
    }

    #[test]
    fn test_root_payload_only_into_empty_document() {
        let mut tree = DocTree::new();
        let p = tree.register(Node::Paragraph(ParagraphNode::new())).unwrap();
        tree.append(NodeKey::ROOT, &[p]).unwrap();
        let payload = encode_document(&tree).unwrap();

        // Same tree already has content.
        let err = decode_subtree(&mut tree, &payload).unwrap_err();
        assert!(err.is_structural());

        let mut empty = DocTree::new();
        assert_eq!(
            decode_subtree(&mut empty, &payload).unwrap(),
            NodeKey::ROOT
        );
        assert_eq!(empty.children_of(NodeKey::ROOT).unwrap().len(), 1);
    }
}

//! # Editor handle
//!
//! Owns one document's tree and theme, and runs scoped edit contexts over
//! them. An update either commits as a whole (and bumps the document
//! version) or aborts as a whole; partial topology changes never leak out
//! of a failed update.

use scribe_doc::{encode_document, AttributeDict, DocResult, DocTree, NodeKey, Theme};
use serde_json::Value;
use tracing::debug;

use crate::context::EditContext;

/// One editable document: tree, theme, and a version that increments on
/// every committed update.
#[derive(Debug)]
pub struct Editor {
    tree: DocTree,
    theme: Theme,
    version: u64,
}

impl Editor {
    /// Create an editor over a fresh document (root only) with the built-in
    /// theme defaults.
    pub fn new() -> Self {
        Self::with_theme(Theme::new())
    }

    /// Create an editor with a document-level theme override table.
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            tree: DocTree::new(),
            theme,
            version: 0,
        }
    }

    /// The committed tree state. Reads here are consistent between updates.
    pub fn tree(&self) -> &DocTree {
        &self.tree
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace the document's theme table. Node data is untouched.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Number of committed updates.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Run a scoped edit context.
    ///
    /// Mutations inside the closure apply in call order, each seeing the
    /// previous one's effects. If the closure returns `Ok` the context
    /// commits and the version increments; on `Err` every mutation from the
    /// context is rolled back and the committed state is exactly what it was
    /// before the call.
    pub fn update<T>(
        &mut self,
        f: impl FnOnce(&mut EditContext<'_>) -> DocResult<T>,
    ) -> DocResult<T> {
        let snapshot = self.tree.clone();
        let mut ctx = EditContext::new(&mut self.tree);
        match f(&mut ctx) {
            Ok(value) => {
                self.version += 1;
                debug!(version = self.version, "update committed");
                Ok(value)
            }
            Err(err) => {
                self.tree = snapshot;
                debug!(error = %err, "update aborted, state restored");
                Err(err)
            }
        }
    }

    /// Resolve a node's rendering attributes against the document theme.
    pub fn resolve_style_attributes(&self, key: NodeKey) -> DocResult<AttributeDict> {
        Ok(self.tree.lookup(key)?.resolve_style_attributes(&self.theme))
    }

    /// Persisted payload of the whole document.
    pub fn encode(&self) -> DocResult<Value> {
        encode_document(&self.tree)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_doc::{DocError, HeadingTag, NodeKind};

    #[test]
    fn test_update_commits_and_bumps_version() {
        let mut editor = Editor::new();
        assert_eq!(editor.version(), 0);

        let h = editor
            .update(|ctx| {
                let h = ctx.create_heading(HeadingTag::H1)?;
                ctx.append(NodeKey::ROOT, &[h])?;
                Ok(h)
            })
            .unwrap();

        assert_eq!(editor.version(), 1);
        assert_eq!(editor.tree().children_of(NodeKey::ROOT).unwrap(), vec![h]);
    }

    #[test]
    fn test_aborted_update_leaks_nothing() {
        let mut editor = Editor::new();
        let result: DocResult<()> = editor.update(|ctx| {
            let p = ctx.create_paragraph()?;
            ctx.append(NodeKey::ROOT, &[p])?;
            // A later failure aborts the whole context, including the
            // append above.
            ctx.remove(NodeKey::ROOT)?;
            Ok(())
        });

        assert!(matches!(result, Err(DocError::RootViolation(_))));
        assert_eq!(editor.version(), 0);
        assert!(editor.tree().children_of(NodeKey::ROOT).unwrap().is_empty());
        assert_eq!(editor.tree().len(), 1);
    }

    #[test]
    fn test_operations_apply_in_call_order() {
        let mut editor = Editor::new();
        editor
            .update(|ctx| {
                let a = ctx.create_paragraph()?;
                let b = ctx.create_paragraph()?;
                ctx.append(NodeKey::ROOT, &[a])?;
                // Sees the append above: a is attached, so b can be a sibling.
                ctx.insert_after(a, b)?;
                assert_eq!(ctx.tree().children_of(NodeKey::ROOT)?, vec![a, b]);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_scalar_mutation_through_context() {
        use scribe_doc::Direction;

        let mut editor = Editor::new();
        let p = editor
            .update(|ctx| {
                let p = ctx.create_paragraph()?;
                ctx.append(NodeKey::ROOT, &[p])?;
                if let Some(element) = ctx.node_mut(p)?.element_mut() {
                    element.direction = Direction::Rtl;
                }
                Ok(p)
            })
            .unwrap();

        let node = editor.tree().lookup(p).unwrap();
        assert_eq!(node.kind(), NodeKind::Paragraph);
        assert_eq!(node.element().unwrap().direction, Direction::Rtl);
    }
}

//! Node identity.

use std::fmt;

/// Opaque, document-unique node identifier.
///
/// Nodes reference each other only by key, never by owning pointer; the
/// registry ([`DocTree`](crate::DocTree)) maps keys to nodes and owns all
/// parent/child topology. A key is runtime-only identity: it is never part of
/// a persisted payload, and decode assigns fresh keys on load.
///
/// Keys are allocated monotonically and never reused while a node is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub(crate) u32);

impl NodeKey {
    /// The reserved key of the document root. Exactly one root exists per
    /// document and it lives under this key for the document's lifetime.
    pub const ROOT: NodeKey = NodeKey(0);

    /// Placeholder carried by nodes that have not been registered yet
    /// (fresh constructions and freshly decoded payloads).
    pub(crate) const UNSET: NodeKey = NodeKey(u32::MAX);

    /// Whether this key has been stamped by a registry.
    pub fn is_set(self) -> bool {
        self != NodeKey::UNSET
    }
}

impl Default for NodeKey {
    fn default() -> Self {
        NodeKey::UNSET
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == NodeKey::UNSET {
            write!(f, "unset")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

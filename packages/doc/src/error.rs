//! Error types for the document tree.

use crate::key::NodeKey;
use thiserror::Error;

/// Result type for tree operations
pub type DocResult<T> = Result<T, DocError>;

/// Document tree errors
///
/// Three categories surface to callers: structural-invariant violations
/// (forbidden root operations, consistency breaks), stale-key lookups, and
/// decode failures. Mutating operations are fallible by contract: they
/// return one of these instead of mutating partially.
#[derive(Error, Debug)]
pub enum DocError {
    /// Referenced key is not (or no longer) registered
    #[error("node not found: {0}")]
    NotFound(NodeKey),

    /// A forbidden operation targeted the root node
    #[error("{0} cannot be called on the root node")]
    RootViolation(&'static str),

    /// The node already has a parent and cannot be linked again
    #[error("node {0} is already attached to a parent")]
    AlreadyAttached(NodeKey),

    /// The operation requires a node that is attached to the tree
    #[error("node {0} is not attached to the document")]
    NotAttached(NodeKey),

    /// Any other parent/child consistency break
    #[error("structural invariant violation: {0}")]
    Structural(String),

    /// Malformed payload, or an unrecognized/missing discriminator
    #[error("decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl DocError {
    /// Whether this error is a structural-invariant violation (as opposed to
    /// a stale reference or a decode failure).
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            DocError::RootViolation(_)
                | DocError::AlreadyAttached(_)
                | DocError::NotAttached(_)
                | DocError::Structural(_)
        )
    }
}

//! Selection interface.
//!
//! The cursor/selection implementation lives outside this crate; editing
//! reactions consume it as an opaque range: an anchor and a focus, each a
//! node key plus an offset. The variants shipped here do not branch on it,
//! but selection-sensitive variants can.

use crate::key::NodeKey;

/// One end of a selection: a node and an offset within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub key: NodeKey,
    pub offset: usize,
}

impl Point {
    pub fn new(key: NodeKey, offset: usize) -> Self {
        Self { key, offset }
    }
}

/// An anchor/focus range over the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSelection {
    pub anchor: Point,
    pub focus: Point,
}

impl RangeSelection {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    /// Caret selection at a single point.
    pub fn collapsed(point: Point) -> Self {
        Self {
            anchor: point,
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

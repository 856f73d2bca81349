use std::fmt;
use std::time::Duration;

/// Structural operation attempted on a node link.
///
/// Carried by [`Error::EmptyNode`] so a failure names exactly which accessor
/// was called on the empty link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeOp {
    GetLeft,
    SetLeft,
    GetRight,
    SetRight,
    GetParent,
    SetParent,
    GetValue,
    SetValue,
    CompareKey,
    SetHeight,
}

impl fmt::Display for NodeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeOp::GetLeft => "get LEFT",
            NodeOp::SetLeft => "set LEFT",
            NodeOp::GetRight => "get RIGHT",
            NodeOp::SetRight => "set RIGHT",
            NodeOp::GetParent => "get PARENT",
            NodeOp::SetParent => "set PARENT",
            NodeOp::GetValue => "get VALUE",
            NodeOp::SetValue => "set VALUE",
            NodeOp::CompareKey => "compare the key",
            NodeOp::SetHeight => "set HEIGHT",
        };
        f.write_str(name)
    }
}

/// Unified error type for the tree.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Key or value rejected before the tree was touched.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Structural access through the empty link. Always an engine bug.
    #[error("unsupported operation on empty node: trying to {0}")]
    EmptyNode(NodeOp),
    /// Dangling reference or a broken tree invariant.
    #[error("corruption: {0}")]
    Corruption(String),
    /// The tree lock could not be acquired within the configured timeout.
    #[error("timed out after {0:?} waiting for the tree lock")]
    LockTimeout(Duration),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

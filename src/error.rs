use std::fmt;

use crate::node::NodeId;

/// Errors surfaced by the tree-mutation and query API.
///
/// Per §7, layout computation itself never fails: an invalid style value
/// resolves to a sentinel, it never raises. The only failure surface is
/// handing the tree a `NodeId` that does not belong to it (stale after
/// `destroy`, or from a different tree entirely).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    InvalidNodeId(NodeId),
    InvalidParentNode(NodeId),
    InvalidChildNode(NodeId),
    ChildIndexOutOfBounds { parent: NodeId, child_count: usize, index: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidNodeId(node) => write!(f, "node {node:?} is not part of this tree"),
            Error::InvalidParentNode(node) => write!(f, "parent node {node:?} is not part of this tree"),
            Error::InvalidChildNode(node) => write!(f, "child node {node:?} is not part of this tree"),
            Error::ChildIndexOutOfBounds { parent, child_count, index } => write!(
                f,
                "index {index} out of bounds for parent {parent:?} which has {child_count} children"
            ),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

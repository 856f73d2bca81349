use std::cmp::Ordering;

use super::TreeState;
use crate::error::Result;
use crate::node::NodeRef;

impl TreeState {
    /// Find the node holding `key`, or the empty link if it is absent.
    ///
    /// Walks down from the root: left while the target sorts before the
    /// current key, right while it sorts after. Never mutates anything.
    pub(super) fn find(&self, key: &[u8]) -> Result<NodeRef> {
        let mut node = self.root;
        while !node.is_empty() {
            node = match self.arena.compare_key(node, key)? {
                Ordering::Greater => self.arena.left(node)?,
                Ordering::Less => self.arena.right(node)?,
                Ordering::Equal => return Ok(node),
            };
        }
        Ok(NodeRef::EMPTY)
    }
}

use super::TreeState;
use crate::error::{Error, Result};
use crate::node::NodeRef;
use crate::types::Key;

impl TreeState {
    /// Walk the whole tree and check every structural invariant.
    pub(super) fn verify(&self) -> Result<()> {
        if !self.root.is_empty() && !self.arena.parent(self.root)?.is_empty() {
            return Err(Error::Corruption("root has a parent".into()));
        }

        let (_, count) = self.verify_subtree(self.root, None, None)?;
        if count != self.arena.len() {
            return Err(Error::Corruption(format!(
                "{} nodes reachable from root, {} allocated",
                count,
                self.arena.len()
            )));
        }
        Ok(())
    }

    /// Returns (height, node count) of the subtree at `node`.
    ///
    /// Every key must sort strictly between `lower` and `upper`, which also
    /// rules out duplicate keys.
    fn verify_subtree(
        &self,
        node: NodeRef,
        lower: Option<&Key>,
        upper: Option<&Key>,
    ) -> Result<(u32, usize)> {
        let Some(filled) = self.arena.get(node) else {
            if node.is_empty() {
                return Ok((0, 0));
            }
            return Err(Error::Corruption(format!("dangling node reference {node:?}")));
        };
        let key = filled.key();

        if lower.is_some_and(|lo| key <= lo) || upper.is_some_and(|hi| key >= hi) {
            return Err(Error::Corruption(format!(
                "key {:?} out of order",
                key.as_bytes()
            )));
        }

        let left = self.arena.left(node)?;
        let right = self.arena.right(node)?;
        for child in [left, right] {
            if !child.is_empty() && self.arena.parent(child)? != node {
                return Err(Error::Corruption(format!(
                    "child of {:?} has a stale parent link",
                    key.as_bytes()
                )));
            }
        }

        let (left_height, left_count) = self.verify_subtree(left, lower, Some(key))?;
        let (right_height, right_count) = self.verify_subtree(right, Some(key), upper)?;

        if left_height.abs_diff(right_height) > 1 {
            return Err(Error::Corruption(format!(
                "node {:?} unbalanced: left {} right {}",
                key.as_bytes(),
                left_height,
                right_height
            )));
        }

        let height = 1 + left_height.max(right_height);
        let cached = self.arena.height(node)?;
        if cached != height {
            return Err(Error::Corruption(format!(
                "node {:?} caches height {} but has height {}",
                key.as_bytes(),
                cached,
                height
            )));
        }

        Ok((height, left_count + right_count + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    #[test]
    fn empty_tree_verifies() {
        TreeState::default().verify().unwrap();
    }

    #[test]
    fn stale_height_detected() {
        let mut state = TreeState::default();
        for key in [b"a", b"b", b"c"] {
            state.insert(key, Value::new(b"v")).unwrap();
        }
        state.arena.set_height(state.root, 7).unwrap();

        assert!(matches!(state.verify(), Err(Error::Corruption(_))));
    }

    #[test]
    fn misplaced_key_detected() {
        let mut state = TreeState::default();
        for key in [b"b", b"a", b"c"] {
            state.insert(key, Value::new(b"v")).unwrap();
        }
        // swap children: "c" on the left, "a" on the right
        let left = state.arena.left(state.root).unwrap();
        let right = state.arena.right(state.root).unwrap();
        state.arena.set_left(state.root, right).unwrap();
        state.arena.set_right(state.root, left).unwrap();

        assert!(matches!(state.verify(), Err(Error::Corruption(_))));
    }

    #[test]
    fn stale_parent_detected() {
        let mut state = TreeState::default();
        for key in [b"b", b"a", b"c"] {
            state.insert(key, Value::new(b"v")).unwrap();
        }
        let left = state.arena.left(state.root).unwrap();
        state.arena.set_parent(left, NodeRef::EMPTY).unwrap();

        assert!(matches!(state.verify(), Err(Error::Corruption(_))));
    }
}

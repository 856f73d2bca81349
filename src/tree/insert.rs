use std::cmp::Ordering;

use tracing::{debug, trace};

use super::TreeState;
use crate::error::Result;
use crate::node::NodeRef;
use crate::types::{Key, Value};

impl TreeState {
    /// Insert `key`, or replace its value if already present.
    ///
    /// Algorithm:
    ///   1. Compare down from the root as in `find`
    ///   2. At the empty link, allocate a leaf whose parent is the caller
    ///   3. Each level up reinstalls the returned child and balances itself
    ///   4. Whatever comes back from the top becomes the new root
    ///
    /// An equal key swaps the value and skips steps 3-4 entirely.
    pub(super) fn insert(&mut self, key: &[u8], value: Value) -> Result<()> {
        let value_len = value.len();
        let mut replaced = None;
        let old_root = self.root;
        let new_root = self.insert_at(old_root, key, value, NodeRef::EMPTY, &mut replaced)?;

        match replaced {
            Some(old) => {
                self.size_bytes = self.size_bytes + value_len - old.len();
                trace!(key_len = key.len(), value_len, "avl.put.update");
            }
            None => {
                self.size_bytes += key.len() + value_len;
                trace!(key_len = key.len(), value_len, "avl.put.insert");
            }
        }

        if new_root != old_root {
            let height = self.arena.height(new_root)?;
            debug!(height, "avl.put.new_root");
            self.root = new_root;
        }
        Ok(())
    }

    fn insert_at(
        &mut self,
        node: NodeRef,
        key: &[u8],
        value: Value,
        parent: NodeRef,
        replaced: &mut Option<Value>,
    ) -> Result<NodeRef> {
        if node.is_empty() {
            return Ok(self.arena.alloc(Key::new(key), value, parent));
        }

        match self.arena.compare_key(node, key)? {
            Ordering::Greater => {
                let left = self.arena.left(node)?;
                let child = self.insert_at(left, key, value, node, replaced)?;
                if replaced.is_some() {
                    return Ok(node);
                }
                self.arena.set_left(node, child)?;
            }
            Ordering::Less => {
                let right = self.arena.right(node)?;
                let child = self.insert_at(right, key, value, node, replaced)?;
                if replaced.is_some() {
                    return Ok(node);
                }
                self.arena.set_right(node, child)?;
            }
            Ordering::Equal => {
                *replaced = Some(self.arena.set_value(node, value)?);
                return Ok(node);
            }
        }

        self.balance(node)
    }

    /// Recompute `node`'s height and rotate if it leans more than one level.
    ///
    /// Returns the node now at the top of this subtree.
    fn balance(&mut self, node: NodeRef) -> Result<NodeRef> {
        self.update_height(node)?;

        let factor = self.balance_factor(node)?;
        if factor > 1 {
            let right = self.arena.right(node)?;
            if self.balance_factor(right)? < 0 {
                let top = self.rotate_right(right)?;
                self.arena.set_right(node, top)?;
            }
            return self.rotate_left(node);
        }
        if factor < -1 {
            let left = self.arena.left(node)?;
            if self.balance_factor(left)? > 0 {
                let top = self.rotate_left(left)?;
                self.arena.set_left(node, top)?;
            }
            return self.rotate_right(node);
        }
        Ok(node)
    }

    /// h(right) - h(left). Positive means right-heavy.
    fn balance_factor(&self, node: NodeRef) -> Result<i64> {
        let left = self.arena.height(self.arena.left(node)?)?;
        let right = self.arena.height(self.arena.right(node)?)?;
        Ok(i64::from(right) - i64::from(left))
    }

    fn update_height(&mut self, node: NodeRef) -> Result<()> {
        let left = self.arena.height(self.arena.left(node)?)?;
        let right = self.arena.height(self.arena.right(node)?)?;
        self.arena.set_height(node, left.max(right) + 1)
    }

    /// Promote `node`'s right child.
    ///
    /// ```text
    ///     N                R
    ///    / \              / \
    ///   a   R     =>     N   c
    ///      / \          / \
    ///     b   c        a   b
    /// ```
    fn rotate_left(&mut self, node: NodeRef) -> Result<NodeRef> {
        let right = self.arena.right(node)?;
        let moved = self.arena.left(right)?;

        self.arena.set_left(right, node)?;
        self.arena.set_right(node, moved)?;

        let parent = self.arena.parent(node)?;
        self.arena.set_parent(right, parent)?;
        self.arena.set_parent(node, right)?;
        if !moved.is_empty() {
            self.arena.set_parent(moved, node)?;
        }

        // N sits below R now, so N first
        self.update_height(node)?;
        self.update_height(right)?;

        trace!("avl.rotate_left");
        Ok(right)
    }

    /// Mirror of [`rotate_left`](Self::rotate_left): promote the left child.
    fn rotate_right(&mut self, node: NodeRef) -> Result<NodeRef> {
        let left = self.arena.left(node)?;
        let moved = self.arena.right(left)?;

        self.arena.set_right(left, node)?;
        self.arena.set_left(node, moved)?;

        let parent = self.arena.parent(node)?;
        self.arena.set_parent(left, parent)?;
        self.arena.set_parent(node, left)?;
        if !moved.is_empty() {
            self.arena.set_parent(moved, node)?;
        }

        self.update_height(node)?;
        self.update_height(left)?;

        trace!("avl.rotate_right");
        Ok(left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(keys: &[&[u8]]) -> TreeState {
        let mut state = TreeState::default();
        for key in keys {
            state.insert(key, Value::new(b"v")).unwrap();
        }
        state
    }

    fn key_of(state: &TreeState, node: NodeRef) -> Vec<u8> {
        state.arena.get(node).unwrap().key().as_bytes().to_vec()
    }

    #[test]
    fn right_right_case_rotates_left() {
        let state = state_with(&[b"a", b"b", b"c"]);
        let root = state.root;

        assert_eq!(key_of(&state, root), b"b");
        assert_eq!(key_of(&state, state.arena.left(root).unwrap()), b"a");
        assert_eq!(key_of(&state, state.arena.right(root).unwrap()), b"c");
        assert_eq!(state.arena.height(root).unwrap(), 2);
        assert!(state.arena.parent(root).unwrap().is_empty());
    }

    #[test]
    fn left_left_case_rotates_right() {
        let state = state_with(&[b"c", b"b", b"a"]);
        assert_eq!(key_of(&state, state.root), b"b");
        state.verify().unwrap();
    }

    #[test]
    fn right_left_case_double_rotates() {
        let state = state_with(&[b"a", b"c", b"b"]);
        let root = state.root;

        assert_eq!(key_of(&state, root), b"b");
        assert_eq!(key_of(&state, state.arena.left(root).unwrap()), b"a");
        assert_eq!(key_of(&state, state.arena.right(root).unwrap()), b"c");
        state.verify().unwrap();
    }

    #[test]
    fn left_right_case_double_rotates() {
        let state = state_with(&[b"c", b"a", b"b"]);
        assert_eq!(key_of(&state, state.root), b"b");
        state.verify().unwrap();
    }

    #[test]
    fn moved_subtree_gets_new_parent() {
        // inserting "f" rotates left at "b"; "c" moves from under "d" to under "b"
        let state = state_with(&[b"b", b"a", b"d", b"c", b"e", b"f"]);
        let root = state.root;
        assert_eq!(key_of(&state, root), b"d");

        let b = state.arena.left(root).unwrap();
        let c = state.arena.right(b).unwrap();
        assert_eq!(key_of(&state, c), b"c");
        assert_eq!(state.arena.parent(c).unwrap(), b);
        state.verify().unwrap();
    }

    #[test]
    fn update_keeps_topology() {
        let mut state = state_with(&[b"a", b"b", b"c"]);
        let root = state.root;
        let heights: Vec<u32> = [root, state.arena.left(root).unwrap()]
            .iter()
            .map(|n| state.arena.height(*n).unwrap())
            .collect();

        state.insert(b"a", Value::new(b"longer value")).unwrap();

        assert_eq!(state.root, root);
        assert_eq!(state.arena.len(), 3);
        assert_eq!(state.arena.height(root).unwrap(), heights[0]);
        assert_eq!(
            state.arena.height(state.arena.left(root).unwrap()).unwrap(),
            heights[1]
        );
        // three one-byte keys, values "longer value", "v", "v"
        assert_eq!(state.size_bytes, 3 + 12 + 1 + 1);
    }
}

use std::cmp::Ordering;

use crate::error::{Error, NodeOp, Result};
use crate::types::{Key, Value};

/// A link to a node in the arena, or to no subtree at all.
///
/// Index `0` is the empty link. Every chain of left/right/parent links ends
/// in it. Real nodes live at `index - 1` in [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(usize);

impl NodeRef {
    pub const EMPTY: NodeRef = NodeRef(0);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for NodeRef {
    fn default() -> Self {
        NodeRef::EMPTY
    }
}

/// A filled node in the tree.
///
/// ```text
///              parent
///                │
///          ┌─────┴─────┐
///          │ key value │  height = 1 + max(h(left), h(right))
///          └──┬─────┬──┘
///           left  right
/// ```
///
/// New nodes start as leaves: both children empty, height 1.
#[derive(Debug)]
pub struct Node {
    key: Key,
    value: Value,
    left: NodeRef,
    right: NodeRef,
    parent: NodeRef,
    height: u32,
}

impl Node {
    fn new(key: Key, value: Value, parent: NodeRef) -> Self {
        Node {
            key,
            value,
            left: NodeRef::EMPTY,
            right: NodeRef::EMPTY,
            parent,
            height: 1,
        }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }
}

/// Owns every node of one tree. Links between nodes are [`NodeRef`]s.
///
/// Accessors fail with [`Error::EmptyNode`] when handed the empty link,
/// except [`height`](NodeArena::height) which reads it as 0. Nothing here
/// locks; callers must hold the tree's write lock before mutating.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    /// Number of nodes ever allocated. Nodes are never freed.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a leaf hanging off `parent`.
    pub fn alloc(&mut self, key: Key, value: Value, parent: NodeRef) -> NodeRef {
        self.nodes.push(Node::new(key, value, parent));
        NodeRef(self.nodes.len())
    }

    fn node(&self, node: NodeRef, op: NodeOp) -> Result<&Node> {
        if node.is_empty() {
            return Err(Error::EmptyNode(op));
        }
        self.slot(node)
    }

    fn slot(&self, node: NodeRef) -> Result<&Node> {
        self.nodes
            .get(node.0.wrapping_sub(1))
            .ok_or_else(|| Error::Corruption(format!("dangling node reference {}", node.0)))
    }

    fn node_mut(&mut self, node: NodeRef, op: NodeOp) -> Result<&mut Node> {
        if node.is_empty() {
            return Err(Error::EmptyNode(op));
        }
        self.nodes
            .get_mut(node.0 - 1)
            .ok_or_else(|| Error::Corruption(format!("dangling node reference {}", node.0)))
    }

    pub fn left(&self, node: NodeRef) -> Result<NodeRef> {
        Ok(self.node(node, NodeOp::GetLeft)?.left)
    }

    pub fn set_left(&mut self, node: NodeRef, left: NodeRef) -> Result<()> {
        self.node_mut(node, NodeOp::SetLeft)?.left = left;
        Ok(())
    }

    pub fn right(&self, node: NodeRef) -> Result<NodeRef> {
        Ok(self.node(node, NodeOp::GetRight)?.right)
    }

    pub fn set_right(&mut self, node: NodeRef, right: NodeRef) -> Result<()> {
        self.node_mut(node, NodeOp::SetRight)?.right = right;
        Ok(())
    }

    pub fn parent(&self, node: NodeRef) -> Result<NodeRef> {
        Ok(self.node(node, NodeOp::GetParent)?.parent)
    }

    pub fn set_parent(&mut self, node: NodeRef, parent: NodeRef) -> Result<()> {
        self.node_mut(node, NodeOp::SetParent)?.parent = parent;
        Ok(())
    }

    pub fn value(&self, node: NodeRef) -> Result<&Value> {
        Ok(&self.node(node, NodeOp::GetValue)?.value)
    }

    /// Swap in a new value, handing back the old one.
    pub fn set_value(&mut self, node: NodeRef, value: Value) -> Result<Value> {
        let slot = &mut self.node_mut(node, NodeOp::SetValue)?.value;
        Ok(std::mem::replace(slot, value))
    }

    /// Ordering of `node`'s own key against `key`.
    pub fn compare_key(&self, node: NodeRef, key: &[u8]) -> Result<Ordering> {
        Ok(self.node(node, NodeOp::CompareKey)?.key.compare(key))
    }

    /// Cached subtree height. The empty link has height 0.
    pub fn height(&self, node: NodeRef) -> Result<u32> {
        if node.is_empty() {
            return Ok(0);
        }
        Ok(self.slot(node)?.height)
    }

    pub fn set_height(&mut self, node: NodeRef, height: u32) -> Result<()> {
        self.node_mut(node, NodeOp::SetHeight)?.height = height;
        Ok(())
    }

    pub fn get(&self, node: NodeRef) -> Option<&Node> {
        if node.is_empty() {
            return None;
        }
        self.nodes.get(node.0 - 1)
    }
}

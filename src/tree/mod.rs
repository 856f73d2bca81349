mod insert;
mod search;
mod verify;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;

use crate::error::{Error, Result};
use crate::node::{NodeArena, NodeRef};
use crate::options::Options;
use crate::types::Value;

/// Everything guarded by the tree lock: the node arena and the root link.
#[derive(Debug, Default)]
struct TreeState {
    arena: NodeArena,
    root: NodeRef,
    size_bytes: usize,
}

/// Thread-safe AVL tree keyed and valued by byte sequences.
///
/// A single reader-writer lock guards the whole tree:
///   - `get` takes it shared, so lookups run side by side
///   - `put` takes it exclusive for the descent, the insert and every
///     rotation on the way back up
///
/// Readers therefore never see a half-rotated tree. Throughput is one writer
/// at a time across the whole structure.
///
/// ```
/// use avl_store::AvlTree;
///
/// let tree = AvlTree::new();
/// tree.put(b"key", b"value").unwrap();
///
/// assert_eq!(tree.get(b"key").unwrap(), Some(b"value".to_vec()));
/// assert_eq!(tree.get(b"missing").unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct AvlTree {
    state: RwLock<TreeState>,
    options: Options,
}

impl AvlTree {
    /// Create an empty tree with default options.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        AvlTree {
            state: RwLock::new(TreeState::default()),
            options,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Look up a key. Returns `None` if no stored key compares equal.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.check_key(key)?;

        let state = self.read()?;
        let found = state.find(key)?;
        trace!(key_len = key.len(), found = !found.is_empty(), "avl.get");
        if found.is_empty() {
            return Ok(None);
        }
        Ok(Some(state.arena.value(found)?.to_vec()))
    }

    /// Insert or update a key-value pair.
    ///
    /// A new key becomes a leaf and every ancestor on its path is rebalanced.
    /// An existing key only has its value replaced.
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.check_key(key)?;
        if value.len() > self.options.max_value_size {
            return Err(Error::InvalidArgument(format!(
                "value of {} bytes exceeds max_value_size {}",
                value.len(),
                self.options.max_value_size
            )));
        }

        let value = Value::new(value);
        let mut state = self.write()?;
        state.insert(key, value)
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.state.read().arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().root.is_empty()
    }

    /// Height of the whole tree. 0 when empty.
    pub fn height(&self) -> Result<u32> {
        let state = self.read()?;
        state.arena.height(state.root)
    }

    /// Approximate payload held by the tree: key bytes plus current value
    /// bytes of every entry.
    pub fn size_bytes(&self) -> usize {
        self.state.read().size_bytes
    }

    /// Check ordering, balance, cached heights and parent links of the whole
    /// tree. Returns [`Error::Corruption`] naming the first violation.
    pub fn verify(&self) -> Result<()> {
        self.read()?.verify()
    }

    fn check_key(&self, key: &[u8]) -> Result<()> {
        if key.len() > self.options.max_key_size {
            return Err(Error::InvalidArgument(format!(
                "key of {} bytes exceeds max_key_size {}",
                key.len(),
                self.options.max_key_size
            )));
        }
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, TreeState>> {
        match self.options.lock_timeout {
            Some(timeout) => self
                .state
                .try_read_for(timeout)
                .ok_or(Error::LockTimeout(timeout)),
            None => Ok(self.state.read()),
        }
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, TreeState>> {
        match self.options.lock_timeout {
            Some(timeout) => self
                .state
                .try_write_for(timeout)
                .ok_or(Error::LockTimeout(timeout)),
            None => Ok(self.state.write()),
        }
    }
}

//! # AVL key-value store
//!
//! An in-memory key-value store keyed and valued by byte sequences, backed
//! by a self-balancing binary search tree (AVL).
//!
//! ## Core idea
//! Every put walks down from the root comparing keys as unsigned bytes,
//! links a new leaf (or overwrites the value in place), then fixes heights
//! and rotates on the way back up. No subtree ever gets more than one level
//! taller than its sibling, so lookups stay O(log n).
//!
//! One reader-writer lock guards the whole tree. Many `get`s run together;
//! a `put` runs alone.
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use avl_store::AvlTree;
//!
//! let tree = Arc::new(AvlTree::new());
//! let writer = {
//!     let tree = Arc::clone(&tree);
//!     thread::spawn(move || tree.put(b"hello", b"world"))
//! };
//! writer.join().unwrap().unwrap();
//!
//! assert_eq!(tree.get(b"hello").unwrap(), Some(b"world".to_vec()));
//! ```

pub mod error;
pub mod node;
pub mod options;
pub mod tree;
pub mod types;

// Public re-exports for the top-level API
pub use error::{Error, NodeOp, Result};
pub use options::Options;
pub use tree::AvlTree;
pub use types::{Key, Value};

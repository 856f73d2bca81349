use std::time::Duration;

/// Tunables for an [`AvlTree`](crate::AvlTree).
///
/// The defaults accept keys and values of any length and block on the tree
/// lock for as long as it takes.
#[derive(Debug, Clone)]
pub struct Options {
    /// Longest key accepted by `get` and `put`.
    pub max_key_size: usize,
    /// Longest value accepted by `put`.
    pub max_value_size: usize,
    /// Upper bound on the wait for the tree lock. `None` waits forever.
    pub lock_timeout: Option<Duration>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_key_size: usize::MAX,
            max_value_size: usize::MAX,
            lock_timeout: None,
        }
    }
}

impl Options {
    pub fn with_max_key_size(mut self, max: usize) -> Self {
        self.max_key_size = max;
        self
    }

    pub fn with_max_value_size(mut self, max: usize) -> Self {
        self.max_value_size = max;
        self
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = Some(timeout);
        self
    }
}

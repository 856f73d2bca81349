use std::cmp::Ordering;

/// Raw key bytes, fixed once a node is created.
///
/// Ordering is unsigned lexicographic: bytes compare as `u8`, the first
/// differing byte decides, and a strict prefix sorts before any extension
/// of it. `0xFF` therefore sorts after `0x00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(Box<[u8]>);

impl Key {
    pub fn new(bytes: &[u8]) -> Self {
        Key(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compares this key against raw bytes.
    ///
    /// `Less` means this key sorts before `other`.
    pub fn compare(&self, other: &[u8]) -> Ordering {
        let len = self.0.len().min(other.len());
        for i in 0..len {
            match self.0[i].cmp(&other[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        self.0.len().cmp(&other.len())
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(&other.0)
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&[u8]> for Key {
    fn from(bytes: &[u8]) -> Self {
        Key::new(bytes)
    }
}

/// Raw value bytes. Replaced wholesale when a key is overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value(Box<[u8]>);

impl Value {
    pub fn new(bytes: &[u8]) -> Self {
        Value(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::new(bytes)
    }
}

//! Persistent (immutable) copy-on-write trie.
//!
//! This module provides [`PersistentTrie`], an immutable trie keyed by byte
//! sequences whose values may be of any storable type.
//!
//! # Overview
//!
//! Each `PersistentTrie` is one version of the structure: a reference to a
//! root node, or nothing for the empty trie. `put` and `remove` never touch
//! the version they are called on. They copy only the nodes on the key's
//! path and share every other subtree with the old version.
//!
//! - O(k) get, where k is the key length
//! - O(k) put, allocating exactly k + 1 nodes
//! - O(k) remove, allocating at most k + 1 nodes
//! - O(1) len and `is_empty`
//!
//! # Examples
//!
//! ```rust
//! use cowtrie::persistent::PersistentTrie;
//!
//! let t1 = PersistentTrie::new().put("a", 1u32);
//! let t2 = t1.put("ab", 2u32);
//! let t3 = t2.remove("a");
//!
//! assert_eq!(t3.get::<u32>("a"), None);
//! assert_eq!(t3.get::<u32>("ab"), Some(&2));
//!
//! // Earlier versions are unaffected
//! assert_eq!(t1.get::<u32>("a"), Some(&1));
//! assert_eq!(t2.get::<u32>("a"), Some(&1));
//! ```
//!
//! # Structural Sharing
//!
//! Inserting `"ac"` into a trie holding `"ab"` and `"x"` copies the root and
//! the `a` node; the `b` leaf and the whole `x` subtree are shared:
//!
//! ```text
//! old:  root ─ a ─ b            new:  root' ─ a' ─ b   (b shared)
//!            └ x ─ ...                      │     └ c  (new)
//!                                           └ x ─ ...  (shared)
//! ```

use std::any::{Any, type_name};
use std::fmt;

use smallvec::SmallVec;

use super::{ReferenceCounter, TrieError, TrieNode, TrieValue};

/// Key depth up to which the ancestor path stays on the stack.
const INLINE_DEPTH: usize = 16;

/// Ancestors visited while walking a key; entry `i` is the node the byte
/// `key[i]` was looked up in.
type Path<'a> = SmallVec<[&'a ReferenceCounter<TrieNode>; INLINE_DEPTH]>;

// =============================================================================
// PersistentTrie Definition
// =============================================================================

/// A persistent (immutable) trie mapping byte-sequence keys to typed values.
///
/// Values are type-erased: one trie may hold a `u32` under one key and a
/// `String` under another. Lookups name the type they expect, and a stored
/// value of a different type is reported as absent.
///
/// Values are moved into the trie and never cloned, so types without `Clone`
/// can be stored.
///
/// # Time Complexity
///
/// | Operation      | Complexity |
/// |----------------|------------|
/// | `new`          | O(1)       |
/// | `get`          | O(k)       |
/// | `put`          | O(k)       |
/// | `remove`       | O(k)       |
/// | `contains_key` | O(k)       |
/// | `len`          | O(1)       |
/// | `is_empty`     | O(1)       |
///
/// where k is the length of the key.
///
/// # Examples
///
/// ```rust
/// use cowtrie::persistent::PersistentTrie;
///
/// let trie = PersistentTrie::new()
///     .put("count", 3u64)
///     .put("name", String::from("trie"));
///
/// assert_eq!(trie.get::<u64>("count"), Some(&3));
/// assert_eq!(trie.get::<String>("name").map(String::as_str), Some("trie"));
///
/// // Wrong type behaves like a missing key
/// assert_eq!(trie.get::<u32>("count"), None);
/// ```
#[derive(Clone, Default)]
pub struct PersistentTrie {
    /// Root node, `None` for the empty trie
    root: Option<ReferenceCounter<TrieNode>>,
    /// Number of stored values
    length: usize,
}

impl PersistentTrie {
    /// Creates a new empty trie.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::PersistentTrie;
    ///
    /// let trie = PersistentTrie::new();
    /// assert!(trie.is_empty());
    /// assert!(trie.root().is_none());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    /// Creates a version rooted at `root`.
    ///
    /// The number of values is counted by walking the whole subtree.
    #[must_use]
    pub fn from_root(root: Option<ReferenceCounter<TrieNode>>) -> Self {
        let length = root.as_ref().map_or(0, |node| node.value_count());
        Self { root, length }
    }

    /// Returns the root node of this version.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> Option<&ReferenceCounter<TrieNode>> {
        self.root.as_ref()
    }

    /// Returns the number of values stored in the trie.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the trie stores no values.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns `true` if both versions share the same root node.
    ///
    /// Two empty tries are always the same version.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::PersistentTrie;
    ///
    /// let trie = PersistentTrie::new().put("a", 1u32);
    /// assert!(trie.ptr_eq(&trie.remove("missing")));
    /// assert!(!trie.ptr_eq(&trie.put("a", 1u32)));
    /// ```
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (Some(left), Some(right)) => ReferenceCounter::ptr_eq(left, right),
            (None, None) => true,
            _ => false,
        }
    }

    /// Returns the node reached by walking `key` from the root.
    ///
    /// The node may or may not carry a value.
    #[must_use]
    pub fn node(&self, key: impl AsRef<[u8]>) -> Option<&ReferenceCounter<TrieNode>> {
        key.as_ref()
            .iter()
            .try_fold(self.root.as_ref()?, |node, byte| node.child(*byte))
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// Returns `None` if no value is stored under `key`, or if the stored
    /// value is not a `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::PersistentTrie;
    ///
    /// let trie = PersistentTrie::new().put("hello", 42u32);
    ///
    /// assert_eq!(trie.get::<u32>("hello"), Some(&42));
    /// assert_eq!(trie.get::<u32>("hell"), None);
    /// assert_eq!(trie.get::<String>("hello"), None);
    /// ```
    #[must_use]
    pub fn get<T: Any>(&self, key: impl AsRef<[u8]>) -> Option<&T> {
        self.node(key)?.value::<T>()
    }

    /// Like [`get`](Self::get), but reports why nothing was found.
    ///
    /// # Errors
    ///
    /// - [`TrieError::KeyNotFound`] if no value is stored under `key`.
    /// - [`TrieError::TypeMismatch`] if the stored value is not a `T`.
    pub fn try_get<T: Any>(&self, key: impl AsRef<[u8]>) -> Result<&T, TrieError> {
        let key = key.as_ref();
        let node = self
            .node(key)
            .filter(|node| node.has_value())
            .ok_or_else(|| TrieError::KeyNotFound { key: key.to_vec() })?;
        node.value::<T>().ok_or_else(|| TrieError::TypeMismatch {
            key: key.to_vec(),
            expected: type_name::<T>(),
        })
    }

    /// Returns `true` if a value of any type is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.node(key).is_some_and(|node| node.has_value())
    }

    /// Returns a new version with `value` stored under `key`.
    ///
    /// Any value previously stored under `key`, of whatever type, is
    /// replaced in the new version. Children of the node at `key` are kept.
    ///
    /// # Complexity
    ///
    /// O(k), allocating k + 1 nodes
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::PersistentTrie;
    ///
    /// let trie1 = PersistentTrie::new().put("key", 1u32);
    /// let trie2 = trie1.put("key", 2u32);
    ///
    /// assert_eq!(trie1.get::<u32>("key"), Some(&1)); // Original unchanged
    /// assert_eq!(trie2.get::<u32>("key"), Some(&2)); // New version
    /// ```
    #[must_use]
    pub fn put<T: TrieValue>(&self, key: impl AsRef<[u8]>, value: T) -> Self {
        let key = key.as_ref();
        let (path, target) = self.walk(key);
        let replaced = target.is_some_and(|node| node.has_value());

        let children = target.map(|node| node.children().clone()).unwrap_or_default();
        let mut child = ReferenceCounter::new(TrieNode::with_value(children, value));

        // Bytes past the point where the walk ran out of nodes
        for &byte in key[path.len()..].iter().rev() {
            child = ReferenceCounter::new(TrieNode::single(byte, child));
        }

        for (depth, ancestor) in path.iter().enumerate().rev() {
            child = ReferenceCounter::new(ancestor.with_child(key[depth], child));
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            key_length = key.len(),
            depth = path.len(),
            created = key.len() + 1,
            replaced,
            "put"
        );

        Self {
            root: Some(child),
            length: if replaced { self.length } else { self.length + 1 },
        }
    }

    /// Returns a new version with the value under `key` removed.
    ///
    /// Nodes left with neither a value nor children are pruned, up to and
    /// including the root. If no value is stored under `key`, the returned
    /// version is this one (see [`ptr_eq`](Self::ptr_eq)).
    ///
    /// # Complexity
    ///
    /// O(k)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::PersistentTrie;
    ///
    /// let trie = PersistentTrie::new().put("abc", 1u32);
    /// let removed = trie.remove("abc");
    ///
    /// assert_eq!(removed.get::<u32>("abc"), None);
    /// assert!(removed.root().is_none()); // Dangling branches are pruned
    /// assert_eq!(trie.get::<u32>("abc"), Some(&1));
    /// ```
    #[must_use]
    pub fn remove(&self, key: impl AsRef<[u8]>) -> Self {
        let key = key.as_ref();
        let (path, target) = self.walk(key);
        let Some(target) = target.filter(|node| node.has_value()) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(key_length = key.len(), "remove: no value under key");
            return self.clone();
        };

        let mut replacement = target.without_value().map(ReferenceCounter::new);
        #[cfg(feature = "tracing")]
        let mut created = usize::from(replacement.is_some());
        for (depth, ancestor) in path.iter().enumerate().rev() {
            let byte = key[depth];
            replacement = match replacement {
                Some(child) => Some(ancestor.with_child(byte, child)),
                None => ancestor.without_child(byte),
            }
            .map(ReferenceCounter::new);
            #[cfg(feature = "tracing")]
            {
                created += usize::from(replacement.is_some());
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            key_length = key.len(),
            depth = path.len(),
            created,
            pruned = target.children().is_empty(),
            "remove"
        );

        Self {
            root: replacement,
            length: self.length - 1,
        }
    }

    /// Walks `key` from the root, recording each node a byte was looked up
    /// in. Stops at the first missing edge.
    ///
    /// The second element is the node at the full depth of `key`, if the
    /// walk got that far.
    fn walk<'a>(&'a self, key: &[u8]) -> (Path<'a>, Option<&'a ReferenceCounter<TrieNode>>) {
        let mut path = Path::new();
        let mut current = self.root.as_ref();
        for &byte in key {
            let Some(node) = current else { break };
            path.push(node);
            current = node.child(byte);
        }
        (path, current)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K: AsRef<[u8]>, T: TrieValue> FromIterator<(K, T)> for PersistentTrie {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |trie, (key, value)| trie.put(key, value))
    }
}

/// Formats the whole node graph; see the note on `TrieNode`'s `Debug`
/// about very deep keys.
impl fmt::Debug for PersistentTrie {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PersistentTrie")
            .field("len", &self.length)
            .field("root", &self.root)
            .finish()
    }
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentTrie: Send, Sync);

// =============================================================================
// Tests
// =============================================================================

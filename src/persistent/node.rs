//! Immutable nodes of the persistent trie.
//!
//! A [`TrieNode`] holds a byte-labelled mapping to its children and,
//! optionally, one type-erased value. Nodes are never mutated once built;
//! every change produces a fresh node that shares the untouched children
//! of the node it was derived from.
//!
//! A node with neither children nor a value cannot be constructed: the
//! constructors that could produce one return `Option` instead.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use super::{ErasedValue, ReferenceCounter, TrieValue};

/// Children of a node, keyed by edge byte in ascending order.
pub type Children = BTreeMap<u8, ReferenceCounter<TrieNode>>;

// =============================================================================
// Node Definition
// =============================================================================

/// A node of a [`PersistentTrie`](super::PersistentTrie).
///
/// A node is a *value node* iff it carries a value; otherwise it is a plain
/// branch node and has at least one child.
///
/// `Clone` is a shallow structural copy: the clone gets the same child
/// references and the same value reference, but nothing below the node is
/// copied. This is the primitive path-copying is built on.
///
/// # Examples
///
/// ```rust
/// use cowtrie::persistent::{Children, TrieNode};
///
/// assert!(TrieNode::branch(Children::new()).is_none());
///
/// let leaf = TrieNode::with_value(Children::new(), 7u32);
/// assert!(leaf.has_value());
/// assert_eq!(leaf.value::<u32>(), Some(&7));
/// assert_eq!(leaf.value::<u64>(), None);
/// ```
#[derive(Clone)]
pub struct TrieNode {
    children: Children,
    value: Option<ReferenceCounter<ErasedValue>>,
}

impl TrieNode {
    /// Creates a branch node without a value.
    ///
    /// Returns `None` when `children` is empty, since such a node would
    /// hold nothing.
    #[must_use]
    pub fn branch(children: Children) -> Option<Self> {
        if children.is_empty() {
            None
        } else {
            Some(Self {
                children,
                value: None,
            })
        }
    }

    /// Creates a value node, moving `value` into a new shared allocation.
    #[must_use]
    pub fn with_value<T: TrieValue>(children: Children, value: T) -> Self {
        let value: ReferenceCounter<ErasedValue> = ReferenceCounter::new(value);
        Self {
            children,
            value: Some(value),
        }
    }

    /// Branch node with exactly one edge.
    pub(crate) fn single(byte: u8, child: ReferenceCounter<Self>) -> Self {
        Self {
            children: BTreeMap::from([(byte, child)]),
            value: None,
        }
    }

    /// Returns `true` if this node carries a value.
    #[inline]
    #[must_use]
    pub const fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Returns the stored value if there is one and it is a `T`.
    ///
    /// A value of any other type yields `None`, exactly like a missing one.
    #[must_use]
    pub fn value<T: Any>(&self) -> Option<&T> {
        self.value.as_deref()?.downcast_ref::<T>()
    }

    /// Read-only view of the children, in ascending byte order.
    #[inline]
    #[must_use]
    pub const fn children(&self) -> &Children {
        &self.children
    }

    /// Returns the child reached through the edge `byte`.
    #[inline]
    #[must_use]
    pub fn child(&self, byte: u8) -> Option<&ReferenceCounter<Self>> {
        self.children.get(&byte)
    }

    /// Number of values stored in the subtree rooted at this node.
    #[must_use]
    pub fn value_count(&self) -> usize {
        let mut pending = vec![self];
        let mut count = 0;
        while let Some(node) = pending.pop() {
            count += usize::from(node.has_value());
            pending.extend(node.children.values().map(|child| &**child));
        }
        count
    }

    /// Shallow copy with the edge `byte` pointing at `child`.
    pub(crate) fn with_child(&self, byte: u8, child: ReferenceCounter<Self>) -> Self {
        let mut copy = self.clone();
        copy.children.insert(byte, child);
        copy
    }

    /// Shallow copy with the edge `byte` removed.
    ///
    /// `None` if the copy would be left with no children and no value.
    pub(crate) fn without_child(&self, byte: u8) -> Option<Self> {
        let mut copy = self.clone();
        copy.children.remove(&byte);
        if copy.children.is_empty() && !copy.has_value() {
            None
        } else {
            Some(copy)
        }
    }

    /// Branch node carrying the same children with the value dropped.
    pub(crate) fn without_value(&self) -> Option<Self> {
        Self::branch(self.children.clone())
    }
}

/// Stand-in for a type-erased payload in debug output.
struct OpaqueValue;

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("<value>")
    }
}

/// Formats the whole subtree.
///
/// Nesting follows the node depth, so formatting a node with very long keys
/// below it can exhaust the stack.
impl fmt::Debug for TrieNode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TrieNode")
            .field("value", &self.value.as_ref().map(|_| OpaqueValue))
            .field("children", &self.children)
            .finish()
    }
}

/// Releases the subtree with an explicit worklist instead of recursing
/// once per level.
impl Drop for TrieNode {
    fn drop(&mut self) {
        if self.children.is_empty() {
            return;
        }
        let mut pending: Vec<ReferenceCounter<Self>> =
            std::mem::take(&mut self.children).into_values().collect();
        while let Some(child) = pending.pop() {
            // Shared children only lose one count here
            if let Some(mut child) = ReferenceCounter::into_inner(child) {
                pending.extend(std::mem::take(&mut child.children).into_values());
            }
        }
    }
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(TrieNode: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(TrieNode: Send, Sync);

// =============================================================================
// Tests
// =============================================================================

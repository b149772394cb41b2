//! Persistent (immutable) trie.
//!
//! This module provides [`PersistentTrie`], a copy-on-write prefix tree
//! mapping byte-sequence keys to values of any storable type:
//!
//! - [`PersistentTrie`]: one immutable version of the trie
//! - [`TrieNode`]: the shared, never-mutated nodes versions are built from
//! - [`TrieError`]: why a typed lookup came back empty
//!
//! # Structural Sharing
//!
//! `put` and `remove` return a new version and leave the old one intact.
//! Only the nodes on the path from the root to the changed key are copied;
//! every other subtree is shared between the two versions.
//!
//! # Examples
//!
//! ```rust
//! use cowtrie::persistent::PersistentTrie;
//!
//! let trie = PersistentTrie::new()
//!     .put("one", 1u32)
//!     .put("two", String::from("2"));
//!
//! assert_eq!(trie.get::<u32>("one"), Some(&1));
//! assert_eq!(trie.get::<String>("two").map(String::as_str), Some("2"));
//!
//! // Structural sharing: the original trie is preserved
//! let updated = trie.put("one", 100u32);
//! assert_eq!(trie.get::<u32>("one"), Some(&1));
//! assert_eq!(updated.get::<u32>("one"), Some(&100));
//! ```

use std::any::Any;

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled (default), this is `std::sync::Arc`,
/// and versions can be shared and released across threads.
///
/// When the `arc` feature is disabled, this is `std::rc::Rc`,
/// which is faster but confines every version to one thread.
#[cfg(feature = "arc")]
pub type ReferenceCounter<T> = std::sync::Arc<T>;

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled (default), this is `std::sync::Arc`,
/// and versions can be shared and released across threads.
///
/// When the `arc` feature is disabled, this is `std::rc::Rc`,
/// which is faster but confines every version to one thread.
#[cfg(not(feature = "arc"))]
pub type ReferenceCounter<T> = std::rc::Rc<T>;

// =============================================================================
// Storable Values
// =============================================================================

/// Types that can be stored in a [`PersistentTrie`].
///
/// Implemented for every `'static` type that is `Send + Sync` (with the
/// `arc` feature) or for every `'static` type (without it).
#[cfg(feature = "arc")]
pub trait TrieValue: Any + Send + Sync {}

#[cfg(feature = "arc")]
impl<T: Any + Send + Sync> TrieValue for T {}

/// Types that can be stored in a [`PersistentTrie`].
///
/// Implemented for every `'static` type that is `Send + Sync` (with the
/// `arc` feature) or for every `'static` type (without it).
#[cfg(not(feature = "arc"))]
pub trait TrieValue: Any {}

#[cfg(not(feature = "arc"))]
impl<T: Any> TrieValue for T {}

/// Type-erased payload held by value nodes.
#[cfg(feature = "arc")]
pub(crate) type ErasedValue = dyn Any + Send + Sync;

#[cfg(not(feature = "arc"))]
pub(crate) type ErasedValue = dyn Any;

mod error;
mod node;
mod trie;

pub use error::TrieError;
pub use node::Children;
pub use node::TrieNode;
pub use trie::PersistentTrie;

// =============================================================================
// Tests
// =============================================================================

//! # cowtrie
//!
//! A persistent, copy-on-write trie mapping byte-sequence keys to values of
//! arbitrary type.
//!
//! ## Overview
//!
//! Every update returns a new version of the trie and leaves all earlier
//! versions valid and unchanged. Versions share every subtree the update did
//! not touch, so an update costs O(key length) time and allocations
//! regardless of how large the trie is.
//!
//! ## Feature Flags
//!
//! - `arc` (default): share nodes through `Arc`, making versions `Send + Sync`
//! - `tracing` (default): emit `tracing` events from `put` and `remove`
//!
//! ## Example
//!
//! ```rust
//! use cowtrie::prelude::*;
//!
//! let t0 = PersistentTrie::new();
//! let t1 = t0.put("a", 1u32);
//! let t2 = t1.put("ab", 2u32);
//! let t3 = t2.remove("a");
//!
//! assert_eq!(t3.get::<u32>("a"), None);
//! assert_eq!(t3.get::<u32>("ab"), Some(&2));
//! assert_eq!(t1.get::<u32>("a"), Some(&1));
//! assert_eq!(t2.get::<u32>("a"), Some(&1));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use cowtrie::prelude::*;
/// ```
pub mod prelude {
    pub use crate::persistent::*;
}

pub mod persistent;

//! Error types for trie lookups.
//!
//! [`PersistentTrie::get`](super::PersistentTrie::get) folds every failure
//! into `None`. [`PersistentTrie::try_get`](super::PersistentTrie::try_get)
//! reports which of the two causes applied.

use std::fmt;

/// Represents why a typed lookup found no value.
///
/// # Examples
///
/// ```rust
/// use cowtrie::persistent::{PersistentTrie, TrieError};
///
/// let trie = PersistentTrie::new().put("answer", 42u32);
///
/// assert_eq!(
///     trie.try_get::<u32>("question"),
///     Err(TrieError::KeyNotFound { key: b"question".to_vec() })
/// );
/// assert!(matches!(
///     trie.try_get::<String>("answer"),
///     Err(TrieError::TypeMismatch { .. })
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    /// No value is stored under the key.
    KeyNotFound {
        /// The key that was looked up.
        key: Vec<u8>,
    },
    /// A value is stored under the key, but it is not of the requested type.
    TypeMismatch {
        /// The key that was looked up.
        key: Vec<u8>,
        /// Name of the requested type.
        expected: &'static str,
    },
}

impl TrieError {
    /// The key the failed lookup was made with.
    #[must_use]
    pub fn key(&self) -> &[u8] {
        match self {
            Self::KeyNotFound { key } | Self::TypeMismatch { key, .. } => key,
        }
    }
}

impl fmt::Display for TrieError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyNotFound { key } => {
                write!(formatter, "key \"{}\" not found", key.escape_ascii())
            }
            Self::TypeMismatch { key, expected } => write!(
                formatter,
                "value at key \"{}\" is not of type {expected}",
                key.escape_ascii()
            ),
        }
    }
}

impl std::error::Error for TrieError {}

//! # Common Types and Traits
use core::{
    fmt::{Debug, Display},
    hash::Hash,
};

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};

use crate::errors::{WSResult, WordstreamError};

/// A type that can be used as a word id.
///
/// These are constrained to be unsigned primitive integers;
/// such that the largest id in a vocabulary is less than `T::max()`.
pub trait TokenType:
    'static
    + PrimInt
    + FromPrimitive
    + ToPrimitive
    + Unsigned
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
{
}

impl<T> TokenType for T where
    T: 'static
        + PrimInt
        + FromPrimitive
        + ToPrimitive
        + Unsigned
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
{
}

/// Convert a dense vocabulary index into a token.
///
/// ## Returns
/// `Err(VocabSizeOverflow)` if `index` does not fit in `T`.
pub fn token_from_index<T: TokenType>(index: usize) -> WSResult<T> {
    T::from_usize(index).ok_or(WordstreamError::VocabSizeOverflow { size: index + 1 })
}

/// Convert a token into a dense vocabulary index.
///
/// ## Returns
/// `Err(TokenOutOfRange)` if `token` does not fit in `usize`.
pub fn token_to_index<T: TokenType>(token: T) -> WSResult<usize> {
    token.to_usize().ok_or(WordstreamError::TokenOutOfRange)
}

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type WSHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> WSHashMap<K, V> {
            WSHashMap::new()
        }
    } else if #[cfg(feature = "foldhash")] {
        /// Type Alias for hash maps in this crate.
        pub type WSHashMap<K, V> = foldhash::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> WSHashMap<K, V> {
            foldhash::HashMapExt::new()
        }
    } else {
        /// Type Alias for hash maps in this crate.
        pub type WSHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> WSHashMap<K, V> {
            WSHashMap::new()
        }
    }
}

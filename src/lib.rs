//! An ordered key-value dictionary implemented with an AVL tree.
//!
//! Besides [`BalancedDictionary`], the crate ships two linear containers:
//! [`Sequence`], a singly linked list with unique keys supporting slicing and merging,
//! and [`Ring`], a circular doubly linked list with a sentinel node.
//!
//! Recovered no-ops (duplicate inserts, removal of absent keys) and rebalancing rotations
//! are reported through the [`log`](https://docs.rs/log) facade; install any logger to see them.

pub mod dictionary;
pub mod error;
pub mod ring;
pub mod sequence;

pub use dictionary::BalancedDictionary;
pub use error::{Error, Result};
pub use ring::Ring;
pub use sequence::Sequence;

use thiserror::Error;

/// Errors reported by the strict (`try_*`) variants of the container operations.
///
/// The lenient operations recover from the same conditions locally and never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("key is already present")]
    DuplicateKey,

    #[error("key is not present")]
    KeyNotFound,

    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

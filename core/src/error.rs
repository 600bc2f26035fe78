use thiserror::Error;

/// Lifecycle misuse of an [`InvertedIndex`](crate::InvertedIndex).
///
/// Unknown terms and documents are never errors; they read as empty results.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    #[error("index has already been built; create a new index to rebuild")]
    AlreadyBuilt,

    #[error("index has not been built yet")]
    NotBuilt,
}

pub type Result<T> = std::result::Result<T, IndexError>;

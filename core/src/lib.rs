//! In-memory keyword search over a corpus of plain-text documents.
//!
//! Build an [`InvertedIndex`] once from a [`Documents`] map, then query it
//! through a [`SearchEngine`] or, for snippets and rendered output, a
//! [`ResultRetriever`].

pub mod error;
pub mod index;
pub mod loader;
pub mod retrieval;
pub mod search;
pub mod snippet;
pub mod stats;
pub mod tokenizer;

use std::collections::BTreeMap;

/// Document id (conventionally a file name) → raw text.
pub type Documents = BTreeMap<String, String>;

pub use error::IndexError;
pub use index::{InvertedIndex, Posting};
pub use retrieval::{highlight_all_terms, ResultRetriever};
pub use search::{SearchEngine, SearchResult};
pub use snippet::{Segment, Snippet};
pub use stats::Statistics;

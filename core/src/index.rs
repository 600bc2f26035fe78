use crate::error::{IndexError, Result};
use crate::tokenizer::tokenize;
use crate::Documents;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One document's occurrences of a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: String,
    /// Zero-based token positions, ascending.
    pub positions: Vec<usize>,
}

/// Term → postings, plus per-document lengths and term frequencies.
///
/// Created empty and populated by a single [`build`](InvertedIndex::build);
/// read-only afterwards.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    index: HashMap<String, Vec<Posting>>,
    document_lengths: HashMap<String, u32>,
    term_frequencies: HashMap<String, HashMap<String, u32>>,
    built: bool,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index every document of the corpus.
    ///
    /// Fails with [`IndexError::AlreadyBuilt`] on a second call; the existing
    /// state is left as it was.
    pub fn build(&mut self, documents: &Documents) -> Result<()> {
        if self.built {
            return Err(IndexError::AlreadyBuilt);
        }

        for (doc_id, text) in documents {
            let tokens = tokenize(text);
            self.document_lengths.insert(doc_id.clone(), tokens.len() as u32);

            // Vec keeps first-seen term order so postings are appended deterministically.
            let mut slots: HashMap<&str, usize> = HashMap::new();
            let mut positions: Vec<(&str, Vec<usize>)> = Vec::new();
            for (pos, token) in tokens.iter().enumerate() {
                let slot = *slots.entry(token.as_str()).or_insert_with(|| {
                    positions.push((token.as_str(), Vec::new()));
                    positions.len() - 1
                });
                positions[slot].1.push(pos);
            }

            let freqs = self.term_frequencies.entry(doc_id.clone()).or_default();
            for (term, term_positions) in positions {
                freqs.insert(term.to_string(), term_positions.len() as u32);
                self.index
                    .entry(term.to_string())
                    .or_default()
                    .push(Posting { doc_id: doc_id.clone(), positions: term_positions });
            }
        }

        self.built = true;
        tracing::info!(
            num_docs = self.document_lengths.len(),
            num_terms = self.index.len(),
            "inverted index built"
        );
        Ok(())
    }

    pub fn is_built(&self) -> bool { self.built }

    /// Postings for `term` (lowercased first); empty when the term is unknown.
    pub fn documents_for_term(&self, term: &str) -> &[Posting] {
        self.index
            .get(&term.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Occurrences of `term` in `doc_id`, 0 when either is unknown.
    pub fn term_frequency(&self, term: &str, doc_id: &str) -> u32 {
        self.term_frequencies
            .get(doc_id)
            .and_then(|freqs| freqs.get(&term.to_lowercase()))
            .copied()
            .unwrap_or(0)
    }

    /// Token count of `doc_id`, 0 when unknown.
    pub fn document_length(&self, doc_id: &str) -> u32 {
        self.document_lengths.get(doc_id).copied().unwrap_or(0)
    }

    pub fn document_count(&self) -> usize { self.document_lengths.len() }

    pub fn vocabulary_size(&self) -> usize { self.index.len() }

    pub fn total_tokens(&self) -> u64 {
        self.document_lengths.values().map(|&n| n as u64).sum()
    }

    /// Per-term counts for one document, if it was indexed.
    pub fn document_terms(&self, doc_id: &str) -> Option<&HashMap<String, u32>> {
        self.term_frequencies.get(doc_id)
    }

    /// Every indexed term with its postings, in no particular order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &[Posting])> + '_ {
        self.index.iter().map(|(t, p)| (t.as_str(), p.as_slice()))
    }
}

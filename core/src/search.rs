use crate::error::{IndexError, Result};
use crate::index::{InvertedIndex, Posting};
use crate::tokenizer::normalize;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// A ranked hit: document id and summed term frequency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub doc_id: String,
    pub score: f32,
}

/// Split a query into terms with the same word normalization used for documents.
pub fn query_terms(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(normalize)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Boolean matching and frequency scoring over a built index.
#[derive(Clone, Copy)]
pub struct SearchEngine<'a> {
    index: &'a InvertedIndex,
}

impl<'a> SearchEngine<'a> {
    pub fn new(index: &'a InvertedIndex) -> Result<Self> {
        if !index.is_built() {
            return Err(IndexError::NotBuilt);
        }
        Ok(Self { index })
    }

    pub fn search_single_term(&self, term: &str) -> &'a [Posting] {
        self.index.documents_for_term(term)
    }

    fn doc_set(&self, term: &str) -> BTreeSet<&'a str> {
        self.index
            .documents_for_term(term)
            .iter()
            .map(|p| p.doc_id.as_str())
            .collect()
    }

    /// Documents containing every term (AND). No terms means no documents.
    pub fn search_all_terms<S: AsRef<str>>(&self, terms: &[S]) -> BTreeSet<&'a str> {
        let Some((first, rest)) = terms.split_first() else {
            return BTreeSet::new();
        };
        let mut docs = self.doc_set(first.as_ref());
        for term in rest {
            if docs.is_empty() {
                break;
            }
            let other = self.doc_set(term.as_ref());
            docs.retain(|d| other.contains(d));
        }
        docs
    }

    /// Documents containing at least one term (OR).
    pub fn search_any_term<S: AsRef<str>>(&self, terms: &[S]) -> BTreeSet<&'a str> {
        terms.iter().flat_map(|t| self.doc_set(t.as_ref())).collect()
    }

    /// Score each document as the sum of its frequencies for the query terms.
    pub fn score_documents<S: AsRef<str>>(
        &self,
        terms: &[S],
        doc_ids: &BTreeSet<&'a str>,
    ) -> BTreeMap<&'a str, f32> {
        doc_ids
            .iter()
            .map(|&doc| {
                let score: u32 = terms
                    .iter()
                    .map(|t| self.index.term_frequency(t.as_ref(), doc))
                    .sum();
                (doc, score as f32)
            })
            .collect()
    }

    /// Rank documents for a free-text query, best first; ties go to the smaller id.
    pub fn search(&self, query: &str, use_all_terms: bool) -> Vec<SearchResult> {
        let terms = query_terms(query);
        let candidates = if use_all_terms {
            self.search_all_terms(&terms)
        } else {
            self.search_any_term(&terms)
        };

        let mut ranked: Vec<SearchResult> = self
            .score_documents(&terms, &candidates)
            .into_iter()
            .map(|(doc_id, score)| SearchResult { doc_id: doc_id.to_string(), score })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.doc_id.cmp(&b.doc_id))
        });
        tracing::debug!(query, use_all_terms, hits = ranked.len(), "search");
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Documents;

    fn built(docs: &[(&str, &str)]) -> InvertedIndex {
        let docs: Documents = docs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut idx = InvertedIndex::new();
        idx.build(&docs).unwrap();
        idx
    }

    #[test]
    fn unbuilt_index_is_rejected() {
        let idx = InvertedIndex::new();
        assert!(matches!(SearchEngine::new(&idx), Err(IndexError::NotBuilt)));
    }

    #[test]
    fn single_term_lookup_returns_positions() {
        let idx = built(&[("n.txt", "I love old New York, new york!"), ("o.txt", "nothing")]);
        let engine = SearchEngine::new(&idx).unwrap();
        let postings = engine.search_single_term("YORK");
        assert_eq!(postings, [Posting { doc_id: "n.txt".to_string(), positions: vec![4, 6] }]);
        assert!(engine.search_single_term("boston").is_empty());
    }

    #[test]
    fn empty_term_lists_match_nothing() {
        let idx = built(&[("a", "x y"), ("b", "y z")]);
        let engine = SearchEngine::new(&idx).unwrap();
        let none: [&str; 0] = [];
        assert!(engine.search_all_terms(&none).is_empty());
        assert!(engine.search_any_term(&none).is_empty());
        assert!(engine.search("   ", false).is_empty());
    }

    #[test]
    fn and_is_subset_of_or() {
        let idx = built(&[("a", "x y"), ("b", "y z"), ("c", "x z y")]);
        let engine = SearchEngine::new(&idx).unwrap();
        let terms = ["x", "y"];
        let all = engine.search_all_terms(&terms);
        let any = engine.search_any_term(&terms);
        assert_eq!(all, BTreeSet::from(["a", "c"]));
        assert_eq!(any, BTreeSet::from(["a", "b", "c"]));
        assert!(all.is_subset(&any));
    }

    #[test]
    fn and_short_circuits_on_unknown_term() {
        let idx = built(&[("a", "x y")]);
        let engine = SearchEngine::new(&idx).unwrap();
        assert!(engine.search_all_terms(&["nope", "x"]).is_empty());
    }

    #[test]
    fn scores_sum_raw_frequencies() {
        let idx = built(&[("a", "rust rust go"), ("b", "go go go rust")]);
        let engine = SearchEngine::new(&idx).unwrap();
        let docs = engine.search_any_term(&["rust", "go"]);
        let scores = engine.score_documents(&["rust", "go"], &docs);
        assert_eq!(scores["a"], 3.0);
        assert_eq!(scores["b"], 4.0);
    }

    #[test]
    fn ties_break_on_document_id() {
        let idx = built(&[("zeta", "apple"), ("alpha", "apple"), ("mid", "apple apple")]);
        let engine = SearchEngine::new(&idx).unwrap();
        let ids: Vec<String> = engine.search("apple", true).into_iter().map(|r| r.doc_id).collect();
        assert_eq!(ids, vec!["mid", "alpha", "zeta"]);
    }

    #[test]
    fn query_terms_are_normalized_like_documents() {
        assert_eq!(query_terms("Cat, DOG! --"), vec!["cat", "dog"]);
    }
}

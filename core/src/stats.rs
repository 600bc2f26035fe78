use crate::index::InvertedIndex;
use crate::Documents;
use serde::Serialize;
use std::collections::HashMap;

/// Corpus-wide figures shown after loading and by the `stats` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusSummary {
    pub documents: usize,
    pub unique_words: usize,
    pub total_words: u64,
    pub average_words: Option<f64>,
}

pub struct Statistics<'a> {
    index: &'a InvertedIndex,
    documents: &'a Documents,
}

impl<'a> Statistics<'a> {
    pub fn new(index: &'a InvertedIndex, documents: &'a Documents) -> Self {
        Self { index, documents }
    }

    pub fn document_count(&self) -> usize { self.documents.len() }

    pub fn unique_word_count(&self) -> usize { self.index.vocabulary_size() }

    pub fn total_word_count(&self) -> u64 { self.index.total_tokens() }

    pub fn summary(&self) -> CorpusSummary {
        let documents = self.document_count();
        let total_words = self.total_word_count();
        CorpusSummary {
            documents,
            unique_words: self.unique_word_count(),
            total_words,
            average_words: (documents > 0).then(|| total_words as f64 / documents as f64),
        }
    }

    /// Most frequent terms across the corpus; equal counts are ordered by term.
    pub fn most_frequent_words(&self, limit: usize) -> Vec<(&'a str, u64)> {
        let mut totals: HashMap<&'a str, u64> = HashMap::new();
        for (term, postings) in self.index.terms() {
            let count: u64 = postings.iter().map(|p| p.positions.len() as u64).sum();
            *totals.entry(term).or_insert(0) += count;
        }
        top(totals.into_iter().collect(), limit)
    }

    /// Most frequent terms of one document; empty for unknown ids.
    pub fn document_most_frequent_words(&self, doc_id: &str, limit: usize) -> Vec<(&'a str, u64)> {
        let Some(freqs) = self.index.document_terms(doc_id) else {
            return Vec::new();
        };
        top(freqs.iter().map(|(t, &n)| (t.as_str(), n as u64)).collect(), limit)
    }

    pub fn display_general_stats(&self) -> String {
        let summary = self.summary();
        let mut out = String::from("Document collection statistics:\n");
        out.push_str(&format!("  Documents: {}\n", summary.documents));
        out.push_str(&format!("  Unique words: {}\n", summary.unique_words));
        out.push_str(&format!("  Total words: {}\n", summary.total_words));
        if let Some(avg) = summary.average_words {
            out.push_str(&format!("  Average words per document: {avg:.2}\n"));
        }
        out
    }

    pub fn display_most_frequent_words(&self, limit: usize) -> String {
        let mut out = String::from("Most frequent words (all documents):\n");
        for (rank, (word, freq)) in self.most_frequent_words(limit).into_iter().enumerate() {
            out.push_str(&format!("  {}. '{word}' - {freq} occurrences\n", rank + 1));
        }
        out
    }

    pub fn display_document_stats(&self, doc_id: &str) -> String {
        if !self.documents.contains_key(doc_id) {
            return format!("Document '{doc_id}' not found.");
        }
        let mut out = format!("Statistics for document '{doc_id}':\n");
        out.push_str(&format!("  Words: {}\n", self.index.document_length(doc_id)));
        out.push_str("  Most frequent words:\n");
        for (rank, (word, freq)) in self.document_most_frequent_words(doc_id, 5).into_iter().enumerate() {
            out.push_str(&format!("    {}. '{word}' - {freq} occurrences\n", rank + 1));
        }
        out
    }
}

fn top(mut counts: Vec<(&str, u64)>, limit: usize) -> Vec<(&str, u64)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (InvertedIndex, Documents) {
        let docs = Documents::from([
            ("a.txt".to_string(), "The cat sat on the mat.".to_string()),
            ("b.txt".to_string(), "The dog sat.".to_string()),
        ]);
        let mut idx = InvertedIndex::new();
        idx.build(&docs).unwrap();
        (idx, docs)
    }

    #[test]
    fn counts_words() {
        let (idx, docs) = fixture();
        let stats = Statistics::new(&idx, &docs);
        assert_eq!(stats.document_count(), 2);
        assert_eq!(stats.unique_word_count(), 6);
        assert_eq!(stats.total_word_count(), 9);
        assert_eq!(stats.summary().average_words, Some(4.5));
    }

    #[test]
    fn frequent_words_break_ties_by_term() {
        let (idx, docs) = fixture();
        let stats = Statistics::new(&idx, &docs);
        assert_eq!(stats.most_frequent_words(3), vec![("the", 3), ("sat", 2), ("cat", 1)]);
        assert_eq!(stats.document_most_frequent_words("b.txt", 10), vec![("dog", 1), ("sat", 1), ("the", 1)]);
        assert!(stats.document_most_frequent_words("zzz", 10).is_empty());
    }

    #[test]
    fn renders_general_and_document_stats() {
        let (idx, docs) = fixture();
        let stats = Statistics::new(&idx, &docs);
        let general = stats.display_general_stats();
        assert!(general.contains("  Documents: 2\n"));
        assert!(general.contains("  Average words per document: 4.50\n"));
        let doc = stats.display_document_stats("a.txt");
        assert!(doc.starts_with("Statistics for document 'a.txt':\n  Words: 6\n"));
        assert!(doc.contains("    1. 'the' - 2 occurrences\n"));
        assert_eq!(stats.display_document_stats("nope"), "Document 'nope' not found.");
    }

    #[test]
    fn empty_corpus_has_no_average() {
        let docs = Documents::new();
        let mut idx = InvertedIndex::new();
        idx.build(&docs).unwrap();
        let stats = Statistics::new(&idx, &docs);
        assert!(!stats.display_general_stats().contains("Average"));
    }
}

use crate::error::Result;
use crate::index::InvertedIndex;
use crate::search::{query_terms, SearchEngine, SearchResult};
use crate::snippet::{Segment, Snippet};
use crate::tokenizer::{normalize, raw_words};
use crate::Documents;
use std::collections::HashSet;

/// Words of context kept on each side of a hit.
pub const DEFAULT_CONTEXT_SIZE: usize = 5;

/// Ranked search plus snippets and text rendering for a built index.
pub struct ResultRetriever<'a> {
    documents: &'a Documents,
    engine: SearchEngine<'a>,
    context_size: usize,
}

impl<'a> ResultRetriever<'a> {
    pub fn new(index: &'a InvertedIndex, documents: &'a Documents) -> Result<Self> {
        Ok(Self {
            documents,
            engine: SearchEngine::new(index)?,
            context_size: DEFAULT_CONTEXT_SIZE,
        })
    }

    /// Context used by [`display_result`](Self::display_result) and friends.
    pub fn with_context_size(mut self, context_size: usize) -> Self {
        self.context_size = context_size;
        self
    }

    /// Ranked results, cut to `max_results` when it is positive.
    pub fn search(&self, query: &str, use_all_terms: bool, max_results: i64) -> Vec<SearchResult> {
        let mut results = self.engine.search(query, use_all_terms);
        if max_results > 0 {
            results.truncate(max_results as usize);
        }
        results
    }

    /// Window around the first occurrence of `term` in a document.
    ///
    /// Context is counted in indexed words; punctuation-only words inside the
    /// window are shown as written.
    pub fn snippet_segments(&self, doc_id: &str, term: &str, context_size: usize) -> Option<Snippet> {
        let text = self.documents.get(doc_id)?;
        let target = normalize(term);
        if target.is_empty() {
            return None;
        }
        let words = raw_words(text);
        let tokens: Vec<usize> = (0..words.len()).filter(|&i| words[i].is_token()).collect();
        let hit = tokens.iter().position(|&i| words[i].term == target)?;
        let first = tokens[hit.saturating_sub(context_size)];
        let last = tokens[hit.saturating_add(context_size).min(tokens.len() - 1)];

        let segments = words[first..=last]
            .iter()
            .map(|w| Segment { text: w.raw.to_string(), highlighted: w.term == target })
            .collect();
        Some(Snippet { truncated_start: first > 0, truncated_end: last + 1 < words.len(), segments })
    }

    /// Rendered [`snippet_segments`](Self::snippet_segments); empty when there is no hit.
    pub fn snippet(&self, doc_id: &str, term: &str, context_size: usize) -> String {
        self.snippet_segments(doc_id, term, context_size)
            .map(|s| s.to_string())
            .unwrap_or_default()
    }

    /// Window that shows several query terms together when the document allows it.
    ///
    /// Terms are tried in order. The first window that also contains a different
    /// query term wins; otherwise the last term's window is used, or, when the
    /// last term does not occur, the latest window found.
    pub fn multi_term_snippet_segments<S: AsRef<str>>(
        &self,
        doc_id: &str,
        terms: &[S],
        context_size: usize,
    ) -> Option<Snippet> {
        if terms.is_empty() || !self.documents.contains_key(doc_id) {
            return None;
        }
        let mut fallback = None;
        for (i, term) in terms.iter().enumerate() {
            let term = term.as_ref();
            let Some(window) = self.snippet_segments(doc_id, term, context_size) else {
                continue;
            };
            let haystack = window.plain_text().to_lowercase();
            let co_occurs = terms.iter().any(|other| {
                let other = other.as_ref();
                other != term && !other.is_empty() && haystack.contains(&other.to_lowercase())
            });
            let segments = highlight_segments(&window.words(), terms);
            let snippet = Snippet { segments, ..window };
            if co_occurs || i + 1 == terms.len() {
                return Some(snippet);
            }
            fallback = Some(snippet);
        }
        fallback
    }

    pub fn multi_term_snippet<S: AsRef<str>>(&self, doc_id: &str, terms: &[S], context_size: usize) -> String {
        self.multi_term_snippet_segments(doc_id, terms, context_size)
            .map(|s| s.to_string())
            .unwrap_or_default()
    }

    /// One result as `Document`, `Score` and, when available, `Snippet` lines.
    pub fn display_result<S: AsRef<str>>(&self, doc_id: &str, score: f32, query_terms: &[S]) -> String {
        let snippet = self.multi_term_snippet(doc_id, query_terms, self.context_size);
        let mut out = format!("Document: {doc_id}\nScore: {score:.2}\n");
        if !snippet.is_empty() {
            out.push_str(&format!("Snippet: {snippet}\n"));
        }
        out
    }

    /// Search and render every result under a header naming the query and mode.
    pub fn display_results(&self, query: &str, use_all_terms: bool, max_results: i64) -> String {
        let results = self.search(query, use_all_terms, max_results);
        if results.is_empty() {
            return format!("No results found for query: '{query}'");
        }
        let terms = query_terms(query);
        let mut out = format!(
            "Search results for query: '{query}'\nSearch mode: {}\n\n",
            if use_all_terms { "AND" } else { "OR" }
        );
        for (rank, result) in results.iter().enumerate() {
            out.push_str(&format!("Result {}:\n", rank + 1));
            out.push_str(&self.display_result(&result.doc_id, result.score, &terms));
            out.push('\n');
        }
        out
    }
}

/// Highlight query terms in a whitespace-separated snippet.
///
/// Multi-word terms are matched first and collapse into one highlighted span;
/// the remaining words are then highlighted when they equal a single-word term.
/// Comparison is on normalized words, the output keeps the original text.
pub fn highlight_all_terms<S: AsRef<str>>(snippet: &str, terms: &[S]) -> String {
    let words: Vec<&str> = snippet.split_whitespace().collect();
    Snippet { segments: highlight_segments(&words, terms), ..Snippet::default() }.render()
}

fn highlight_segments<S: AsRef<str>>(words: &[&str], terms: &[S]) -> Vec<Segment> {
    let mut phrases: Vec<Vec<String>> = Vec::new();
    let mut singles: HashSet<String> = HashSet::new();
    for term in terms {
        let parts: Vec<String> = term
            .as_ref()
            .split_whitespace()
            .map(normalize)
            .filter(|p| !p.is_empty())
            .collect();
        match parts.len() {
            0 => {}
            1 if term.as_ref().split_whitespace().count() == 1 => {
                singles.extend(parts);
            }
            1 => {}
            _ => phrases.push(parts),
        }
    }

    let normalized: Vec<String> = words.iter().map(|w| normalize(w)).collect();
    let mut segments = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        let matched = phrases.iter().find_map(|phrase| {
            let window = normalized.get(i..i + phrase.len())?;
            (window == phrase.as_slice()).then_some(phrase.len())
        });
        match matched {
            Some(len) => {
                segments.push(Segment::highlighted(words[i..i + len].join(" ")));
                i += len;
            }
            None => {
                let highlighted = !normalized[i].is_empty() && singles.contains(&normalized[i]);
                segments.push(Segment { text: words[i].to_string(), highlighted });
                i += 1;
            }
        }
    }
    segments
}

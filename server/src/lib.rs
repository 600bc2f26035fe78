use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderValue, StatusCode}, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use textindex::loader::load_documents;
use textindex::retrieval::DEFAULT_CONTEXT_SIZE;
use textindex::search::query_terms;
use textindex::stats::CorpusSummary;
use textindex::{Documents, InvertedIndex, ResultRetriever, Snippet, Statistics};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

const MAX_K: usize = 100;

/// Documents and the index built over them. Immutable once constructed.
pub struct Corpus {
    documents: Documents,
    index: InvertedIndex,
}

impl Corpus {
    pub fn build(documents: Documents) -> Result<Self> {
        let mut index = InvertedIndex::new();
        index.build(&documents)?;
        Ok(Self { documents, index })
    }

    pub fn retriever(&self, context_size: usize) -> textindex::error::Result<ResultRetriever<'_>> {
        Ok(ResultRetriever::new(&self.index, &self.documents)?.with_context_size(context_size))
    }

    pub fn stats(&self) -> Statistics<'_> {
        Statistics::new(&self.index, &self.documents)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    All,
    Any,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default)]
    pub mode: SearchMode,
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default = "default_context")]
    pub context: usize,
}
fn default_k() -> usize { 10 }
fn default_context() -> usize { DEFAULT_CONTEXT_SIZE }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub mode: SearchMode,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: String,
    pub score: f32,
    /// Rendered snippet with `**` around highlighted words.
    pub snippet: Option<String>,
    pub highlights: Option<Snippet>,
}

#[derive(Serialize)]
pub struct WordCount {
    pub term: String,
    pub count: u64,
}

#[derive(Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub summary: CorpusSummary,
    pub top_words: Vec<WordCount>,
}

#[derive(Serialize)]
pub struct DocResponse {
    pub doc_id: String,
    pub length: u32,
    pub top_words: Vec<WordCount>,
}

#[derive(Clone)]
pub struct AppState {
    pub corpus: Arc<Corpus>,
}

/// Startup settings for the service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub docs_dir: PathBuf,
    /// Origins allowed by CORS; empty means any origin.
    pub allowed_origins: Vec<HeaderValue>,
}

impl ServerConfig {
    pub fn new(docs_dir: impl Into<PathBuf>) -> Self {
        Self { docs_dir: docs_dir.into(), allowed_origins: Vec::new() }
    }

    /// Take allowed origins from `CORS_ALLOW_ORIGIN` when it is set.
    pub fn with_env_origins(mut self) -> Self {
        if let Ok(val) = std::env::var("CORS_ALLOW_ORIGIN") {
            self.allowed_origins = parse_origins(&val);
        }
        self
    }
}

/// Comma-separated origins; blank or malformed entries are skipped.
pub fn parse_origins(list: &str) -> Vec<HeaderValue> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect()
}

fn cors_layer(allowed_origins: &[HeaderValue]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed_origins.iter().cloned())
    };
    CorsLayer::new().allow_origin(origin).allow_methods(Any).allow_headers(Any)
}

/// Load the documents and build the index before any request is served.
pub fn build_app(config: &ServerConfig) -> Result<Router> {
    let documents = load_documents(&config.docs_dir)?;
    let corpus = Corpus::build(documents)?;
    Ok(app(corpus, &config.allowed_origins))
}

pub fn app(corpus: Corpus, allowed_origins: &[HeaderValue]) -> Router {
    let app_state = AppState { corpus: Arc::new(corpus) };
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/stats", get(stats_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(app_state)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let retriever = state
        .corpus
        .retriever(params.context)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let use_all_terms = params.mode == SearchMode::All;
    let ranked = retriever.search(&params.q, use_all_terms, 0);
    let total_hits = ranked.len();
    let k = params.k.clamp(1, MAX_K);

    let terms = query_terms(&params.q);
    let results = ranked
        .into_iter()
        .take(k)
        .map(|hit| {
            let highlights = retriever.multi_term_snippet_segments(&hit.doc_id, &terms, params.context);
            SearchHit {
                snippet: highlights.as_ref().map(Snippet::render),
                highlights,
                doc_id: hit.doc_id,
                score: hit.score,
            }
        })
        .collect();

    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, total_hits, "search served");
    Ok(Json(SearchResponse {
        query: params.q,
        mode: params.mode,
        took_s: elapsed.as_secs_f64(),
        total_hits,
        results,
    }))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.corpus.stats();
    Json(StatsResponse {
        summary: stats.summary(),
        top_words: word_counts(stats.most_frequent_words(10)),
    })
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Json<DocResponse>, (StatusCode, Json<serde_json::Value>)> {
    let corpus = &state.corpus;
    if !corpus.documents.contains_key(&doc_id) {
        return Err((StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "not found" }))));
    }
    let top_words = word_counts(corpus.stats().document_most_frequent_words(&doc_id, 5));
    Ok(Json(DocResponse { length: corpus.index.document_length(&doc_id), doc_id, top_words }))
}

fn word_counts(words: Vec<(&str, u64)>) -> Vec<WordCount> {
    words
        .into_iter()
        .map(|(term, count)| WordCount { term: term.to_string(), count })
        .collect()
}

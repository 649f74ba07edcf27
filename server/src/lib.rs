use anyhow::Result;
use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use index::{tokenizer::tokenize, Index, QueryHit};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use walkdir::WalkDir;

// One article as emitted by the feeder.
#[derive(Debug, Deserialize)]
pub struct NewsDoc {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize {
    10
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub article_id: u32,
    pub count: u32,
    pub title: String,
    pub url: String,
}

#[derive(Serialize)]
pub struct ArticleResponse {
    pub article_id: u32,
    pub title: String,
    pub url: String,
}

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<Index>,
}

fn input_files(input: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
        files.sort();
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

pub fn load_articles<P: AsRef<Path>>(input: P) -> Result<Vec<NewsDoc>> {
    let mut docs = Vec::new();
    for file in input_files(input.as_ref()) {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            let reader = BufReader::new(File::open(&file)?);
            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                docs.push(serde_json::from_str(&line)?);
            }
        } else {
            let reader = BufReader::new(File::open(&file)?);
            let json: serde_json::Value = serde_json::from_reader(reader)?;
            match json {
                serde_json::Value::Array(arr) => {
                    for v in arr {
                        docs.push(serde_json::from_value(v)?);
                    }
                }
                v @ serde_json::Value::Object(_) => docs.push(serde_json::from_value(v)?),
                _ => {}
            }
        }
    }
    Ok(docs)
}

pub fn build_index(docs: &[NewsDoc], stop_words: Option<&Path>) -> Result<Index> {
    let mut idx = Index::new();
    if let Some(path) = stop_words {
        let loaded = idx.load_stop_words(BufReader::new(File::open(path)?))?;
        tracing::info!(loaded, path = %path.display(), "stop words loaded");
    }

    let mut rejected = 0usize;
    for doc in docs {
        let id = match idx.register_article(&doc.url, &doc.title) {
            Ok(id) => id,
            Err(reason) => {
                tracing::debug!(url = %doc.url, %reason, "article rejected");
                rejected += 1;
                continue;
            }
        };
        for tok in tokenize(&doc.title) {
            idx.add_token(id, tok);
        }
        for tok in tokenize(&doc.body) {
            idx.add_token(id, tok);
        }
    }
    tracing::info!(
        articles = idx.article_count(),
        terms = idx.term_count(),
        rejected,
        "index built"
    );
    Ok(idx)
}

pub fn build_app(index: Index) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let state = AppState {
        index: Arc::new(index),
    };
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/article/:article_id", get(article_handler))
        .with_state(state)
        .layer(cors)
}

// Stop words and unknown terms surface as zero hits, never as an error.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let term = params.q.trim();
    let k = params.k.clamp(1, 100);

    let hits: Vec<QueryHit> = state.index.query_top_n(term, k);
    let results: Vec<SearchHit> = hits
        .iter()
        .map(|h| SearchHit {
            article_id: h.article_id,
            count: h.count,
            title: state
                .index
                .article_title(h.article_id)
                .unwrap_or_default()
                .to_string(),
            url: state
                .index
                .article_url(h.article_id)
                .unwrap_or_default()
                .to_string(),
        })
        .collect();

    Json(SearchResponse {
        query: params.q,
        took_s: start.elapsed().as_secs_f64(),
        total_hits: results.len(),
        results,
    })
}

pub async fn article_handler(
    State(state): State<AppState>,
    AxumPath(article_id): AxumPath<u32>,
) -> Result<Json<ArticleResponse>, StatusCode> {
    match (
        state.index.article_title(article_id),
        state.index.article_url(article_id),
    ) {
        (Some(title), Some(url)) => Ok(Json(ArticleResponse {
            article_id,
            title: title.to_string(),
            url: url.to_string(),
        })),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::fs;
use std::io::Write;
use tempfile::tempdir;
use tower::ServiceExt;

fn write_corpus(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("articles.jsonl");
    let mut f = fs::File::create(&path).unwrap();
    let docs = [
        serde_json::json!({
            "url": "http://news.example/rust-rally",
            "title": "Rust rally",
            "body": "rust rust rust and the markets"
        }),
        serde_json::json!({
            "url": "http://news.example/markets-dip",
            "title": "Markets dip",
            "body": "rust rust markets"
        }),
        serde_json::json!({
            "url": "http://other.example/rust-rally",
            "title": "Rust rally",
            "body": "rust elsewhere"
        }),
    ];
    for d in docs {
        writeln!(f, "{d}").unwrap();
    }
    path
}

fn build_test_app(dir: &std::path::Path) -> Router {
    let stop_path = dir.join("stopwords.txt");
    fs::write(&stop_path, "the\nand\n").unwrap();
    let corpus = write_corpus(dir);
    let docs = server::load_articles(&corpus).unwrap();
    let index = server::build_index(&docs, Some(stop_path.as_path())).unwrap();
    server::build_app(index)
}

async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

#[tokio::test]
async fn search_ranks_by_frequency_with_id_tie_break() {
    let dir = tempdir().unwrap();
    let app = build_test_app(dir.path());

    let (status, json) = call(app, "/search?q=rust&k=10").await;
    assert_eq!(status, StatusCode::OK);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    // Article 0 has "rust" four times (title + body); articles 1 and 2 tie
    // at two, so the lower id ranks first.
    assert_eq!(results[0]["article_id"], 0);
    assert_eq!(results[0]["count"], 4);
    assert_eq!(results[1]["article_id"], 1);
    assert_eq!(results[1]["count"], 2);
    assert_eq!(results[2]["article_id"], 2);
    assert_eq!(results[2]["count"], 2);
    assert_eq!(results[0]["title"], "Rust rally");
    assert_eq!(results[0]["url"], "http://news.example/rust-rally");
}

#[tokio::test]
async fn k_truncates_results() {
    let dir = tempdir().unwrap();
    let app = build_test_app(dir.path());

    let (status, json) = call(app, "/search?q=rust&k=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"].as_array().unwrap().len(), 1);
    assert_eq!(json["total_hits"], 1);
}

#[tokio::test]
async fn stop_word_query_yields_no_hits() {
    let dir = tempdir().unwrap();
    let app = build_test_app(dir.path());

    let (status, json) = call(app, "/search?q=the&k=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_hits"], 0);
    assert!(json["results"].as_array().unwrap().is_empty());
}

#[test]
fn duplicate_articles_are_dropped_at_build() {
    let dir = tempdir().unwrap();
    // All three corpus docs are accepted (the shared title sits on another
    // host); append a case-variant URL repost that must be dropped.
    let corpus = write_corpus(dir.path());
    let mut f = fs::OpenOptions::new().append(true).open(&corpus).unwrap();
    writeln!(
        f,
        "{}",
        serde_json::json!({
            "url": "HTTP://NEWS.EXAMPLE/rust-rally",
            "title": "repost",
            "body": "rust"
        })
    )
    .unwrap();
    let docs = server::load_articles(&corpus).unwrap();
    let index = server::build_index(&docs, None).unwrap();
    assert_eq!(index.article_count(), 3);
}

#[tokio::test]
async fn article_lookup_and_not_found() {
    let dir = tempdir().unwrap();
    let app = build_test_app(dir.path());

    let (status, json) = call(app.clone(), "/article/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Markets dip");
    assert_eq!(json["url"], "http://news.example/markets-dip");

    let (status, _) = call(app, "/article/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_endpoint() {
    let dir = tempdir().unwrap();
    let app = build_test_app(dir.path());
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

use anyhow::{anyhow, Result};
use clap::Parser;
use reqwest::{header, Client, Url};
use scraper::{Html, Selector};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::time::Duration;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "feeder")]
#[command(about = "Fetch news article pages from a seeds file into JSONL")]
struct Cli {
    /// Path to a file with article URLs (one per line, # for comments)
    #[arg(long)]
    seeds: String,
    /// Output JSONL file path
    #[arg(long, default_value = "./sample_data/articles.jsonl")]
    output: String,
    /// Concurrency (number of in-flight fetches)
    #[arg(long, default_value_t = 8)]
    concurrency: usize,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// User-Agent string
    #[arg(long, default_value = "news-feeder/0.1 (+https://example.com/bot)")]
    user_agent: String,
}

#[derive(Serialize)]
struct ArticleRecord<'a> {
    url: &'a str,
    title: &'a str,
    body: &'a str,
    fetched_at: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();
    if let Some(dir) = std::path::Path::new(&args.output).parent() {
        fs::create_dir_all(dir).ok();
    }

    let client = Client::builder()
        .user_agent(args.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(5))
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()?;

    // Load seeds, skipping comments and anything already queued.
    let mut queue: Vec<Url> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for line in BufReader::new(File::open(&args.seeds)?).lines() {
        let s = line?.trim().to_string();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }
        let parsed = Url::parse(&s).or_else(|_| Url::parse(&format!("https://{s}")));
        if let Ok(u) = parsed {
            if seen.insert(norm(&u)) {
                queue.push(u);
            }
        }
    }
    if queue.is_empty() {
        return Err(anyhow!("no valid seeds"));
    }
    tracing::info!(
        seeds = queue.len(),
        concurrency = args.concurrency,
        output = %args.output,
        "feeder starting"
    );

    let mut out = BufWriter::new(File::create(&args.output)?);
    let sel_title = Selector::parse("title").unwrap();
    let sel_body = Selector::parse("body").unwrap();

    let mut emitted = 0usize;
    let mut failed = 0usize;
    let mut queue = queue.into_iter();
    let mut inflight: Vec<tokio::task::JoinHandle<Option<(String, String, String)>>> = Vec::new();
    let mut drained = false;

    while !drained || !inflight.is_empty() {
        // Fill workers
        while inflight.len() < args.concurrency {
            let Some(url) = queue.next() else {
                drained = true;
                break;
            };
            let client_c = client.clone();
            let tsel = sel_title.clone();
            let bsel = sel_body.clone();
            inflight.push(tokio::spawn(async move {
                fetch_article(&client_c, url, &tsel, &bsel).await
            }));
        }

        if inflight.is_empty() {
            break;
        }

        let mut i = 0;
        while i < inflight.len() {
            if inflight[i].is_finished() {
                let h = inflight.swap_remove(i);
                match h.await {
                    Ok(Some((url, title, body))) => {
                        let fetched_at = time::OffsetDateTime::now_utc()
                            .format(&Rfc3339)
                            .unwrap_or_default();
                        let rec = ArticleRecord {
                            url: &url,
                            title: &title,
                            body: &body,
                            fetched_at,
                        };
                        serde_json::to_writer(&mut out, &rec)?;
                        out.write_all(b"\n")?;
                        emitted += 1;
                        if emitted % 25 == 0 {
                            tracing::info!(emitted, failed, "progress");
                        }
                    }
                    _ => failed += 1,
                }
            } else {
                i += 1;
            }
        }
        tokio::task::yield_now().await;
    }

    out.flush()?;
    tracing::info!(emitted, failed, output = %args.output, "feeder done");
    Ok(())
}

// Fetch one page and extract its title and body text; non-HTML and
// oversized responses are skipped.
async fn fetch_article(
    client: &Client,
    url: Url,
    sel_title: &Selector,
    sel_body: &Selector,
) -> Option<(String, String, String)> {
    let resp = client.get(url.clone()).send().await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    if let Some(ct) = resp.headers().get(header::CONTENT_TYPE) {
        if let Ok(v) = ct.to_str() {
            if !v.starts_with("text/html") {
                return None;
            }
        }
    }
    let bytes = resp.bytes().await.ok()?;
    if bytes.len() > 2 * 1024 * 1024 {
        return None;
    }
    let html = String::from_utf8_lossy(&bytes).to_string();

    let doc = Html::parse_document(&html);
    let title = doc
        .select(sel_title)
        .next()
        .map(|n| n.text().collect::<String>())
        .unwrap_or_default();
    let body = doc
        .select(sel_body)
        .next()
        .map(|n| n.text().collect::<String>())
        .unwrap_or_default();

    Some((
        norm(&url),
        title.trim().to_string(),
        body.trim().to_string(),
    ))
}

fn norm(u: &Url) -> String {
    let mut s = u.clone();
    s.set_fragment(None);
    s.to_string()
}

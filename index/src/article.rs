use std::collections::HashSet;

use url::Url;

use crate::error::RegisterError;
use crate::normalize::normalize;
use crate::ArticleId;

// Separator between the server and title halves of the dedup key. No
// escaping; a '|' inside a title collides and that is tolerated.
const TITLE_SERVER_SEP: char = '|';

#[derive(Debug)]
struct Article {
    url: String,
    title: String,
}

/// Append-only article table. Ids equal insertion order; an article is
/// rejected when a prior accepted article has the same URL or the same
/// `(server, title)` pair, case-insensitive either way.
#[derive(Debug, Default)]
pub struct ArticleRegistry {
    articles: Vec<Article>,
    seen_urls: HashSet<String>,
    seen_title_server: HashSet<String>,
}

impl ArticleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, url: &str, title: &str) -> Result<ArticleId, RegisterError> {
        if url.is_empty() {
            return Err(RegisterError::EmptyUrl);
        }

        let url_key = normalize(url);
        if self.seen_urls.contains(&url_key) {
            return Err(RegisterError::DuplicateUrl);
        }

        let title_server_key = title_server_key(&host_of(url), title);
        if self.seen_title_server.contains(&title_server_key) {
            return Err(RegisterError::DuplicateTitleServer);
        }

        // Both checks passed; only now may the keys be recorded.
        self.seen_urls.insert(url_key);
        self.seen_title_server.insert(title_server_key);
        self.articles.push(Article {
            url: url.to_string(),
            title: title.to_string(),
        });
        Ok((self.articles.len() - 1) as ArticleId)
    }

    pub fn title(&self, id: ArticleId) -> Option<&str> {
        self.articles.get(id as usize).map(|a| a.title.as_str())
    }

    pub fn url(&self, id: ArticleId) -> Option<&str> {
        self.articles.get(id as usize).map(|a| a.url.as_str())
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

// Host component, or empty when the URL does not parse as absolute.
fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

fn title_server_key(server: &str, title: &str) -> String {
    let mut key = normalize(server);
    key.push(TITLE_SERVER_SEP);
    key.push_str(&normalize(title));
    key
}

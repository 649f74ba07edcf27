use std::collections::HashMap;
use std::io::{self, BufRead};

use crate::article::ArticleRegistry;
use crate::error::RegisterError;
use crate::normalize::normalize;
use crate::postings::TermEntry;
use crate::query::{self, QueryHit};
use crate::stopwords::StopWordSet;
use crate::ArticleId;

pub const DEFAULT_TERM_BUCKETS: usize = 10007;

/// In-memory inverted index over registered news articles. Single-threaded;
/// dropping it releases every article, term entry, posting, and dedup key.
#[derive(Debug)]
pub struct Index {
    stop_words: StopWordSet,
    articles: ArticleRegistry,
    terms: HashMap<String, TermEntry>,
}

impl Default for Index {
    fn default() -> Self {
        Self::new()
    }
}

impl Index {
    pub fn new() -> Self {
        Self::with_term_capacity(DEFAULT_TERM_BUCKETS)
    }

    pub fn with_term_capacity(buckets: usize) -> Self {
        let buckets = if buckets == 0 {
            DEFAULT_TERM_BUCKETS
        } else {
            buckets
        };
        Self {
            stop_words: StopWordSet::new(),
            articles: ArticleRegistry::new(),
            terms: HashMap::with_capacity(buckets),
        }
    }

    pub fn load_stop_words<R: BufRead>(&mut self, reader: R) -> io::Result<usize> {
        self.stop_words.load(reader)
    }

    pub fn add_stop_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words.extend(words);
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn register_article(&mut self, url: &str, title: &str) -> Result<ArticleId, RegisterError> {
        self.articles.register(url, title)
    }

    pub fn article_title(&self, id: ArticleId) -> Option<&str> {
        self.articles.title(id)
    }

    pub fn article_url(&self, id: ArticleId) -> Option<&str> {
        self.articles.url(id)
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn add_token(&mut self, article_id: ArticleId, token: &str) {
        // Unknown ids, empty tokens, and stop words are silently ignored.
        if token.is_empty() || (article_id as usize) >= self.articles.len() {
            return;
        }
        let word = normalize(token);
        if self.stop_words.contains_normalized(&word) {
            return;
        }
        self.terms.entry(word).or_default().bump(article_id);
    }

    /// Top `n` articles for `term`, by count descending with earlier
    /// articles breaking ties. Stop words were never indexed, so they come
    /// back empty like any unknown term.
    pub fn query_top_n(&self, term: &str, n: usize) -> Vec<QueryHit> {
        if term.is_empty() || n == 0 {
            return Vec::new();
        }
        match self.terms.get(&normalize(term)) {
            Some(entry) => query::top_n(entry.postings(), n),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Index;

    #[test]
    fn add_token_ignores_unknown_article_ids() {
        let mut idx = Index::new();
        idx.add_token(0, "orphan");
        assert_eq!(idx.term_count(), 0);
    }

    #[test]
    fn add_token_ignores_empty_tokens() {
        let mut idx = Index::new();
        idx.register_article("http://a/1", "t").unwrap();
        idx.add_token(0, "");
        assert_eq!(idx.term_count(), 0);
    }

    #[test]
    fn stop_words_never_create_terms() {
        let mut idx = Index::new();
        idx.add_stop_words(["the"]);
        idx.register_article("http://a/1", "t").unwrap();
        idx.add_token(0, "The");
        idx.add_token(0, "THE");
        assert_eq!(idx.term_count(), 0);
        assert!(idx.query_top_n("the", 5).is_empty());
    }

    #[test]
    fn zero_capacity_falls_back_to_default() {
        let idx = Index::with_term_capacity(0);
        assert_eq!(idx.article_count(), 0);
        assert_eq!(idx.term_count(), 0);
    }
}

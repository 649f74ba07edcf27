use crate::ArticleId;

/// One article's occurrence count for a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub article_id: ArticleId,
    pub count: u32,
}

// Postings stay in first-occurrence order of the article; the term string
// itself lives as the dictionary key, not in the entry.
#[derive(Debug, Default)]
pub(crate) struct TermEntry {
    postings: Vec<Posting>,
}

impl TermEntry {
    pub(crate) fn bump(&mut self, article_id: ArticleId) {
        // Adjacent tokens from the same article hit the tail posting.
        if let Some(last) = self.postings.last_mut() {
            if last.article_id == article_id {
                last.count += 1;
                return;
            }
        }
        if let Some(p) = self
            .postings
            .iter_mut()
            .find(|p| p.article_id == article_id)
        {
            p.count += 1;
            return;
        }
        self.postings.push(Posting {
            article_id,
            count: 1,
        });
    }

    pub(crate) fn postings(&self) -> &[Posting] {
        &self.postings
    }
}

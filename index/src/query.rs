use std::cmp::Ordering;

use serde::Serialize;

use crate::postings::Posting;
use crate::ArticleId;

/// One ranked result row: id and count only, so rows are freely copyable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryHit {
    pub article_id: ArticleId,
    pub count: u32,
}

// Higher count first, then lower article id; total because ids are unique
// within one term's postings.
fn rank(a: &QueryHit, b: &QueryHit) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| a.article_id.cmp(&b.article_id))
}

pub(crate) fn top_n(postings: &[Posting], n: usize) -> Vec<QueryHit> {
    let mut hits: Vec<QueryHit> = postings
        .iter()
        .map(|p| QueryHit {
            article_id: p.article_id,
            count: p.count,
        })
        .collect();
    hits.sort_unstable_by(rank);
    hits.truncate(n);
    hits
}

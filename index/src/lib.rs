//! In-memory inverted index for a news-article search engine: articles get
//! dense ids in registration order, tokens are lowercased and stop-word
//! filtered on the way in, and queries return frequency-ranked article ids.

pub mod article;
mod engine;
pub mod error;
pub mod normalize;
pub mod postings;
pub mod query;
pub mod stopwords;
pub mod tokenizer;

pub use article::ArticleRegistry;
pub use engine::{Index, DEFAULT_TERM_BUCKETS};
pub use error::RegisterError;
pub use postings::Posting;
pub use query::QueryHit;
pub use stopwords::StopWordSet;

pub type ArticleId = u32;

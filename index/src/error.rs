use thiserror::Error;

/// Why `register_article` refused an article. Duplicates are a normal
/// outcome of wire syndication, not a fault.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    #[error("article url is empty")]
    EmptyUrl,

    #[error("duplicate article url")]
    DuplicateUrl,

    #[error("duplicate title on the same server")]
    DuplicateTitleServer,
}

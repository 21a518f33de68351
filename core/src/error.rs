use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Malformed input: invalid stop-word, bad document id or body, bad query.
    #[error("bad argument: {0}")]
    BadArgument(String),
    /// Positional lookup past the end of the insertion-order registry.
    #[error("out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    pub(crate) fn bad_argument(msg: impl Into<String>) -> Self { Self::BadArgument(msg.into()) }
    pub(crate) fn out_of_range(msg: impl Into<String>) -> Self { Self::OutOfRange(msg.into()) }
}

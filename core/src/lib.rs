pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod server;
pub mod tokenizer;

pub use document::{Document, DocumentStatus};
pub use error::{Result, SearchError};
pub use server::SearchServer;

pub type DocId = i32;

/// Upper bound on the number of documents returned by a ranked search.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
/// Relevances closer than this are treated as equal when ranking.
pub const EPSILON: f64 = 1e-6;

//! # jmdict-sqlite - JMdict to SQLite converter
//!
//! Turns a full JMdict JSON snapshot (the `jmdict-simplified` layout) into a
//! normalized relational database.
//!
//! jmdict-sqlite provides:
//! - A typed model of the input document ([`DictionaryDocument`])
//! - An idempotent schema for words, written forms, readings, senses and glosses
//! - A single-transaction mapper from document to rows ([`Converter`])
//! - An order-preserving encoded list type for list-valued columns ([`EncodedList`])

pub mod config;
pub mod convert;
pub mod document;
pub mod encoded;
pub mod output;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use convert::{ConvertOptions, ConvertSummary, Converter};
pub use document::DictionaryDocument;
pub use encoded::EncodedList;
pub use storage::{DbStats, DictionaryStore, WriteBatch};

/// Result type alias for converter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for converter operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dictionary document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("Duplicate word id: {0}")]
    DuplicateWord(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Config error: {0}")]
    Config(String),
}

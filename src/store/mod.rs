//! Corpus store - durable home of the glossary entries
//!
//! The search engine and the suggestion index only talk to [`CorpusStore`];
//! [`SqliteCorpusStore`] is the implementation the server runs with.

pub mod sqlite;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CorpusEntry, NewEntry};

pub use sqlite::SqliteCorpusStore;

#[async_trait]
pub trait CorpusStore: Send + Sync {
    /// Insert an entry and return it with its assigned id
    async fn insert(&self, entry: NewEntry) -> Result<CorpusEntry>;

    /// Entries whose isiZulu, English, isiXhosa or siSwati column contains
    /// `needle` case-insensitively, in insertion order
    async fn find_containing(&self, needle: &str) -> Result<Vec<CorpusEntry>>;

    /// The isiZulu column of every entry, in insertion order
    async fn isizulu_terms(&self) -> Result<Vec<String>>;

    async fn count(&self) -> Result<i64>;
}

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::CorpusStore;
use crate::error::Result;
use crate::models::{CorpusEntry, NewEntry};

const SELECT_ENTRIES: &str =
    "SELECT id, isiZulu, English, isiXhosa, siSwati, Context, Page, file_path FROM corpus";

/// SQLite backed corpus table
#[derive(Clone)]
pub struct SqliteCorpusStore {
    pool: SqlitePool,
}

impl SqliteCorpusStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the corpus table
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS corpus (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                isiZulu TEXT NOT NULL,
                English TEXT NOT NULL,
                isiXhosa TEXT,
                siSwati TEXT,
                Context TEXT NOT NULL,
                Page TEXT,
                file_path TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl CorpusStore for SqliteCorpusStore {
    async fn insert(&self, entry: NewEntry) -> Result<CorpusEntry> {
        let result = sqlx::query(
            "INSERT INTO corpus (isiZulu, English, isiXhosa, siSwati, Context, Page, file_path) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.isizulu)
        .bind(&entry.english)
        .bind(&entry.isixhosa)
        .bind(&entry.siswati)
        .bind(&entry.context)
        .bind(&entry.page)
        .bind(&entry.file_path)
        .execute(&self.pool)
        .await?;

        Ok(CorpusEntry {
            id: result.last_insert_rowid(),
            isizulu: entry.isizulu,
            english: entry.english,
            isixhosa: entry.isixhosa,
            siswati: entry.siswati,
            context: entry.context,
            page: entry.page,
            file_path: entry.file_path,
        })
    }

    async fn find_containing(&self, needle: &str) -> Result<Vec<CorpusEntry>> {
        // SQLite's LIKE/lower() only fold ASCII, so the filter runs here
        let needle = needle.to_lowercase();
        let entries: Vec<CorpusEntry> = sqlx::query_as(&format!("{} ORDER BY id", SELECT_ENTRIES))
            .fetch_all(&self.pool)
            .await?;

        Ok(entries.into_iter().filter(|e| e.contains(&needle)).collect())
    }

    async fn isizulu_terms(&self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT isiZulu FROM corpus ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(term,)| term).collect())
    }

    async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM corpus")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

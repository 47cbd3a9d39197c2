use sqlx::SqlitePool;
use std::sync::Arc;

use corpus_lookup::config::AppConfig;
use corpus_lookup::models::{CorpusEntry, NewEntry};
use corpus_lookup::search::{SearchEngine, SuggestionIndex};
use corpus_lookup::store::{CorpusStore, SqliteCorpusStore};

pub struct AppState {
    pub db: SqlitePool,
    pub config: AppConfig,
    pub store: Arc<SqliteCorpusStore>,
    /// "Did you mean" vocabulary, rebuilt after every corpus mutation
    pub suggestions: Arc<SuggestionIndex>,
    pub engine: SearchEngine,
}

impl AppState {
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        let store = Arc::new(SqliteCorpusStore::new(db.clone()));
        let suggestions = Arc::new(SuggestionIndex::new());
        let engine = SearchEngine::new(store.clone(), suggestions.clone(), config.search.clone());

        Self {
            db,
            config,
            store,
            suggestions,
            engine,
        }
    }

    /// Build the suggestion index at startup / 启动时构建建议索引
    /// A failed first build is retried once.
    pub async fn init_suggestions(&self) -> anyhow::Result<()> {
        let count = match self.suggestions.rebuild(self.store.as_ref()).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("Suggestion index build failed: {}, retrying once", e);
                self.suggestions.rebuild(self.store.as_ref()).await?
            }
        };
        tracing::info!("Suggestion index ready: {} tokens", count);
        Ok(())
    }

    /// Insert an entry and bring the suggestion index up to date / 插入词条并更新建议索引
    pub async fn add_entry(&self, entry: NewEntry) -> corpus_lookup::Result<CorpusEntry> {
        let entry = self.store.insert(entry).await?;
        self.suggestions.rebuild(self.store.as_ref()).await?;
        Ok(entry)
    }
}

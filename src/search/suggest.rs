//! "Did you mean" index over the isiZulu vocabulary
//!
//! Holds every distinct lowercase token of the isiZulu column. The owner calls
//! [`SuggestionIndex::rebuild`] once at startup and again after each corpus
//! mutation; the token set is computed off-lock and swapped in whole, so
//! readers never observe a half-built index. Rebuilds are serialized from the
//! store read to the swap, so the last mutation's snapshot is the one kept.

use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

use super::similarity::{ratio, real_quick_ratio};
use super::tokenizer::tokenize;
use crate::error::Result;
use crate::store::CorpusStore;

#[derive(Default)]
pub struct SuggestionIndex {
    tokens: RwLock<Arc<Vec<String>>>,
    /// Held across read-and-swap in [`SuggestionIndex::rebuild`]
    rebuild_lock: tokio::sync::Mutex<()>,
}

impl SuggestionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the vocabulary from the store
    pub async fn rebuild(&self, store: &dyn CorpusStore) -> Result<usize> {
        let _guard = self.rebuild_lock.lock().await;
        let terms = store.isizulu_terms().await?;
        let count = self.rebuild_from(terms.iter().map(String::as_str));
        tracing::debug!("Suggestion index rebuilt: {} tokens from {} entries", count, terms.len());
        Ok(count)
    }

    /// Replace the vocabulary with the tokens of `terms`, first occurrence wins
    pub fn rebuild_from<'a, I>(&self, terms: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut vocabulary = Vec::new();
        for term in terms {
            for token in tokenize(term) {
                if seen.insert(token.clone()) {
                    vocabulary.push(token);
                }
            }
        }

        let count = vocabulary.len();
        *self.tokens.write() = Arc::new(vocabulary);
        count
    }

    pub fn len(&self) -> usize {
        self.tokens.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Up to `max` tokens with similarity to `query` of at least `cutoff`,
    /// best first. Equal scores are ordered by token, descending.
    pub fn suggest(&self, query: &str, max: usize, cutoff: f64) -> Vec<String> {
        if max == 0 {
            return Vec::new();
        }

        let tokens = self.tokens.read().clone();

        let mut scored: Vec<(f64, &str)> = tokens
            .iter()
            .filter(|token| real_quick_ratio(token, query) >= cutoff)
            .filter_map(|token| {
                let score = ratio(token, query);
                (score >= cutoff).then_some((score, token.as_str()))
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| b.1.cmp(a.1)));

        scored
            .into_iter()
            .take(max)
            .map(|(_, token)| token.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CorpusEntry, NewEntry};
    use crate::search::similarity::ratio;
    use crate::store::sqlite::tests::{memory_store, new_entry};
    use crate::store::SqliteCorpusStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Store whose first vocabulary read stalls after taking its snapshot
    struct StalledFirstRead {
        inner: SqliteCorpusStore,
        reads: AtomicUsize,
    }

    #[async_trait]
    impl CorpusStore for StalledFirstRead {
        async fn insert(&self, entry: NewEntry) -> Result<CorpusEntry> {
            self.inner.insert(entry).await
        }

        async fn find_containing(&self, needle: &str) -> Result<Vec<CorpusEntry>> {
            self.inner.find_containing(needle).await
        }

        async fn isizulu_terms(&self) -> Result<Vec<String>> {
            let terms = self.inner.isizulu_terms().await?;
            if self.reads.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            Ok(terms)
        }

        async fn count(&self) -> Result<i64> {
            self.inner.count().await
        }
    }

    fn index_of(terms: &[&str]) -> SuggestionIndex {
        let index = SuggestionIndex::new();
        index.rebuild_from(terms.iter().copied());
        index
    }

    #[test]
    fn test_rebuild_dedupes_and_lowercases() {
        let index = index_of(&["Sawubona baba", "sawubona", "Unjani?"]);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_suggest_ranks_by_similarity() {
        let index = index_of(&["sawubona", "unjani", "yebo", "sawubona"]);
        assert_eq!(index.suggest("sawubna", 5, 0.6), vec!["sawubona"]);
        assert!(index.suggest("xyz123notfound", 5, 0.6).is_empty());
    }

    #[test]
    fn test_suggest_respects_max_and_cutoff() {
        let index = index_of(&["ukudla", "ukuhamba", "ukuhlala", "ukuza", "ukufa", "ukuba", "ukuthi"]);
        let suggestions = index.suggest("ukuka", 5, 0.6);
        // Six tokens clear the cutoff, the cap keeps five
        assert_eq!(suggestions.len(), 5);
        for s in &suggestions {
            assert!(ratio(s, "ukuka") >= 0.6);
        }
        let scores: Vec<f64> = suggestions.iter().map(|s| ratio(s, "ukuka")).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_suggest_ties_break_on_token_descending() {
        let index = index_of(&["abx", "aby"]);
        assert_eq!(index.suggest("ab", 5, 0.6), vec!["aby", "abx"]);
    }

    #[test]
    fn test_empty_index() {
        let index = SuggestionIndex::new();
        assert!(index.is_empty());
        assert!(index.suggest("sawubona", 5, 0.6).is_empty());
    }

    #[tokio::test]
    async fn test_rebuild_from_store_uses_isizulu_only() {
        let store = memory_store().await;
        store.insert(new_entry("Sawubona", "hello", "greeting")).await.unwrap();

        let index = SuggestionIndex::new();
        assert_eq!(index.rebuild(&store).await.unwrap(), 1);
        assert_eq!(index.suggest("sawubona", 5, 0.6), vec!["sawubona"]);
        // English column is not part of the vocabulary
        assert!(index.suggest("hello", 5, 0.6).is_empty());

        store.insert(new_entry("unjani", "how are you", "greeting")).await.unwrap();
        index.rebuild(&store).await.unwrap();
        assert_eq!(index.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_rebuilds_keep_latest_snapshot() {
        let store = StalledFirstRead {
            inner: memory_store().await,
            reads: AtomicUsize::new(0),
        };
        let index = SuggestionIndex::new();

        store.insert(new_entry("sawubona", "hello", "greeting")).await.unwrap();

        let slow = index.rebuild(&store);
        let fast = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            store.insert(new_entry("ngiyabonga", "thank you", "courtesy")).await.unwrap();
            index.rebuild(&store).await
        };
        let (slow, fast) = tokio::join!(slow, fast);
        slow.unwrap();
        fast.unwrap();

        assert_eq!(store.isizulu_terms().await.unwrap(), vec!["sawubona", "ngiyabonga"]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.suggest("ngiyabnga", 5, 0.6), vec!["ngiyabonga"]);
    }
}

//! Search engine - answers a query against the corpus
//!
//! 1. Normalize the query (trim + lowercase)
//! 2. Substring match across the four language columns
//! 3. Tokenize the matched entries and compute frequency / bigram stats
//! 4. Fall back to "did you mean" suggestions when nothing matched
//!
//! Statistics are relative to the matched entries only, not the whole corpus.

use serde::{Serialize, Serializer};
use std::sync::Arc;

use super::frequency::{FrequencyIndex, PairCount};
use super::suggest::SuggestionIndex;
use super::tokenizer::tokenize;
use crate::config::SearchConfig;
use crate::error::Result;
use crate::models::CorpusEntry;
use crate::store::CorpusStore;

/// Full answer to a search
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResult {
    pub query: String,
    pub results: Vec<CorpusEntry>,
    pub did_you_mean: Vec<String>,
    pub frequency: usize,
    #[serde(serialize_with = "round4")]
    pub usage_percent: f64,
    pub total_words: usize,
    pub common_pairs: Vec<PairCount>,
}

/// Frequency part of a search, served by /frequency
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrequencyStats {
    pub query: String,
    pub frequency: usize,
    #[serde(serialize_with = "round4")]
    pub usage_percent: f64,
    pub total_words: usize,
}

/// Bigram part of a search, served by /pairs
#[derive(Debug, Clone, Default, Serialize)]
pub struct PairStats {
    pub query: String,
    pub common_pairs: Vec<PairCount>,
}

fn round4<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 10_000.0).round() / 10_000.0)
}

/// Normalize a raw query: trim, lowercase
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// The text that statistics are computed over: the four language columns of
/// each matched entry, space separated, lowercased
fn matched_text(entries: &[CorpusEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.language_columns().join(" "))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Clone)]
pub struct SearchEngine {
    store: Arc<dyn CorpusStore>,
    suggestions: Arc<SuggestionIndex>,
    settings: SearchConfig,
}

impl SearchEngine {
    pub fn new(
        store: Arc<dyn CorpusStore>,
        suggestions: Arc<SuggestionIndex>,
        settings: SearchConfig,
    ) -> Self {
        Self {
            store,
            suggestions,
            settings,
        }
    }

    /// Matched entries and the frequency index over their text
    async fn matches(&self, query: &str) -> Result<(Vec<CorpusEntry>, FrequencyIndex)> {
        let entries = self.store.find_containing(query).await?;
        let text = matched_text(&entries);
        let stats = FrequencyIndex::build(tokenize(&text));
        Ok((entries, stats))
    }

    pub async fn search(&self, raw_query: &str) -> Result<SearchResult> {
        let query = normalize_query(raw_query);
        if query.is_empty() {
            return Ok(SearchResult::default());
        }

        let (results, stats) = self.matches(&query).await?;

        let did_you_mean = if results.is_empty() {
            self.suggestions.suggest(
                &query,
                self.settings.max_suggestions,
                self.settings.suggestion_cutoff,
            )
        } else {
            Vec::new()
        };

        tracing::debug!(
            "search '{}': {} entries, {} tokens, {} suggestions",
            query,
            results.len(),
            stats.total_tokens(),
            did_you_mean.len()
        );

        Ok(SearchResult {
            frequency: stats.count(&query),
            usage_percent: stats.usage_percent(&query),
            total_words: stats.total_tokens(),
            common_pairs: stats.common_pairs(&query, self.settings.max_common_pairs),
            query,
            results,
            did_you_mean,
        })
    }

    pub async fn frequency(&self, raw_query: &str) -> Result<FrequencyStats> {
        let query = normalize_query(raw_query);
        if query.is_empty() {
            return Ok(FrequencyStats::default());
        }

        let (_, stats) = self.matches(&query).await?;
        Ok(FrequencyStats {
            frequency: stats.count(&query),
            usage_percent: stats.usage_percent(&query),
            total_words: stats.total_tokens(),
            query,
        })
    }

    pub async fn pairs(&self, raw_query: &str) -> Result<PairStats> {
        let query = normalize_query(raw_query);
        if query.is_empty() {
            return Ok(PairStats::default());
        }

        let (_, stats) = self.matches(&query).await?;
        Ok(PairStats {
            common_pairs: stats.common_pairs(&query, self.settings.max_common_pairs),
            query,
        })
    }
}

//! Unigram and bigram counts over a token stream

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Ordered pair of adjacent tokens
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bigram {
    pub first: String,
    pub second: String,
}

impl Bigram {
    pub fn contains(&self, token: &str) -> bool {
        self.first == token || self.second == token
    }
}

impl fmt::Display for Bigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.second)
    }
}

/// A bigram and how often it occurred, as sent to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairCount {
    pub pair: String,
    pub count: usize,
}

#[derive(Debug, Default)]
pub struct FrequencyIndex {
    unigrams: HashMap<String, usize>,
    /// Bigrams in order of first appearance
    bigrams: Vec<(Bigram, usize)>,
    bigram_slots: HashMap<Bigram, usize>,
    total: usize,
}

impl FrequencyIndex {
    pub fn build<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut index = Self::default();
        let mut previous: Option<String> = None;

        for token in tokens {
            index.total += 1;
            *index.unigrams.entry(token.clone()).or_default() += 1;

            if let Some(first) = previous.take() {
                index.record_bigram(Bigram {
                    first,
                    second: token.clone(),
                });
            }
            previous = Some(token);
        }

        index
    }

    fn record_bigram(&mut self, bigram: Bigram) {
        match self.bigram_slots.get(&bigram) {
            Some(&slot) => self.bigrams[slot].1 += 1,
            None => {
                self.bigram_slots.insert(bigram.clone(), self.bigrams.len());
                self.bigrams.push((bigram, 1));
            }
        }
    }

    /// Occurrences of `token`
    pub fn count(&self, token: &str) -> usize {
        self.unigrams.get(token).copied().unwrap_or(0)
    }

    pub fn total_tokens(&self) -> usize {
        self.total
    }

    /// Share of the stream made up by `token`, in percent. 0 for an empty stream.
    pub fn usage_percent(&self, token: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(token) as f64 / self.total as f64 * 100.0
    }

    /// Bigrams with `token` in either position, most frequent first, at most
    /// `limit`. Equal counts keep the order in which the bigrams first appeared.
    pub fn bigrams_containing(&self, token: &str, limit: usize) -> Vec<(Bigram, usize)> {
        let mut related: Vec<(Bigram, usize)> = self
            .bigrams
            .iter()
            .filter(|(bigram, _)| bigram.contains(token))
            .cloned()
            .collect();

        related.sort_by(|a, b| b.1.cmp(&a.1));
        related.truncate(limit);
        related
    }

    pub fn common_pairs(&self, token: &str, limit: usize) -> Vec<PairCount> {
        self.bigrams_containing(token, limit)
            .into_iter()
            .map(|(bigram, count)| PairCount {
                pair: bigram.to_string(),
                count,
            })
            .collect()
    }
}

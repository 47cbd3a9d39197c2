//! Search module - corpus lookup, usage statistics and spelling suggestions
//!
//! - tokenizer: lowercase Unicode word stream
//! - frequency: unigram / bigram counts over a token stream
//! - similarity: Ratcliff/Obershelp ratio
//! - suggest: "did you mean" vocabulary built from the isiZulu column
//! - engine: ties the above to a [`CorpusStore`](crate::store::CorpusStore)

pub mod engine;
pub mod frequency;
pub mod similarity;
pub mod suggest;
pub mod tokenizer;

pub use engine::{FrequencyStats, PairStats, SearchEngine, SearchResult};
pub use frequency::{Bigram, FrequencyIndex, PairCount};
pub use suggest::SuggestionIndex;
pub use tokenizer::tokenize;

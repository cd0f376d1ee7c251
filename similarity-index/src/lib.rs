pub mod corpus;
pub mod tfidf_index;
pub mod tokenizer;

use ticket_model::SimilarTicket;

/// Read-only retrieval interface over a built index.
///
/// Queries never fail: degenerate input (empty text, out-of-vocabulary
/// terms) scores zero against everything instead of erroring.
pub trait SimilaritySearcher {
    fn name(&self) -> &'static str;
    /// Rank every indexed record against `text` and return at most `top_k`
    /// results, best first. Equal scores order by ascending row index.
    fn query(&self, text: &str, top_k: usize) -> Vec<SimilarTicket>;
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The corpus source does not exist. Callers treat this as "no index",
    /// not as an operator-visible failure.
    #[error("corpus source missing: {0}")]
    SourceMissing(String),
    /// The corpus source exists but holds no data rows.
    #[error("corpus is empty")]
    EmptyCorpus,
    #[error("csv error: {0}")]
    Csv(String),
}

impl BuildError {
    /// True for the missing-or-empty cases that degrade to an absent index
    /// without an operator diagnostic.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, BuildError::SourceMissing(_) | BuildError::EmptyCorpus)
    }
}

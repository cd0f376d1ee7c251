pub mod clean;
pub mod prepare;

pub use clean::clean_text;
pub use prepare::{prepare_corpus, PrepSummary};

#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    #[error("io error: {0}")]
    Io(String),
    #[error("csv error: {0}")]
    Csv(String),
}

//! Shared models used across crates

use serde::{Deserialize, Serialize};

/// One historical ticket loaded from the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRecord {
    /// Stable 0-based ordinal assigned at load time. Renumbered on every
    /// rebuild; never a persisted external identifier.
    pub row_index: u32,
    /// The original row's column values, in column order. Column names are
    /// held once by the owning corpus.
    pub values: Vec<String>,
}

impl TicketRecord {
    pub fn new(row_index: u32, values: Vec<String>) -> Self {
        Self { row_index, values }
    }
}

/// One ranked neighbor returned by the similarity retriever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarTicket {
    /// Load-time ordinal of the matched corpus record.
    pub row_index: u32,
    /// Cosine similarity; in [0, 1] for non-negative weighted vectors.
    pub score: f32,
    /// Leading characters of the record's display text.
    pub snippet: String,
}

/// Suggested handling priority for a ticket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// Structured result of classifying one ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub suggested_priority: Priority,
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub confidence: f32,
    /// Neighbors already supplied by the oracle. When present they take
    /// precedence and the retriever is not consulted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar_tickets: Option<Vec<SimilarTicket>>,
}

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use classification_provider::classifier::{ClassificationOracle, RuleBasedClassifier};
use classification_provider::log::ClassificationLogger;
use serde::Serialize;
use similarity_index::tfidf_index::{TfidfIndex, TfidfParams};
use ticket_model::{Classification, SimilarTicket};

/// Runtime configuration for the triage service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Processed corpus CSV the index is built from.
    pub corpus_path: PathBuf,
    /// Optional JSONL classification log.
    pub log_path: Option<PathBuf>,
    /// Neighbors merged into a classification when the oracle brings none.
    pub top_k: usize,
    pub tfidf: TfidfParams,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from("data/processed_tickets.csv"),
            log_path: None,
            top_k: 3,
            tfidf: TfidfParams::default(),
        }
    }
}

/// State of the resident similarity index in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    Absent,
    Building,
    Ready,
    Failed,
}

/// Classification result plus provenance, handed to outer layers as plain
/// structured data.
#[derive(Debug, Clone, Serialize)]
pub struct TriageReport {
    pub classification: Classification,
    /// Identifier of the classifier that produced the result.
    pub classifier: String,
    pub timestamp: String,
}

/// Orchestrates the similarity index and the classification oracle.
///
/// The index lives behind `Arc<RwLock<Option<Arc<_>>>>`: readers clone the
/// inner `Arc` and score without holding the lock, and a rebuild publishes
/// a fully-built replacement in one swap. No operation here is fatal —
/// a missing or broken corpus degrades every lookup to an empty neighbor
/// list, and an oracle failure falls back to the rule-based classifier.
pub struct TriageService {
    cfg: ServiceConfig,
    oracle: Option<Box<dyn ClassificationOracle>>,
    fallback: RuleBasedClassifier,
    logger: Option<ClassificationLogger>,
    index: Arc<RwLock<Option<Arc<TfidfIndex>>>>,
    index_state: Arc<RwLock<IndexState>>,
}

impl TriageService {
    /// Build the service and run the initial index build. A missing or
    /// unusable corpus leaves the service fully operational with an absent
    /// index.
    pub fn new(cfg: ServiceConfig) -> Self {
        let logger = cfg.log_path.as_ref().map(ClassificationLogger::new);
        let svc = Self {
            cfg,
            oracle: None,
            fallback: RuleBasedClassifier::new(),
            logger,
            index: Arc::new(RwLock::new(None)),
            index_state: Arc::new(RwLock::new(IndexState::Absent)),
        };
        svc.rebuild_index();
        svc
    }

    /// Install or replace the external classification oracle.
    pub fn with_oracle(mut self, oracle: Box<dyn ClassificationOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.cfg
    }

    /// Current index state (Absent/Building/Ready/Failed).
    pub fn index_state(&self) -> IndexState {
        match self.index_state.read() {
            Ok(s) => *s,
            Err(_) => IndexState::Failed,
        }
    }

    /// True when a built index is resident.
    pub fn index_ready(&self) -> bool {
        self.with_index(|_| ()).is_some()
    }

    /// Number of indexed records, when built.
    pub fn indexed_records(&self) -> Option<usize> {
        self.with_index(TfidfIndex::len)
    }

    /// Guarded access to the resident index snapshot. Returns `None` when
    /// no index is built.
    pub fn with_index<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&TfidfIndex) -> R,
    {
        let snapshot = match self.index.read() {
            Ok(g) => g.clone(),
            Err(_) => None,
        };
        snapshot.map(|idx| f(&idx))
    }

    /// Rebuild the whole-corpus index off to the side and publish it in one
    /// swap. In-flight queries keep the snapshot they started with.
    ///
    /// A missing or empty corpus resets to Absent silently; any other build
    /// failure resets to Failed with one operator diagnostic. Returns the
    /// resulting state.
    pub fn rebuild_index(&self) -> IndexState {
        if let Ok(mut s) = self.index_state.write() {
            *s = IndexState::Building;
        }
        let state = match TfidfIndex::build_from_csv(&self.cfg.corpus_path, &self.cfg.tfidf) {
            Ok(built) => {
                let count = built.len();
                if let Ok(mut w) = self.index.write() {
                    *w = Some(Arc::new(built));
                }
                println!("built tf-idf index for {count} historical tickets");
                IndexState::Ready
            }
            Err(e) => {
                if let Ok(mut w) = self.index.write() {
                    *w = None;
                }
                if e.is_unavailable() {
                    IndexState::Absent
                } else {
                    eprintln!("could not build tf-idf index: {e}");
                    IndexState::Failed
                }
            }
        };
        if let Ok(mut s) = self.index_state.write() {
            *s = state;
        }
        state
    }

    /// Rank historical tickets against `text`. Degrades to an empty list
    /// when no index is resident; never fails.
    pub fn find_similar(&self, text: &str, top_k: usize) -> Vec<SimilarTicket> {
        self.with_index(|idx| idx.query(text, top_k)).unwrap_or_default()
    }

    /// Classify `text` and attach similar tickets.
    ///
    /// Oracle-provided neighbors take precedence; the retriever is
    /// consulted only when the oracle brings none. Total: an oracle
    /// failure falls back to the rule-based classifier, and a missing
    /// index yields an empty neighbor list rather than an error.
    pub fn triage(&self, text: &str) -> TriageReport {
        let (mut classification, classifier) = self.classify(text);
        if classification.similar_tickets.is_none() {
            classification.similar_tickets = Some(self.find_similar(text, self.cfg.top_k));
        }
        if let Some(logger) = &self.logger {
            logger.record(&classifier, text, &classification, None);
        }
        TriageReport {
            classification,
            classifier,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    fn classify(&self, text: &str) -> (Classification, String) {
        if let Some(oracle) = &self.oracle {
            match oracle.classify(text) {
                Ok(c) => return (c, oracle.id().to_string()),
                Err(e) => {
                    eprintln!("classification oracle failed, using rule-based fallback: {e}");
                }
            }
        }
        let id = ClassificationOracle::id(&self.fallback).to_string();
        (self.fallback.classify_text(text), id)
    }
}

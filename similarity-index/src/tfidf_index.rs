use std::collections::{HashMap, HashSet};
use std::path::Path;

use ticket_model::SimilarTicket;

use crate::corpus::{load_corpus, ColumnPolicy, Corpus};
use crate::tokenizer;
use crate::{BuildError, SimilaritySearcher};

/// Tunables for index construction.
#[derive(Debug, Clone)]
pub struct TfidfParams {
    /// Vocabulary cap: keep this many terms, ranked by document frequency,
    /// ties broken by first appearance in the corpus.
    pub max_features: usize,
    /// Columns consulted for vectorization text.
    pub vector_columns: ColumnPolicy,
    /// Columns consulted for snippets.
    pub display_columns: ColumnPolicy,
    /// Snippet length in characters.
    pub snippet_chars: usize,
}

impl Default for TfidfParams {
    fn default() -> Self {
        Self {
            max_features: 20_000,
            vector_columns: ColumnPolicy::vector_default(),
            display_columns: ColumnPolicy::display_default(),
            snippet_chars: 400,
        }
    }
}

/// TF-IDF vector index over a whole corpus.
///
/// Immutable once built; a rebuild produces a brand-new value so callers
/// can publish it with an atomic swap while in-flight queries keep reading
/// their old snapshot. Document vectors are L2-normalized and stored as
/// per-dimension postings, so a query's cosine scores come from one pass
/// over the postings of its own dimensions.
#[derive(Debug)]
pub struct TfidfIndex {
    /// term -> dimension
    vocabulary: HashMap<String, u32>,
    /// Smoothed inverse document frequency per dimension.
    idf: Vec<f32>,
    /// dimension -> (row, normalized weight)
    postings: Vec<Vec<(u32, f32)>>,
    /// Display snippet per row, in row order.
    snippets: Vec<String>,
}

impl TfidfIndex {
    /// Convenience: load the corpus CSV at `path` and build.
    pub fn build_from_csv<P: AsRef<Path>>(
        path: P,
        params: &TfidfParams,
    ) -> Result<Self, BuildError> {
        let corpus = load_corpus(path)?;
        Self::build(&corpus, params)
    }

    /// Fit vocabulary and IDF over the corpus and vectorize every record.
    /// Either every part of the index is built or the call fails; no
    /// partial value escapes.
    pub fn build(corpus: &Corpus, params: &TfidfParams) -> Result<Self, BuildError> {
        if corpus.is_empty() {
            return Err(BuildError::EmptyCorpus);
        }
        let docs: Vec<Vec<String>> = corpus
            .records
            .iter()
            .map(|r| tokenizer::terms(&corpus.text_for(r, &params.vector_columns)))
            .collect();

        // Document frequencies, in first-seen order.
        let mut slot_of: HashMap<&str, usize> = HashMap::new();
        let mut seen: Vec<(&str, u32)> = Vec::new();
        for doc in &docs {
            let mut in_doc: HashSet<&str> = HashSet::new();
            for term in doc {
                if in_doc.insert(term.as_str()) {
                    match slot_of.get(term.as_str()) {
                        Some(&slot) => seen[slot].1 += 1,
                        None => {
                            slot_of.insert(term.as_str(), seen.len());
                            seen.push((term.as_str(), 1));
                        }
                    }
                }
            }
        }

        // Rank by document frequency, ties by first appearance.
        let mut ranked: Vec<usize> = (0..seen.len()).collect();
        ranked.sort_by(|&a, &b| seen[b].1.cmp(&seen[a].1).then(a.cmp(&b)));
        ranked.truncate(params.max_features);

        let n_docs = docs.len() as f32;
        let mut vocabulary = HashMap::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (dim, &slot) in ranked.iter().enumerate() {
            let (term, df) = seen[slot];
            vocabulary.insert(term.to_string(), dim as u32);
            idf.push(((1.0 + n_docs) / (1.0 + df as f32)).ln() + 1.0);
        }

        // Weighted, normalized document vectors stored as postings.
        let mut postings: Vec<Vec<(u32, f32)>> = vec![Vec::new(); idf.len()];
        for (row, doc) in docs.iter().enumerate() {
            let mut tf: HashMap<u32, f32> = HashMap::new();
            for term in doc {
                if let Some(&dim) = vocabulary.get(term.as_str()) {
                    *tf.entry(dim).or_insert(0.0) += 1.0;
                }
            }
            let mut weights: Vec<(u32, f32)> = tf
                .into_iter()
                .map(|(dim, count)| (dim, count * idf[dim as usize]))
                .collect();
            // Fixed accumulation order keeps scores bit-identical across
            // rebuilds of the same corpus.
            weights.sort_unstable_by_key(|&(dim, _)| dim);
            let norm = weights.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
            if norm > 0.0 {
                for (dim, w) in &mut weights {
                    *w /= norm;
                    postings[*dim as usize].push((row as u32, *w));
                }
            }
        }

        let snippets = corpus
            .records
            .iter()
            .map(|r| {
                corpus
                    .text_for(r, &params.display_columns)
                    .chars()
                    .take(params.snippet_chars)
                    .collect()
            })
            .collect();

        Ok(Self { vocabulary, idf, postings, snippets })
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Number of vocabulary dimensions.
    pub fn dimensions(&self) -> usize {
        self.idf.len()
    }

    /// Rank every record against `text`, best first.
    ///
    /// The query is projected onto the fitted vocabulary with the same
    /// weighting used at build time; out-of-vocabulary terms contribute
    /// nothing. Equal scores order by ascending row index, so results are
    /// reproducible for identical corpora and queries.
    pub fn query(&self, text: &str, top_k: usize) -> Vec<SimilarTicket> {
        let n = self.snippets.len();
        if top_k == 0 || n == 0 {
            return Vec::new();
        }

        let mut tf: HashMap<u32, f32> = HashMap::new();
        for term in tokenizer::terms(text) {
            if let Some(&dim) = self.vocabulary.get(term.as_str()) {
                *tf.entry(dim).or_insert(0.0) += 1.0;
            }
        }
        let mut qvec: Vec<(u32, f32)> = tf
            .into_iter()
            .map(|(dim, count)| (dim, count * self.idf[dim as usize]))
            .collect();
        // Fixed accumulation order keeps repeated queries bit-identical.
        qvec.sort_unstable_by_key(|&(dim, _)| dim);
        let norm = qvec.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut qvec {
                *w /= norm;
            }
        }

        let mut scores = vec![0.0f32; n];
        for (dim, qw) in &qvec {
            for &(row, w) in &self.postings[*dim as usize] {
                scores[row as usize] += qw * w;
            }
        }

        let mut order: Vec<u32> = (0..n as u32).collect();
        order.sort_by(|&a, &b| {
            scores[b as usize]
                .partial_cmp(&scores[a as usize])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        order.truncate(top_k);
        order
            .into_iter()
            .map(|row| SimilarTicket {
                row_index: row,
                score: scores[row as usize],
                snippet: self.snippets[row as usize].clone(),
            })
            .collect()
    }
}

impl SimilaritySearcher for TfidfIndex {
    fn name(&self) -> &'static str {
        "tfidf"
    }

    fn query(&self, text: &str, top_k: usize) -> Vec<SimilarTicket> {
        TfidfIndex::query(self, text, top_k)
    }
}

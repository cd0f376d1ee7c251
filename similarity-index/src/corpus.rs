use std::path::Path;

use ticket_model::TicketRecord;

use crate::BuildError;

/// Prioritized list of column-name candidates with a deterministic
/// join-all-values fallback.
///
/// Selection is by exact header name, first candidate wins. When no
/// candidate is present the record's values are joined with single spaces,
/// missing values reading as empty strings.
#[derive(Debug, Clone)]
pub struct ColumnPolicy {
    candidates: Vec<String>,
}

impl ColumnPolicy {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { candidates: candidates.into_iter().map(Into::into).collect() }
    }

    /// Columns consulted when vectorizing a record.
    pub fn vector_default() -> Self {
        Self::new(["text_clean", "text"])
    }

    /// Columns consulted when rendering a snippet.
    pub fn display_default() -> Self {
        Self::new(["text", "text_clean"])
    }

    /// Index of the first candidate present in `headers`.
    pub fn resolve(&self, headers: &[String]) -> Option<usize> {
        self.candidates
            .iter()
            .find_map(|c| headers.iter().position(|h| h == c))
    }
}

/// A loaded corpus: shared headers plus one record per data row.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub headers: Vec<String>,
    pub records: Vec<TicketRecord>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Text selected for a record under `policy`: the first matching
    /// candidate column, else all values joined with single spaces.
    pub fn text_for(&self, rec: &TicketRecord, policy: &ColumnPolicy) -> String {
        if let Some(i) = policy.resolve(&self.headers) {
            return rec.values.get(i).cloned().unwrap_or_default();
        }
        rec.values.join(" ")
    }
}

/// Load a corpus CSV, assigning each row its load-time ordinal.
///
/// A missing path is reported as [`BuildError::SourceMissing`] so callers
/// can degrade to an absent index instead of failing.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus, BuildError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(BuildError::SourceMissing(path.display().to_string()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| BuildError::Csv(e.to_string()))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| BuildError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row.map_err(|e| BuildError::Csv(e.to_string()))?;
        let values: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        records.push(TicketRecord::new(i as u32, values));
    }
    if records.is_empty() {
        return Err(BuildError::EmptyCorpus);
    }
    Ok(Corpus { headers, records })
}

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use ticket_model::Classification;

/// One line of the append-only classification log.
#[derive(Debug, Serialize)]
struct LogEntry<'a> {
    timestamp: String,
    classifier: &'a str,
    input_snippet: String,
    parsed: &'a Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_response: Option<String>,
}

/// Append-only JSONL log of classification outcomes.
///
/// Logging is best-effort observability: write failures never surface to
/// the caller. Input is truncated to 1000 characters and raw oracle
/// replies to 4000.
#[derive(Debug, Clone)]
pub struct ClassificationLogger {
    path: PathBuf,
}

impl ClassificationLogger {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(
        &self,
        classifier: &str,
        input: &str,
        parsed: &Classification,
        raw_response: Option<&str>,
    ) {
        let entry = LogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            classifier,
            input_snippet: input.chars().take(1000).collect(),
            parsed,
            raw_response: raw_response.map(|r| r.chars().take(4000).collect()),
        };
        if let Ok(line) = serde_json::to_string(&entry) {
            if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
                let _ = writeln!(f, "{line}");
            }
        }
    }
}

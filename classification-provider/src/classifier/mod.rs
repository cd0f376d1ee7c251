use thiserror::Error;
use ticket_model::{Classification, Priority};

use crate::config::{solution_for, CATEGORY_RULES, FALLBACK_CATEGORY, TAG_RULES};

/// Errors that can be produced by classification backends.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OracleError {
    #[error("invalid oracle configuration: {message}")]
    InvalidConfiguration { message: String },
    #[error("provider failure: {message}")]
    ProviderFailure { message: String },
    #[error("oracle reply carried no parseable object")]
    UnparseableReply,
}

/// Core interface for classification backends.
///
/// The LLM transport behind a real oracle is a black box to this crate;
/// implementations only have to turn ticket text into a [`Classification`].
pub trait ClassificationOracle: Send + Sync {
    fn classify(&self, text: &str) -> Result<Classification, OracleError>;
    /// Stable identifier recorded in classification logs.
    fn id(&self) -> &str;
}

fn parse_priority(s: &str) -> Option<Priority> {
    match s.to_ascii_lowercase().as_str() {
        "high" => Some(Priority::High),
        "medium" => Some(Priority::Medium),
        "low" => Some(Priority::Low),
        _ => None,
    }
}

fn parse_confidence(value: Option<&serde_json::Value>) -> f32 {
    let raw = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0) as f32,
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    raw.clamp(0.0, 1.0)
}

/// Extract the first `{...}` object from a raw oracle reply and coerce it
/// into a [`Classification`], filling defaults for missing keys. Returns
/// `None` when no parseable object is present.
pub fn extract_json(raw: &str) -> Option<Classification> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    let value: serde_json::Value = serde_json::from_str(&raw[start..=end]).ok()?;
    let obj = value.as_object()?;

    let category = obj
        .get("category")
        .and_then(|v| v.as_str())
        .unwrap_or(FALLBACK_CATEGORY)
        .to_string();
    let tags = obj
        .get("tags")
        .and_then(|v| v.as_array())
        .map(|a| {
            a.iter()
                .filter_map(|t| t.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    let suggested_priority = obj
        .get("suggested_priority")
        .and_then(|v| v.as_str())
        .and_then(parse_priority)
        .unwrap_or(Priority::Medium);
    let solution = obj
        .get("solution")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();
    let confidence = parse_confidence(obj.get("confidence"));
    let similar_tickets = obj
        .get("similar_tickets")
        .and_then(|v| serde_json::from_value(v.clone()).ok());

    Some(Classification {
        category,
        tags,
        suggested_priority,
        solution,
        confidence,
        similar_tickets,
    })
}

/// Deterministic keyword classifier used when no oracle is configured or
/// the oracle fails.
#[derive(Debug, Default)]
pub struct RuleBasedClassifier;

impl RuleBasedClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Keyword classification never fails; this is the infallible form the
    /// trait impl wraps.
    pub fn classify_text(&self, text: &str) -> Classification {
        let lowered = text.to_lowercase();

        let mut best = (FALLBACK_CATEGORY, 0usize);
        for rule in CATEGORY_RULES {
            let hits = rule
                .keywords
                .iter()
                .copied()
                .filter(|kw| lowered.contains(kw))
                .count();
            if hits > best.1 {
                best = (rule.category, hits);
            }
        }

        let mut tags = Vec::new();
        for rule in TAG_RULES {
            if rule.keywords.iter().copied().any(|kw| lowered.contains(kw)) {
                tags.push(rule.tag.to_string());
            }
        }

        let (solution, confidence) = solution_for(best.0);
        let suggested_priority = if tags.iter().any(|t| t == "urgent") {
            Priority::High
        } else {
            Priority::Medium
        };

        Classification {
            category: best.0.to_string(),
            tags,
            suggested_priority,
            solution: solution.to_string(),
            confidence,
            similar_tickets: None,
        }
    }
}

impl ClassificationOracle for RuleBasedClassifier {
    fn classify(&self, text: &str) -> Result<Classification, OracleError> {
        Ok(self.classify_text(text))
    }

    fn id(&self) -> &str {
        "rule-based"
    }
}

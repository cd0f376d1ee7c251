//! Keyword tables driving the rule-based fallback classifier.
//!
//! Table order matters: category ties resolve to the earlier entry, and
//! tags are emitted in table order.

pub struct CategoryRule {
    pub category: &'static str,
    pub keywords: &'static [&'static str],
}

pub struct TagRule {
    pub tag: &'static str,
    pub keywords: &'static [&'static str],
}

pub struct SolutionRule {
    pub category: &'static str,
    pub solution: &'static str,
    pub confidence: f32,
}

pub const FALLBACK_CATEGORY: &str = "general";

pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: "authentication",
        keywords: &["login", "password", "sign in", "sign up", "account", "access"],
    },
    CategoryRule {
        category: "payment",
        keywords: &["payment", "transaction", "billing", "charge", "refund", "card"],
    },
    CategoryRule {
        category: "technical",
        keywords: &["error", "bug", "crash", "issue", "broken", "not working"],
    },
    CategoryRule {
        category: "refund",
        keywords: &["refund", "cancel", "return", "money back"],
    },
    CategoryRule {
        category: "feature",
        keywords: &["feature", "request", "enhancement", "improvement", "suggestion"],
    },
    CategoryRule { category: "general", keywords: &[] },
];

pub const TAG_RULES: &[TagRule] = &[
    TagRule { tag: "urgent", keywords: &["urgent", "asap", "immediately", "priority"] },
    TagRule { tag: "billing", keywords: &["invoice", "billing", "charge", "refund", "payment"] },
    TagRule { tag: "login", keywords: &["login", "password", "sign in", "access denied", "authentication"] },
    TagRule { tag: "bug", keywords: &["bug", "error", "crash", "stack trace", "exception"] },
    TagRule { tag: "feature-request", keywords: &["feature", "request", "enhancement", "improvement", "add"] },
    TagRule { tag: "documentation", keywords: &["docs", "documentation", "how to", "guide", "manual"] },
    TagRule { tag: "security", keywords: &["security", "vulnerability", "breach", "attack", "unauthorized"] },
];

pub const SOLUTION_RULES: &[SolutionRule] = &[
    SolutionRule {
        category: "authentication",
        solution: "Password reset: use \"Forgot Password\" on the login page and follow the email link.",
        confidence: 0.92,
    },
    SolutionRule {
        category: "payment",
        solution: "Payment troubleshooting: check card details and retry or contact the bank.",
        confidence: 0.88,
    },
    SolutionRule {
        category: "technical",
        solution: "Try clearing cache, update the app, disable extensions, collect logs.",
        confidence: 0.85,
    },
    SolutionRule {
        category: "refund",
        solution: "Submit a refund request with the order number; allow 5-7 days.",
        confidence: 0.87,
    },
    SolutionRule {
        category: "feature",
        solution: "Record the feature request with details and use case for product team review.",
        confidence: 0.75,
    },
    SolutionRule {
        category: "general",
        solution: "Support will review this ticket.",
        confidence: 0.7,
    },
];

/// Canned solution and confidence for a category, falling back to the
/// general entry.
pub fn solution_for(category: &str) -> (&'static str, f32) {
    SOLUTION_RULES
        .iter()
        .find(|r| r.category == category)
        .or_else(|| SOLUTION_RULES.iter().find(|r| r.category == FALLBACK_CATEGORY))
        .map(|r| (r.solution, r.confidence))
        .unwrap_or(("", 0.0))
}

//! Feedback Parsing
//!
//! The feedback model is asked for a bare JSON object but routinely wraps it
//! in markdown fences or prose. `parse_feedback` digs the object out and
//! otherwise returns a fixed fallback report, so callers always get
//! something renderable.
//!
//! ```text
//! raw ──strip fences──► JSON? ──yes──► validate ──ok──► Model report
//!                         │ no            │ bad
//!                         ▼               ▼
//!                   outermost {…} ──► validate ──bad──► Fallback report
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

pub const FALLBACK_FEEDBACK: &str = "We could not generate detailed feedback right now. \
Some of your scores suggest areas that may benefit from extra attention.";

pub const FALLBACK_ACTION: &str = "Talk with a trusted adult, parent or school counselor about how you have been feeling. \
Take the assessment again later to track your progress";

/// Severity assigned by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackTag {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "needs help")]
    NeedsHelp,
    #[serde(rename = "critical")]
    Critical,
}

impl FeedbackTag {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackTag::Normal => "normal",
            FeedbackTag::NeedsHelp => "needs help",
            FeedbackTag::Critical => "critical",
        }
    }

    /// Parse a tag ignoring case, spaces, underscores and hyphens
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "normal" => Some(FeedbackTag::Normal),
            "needshelp" => Some(FeedbackTag::NeedsHelp),
            "critical" => Some(FeedbackTag::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for FeedbackTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a report came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSource {
    Model,
    Fallback,
}

/// Structured feedback shown after an assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub tag: FeedbackTag,
    pub feedback: String,
    pub action: String,
    pub source: ReportSource,
}

impl FeedbackReport {
    pub fn fallback() -> Self {
        Self {
            tag: FeedbackTag::NeedsHelp,
            feedback: FALLBACK_FEEDBACK.to_string(),
            action: FALLBACK_ACTION.to_string(),
            source: ReportSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ReportSource::Fallback
    }

    /// Suggested actions, one per sentence
    pub fn action_items(&self) -> Vec<&str> {
        self.action
            .split(". ")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn fence_pattern() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)^\s*```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)\s*```\s*$").expect("fence pattern")
    })
}

fn object_pattern() -> &'static Regex {
    static OBJECT: OnceLock<Regex> = OnceLock::new();
    OBJECT.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("object pattern"))
}

/// Remove a surrounding markdown code fence, if any
fn strip_fences(raw: &str) -> &str {
    match fence_pattern().captures(raw).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str(),
        None => raw.trim(),
    }
}

/// Validate one candidate JSON text
fn report_from_json(text: &str) -> Option<FeedbackReport> {
    let value: Value = serde_json::from_str(text).ok()?;
    let object = value.as_object()?;

    let field = |name: &str| {
        object
            .get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    Some(FeedbackReport {
        tag: FeedbackTag::parse(field("tag")?)?,
        feedback: field("feedback")?.to_string(),
        action: field("action")?.to_string(),
        source: ReportSource::Model,
    })
}

/// Parse raw model output into a report, falling back when it is unusable
pub fn parse_feedback(raw: &str) -> FeedbackReport {
    let text = strip_fences(raw);

    if let Some(report) = report_from_json(text) {
        return report;
    }

    if let Some(report) = object_pattern()
        .find(text)
        .and_then(|m| report_from_json(m.as_str()))
    {
        return report;
    }

    tracing::warn!(
        chars = raw.len(),
        "feedback output unusable, returning fallback report"
    );
    FeedbackReport::fallback()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = r#"{"action": "Sleep well. Talk to a friend.", "feedback": "Mostly fine.", "tag": "normal"}"#;

    #[test]
    fn test_plain_json() {
        let report = parse_feedback(PLAIN);
        assert_eq!(report.tag, FeedbackTag::Normal);
        assert_eq!(report.feedback, "Mostly fine.");
        assert_eq!(report.source, ReportSource::Model);
    }

    #[test]
    fn test_fenced_json() {
        let raw = format!("```json\n{}\n```", PLAIN);
        assert_eq!(parse_feedback(&raw), parse_feedback(PLAIN));

        let raw = format!("```\n{}\n```\n", PLAIN);
        assert!(!parse_feedback(&raw).is_fallback());
    }

    #[test]
    fn test_json_embedded_in_prose() {
        let raw = format!(
            "Sure! Here is the assessment you asked for:\n\n{}\n\nLet me know if you need more.",
            PLAIN
        );
        let report = parse_feedback(&raw);
        assert!(!report.is_fallback());
        assert_eq!(report.action, "Sleep well. Talk to a friend.");
    }

    #[test]
    fn test_tag_normalization() {
        for raw in ["needs help", "Needs_Help", "NEEDS-HELP", " needshelp "] {
            assert_eq!(FeedbackTag::parse(raw), Some(FeedbackTag::NeedsHelp), "{raw}");
        }
        assert_eq!(FeedbackTag::parse("Critical"), Some(FeedbackTag::Critical));
        assert_eq!(FeedbackTag::parse("fine"), None);

        let raw = r#"{"action": "a", "feedback": "f", "tag": "Needs_Help"}"#;
        assert_eq!(parse_feedback(raw).tag, FeedbackTag::NeedsHelp);
    }

    #[test]
    fn test_invalid_tag_falls_back() {
        let raw = r#"{"action": "a", "feedback": "f", "tag": "great"}"#;
        assert_eq!(parse_feedback(raw), FeedbackReport::fallback());
    }

    #[test]
    fn test_missing_or_mistyped_field_falls_back() {
        let raw = r#"{"feedback": "f", "tag": "normal"}"#;
        assert!(parse_feedback(raw).is_fallback());

        let raw = r#"{"action": ["a", "b"], "feedback": "f", "tag": "normal"}"#;
        assert!(parse_feedback(raw).is_fallback());
    }

    #[test]
    fn test_garbage_falls_back() {
        for raw in ["", "No response received from LLM", "{not json}", "[1, 2, 3]"] {
            let report = parse_feedback(raw);
            assert!(report.is_fallback(), "{raw:?}");
            assert_eq!(report.tag, FeedbackTag::NeedsHelp);
        }
    }

    #[test]
    fn test_action_items() {
        let report = parse_feedback(PLAIN);
        assert_eq!(report.action_items(), vec!["Sleep well", "Talk to a friend."]);

        let mut report = FeedbackReport::fallback();
        report.action = "One thing.  . Another".to_string();
        assert_eq!(report.action_items(), vec!["One thing", "Another"]);
    }

    #[test]
    fn test_report_serialization() {
        let json = serde_json::to_value(FeedbackReport::fallback()).unwrap();
        assert_eq!(json["tag"], "needs help");
        assert_eq!(json["source"], "fallback");
    }
}

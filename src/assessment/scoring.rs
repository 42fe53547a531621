//! Scoring
//!
//! One-decimal averaging of Likert answers and category scores, plus the
//! score bands used to label dashboard values.

use serde::Serialize;

use crate::assessment::error::{AssessmentError, AssessmentResult};
use crate::assessment::questions::{LIKERT_MAX, LIKERT_MIN};
use crate::assessment::types::QUESTIONS_PER_SET;

/// Round to one decimal place (halves round away from zero)
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Score for one category: the mean of its five answers, rounded to one decimal
pub fn category_score(answers: &[u8]) -> AssessmentResult<f64> {
    if let Some(&bad) = answers
        .iter()
        .find(|&&v| !(LIKERT_MIN..=LIKERT_MAX).contains(&v))
    {
        return Err(AssessmentError::InvalidAnswer(bad));
    }

    let total: u32 = answers.iter().map(|&v| v as u32).sum();
    Ok(round1(total as f64 / QUESTIONS_PER_SET as f64))
}

/// Mean of a slice of scores, rounded to one decimal. `None` when empty.
pub fn mean_score(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(round1(scores.iter().sum::<f64>() / scores.len() as f64))
}

/// Human-readable interpretation of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
    Critical,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 4.5 {
            ScoreBand::Excellent
        } else if score >= 3.5 {
            ScoreBand::Good
        } else if score >= 2.5 {
            ScoreBand::Fair
        } else if score >= 1.5 {
            ScoreBand::NeedsAttention
        } else {
            ScoreBand::Critical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::NeedsAttention => "Needs Attention",
            ScoreBand::Critical => "Critical",
        }
    }
}

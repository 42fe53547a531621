//! Assessment error types

use thiserror::Error;

use crate::assessment::types::Category;

/// Errors raised while answering, paginating or scoring the quiz
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssessmentError {
    /// Likert answer outside 1..=5
    #[error("Answer must be between 1 and 5, got {0}")]
    InvalidAnswer(u8),

    /// Question id outside 1..=5
    #[error("Unknown question: {0}")]
    UnknownQuestion(u8),

    /// Category index outside 1..=5
    #[error("Unknown category: {0}")]
    UnknownCategory(u8),

    /// Not every question of a category was answered
    #[error("Question set '{}' is incomplete", .0.title())]
    IncompleteSet(Category),

    /// A category is missing entirely
    #[error("Missing scores for '{}'", .0.title())]
    MissingCategory(Category),

    /// Score outside 1.0..=5.0 (or not finite)
    #[error("Score for '{}' must be between 1 and 5, got {score}", .category.title())]
    ScoreOutOfRange { category: Category, score: f64 },

    /// Tried to advance past the last page
    #[error("Already on the last question set")]
    LastPage,

    /// Tried to submit before reaching the last page
    #[error("Results are only available from the last question set")]
    NotLastPage,

    /// The quiz was already submitted
    #[error("Assessment already submitted")]
    AlreadySubmitted,
}

/// Result type alias for assessment operations
pub type AssessmentResult<T> = Result<T, AssessmentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AssessmentError::IncompleteSet(Category::SelfEsteem);
        assert_eq!(err.to_string(), "Question set 'Self-Esteem' is incomplete");

        let err = AssessmentError::InvalidAnswer(7);
        assert_eq!(err.to_string(), "Answer must be between 1 and 5, got 7");
    }
}

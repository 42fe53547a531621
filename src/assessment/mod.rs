//! Mindu Self-Assessment
//!
//! The five-category wellness quiz and its scoring:
//!
//! - **types**: Categories and per-category scores
//! - **questions**: The fixed question bank (five questions per category)
//! - **scoring**: One-decimal averaging and score bands
//! - **session**: Five-page quiz pagination
//! - **error**: Error types
//!
//! # Scoring
//!
//! ```text
//! answers (1-5) ──► category score = round1(sum / 5) ──► average = round1(sum / 5)
//! ```
//!
//! # Example
//!
//! ```rust
//! use mindu::assessment::{QuizSession, Category};
//!
//! let mut quiz = QuizSession::new();
//! for _ in 0..4 {
//!     for q in 1..=5 {
//!         quiz.answer(q, 4).unwrap();
//!     }
//!     quiz.advance().unwrap();
//! }
//! for q in 1..=5 {
//!     quiz.answer(q, 2).unwrap();
//! }
//!
//! let scores = quiz.submit().unwrap();
//! assert_eq!(scores.get(Category::ProductivityAndMotivation), 2.0);
//! assert_eq!(scores.average(), 3.6);
//! ```

pub mod error;
pub mod questions;
pub mod scoring;
pub mod session;
pub mod types;

pub use error::{AssessmentError, AssessmentResult};
pub use questions::{question_set, question_sets, QuestionSet, LIKERT_MAX, LIKERT_MIN};
pub use scoring::{category_score, mean_score, round1, ScoreBand};
pub use session::QuizSession;
pub use types::{AnswerSheet, Category, CategoryScores, CATEGORY_COUNT, QUESTIONS_PER_SET};

//! Question Bank Route
//!
//! - GET /api/questions - The five question sets and the answer scale

use axum::Json;

use crate::api::dto::{LikertScale, QuestionBankResponse, QuestionDto, QuestionSetDto};
use crate::assessment::questions::{LIKERT_HIGH_LABEL, LIKERT_LOW_LABEL};
use crate::assessment::{question_sets, LIKERT_MAX, LIKERT_MIN};

/// GET /api/questions
pub async fn list_questions() -> Json<QuestionBankResponse> {
    let sets = question_sets()
        .iter()
        .map(|set| QuestionSetDto {
            index: set.category.index(),
            category: set.category,
            title: set.category.title(),
            questions: set
                .numbered()
                .map(|(id, text)| QuestionDto { id, text })
                .collect(),
        })
        .collect();

    Json(QuestionBankResponse {
        scale: LikertScale {
            min: LIKERT_MIN,
            max: LIKERT_MAX,
            min_label: LIKERT_LOW_LABEL,
            max_label: LIKERT_HIGH_LABEL,
        },
        sets,
    })
}

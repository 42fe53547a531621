//! Quiz Session
//!
//! Fixed five-page pagination over the question bank. A page can only be
//! left once every question on it is answered, and results are only
//! produced from the last page.
//!
//! ```text
//! page 1 ──advance──► page 2 ──► ... ──► page 5 ──submit──► CategoryScores
//! ```

use crate::assessment::error::{AssessmentError, AssessmentResult};
use crate::assessment::questions::{question_sets, QuestionSet, LIKERT_MAX, LIKERT_MIN};
use crate::assessment::types::{
    AnswerSheet, CategoryScores, CATEGORY_COUNT, QUESTIONS_PER_SET,
};

/// In-progress assessment
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    /// Zero-based page index
    page: usize,
    /// answers[page][question - 1]
    answers: [[Option<u8>; QUESTIONS_PER_SET]; CATEGORY_COUNT],
    submitted: bool,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-based index of the current page
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        CATEGORY_COUNT
    }

    pub fn is_last_page(&self) -> bool {
        self.page + 1 == CATEGORY_COUNT
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Question set shown on the current page
    pub fn current_set(&self) -> &'static QuestionSet {
        &question_sets()[self.page]
    }

    /// Record an answer for a question on the current page
    pub fn answer(&mut self, question_id: u8, value: u8) -> AssessmentResult<()> {
        if self.submitted {
            return Err(AssessmentError::AlreadySubmitted);
        }
        if question_id == 0 || question_id as usize > QUESTIONS_PER_SET {
            return Err(AssessmentError::UnknownQuestion(question_id));
        }
        if !(LIKERT_MIN..=LIKERT_MAX).contains(&value) {
            return Err(AssessmentError::InvalidAnswer(value));
        }

        self.answers[self.page][(question_id - 1) as usize] = Some(value);
        Ok(())
    }

    /// Current answer for a question on the current page
    pub fn answer_for(&self, question_id: u8) -> Option<u8> {
        match question_id {
            1..=5 => self.answers[self.page][(question_id - 1) as usize],
            _ => None,
        }
    }

    /// Every question on the current page is answered
    pub fn is_set_complete(&self) -> bool {
        self.answers[self.page].iter().all(Option::is_some)
    }

    /// Move to the next page
    pub fn advance(&mut self) -> AssessmentResult<()> {
        if self.submitted {
            return Err(AssessmentError::AlreadySubmitted);
        }
        if !self.is_set_complete() {
            return Err(AssessmentError::IncompleteSet(self.current_set().category));
        }
        if self.is_last_page() {
            return Err(AssessmentError::LastPage);
        }

        self.page += 1;
        Ok(())
    }

    /// Progress through the quiz as a percentage: `(page + 1) / 5 * 100`
    pub fn progress_percent(&self) -> f64 {
        (self.page + 1) as f64 / CATEGORY_COUNT as f64 * 100.0
    }

    /// Raw answers recorded so far
    pub fn answer_sheet(&self) -> AnswerSheet {
        question_sets()
            .iter()
            .zip(self.answers.iter())
            .map(|(set, page)| {
                let answered = page
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| v.map(|v| (i as u8 + 1, v)))
                    .collect();
                (set.category.index(), answered)
            })
            .collect()
    }

    /// Finish the quiz and reduce the answers to category scores
    pub fn submit(&mut self) -> AssessmentResult<CategoryScores> {
        if self.submitted {
            return Err(AssessmentError::AlreadySubmitted);
        }
        if !self.is_last_page() {
            return Err(AssessmentError::NotLastPage);
        }

        let scores = CategoryScores::from_answers(&self.answer_sheet())?;
        self.submitted = true;
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::types::Category;

    fn fill_page(quiz: &mut QuizSession, value: u8) {
        for q in 1..=5 {
            quiz.answer(q, value).unwrap();
        }
    }

    #[test]
    fn test_new_session_starts_on_first_page() {
        let quiz = QuizSession::new();
        assert_eq!(quiz.page(), 0);
        assert_eq!(quiz.total_pages(), 5);
        assert_eq!(quiz.current_set().category, Category::StressAndAnxiety);
        assert!(!quiz.is_set_complete());
        assert_eq!(quiz.progress_percent(), 20.0);
    }

    #[test]
    fn test_cannot_advance_incomplete_page() {
        let mut quiz = QuizSession::new();
        quiz.answer(1, 3).unwrap();
        quiz.answer(2, 3).unwrap();

        assert_eq!(
            quiz.advance(),
            Err(AssessmentError::IncompleteSet(Category::StressAndAnxiety))
        );
        assert_eq!(quiz.page(), 0);
    }

    #[test]
    fn test_answer_validation() {
        let mut quiz = QuizSession::new();
        assert_eq!(quiz.answer(0, 3), Err(AssessmentError::UnknownQuestion(0)));
        assert_eq!(quiz.answer(6, 3), Err(AssessmentError::UnknownQuestion(6)));
        assert_eq!(quiz.answer(1, 0), Err(AssessmentError::InvalidAnswer(0)));
        assert_eq!(quiz.answer(1, 6), Err(AssessmentError::InvalidAnswer(6)));
    }

    #[test]
    fn test_answers_can_be_changed() {
        let mut quiz = QuizSession::new();
        quiz.answer(1, 2).unwrap();
        quiz.answer(1, 5).unwrap();
        assert_eq!(quiz.answer_for(1), Some(5));
        assert_eq!(quiz.answer_for(2), None);
    }

    #[test]
    fn test_full_walkthrough() {
        let mut quiz = QuizSession::new();

        for value in [1, 2, 3, 4] {
            assert_eq!(quiz.submit(), Err(AssessmentError::NotLastPage));
            fill_page(&mut quiz, value);
            quiz.advance().unwrap();
        }

        assert!(quiz.is_last_page());
        assert_eq!(quiz.progress_percent(), 100.0);
        assert_eq!(quiz.current_set().category, Category::ProductivityAndMotivation);

        fill_page(&mut quiz, 5);
        assert_eq!(quiz.advance(), Err(AssessmentError::LastPage));

        let scores = quiz.submit().unwrap();
        assert_eq!(scores.get(Category::StressAndAnxiety), 1.0);
        assert_eq!(scores.get(Category::SocialConnections), 4.0);
        assert_eq!(scores.get(Category::ProductivityAndMotivation), 5.0);
        assert_eq!(scores.average(), 3.0);

        assert!(quiz.is_submitted());
        assert_eq!(quiz.submit(), Err(AssessmentError::AlreadySubmitted));
        assert_eq!(quiz.answer(1, 1), Err(AssessmentError::AlreadySubmitted));
    }

    #[test]
    fn test_answer_sheet_contains_only_answered_questions() {
        let mut quiz = QuizSession::new();
        quiz.answer(2, 4).unwrap();

        let sheet = quiz.answer_sheet();
        assert_eq!(sheet.len(), 5);
        assert_eq!(sheet[&1].get(&2), Some(&4));
        assert!(sheet[&2].is_empty());
    }
}

//! Question Bank
//!
//! The fixed set of quiz pages. Each category has five questions answered
//! on a Likert scale from 1 ("Never") to 5 ("Always").

use crate::assessment::types::{Category, CATEGORY_COUNT, QUESTIONS_PER_SET};

/// Lowest Likert answer
pub const LIKERT_MIN: u8 = 1;

/// Highest Likert answer
pub const LIKERT_MAX: u8 = 5;

/// Label shown under the lowest answer
pub const LIKERT_LOW_LABEL: &str = "Never";

/// Label shown under the highest answer
pub const LIKERT_HIGH_LABEL: &str = "Always";

/// One quiz page: a category and its five questions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionSet {
    pub category: Category,
    /// Question texts; question ids are the 1-based positions
    pub questions: [&'static str; QUESTIONS_PER_SET],
}

impl QuestionSet {
    /// Iterate (question id, text)
    pub fn numbered(&self) -> impl Iterator<Item = (u8, &'static str)> + '_ {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, text)| (i as u8 + 1, *text))
    }
}

static QUESTION_SETS: [QuestionSet; CATEGORY_COUNT] = [
    QuestionSet {
        category: Category::StressAndAnxiety,
        questions: [
            "How relaxed do you feel on a daily basis?",
            "How often do you feel calm and in control?",
            "How well do you manage stressful situations?",
            "How peaceful is your mind throughout the day?",
            "How often do you feel free of anxiety?",
        ],
    },
    QuestionSet {
        category: Category::HappinessAndWellBeing,
        questions: [
            "How often do you feel genuinely happy?",
            "How much do you enjoy your daily activities?",
            "How often do you feel satisfied with your life?",
            "How well do you sleep, waking up refreshed?",
            "How often do you laugh and enjoy moments with others?",
        ],
    },
    QuestionSet {
        category: Category::SelfEsteem,
        questions: [
            "How confident do you feel about yourself?",
            "How much do you appreciate your personal strengths?",
            "How satisfied are you with your achievements?",
            "How positive is your self-image?",
            "How often do you feel proud of who you are?",
        ],
    },
    QuestionSet {
        category: Category::SocialConnections,
        questions: [
            "How connected do you feel to your friends or family?",
            "How often do you spend quality time with others?",
            "How comfortable are you in social situations?",
            "How often do you reach out to others when you need support?",
            "How fulfilled do your relationships make you feel?",
        ],
    },
    QuestionSet {
        category: Category::ProductivityAndMotivation,
        questions: [
            "How motivated do you feel to complete your tasks?",
            "How often do you achieve the goals you set for yourself?",
            "How productive do you feel during your typical day?",
            "How easily can you focus on tasks without distraction?",
            "How satisfied are you with your daily accomplishments?",
        ],
    },
];

/// All quiz pages in order
pub fn question_sets() -> &'static [QuestionSet; CATEGORY_COUNT] {
    &QUESTION_SETS
}

/// The page for a category
pub fn question_set(category: Category) -> &'static QuestionSet {
    &QUESTION_SETS[(category.index() - 1) as usize]
}

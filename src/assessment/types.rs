//! Assessment Types
//!
//! Core data structures: the five wellness categories, raw answer sheets
//! and reduced per-category scores.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::assessment::error::{AssessmentError, AssessmentResult};
use crate::assessment::questions::{LIKERT_MAX, LIKERT_MIN};
use crate::assessment::scoring::{category_score, mean_score, round1};

/// Number of wellness categories (and quiz pages)
pub const CATEGORY_COUNT: usize = 5;

/// Number of questions per category
pub const QUESTIONS_PER_SET: usize = 5;

/// Raw quiz answers: category index → question id → Likert value
pub type AnswerSheet = BTreeMap<u8, BTreeMap<u8, u8>>;

/// The five fixed wellness categories, in quiz order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    StressAndAnxiety,
    HappinessAndWellBeing,
    SelfEsteem,
    SocialConnections,
    ProductivityAndMotivation,
}

impl Category {
    /// All categories in quiz order
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::StressAndAnxiety,
        Category::HappinessAndWellBeing,
        Category::SelfEsteem,
        Category::SocialConnections,
        Category::ProductivityAndMotivation,
    ];

    /// 1-based index, as stored in response records
    pub fn index(self) -> u8 {
        match self {
            Category::StressAndAnxiety => 1,
            Category::HappinessAndWellBeing => 2,
            Category::SelfEsteem => 3,
            Category::SocialConnections => 4,
            Category::ProductivityAndMotivation => 5,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1..=5 => Some(Self::ALL[(index - 1) as usize]),
            _ => None,
        }
    }

    /// Display title
    pub fn title(self) -> &'static str {
        match self {
            Category::StressAndAnxiety => "Stress and Anxiety",
            Category::HappinessAndWellBeing => "Happiness and Well-being",
            Category::SelfEsteem => "Self-Esteem",
            Category::SocialConnections => "Social Connections",
            Category::ProductivityAndMotivation => "Productivity and Motivation",
        }
    }

}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Reduced scores for one assessment, one per category
///
/// Serialized as `{"1": 3.4, "2": 4.0, ...}` to match the stored record shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<u8, f64>", into = "BTreeMap<u8, f64>")]
pub struct CategoryScores {
    scores: [f64; CATEGORY_COUNT],
}

impl CategoryScores {
    /// Build from one score per category (quiz order), validating the range.
    /// Scores are normalized to one decimal, the precision of a category average.
    pub fn new(scores: [f64; CATEGORY_COUNT]) -> AssessmentResult<Self> {
        let mut normalized = scores;
        for (category, score) in Category::ALL.iter().zip(normalized.iter_mut()) {
            check_score(*category, *score)?;
            *score = round1(*score);
        }
        Ok(Self { scores: normalized })
    }

    /// Reduce a full raw answer sheet into category scores
    ///
    /// Every category must have all five questions answered with values 1..=5.
    pub fn from_answers(sheet: &AnswerSheet) -> AssessmentResult<Self> {
        if let Some(&unknown) = sheet.keys().find(|&&k| Category::from_index(k).is_none()) {
            return Err(AssessmentError::UnknownCategory(unknown));
        }

        let mut scores = [0.0; CATEGORY_COUNT];
        for (slot, category) in scores.iter_mut().zip(Category::ALL) {
            let answers = sheet
                .get(&category.index())
                .ok_or(AssessmentError::MissingCategory(category))?;

            if let Some(&q) = answers.keys().find(|&&q| q == 0 || q as usize > QUESTIONS_PER_SET) {
                return Err(AssessmentError::UnknownQuestion(q));
            }
            if answers.len() != QUESTIONS_PER_SET {
                return Err(AssessmentError::IncompleteSet(category));
            }

            let values: Vec<u8> = answers.values().copied().collect();
            *slot = category_score(&values)?;
        }

        Self::new(scores)
    }

    pub fn get(&self, category: Category) -> f64 {
        self.scores[(category.index() - 1) as usize]
    }

    /// Iterate (category, score) in quiz order
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().zip(self.scores.iter().copied())
    }

    /// Mean of the five category scores, rounded to one decimal
    pub fn average(&self) -> f64 {
        mean_score(&self.scores).unwrap_or(0.0)
    }

    /// Category title → score, the shape sent to the feedback prompt
    pub fn by_title(&self) -> BTreeMap<String, f64> {
        self.iter()
            .map(|(c, s)| (c.title().to_string(), s))
            .collect()
    }
}

impl TryFrom<BTreeMap<u8, f64>> for CategoryScores {
    type Error = AssessmentError;

    fn try_from(map: BTreeMap<u8, f64>) -> Result<Self, Self::Error> {
        if let Some(&unknown) = map.keys().find(|&&k| Category::from_index(k).is_none()) {
            return Err(AssessmentError::UnknownCategory(unknown));
        }

        let mut scores = [0.0; CATEGORY_COUNT];
        for (slot, category) in scores.iter_mut().zip(Category::ALL) {
            *slot = *map
                .get(&category.index())
                .ok_or(AssessmentError::MissingCategory(category))?;
        }
        Self::new(scores)
    }
}

impl From<CategoryScores> for BTreeMap<u8, f64> {
    fn from(scores: CategoryScores) -> Self {
        scores.iter().map(|(c, s)| (c.index(), s)).collect()
    }
}

fn check_score(category: Category, score: f64) -> AssessmentResult<()> {
    let (min, max) = (LIKERT_MIN as f64, LIKERT_MAX as f64);
    if !score.is_finite() || score < min || score > max {
        return Err(AssessmentError::ScoreOutOfRange { category, score });
    }
    Ok(())
}

//! Score helpers shared by the result, feedback and dashboard views.

use std::collections::BTreeMap;

/// Category titles in quiz order; index 0 is category 1
pub const CATEGORY_TITLES: [&str; 5] = [
    "Stress and Anxiety",
    "Happiness and Well-being",
    "Self-Esteem",
    "Social Connections",
    "Productivity and Motivation",
];

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn category_title(index: u8) -> &'static str {
    CATEGORY_TITLES
        .get((index as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("Unknown")
}

/// Mean of the category scores, unrounded
pub fn average(scores: &BTreeMap<u8, f64>) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.values().sum::<f64>() / scores.len() as f64
}

/// Re-key scores by category title, the shape the feedback endpoint takes
pub fn by_title(scores: &BTreeMap<u8, f64>) -> BTreeMap<String, f64> {
    scores
        .iter()
        .map(|(&index, &score)| (category_title(index).to_string(), score))
        .collect()
}

pub fn band_label(score: f64) -> &'static str {
    if score >= 4.5 {
        "Excellent"
    } else if score >= 3.5 {
        "Good"
    } else if score >= 2.5 {
        "Fair"
    } else if score >= 1.5 {
        "Needs Attention"
    } else {
        "Critical"
    }
}

/// Tailwind colour for a score bar
pub fn band_color(score: f64) -> &'static str {
    if score >= 3.5 {
        "bg-green-500"
    } else if score >= 2.5 {
        "bg-yellow-500"
    } else {
        "bg-red-500"
    }
}

/// Tailwind classes for a feedback tag badge
pub fn tag_badge(tag: &str) -> &'static str {
    match tag {
        "normal" => "bg-green-700 text-green-100",
        "needs help" => "bg-yellow-700 text-yellow-100",
        "critical" => "bg-red-700 text-red-100",
        _ => "bg-gray-700 text-gray-100",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: [f64; 5]) -> BTreeMap<u8, f64> {
        (1..=5).zip(values).collect()
    }

    #[test]
    fn test_average_and_rounding() {
        let s = scores([3.0, 3.5, 3.0, 3.5, 3.0]);
        assert!((average(&s) - 3.2).abs() < 1e-9);
        assert_eq!(round1(3.25), 3.3);
        assert_eq!(average(&BTreeMap::new()), 0.0);
    }

    #[test]
    fn test_by_title() {
        let titled = by_title(&scores([1.0, 2.0, 3.0, 4.0, 5.0]));
        assert_eq!(titled["Stress and Anxiety"], 1.0);
        assert_eq!(titled["Productivity and Motivation"], 5.0);
        assert_eq!(category_title(0), "Unknown");
    }

    #[test]
    fn test_bands() {
        assert_eq!(band_label(4.5), "Excellent");
        assert_eq!(band_label(2.5), "Fair");
        assert_eq!(band_label(1.0), "Critical");
    }
}

//! Dashboard
//!
//! Read-then-reduce over a user's stored assessments: a chronological trend,
//! the overall average and a per-category breakdown of the newest record.

use serde::Serialize;

use crate::assessment::{round1, Category, CategoryScores, ScoreBand, CATEGORY_COUNT};
use crate::storage::ResponseRecord;

/// One assessment on the trend chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub response_id: String,
    /// Milliseconds since epoch
    pub timestamp: i64,
    pub scores: CategoryScores,
    /// Unrounded mean of the five category scores
    pub average_score: f64,
}

/// Score of one category in the newest assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: Category,
    pub title: &'static str,
    pub score: f64,
    pub band: ScoreBand,
    pub band_label: &'static str,
}

/// Everything the dashboard page renders
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Mean of the per-assessment averages, rounded to one decimal
    pub overall_average: f64,
    pub band: ScoreBand,
    pub band_label: &'static str,
    pub assessments_taken: usize,
    pub latest_timestamp: i64,
    pub latest: Vec<CategoryBreakdown>,
    /// Oldest first
    pub trend: Vec<TrendPoint>,
}

/// Response body for the dashboard endpoint. `summary` is `None` until the
/// user has completed an assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub summary: Option<DashboardSummary>,
}

impl From<&ResponseRecord> for TrendPoint {
    fn from(record: &ResponseRecord) -> Self {
        let total: f64 = record.answers.iter().map(|(_, s)| s).sum();
        Self {
            response_id: record.id.clone(),
            timestamp: record.timestamp,
            scores: record.answers,
            average_score: total / CATEGORY_COUNT as f64,
        }
    }
}

/// Reduce a user's history. Returns `None` for an empty history.
pub fn summarize(records: &[ResponseRecord]) -> Option<DashboardSummary> {
    let mut trend: Vec<TrendPoint> = records.iter().map(TrendPoint::from).collect();
    // Stable, so equal timestamps keep storage order
    trend.sort_by_key(|p| p.timestamp);

    let latest_point = trend.last()?;

    let overall =
        trend.iter().map(|p| p.average_score).sum::<f64>() / trend.len() as f64;
    // Band from the unrounded mean
    let band = ScoreBand::from_score(overall);

    let latest = latest_point
        .scores
        .iter()
        .map(|(category, score)| {
            let band = ScoreBand::from_score(score);
            CategoryBreakdown {
                category,
                title: category.title(),
                score,
                band,
                band_label: band.label(),
            }
        })
        .collect();

    Some(DashboardSummary {
        overall_average: round1(overall),
        band,
        band_label: band.label(),
        assessments_taken: trend.len(),
        latest_timestamp: latest_point.timestamp,
        latest,
        trend,
    })
}

impl Dashboard {
    pub fn from_records(records: &[ResponseRecord]) -> Self {
        Self {
            summary: summarize(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, timestamp: i64, scores: [f64; 5]) -> ResponseRecord {
        ResponseRecord {
            id: id.to_string(),
            user_id: "u1".to_string(),
            answers: CategoryScores::new(scores).unwrap(),
            timestamp,
        }
    }

    #[test]
    fn test_empty_history_has_no_summary() {
        assert!(summarize(&[]).is_none());
        let json = serde_json::to_value(Dashboard::from_records(&[])).unwrap();
        assert_eq!(json["summary"], serde_json::Value::Null);
    }

    #[test]
    fn test_trend_sorted_and_averaged() {
        let records = vec![
            record("b", 2_000, [5.0, 5.0, 5.0, 5.0, 5.0]),
            record("a", 1_000, [1.0, 2.0, 3.0, 4.0, 5.0]),
        ];

        let summary = summarize(&records).unwrap();
        assert_eq!(summary.assessments_taken, 2);
        assert_eq!(summary.trend[0].response_id, "a");
        assert_eq!(summary.trend[0].average_score, 3.0);
        assert_eq!(summary.trend[1].average_score, 5.0);
        assert_eq!(summary.overall_average, 4.0);
        assert_eq!(summary.band, ScoreBand::Good);
        assert_eq!(summary.latest_timestamp, 2_000);
    }

    #[test]
    fn test_latest_breakdown() {
        let records = vec![
            record("old", 1_000, [5.0; 5]),
            record("new", 5_000, [4.6, 3.5, 2.5, 1.5, 1.0]),
        ];

        let summary = summarize(&records).unwrap();
        let bands: Vec<ScoreBand> = summary.latest.iter().map(|b| b.band).collect();
        assert_eq!(
            bands,
            vec![
                ScoreBand::Excellent,
                ScoreBand::Good,
                ScoreBand::Fair,
                ScoreBand::NeedsAttention,
                ScoreBand::Critical,
            ]
        );
        assert_eq!(summary.latest[0].title, "Stress and Anxiety");
        assert_eq!(summary.latest[3].band_label, "Needs Attention");
    }

    #[test]
    fn test_overall_average_rounded() {
        let records = vec![
            record("a", 1, [3.0; 5]),
            record("b", 2, [3.5; 5]),
        ];
        let summary = summarize(&records).unwrap();
        assert_eq!(summary.overall_average, 3.3);
        assert_eq!(summary.band, ScoreBand::Fair);
    }

    #[test]
    fn test_summary_json_shape() {
        let summary = summarize(&[record("a", 1, [2.0; 5])]).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["overallAverage"], 2.0);
        assert_eq!(json["band"], "needs_attention");
        assert_eq!(json["trend"][0]["averageScore"], 2.0);
        assert_eq!(json["latest"][0]["category"], "stress_and_anxiety");
    }
}

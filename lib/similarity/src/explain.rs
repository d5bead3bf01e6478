//! Response and summary types for match queries
//!
//! Wraps a ranked result list with the category the query was steered
//! toward (if any) and a few aggregate numbers for display.

use crate::matcher::MatchResult;
use serde::Serialize;
use symptomatch_core::Category;

/// Response structure for a match query
#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    /// Category predicted from the query; only set by category-biased ranking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_category: Option<Category>,
    /// Ranked matches, best first
    pub result: Vec<MatchResult>,
    pub stats: MatchStats,
}

impl MatchResponse {
    pub fn new(
        predicted_category: Option<Category>,
        result: Vec<MatchResult>,
        candidates_count: usize,
    ) -> Self {
        let stats = MatchStats::compute(&result, candidates_count);
        Self {
            predicted_category,
            result,
            stats,
        }
    }
}

/// Summary statistics for a match query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchStats {
    /// Number of catalog entries scored
    pub candidates_count: usize,
    /// Number of results returned
    pub results_count: usize,
    /// Average similarity of results
    pub avg_similarity: f32,
    /// Similarity of best result
    pub best_similarity: f32,
    /// Category of best result
    pub top_category: Option<Category>,
}

impl MatchStats {
    /// Compute stats from ranked results
    pub fn compute(results: &[MatchResult], candidates_count: usize) -> Self {
        let Some(best) = results.first() else {
            return Self {
                candidates_count,
                results_count: 0,
                avg_similarity: 0.0,
                best_similarity: 0.0,
                top_category: None,
            };
        };

        let avg_similarity =
            results.iter().map(|r| r.similarity).sum::<f32>() / results.len() as f32;

        Self {
            candidates_count,
            results_count: results.len(),
            avg_similarity,
            best_similarity: best.similarity, // Results are sorted
            top_category: Some(best.category),
        }
    }
}

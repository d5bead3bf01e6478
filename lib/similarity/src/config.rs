//! Match configuration
//!
//! Selects the scorer, the ranking strategy, how many results to keep and
//! the low-confidence floor. Deserializable from JSON so request bodies and
//! config files share one shape.

use crate::distance::Scorer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Similarity at or below which a match is considered low-confidence
pub const SIMILARITY_FLOOR: f32 = 0.1;

/// Default `top_n` for [`RankingStrategy::StrictFloor`]
pub const DEFAULT_STRICT_TOP_N: usize = 5;

/// Default `top_n` for [`RankingStrategy::CategoryBiased`]
pub const DEFAULT_BIASED_TOP_N: usize = 10;

/// How scored entries are filtered and truncated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RankingStrategy {
    /// Drop everything at or below the floor, keep the best `top_n`
    #[default]
    StrictFloor,
    /// Prefer entries in the query's predicted category, then backfill by
    /// similarity, dipping below the floor if needed to reach `top_n`
    CategoryBiased,
}

impl RankingStrategy {
    pub fn default_top_n(&self) -> usize {
        match self {
            RankingStrategy::StrictFloor => DEFAULT_STRICT_TOP_N,
            RankingStrategy::CategoryBiased => DEFAULT_BIASED_TOP_N,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RankingStrategy::StrictFloor => "strict_floor",
            RankingStrategy::CategoryBiased => "category_biased",
        }
    }
}

impl fmt::Display for RankingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RankingStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "strict_floor" | "strict" => Ok(RankingStrategy::StrictFloor),
            "category_biased" | "biased" | "category" => Ok(RankingStrategy::CategoryBiased),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Configuration for a [`crate::Matcher`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    #[serde(default)]
    pub scorer: Scorer,

    #[serde(default)]
    pub strategy: RankingStrategy,

    /// Maximum number of results; `None` uses the strategy default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_n: Option<usize>,

    #[serde(default = "default_floor")]
    pub floor: f32,
}

fn default_floor() -> f32 {
    SIMILARITY_FLOOR
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            scorer: Scorer::default(),
            strategy: RankingStrategy::default(),
            top_n: None,
            floor: SIMILARITY_FLOOR,
        }
    }
}

impl MatchConfig {
    pub fn new(scorer: Scorer, strategy: RankingStrategy) -> Self {
        Self {
            scorer,
            strategy,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: RankingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    /// `top_n` after applying the strategy default
    pub fn effective_top_n(&self) -> usize {
        self.top_n.unwrap_or_else(|| self.strategy.default_top_n())
    }

    /// Validate the configuration
    /// - The floor must lie in [0.0, 1.0)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.floor) {
            return Err(ConfigError::FloorOutOfRange(self.floor));
        }
        Ok(())
    }
}

/// Errors that can occur while building a match configuration
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Similarity floor {0} must be in [0.0, 1.0)")]
    FloorOutOfRange(f32),

    #[error("Unknown scorer '{0}' (expected 'weighted' or 'jaccard')")]
    UnknownScorer(String),

    #[error("Unknown ranking strategy '{0}' (expected 'strict_floor' or 'category_biased')")]
    UnknownStrategy(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.scorer, Scorer::Weighted);
        assert_eq!(config.strategy, RankingStrategy::StrictFloor);
        assert_eq!(config.floor, SIMILARITY_FLOOR);
        assert_eq!(config.effective_top_n(), 5);

        let biased = config.with_strategy(RankingStrategy::CategoryBiased);
        assert_eq!(biased.effective_top_n(), 10);
        assert_eq!(biased.with_top_n(3).effective_top_n(), 3);
    }

    #[test]
    fn test_validate_floor() {
        assert!(MatchConfig::default().validate().is_ok());

        let mut config = MatchConfig::default();
        config.floor = 1.0;
        assert!(matches!(config.validate(), Err(ConfigError::FloorOutOfRange(_))));

        config.floor = -0.1;
        assert!(config.validate().is_err());

        config.floor = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("strict".parse::<RankingStrategy>().unwrap(), RankingStrategy::StrictFloor);
        assert_eq!(
            "category-biased".parse::<RankingStrategy>().unwrap(),
            RankingStrategy::CategoryBiased
        );
        assert!(matches!(
            "random".parse::<RankingStrategy>(),
            Err(ConfigError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn test_partial_json() {
        let config: MatchConfig = serde_json::from_str(r#"{"strategy": "category_biased"}"#).unwrap();
        assert_eq!(config.strategy, RankingStrategy::CategoryBiased);
        assert_eq!(config.scorer, Scorer::Weighted);
        assert_eq!(config.floor, SIMILARITY_FLOOR);
        assert_eq!(config.top_n, None);

        let config: MatchConfig =
            serde_json::from_str(r#"{"scorer": "jaccard", "top_n": 7, "floor": 0.2}"#).unwrap();
        assert_eq!(config.scorer, Scorer::Jaccard);
        assert_eq!(config.effective_top_n(), 7);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = MatchConfig::new(Scorer::Jaccard, RankingStrategy::CategoryBiased).with_top_n(4);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}

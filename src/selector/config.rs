use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::selector::goal::default_stop_words;
use crate::selector::strategy::Strategy;

/// Scoring knobs for one graded strategy: a candidate is kept when
/// `similarity > threshold` and scores `base + bonus * similarity`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyParams {
    pub base: f64,
    pub bonus: f64,
    pub threshold: f64,
}

impl StrategyParams {
    pub const fn new(base: f64, bonus: f64, threshold: f64) -> Self {
        Self { base, bonus, threshold }
    }
}

/// All tunable constants of the selector engine. The defaults are the
/// hand-tuned values the engine has always shipped with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub by_id: StrategyParams,
    pub by_accessibility: StrategyParams,
    pub by_semantic: StrategyParams,
    pub by_text: StrategyParams,
    pub by_class: StrategyParams,
    pub fallback_confidence: f64,
    pub max_confidence: f64,
    pub stop_words: Vec<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            // substring containment, no similarity involved
            by_id: StrategyParams::new(0.99, 0.0, 0.0),
            by_accessibility: StrategyParams::new(0.95, 0.04, 0.5),
            by_semantic: StrategyParams::new(0.85, 0.05, 0.4),
            by_text: StrategyParams::new(0.70, 0.25, 0.4),
            by_class: StrategyParams::new(0.75, 0.04, 0.5),
            fallback_confidence: 0.60,
            max_confidence: 0.995,
            stop_words: default_stop_words(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be within [0, 1], got {value}")]
    OutOfRange { field: String, value: f64 },
}

impl ScoringConfig {
    pub fn params(&self, strategy: Strategy) -> StrategyParams {
        match strategy {
            Strategy::ById => self.by_id,
            Strategy::ByAccessibility => self.by_accessibility,
            Strategy::BySemantic => self.by_semantic,
            Strategy::ByText => self.by_text,
            Strategy::ByClass => self.by_class,
            Strategy::Structural => StrategyParams::new(self.fallback_confidence, 0.0, 0.0),
        }
    }

    /// Reject values that would let a score leave the unit interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for strategy in Strategy::RANKED {
            let p = self.params(strategy);
            check_unit(&format!("{}.base", strategy.name()), p.base)?;
            check_unit(&format!("{}.threshold", strategy.name()), p.threshold)?;
            if p.bonus < 0.0 {
                return Err(ConfigError::OutOfRange {
                    field: format!("{}.bonus", strategy.name()),
                    value: p.bonus,
                });
            }
        }
        check_unit("fallback_confidence", self.fallback_confidence)?;
        check_unit("max_confidence", self.max_confidence)?;
        Ok(())
    }
}

fn check_unit(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field: field.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(ScoringConfig::default().validate(), Ok(()));
    }

    #[test]
    fn threshold_above_one_is_rejected() {
        let mut config = ScoringConfig::default();
        config.by_text.threshold = 1.5;
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "by_text.threshold".into(),
                value: 1.5
            })
        );
    }
}

//! Sub-criterion scoring.
//!
//! Raw responses arrive as loosely typed JSON. Every numeric form is
//! accepted and clamped into [0, 5]; anything else is an input error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::errors::ScoringError;

/// Maximum points for a single sub-criterion.
pub const SUB_CRITERION_MAX: u8 = 5;

/// Score of one sub-criterion, always in [0, 5].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SubCriterionScore(u8);

impl SubCriterionScore {
    pub const ZERO: SubCriterionScore = SubCriterionScore(0);
    pub const MAX: SubCriterionScore = SubCriterionScore(SUB_CRITERION_MAX);

    /// Clamps any integer into the valid range.
    pub fn clamped(raw: i64) -> Self {
        Self(raw.clamp(0, SUB_CRITERION_MAX as i64) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for SubCriterionScore {
    type Error = ScoringError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > SUB_CRITERION_MAX {
            return Err(ScoringError::invalid_input(
                "sub_criterion_score",
                format!("{} exceeds {}", value, SUB_CRITERION_MAX),
            ));
        }
        Ok(Self(value))
    }
}

impl From<SubCriterionScore> for u8 {
    fn from(score: SubCriterionScore) -> Self {
        score.0
    }
}

impl fmt::Display for SubCriterionScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Turns raw responses into sub-criterion scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubCriterionScorer;

impl SubCriterionScorer {
    /// Scores one raw response.
    ///
    /// `key` only labels the error. Absent values, `null` and blank
    /// strings score 0. Fractions truncate toward zero.
    pub fn score(key: &str, raw: Option<&Value>) -> Result<SubCriterionScore, ScoringError> {
        let value = match raw {
            None | Some(Value::Null) => return Ok(SubCriterionScore::ZERO),
            Some(value) => value,
        };

        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(SubCriterionScore::clamped(i))
                } else if let Some(f) = n.as_f64() {
                    Self::from_float(key, f)
                } else {
                    Err(ScoringError::invalid_input(key, "number out of range"))
                }
            }
            Value::String(s) => Self::parse_text(key, s),
            Value::Bool(_) => Err(ScoringError::invalid_input(key, "expected a number, got a boolean")),
            Value::Array(_) => Err(ScoringError::invalid_input(key, "expected a number, got an array")),
            Value::Object(_) => Err(ScoringError::invalid_input(key, "expected a number, got an object")),
            Value::Null => Ok(SubCriterionScore::ZERO),
        }
    }

    fn parse_text(key: &str, text: &str) -> Result<SubCriterionScore, ScoringError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(SubCriterionScore::ZERO);
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Ok(SubCriterionScore::clamped(i));
        }
        match trimmed.parse::<f64>() {
            Ok(f) => Self::from_float(key, f),
            Err(_) => Err(ScoringError::invalid_input(
                key,
                format!("'{}' is not a number", trimmed),
            )),
        }
    }

    fn from_float(key: &str, f: f64) -> Result<SubCriterionScore, ScoringError> {
        if !f.is_finite() {
            return Err(ScoringError::invalid_input(key, "number is not finite"));
        }
        // `as` saturates, so huge magnitudes still clamp correctly.
        Ok(SubCriterionScore::clamped(f.trunc() as i64))
    }
}

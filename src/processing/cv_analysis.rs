//! CV analysis responses
//!
//! Only the envelope is checked. The parsed tree is kept exactly as the model
//! produced it; university matches are normalized when read.

use crate::config::NormalizerConfig;
use crate::error::ResponseError;
use crate::processing::fields::{self, Synonyms};
use crate::processing::recommendations::{normalize_entry, RecommendationEntry};
use serde::Serialize;
use serde_json::Value;

const USER_PROFILE_KEYS: Synonyms = &["userProfile", "user_profile"];
const RECOMMENDATION_KEYS: Synonyms = &["recommendations"];
const UNIVERSITY_MATCH_KEYS: Synonyms = &["universityMatches", "university_matches", "universities"];

static NULL: Value = Value::Null;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CvAnalysis {
    raw: Value,
}

impl CvAnalysis {
    /// Accept `value` if it carries both a user profile and recommendations.
    pub fn from_value(value: Value) -> Result<Self, ResponseError> {
        let obj = value.as_object().ok_or(ResponseError::NotAnObject)?;

        if fields::first_present(obj, USER_PROFILE_KEYS).is_none() {
            return Err(ResponseError::MissingKey("userProfile"));
        }
        if fields::first_present(obj, RECOMMENDATION_KEYS).is_none() {
            return Err(ResponseError::MissingKey("recommendations"));
        }

        Ok(Self { raw: value })
    }

    fn lookup(&self, keys: &[&str]) -> &Value {
        self.raw
            .as_object()
            .and_then(|obj| fields::first_present(obj, keys))
            .unwrap_or(&NULL)
    }

    /// Extracted academic, test and skill facts.
    pub fn user_profile(&self) -> &Value {
        self.lookup(USER_PROFILE_KEYS)
    }

    /// Strengths, weaknesses, suggestions and strategy.
    pub fn recommendations(&self) -> &Value {
        self.lookup(RECOMMENDATION_KEYS)
    }

    pub fn university_matches(&self) -> Vec<RecommendationEntry> {
        self.university_matches_with(&NormalizerConfig::default())
    }

    pub fn university_matches_with(&self, config: &NormalizerConfig) -> Vec<RecommendationEntry> {
        match self.lookup(UNIVERSITY_MATCH_KEYS) {
            Value::Array(items) => items.iter().map(|item| normalize_entry(item, config)).collect(),
            _ => Vec::new(),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    pub fn into_value(self) -> Value {
        self.raw
    }
}

//! Entry points that turn untrusted AI responses into canonical records
//!
//! The `parse_*` functions never fail: anything unusable is logged and comes
//! back as `None`. The `try_parse_*` functions report why.

use crate::config::NormalizerConfig;
use crate::error::ResponseError;
use crate::processing::cv_analysis::CvAnalysis;
use crate::processing::extract::AiResponse;
use crate::processing::recommendations::{
    locate_entries, normalize_entry, resolve_analysis, RecommendationEntry, RecommendationSet,
};
use log::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct ResponseNormalizer {
    config: NormalizerConfig,
}

impl ResponseNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn try_parse_recommendations(
        &self,
        input: impl Into<AiResponse>,
    ) -> Result<RecommendationSet, ResponseError> {
        let response: AiResponse = input.into();
        let root = response.into_json()?;
        let raw_entries = locate_entries(&root).ok_or(ResponseError::MissingEntries)?;
        debug!("Normalizing {} recommendation entries", raw_entries.len());

        let entries: Vec<RecommendationEntry> = raw_entries
            .iter()
            .map(|raw| normalize_entry(raw, &self.config))
            .collect();
        let analysis = resolve_analysis(&root, &entries, &self.config);

        Ok(RecommendationSet { entries, analysis })
    }

    /// Canonical recommendation set, or `None` when the response is unusable.
    pub fn parse_recommendations(&self, input: impl Into<AiResponse>) -> Option<RecommendationSet> {
        match self.try_parse_recommendations(input) {
            Ok(set) => Some(set),
            Err(e) => {
                warn!("Discarding recommendation response: {}", e);
                None
            }
        }
    }

    pub fn try_parse_cv_analysis(&self, input: impl Into<AiResponse>) -> Result<CvAnalysis, ResponseError> {
        let response: AiResponse = input.into();
        let root = response.into_json()?;
        CvAnalysis::from_value(root)
    }

    /// CV analysis with both required sections, or `None`.
    pub fn parse_cv_analysis(&self, input: impl Into<AiResponse>) -> Option<CvAnalysis> {
        match self.try_parse_cv_analysis(input) {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                warn!("Discarding CV analysis response: {}", e);
                None
            }
        }
    }
}

/// [`ResponseNormalizer::parse_recommendations`] with default settings.
pub fn parse_recommendations(input: impl Into<AiResponse>) -> Option<RecommendationSet> {
    ResponseNormalizer::new().parse_recommendations(input)
}

/// [`ResponseNormalizer::parse_cv_analysis`] with default settings.
pub fn parse_cv_analysis(input: impl Into<AiResponse>) -> Option<CvAnalysis> {
    ResponseNormalizer::new().parse_cv_analysis(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::category::Category;
    use serde_json::json;

    #[test]
    fn test_fenced_response() {
        let text = "Some text\n```json\n{\"universities\":[{\"name\":\"X\",\"program\":\"Y\",\"location\":\"Z\",\"match_score\":0.9,\"category\":\"reach\"}]}\n```\nMore text";
        let set = parse_recommendations(text).unwrap();
        assert_eq!(set.entries.len(), 1);
        assert_eq!(set.entries[0].name, "X");
        assert_eq!(set.entries[0].match_score, 90);
        assert_eq!(set.entries[0].category, Category::Reach);
    }

    #[test]
    fn test_unusable_responses() {
        assert!(parse_recommendations("not json at all").is_none());
        assert!(parse_recommendations("{}").is_none());
        assert_eq!(
            ResponseNormalizer::new().try_parse_recommendations("{}").unwrap_err(),
            ResponseError::MissingEntries
        );
    }

    #[test]
    fn test_structured_input_skips_extraction() {
        let set = parse_recommendations(json!([{ "name": "MIT", "category": "safe" }])).unwrap();
        assert_eq!(set.entries[0].category, Category::Safety);
        assert_eq!(set.analysis.summary().unwrap().safety_count, 1);
    }

    #[test]
    fn test_custom_default_score() {
        let normalizer = ResponseNormalizer::with_config(NormalizerConfig {
            default_match_score: 60,
            ..NormalizerConfig::default()
        });
        let set = normalizer.parse_recommendations("{\"recommendations\": [{}]}").unwrap();
        assert_eq!(set.entries[0].match_score, 60);
    }

    #[test]
    fn test_cv_analysis() {
        assert!(parse_cv_analysis(json!({ "foo": "bar" })).is_none());
        assert!(parse_cv_analysis(json!({ "user_profile": {}, "recommendations": {} })).is_some());
        assert!(parse_cv_analysis("```json\n{\"userProfile\": {}, \"recommendations\": []}\n```").is_some());
        assert!(parse_cv_analysis("garbage").is_none());
    }
}

//! Report structures wrapping each command's result

use crate::processing::cv_analysis::CvAnalysis;
use crate::processing::recommendations::{RecommendationEntry, RecommendationSet};
use crate::processing::scoring::ScoredProfile;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub body: ReportBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum ReportBody {
    Recommendations(RecommendationSet),
    CvAnalysis {
        analysis: CvAnalysis,
        university_matches: Vec<RecommendationEntry>,
    },
    Scores(Vec<ScoredProfile>),
    /// The AI response could not be used.
    Unavailable { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub source: String,
}

impl Report {
    pub fn new(source: impl Into<String>, body: ReportBody) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                source: source.into(),
            },
            body,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self.body, ReportBody::Unavailable { .. })
    }
}

//! grad-match library: AI response normalization and profile match scoring

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{GradMatchError, ResponseError, Result};
pub use processing::category::{normalize_category, Category};
pub use processing::cv_analysis::CvAnalysis;
pub use processing::extract::AiResponse;
pub use processing::normalizer::{parse_cv_analysis, parse_recommendations, ResponseNormalizer};
pub use processing::recommendations::{
    Analysis, MatchAnalysis, RecommendationEntry, RecommendationSet,
};
pub use processing::scoring::{compute_match_score, CandidateProfile, MatchScorer, ScoredProfile};

//! Heuristic profile compatibility scoring
//!
//! Scores are built from profile completeness plus a small random jitter, so
//! identical profiles can score differently between calls. Callers that sort
//! by score should compute it once and keep it (see [`MatchScorer::rank`]).

use crate::config::ScoringConfig;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

/// Profile fields consumed by the scorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateProfile {
    #[serde(alias = "full_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub bio: Option<String>,
    #[serde(alias = "research_interests", deserialize_with = "nullable_list")]
    pub research_interests: Vec<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub skills: Vec<String>,
    pub gpa: Option<f64>,
    #[serde(alias = "current_institution")]
    pub current_institution: Option<String>,
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// A profile with the score it was given, computed once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredProfile {
    pub profile: CandidateProfile,
    pub score: u8,
}

#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    weights: ScoringConfig,
}

impl MatchScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(weights: ScoringConfig) -> Self {
        Self { weights }
    }

    /// Base score plus completeness bonuses, before jitter and clamping.
    pub fn feature_score(&self, profile: &CandidateProfile) -> i32 {
        let w = &self.weights;
        let mut score = w.base_score;

        if has_text(&profile.bio) {
            score = score.saturating_add(w.bio_bonus);
        }
        if !profile.research_interests.is_empty() {
            score = score.saturating_add(w.research_interests_bonus);
        }
        if !profile.skills.is_empty() {
            score = score.saturating_add(w.skills_bonus);
        }
        if profile.gpa.is_some_and(|gpa| gpa > w.gpa_threshold) {
            score = score.saturating_add(w.gpa_bonus);
        }
        if has_text(&profile.current_institution) {
            score = score.saturating_add(w.institution_bonus);
        }

        score
    }

    /// Map a draw in `[0, 1)` to a jitter in `jitter_min .. jitter_min + jitter_span`.
    pub fn jitter(&self, draw: f64) -> i32 {
        let span = self.weights.jitter_span as i64;
        if span == 0 || !draw.is_finite() {
            return 0;
        }

        let step = ((draw * span as f64).floor() as i64).clamp(0, span - 1);
        (self.weights.jitter_min as i64 + step).clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Score using `random` as the source of draws in `[0, 1)`.
    pub fn compute_match_score_with<F>(&self, profile: &CandidateProfile, mut random: F) -> u8
    where
        F: FnMut() -> f64,
    {
        let total = self.feature_score(profile).saturating_add(self.jitter(random()));
        total.clamp(0, 100) as u8
    }

    pub fn compute_match_score(&self, profile: &CandidateProfile) -> u8 {
        let mut rng = rand::thread_rng();
        self.compute_match_score_with(profile, || rng.gen::<f64>())
    }

    /// Score every profile exactly once and order them best first. Equal
    /// scores keep their input order.
    pub fn rank<F>(&self, profiles: Vec<CandidateProfile>, mut random: F) -> Vec<ScoredProfile>
    where
        F: FnMut() -> f64,
    {
        let mut scored: Vec<ScoredProfile> = profiles
            .into_iter()
            .map(|profile| {
                let score = self.compute_match_score_with(&profile, &mut random);
                ScoredProfile { profile, score }
            })
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }
}

/// [`MatchScorer::compute_match_score`] with default weights.
pub fn compute_match_score(profile: &CandidateProfile) -> u8 {
    MatchScorer::new().compute_match_score(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn complete_profile() -> CandidateProfile {
        CandidateProfile {
            name: Some("Ada".to_string()),
            bio: Some("Aspiring researcher".to_string()),
            research_interests: vec!["NLP".to_string()],
            skills: vec!["Rust".to_string()],
            gpa: Some(3.9),
            current_institution: Some("State University".to_string()),
        }
    }

    #[test]
    fn test_feature_weights() {
        let scorer = MatchScorer::new();
        assert_eq!(scorer.feature_score(&CandidateProfile::default()), 50);
        assert_eq!(scorer.feature_score(&complete_profile()), 100);

        let profile = CandidateProfile {
            bio: Some("   ".to_string()),
            gpa: Some(3.5),
            skills: vec!["Python".to_string()],
            ..CandidateProfile::default()
        };
        assert_eq!(scorer.feature_score(&profile), 60);
    }

    #[test]
    fn test_jitter_range_is_minus_ten_to_nine() {
        let scorer = MatchScorer::new();
        assert_eq!(scorer.jitter(0.0), -10);
        assert_eq!(scorer.jitter(0.5), 0);
        assert_eq!(scorer.jitter(0.999_999), 9);
        assert_eq!(scorer.jitter(1.0), 9);
        assert_eq!(scorer.jitter(f64::NAN), 0);
    }

    #[test]
    fn test_injected_draws_are_deterministic() {
        let scorer = MatchScorer::new();
        let empty = CandidateProfile::default();
        assert_eq!(scorer.compute_match_score_with(&empty, || 0.0), 40);
        assert_eq!(scorer.compute_match_score_with(&empty, || 0.99), 59);
        assert_eq!(scorer.compute_match_score_with(&complete_profile(), || 0.99), 100);
        assert_eq!(scorer.compute_match_score_with(&complete_profile(), || 0.0), 90);
    }

    #[test]
    fn test_clamps_to_zero() {
        let scorer = MatchScorer::with_config(ScoringConfig {
            base_score: 0,
            ..ScoringConfig::default()
        });
        assert_eq!(scorer.compute_match_score_with(&CandidateProfile::default(), || 0.0), 0);
    }

    #[test]
    fn test_extreme_weights_saturate() {
        let scorer = MatchScorer::with_config(ScoringConfig {
            base_score: i32::MAX,
            bio_bonus: i32::MAX,
            research_interests_bonus: i32::MAX,
            ..ScoringConfig::default()
        });
        let profile = complete_profile();
        assert_eq!(scorer.feature_score(&profile), i32::MAX);
        assert_eq!(scorer.compute_match_score_with(&profile, || 0.99), 100);

        let scorer = MatchScorer::with_config(ScoringConfig {
            base_score: i32::MIN,
            skills_bonus: i32::MIN,
            ..ScoringConfig::default()
        });
        assert_eq!(scorer.compute_match_score_with(&profile, || 0.0), 0);
    }

    #[test]
    fn test_thousand_trials_stay_in_bounds() {
        let scorer = MatchScorer::new();
        for profile in [CandidateProfile::default(), complete_profile()] {
            for _ in 0..1000 {
                let score = scorer.compute_match_score(&profile);
                assert!(score <= 100);
            }
        }
    }

    #[test]
    fn test_rank_scores_once_and_sorts() {
        let scorer = MatchScorer::new();
        let profiles = vec![CandidateProfile::default(), complete_profile(), CandidateProfile::default()];

        let mut calls = 0;
        let ranked = scorer.rank(profiles, || {
            calls += 1;
            0.5
        });

        assert_eq!(calls, 3);
        assert_eq!(ranked[0].score, 100);
        assert_eq!(ranked[0].profile.name.as_deref(), Some("Ada"));
        assert_eq!(ranked[1].score, 50);
        assert_eq!(ranked[2].score, 50);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let scorer = MatchScorer::new();
        let profile = complete_profile();

        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let first: Vec<u8> = (0..20).map(|_| scorer.compute_match_score_with(&profile, || a.gen())).collect();
        let second: Vec<u8> = (0..20).map(|_| scorer.compute_match_score_with(&profile, || b.gen())).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_profile_from_store_record() {
        let profile: CandidateProfile = serde_json::from_str(
            r#"{"full_name": "Lin", "bio": null, "research_interests": null, "skills": ["Go"], "gpa": 3.7, "current_institution": "NTU", "email": "x@y.z"}"#,
        )
        .unwrap();
        assert_eq!(profile.name.as_deref(), Some("Lin"));
        assert!(profile.research_interests.is_empty());
        assert_eq!(MatchScorer::new().feature_score(&profile), 75);
    }

    proptest! {
        #[test]
        fn score_always_within_bounds(
            bio in proptest::option::of(".*"),
            interests in proptest::collection::vec(".*", 0..3),
            skills in proptest::collection::vec(".*", 0..3),
            gpa in proptest::option::of(-10.0f64..10.0),
            institution in proptest::option::of(".*"),
            draw in 0.0f64..1.0,
        ) {
            let profile = CandidateProfile {
                name: None,
                bio,
                research_interests: interests,
                skills,
                gpa,
                current_institution: institution,
            };
            let score = MatchScorer::new().compute_match_score_with(&profile, || draw);
            prop_assert!(score <= 100);
        }
    }
}

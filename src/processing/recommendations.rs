//! University recommendation records and their normalization

use crate::config::NormalizerConfig;
use crate::processing::category::{normalize_category, Category};
use crate::processing::field_of_study::primary_field;
use crate::processing::fields::{self, Synonyms};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const UNKNOWN_UNIVERSITY: &str = "Unknown University";
pub const UNKNOWN_PROGRAM: &str = "Unknown Program";
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

const NAME_KEYS: Synonyms = &["name", "university_name", "universityName", "university", "institution"];
const PROGRAM_KEYS: Synonyms = &["program", "program_name", "programName", "degree"];
const LOCATION_KEYS: Synonyms = &["location", "city", "country"];
const SCORE_KEYS: Synonyms = &["match_score", "matchScore", "score", "match_percentage"];
const CATEGORY_KEYS: Synonyms = &["category", "tier", "type"];
const RANKING_KEYS: Synonyms = &["ranking", "rank"];
const DEADLINE_KEYS: Synonyms = &["application_deadline", "applicationDeadline", "deadline"];
const WEBSITE_KEYS: Synonyms = &["website", "url"];
const WHY_KEYS: Synonyms = &["why_recommended", "whyRecommended", "strengths", "reasons"];
const CONCERN_KEYS: Synonyms = &["concerns", "weaknesses", "challenges"];
const RESEARCH_KEYS: Synonyms = &["research_areas", "researchAreas"];
const FACULTY_KEYS: Synonyms = &["faculty_highlights", "facultyHighlights", "notable_faculty"];
const REQUIREMENT_KEYS: Synonyms = &["admission_requirements", "admissionRequirements", "requirements"];

const GPA_KEYS: Synonyms = &["gpa", "min_gpa", "minGpa"];
const GRE_KEYS: Synonyms = &["gre", "gre_score"];
const TOEFL_KEYS: Synonyms = &["toefl", "toefl_score"];
const IELTS_KEYS: Synonyms = &["ielts", "ielts_score"];

/// Where the entries list may live in a response, in priority order. A
/// top-level array is tried between `university_matches` and `recommendations`.
const ENTRY_LIST_KEYS: Synonyms = &["universities", "university_matches"];
const FALLBACK_ENTRY_LIST_KEY: &str = "recommendations";

/// One normalized university/program match.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationEntry {
    pub name: String,
    pub program: String,
    pub location: String,
    pub match_score: u8,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub why_recommended: Vec<String>,
    pub concerns: Vec<String>,
    pub admission_requirements: AdmissionRequirements,
    pub research_areas: Vec<String>,
    pub faculty_highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdmissionRequirements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toefl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ielts: Option<String>,
}

/// Summary counts over a recommendation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MatchAnalysis {
    #[serde(alias = "total_matches")]
    pub total_matches: usize,
    #[serde(alias = "reach_count")]
    pub reach_count: usize,
    #[serde(alias = "target_count")]
    pub target_count: usize,
    #[serde(alias = "safety_count")]
    pub safety_count: usize,
    #[serde(alias = "primary_field")]
    pub primary_field: String,
    #[serde(alias = "confidence_score")]
    pub confidence_score: u32,
}

/// Analysis attached to a recommendation set.
///
/// A block supplied by the model is kept as-is even when its counts disagree
/// with the entries; it is typed when it has the canonical shape and raw
/// otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Analysis {
    Summary(MatchAnalysis),
    Raw(Value),
}

impl Analysis {
    pub fn summary(&self) -> Option<&MatchAnalysis> {
        match self {
            Analysis::Summary(summary) => Some(summary),
            Analysis::Raw(_) => None,
        }
    }

    fn from_supplied(value: &Value) -> Self {
        serde_json::from_value::<MatchAnalysis>(value.clone())
            .map(Analysis::Summary)
            .unwrap_or_else(|_| Analysis::Raw(value.clone()))
    }
}

/// A parsed recommendation response: entries in source order plus analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationSet {
    #[serde(rename = "universities")]
    pub entries: Vec<RecommendationEntry>,
    pub analysis: Analysis,
}

impl RecommendationSet {
    pub fn count(&self, category: Category) -> usize {
        self.entries.iter().filter(|e| e.category == category).count()
    }

    /// Display copy ordered by match score, highest first. Equal scores keep
    /// their source order.
    pub fn sorted_by_match_score(&self) -> Vec<&RecommendationEntry> {
        let mut sorted: Vec<&RecommendationEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        sorted
    }
}

/// Collapse a raw score into 0..=100. Values at or below 1 are fractions.
pub fn normalize_match_score(raw: Option<&Value>, default: u8) -> u8 {
    let Some(parsed) = raw.and_then(fields::lenient_f64) else {
        return default;
    };

    let scaled = if parsed <= 1.0 { parsed * 100.0 } else { parsed };
    scaled.round().clamp(0.0, 100.0) as u8
}

fn admission_requirements(obj: &Map<String, Value>) -> AdmissionRequirements {
    let Some(Value::Object(reqs)) = fields::first_present(obj, REQUIREMENT_KEYS) else {
        return AdmissionRequirements::default();
    };

    AdmissionRequirements {
        gpa: fields::first_text(reqs, GPA_KEYS),
        gre: fields::first_text(reqs, GRE_KEYS),
        toefl: fields::first_text(reqs, TOEFL_KEYS),
        ielts: fields::first_text(reqs, IELTS_KEYS),
    }
}

/// Build a complete entry from whatever the model produced. Never fails:
/// missing or malformed fields take their documented defaults.
pub fn normalize_entry(raw: &Value, config: &NormalizerConfig) -> RecommendationEntry {
    let empty = Map::new();
    let obj = match raw {
        Value::Object(map) => map,
        _ => &empty,
    };

    // A bare string entry is taken as the university name.
    let name = match raw {
        Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => fields::text_or(obj, NAME_KEYS, UNKNOWN_UNIVERSITY),
    };

    let score_source = fields::first_present(obj, SCORE_KEYS);
    let match_score = normalize_match_score(score_source, config.default_match_score);
    if score_source.map_or(true, |v| fields::lenient_f64(v).is_none()) {
        debug!("Defaulting match score to {} for '{}'", match_score, name);
    }

    let category = fields::first_text(obj, CATEGORY_KEYS)
        .map(|text| normalize_category(&text))
        .unwrap_or_default();

    RecommendationEntry {
        program: fields::text_or(obj, PROGRAM_KEYS, UNKNOWN_PROGRAM),
        location: fields::text_or(obj, LOCATION_KEYS, UNKNOWN_LOCATION),
        match_score,
        category,
        ranking: fields::first_text(obj, RANKING_KEYS),
        application_deadline: fields::first_text(obj, DEADLINE_KEYS),
        website: fields::first_text(obj, WEBSITE_KEYS),
        why_recommended: fields::reason_list(obj, WHY_KEYS),
        concerns: fields::reason_list(obj, CONCERN_KEYS),
        admission_requirements: admission_requirements(obj),
        research_areas: fields::list_only(obj, RESEARCH_KEYS),
        faculty_highlights: fields::list_only(obj, FACULTY_KEYS),
        name,
    }
}

/// Find the entries list: `universities`, `university_matches`, the value
/// itself when it is a list, then `recommendations`.
pub fn locate_entries(root: &Value) -> Option<&Vec<Value>> {
    if let Value::Object(obj) = root {
        for key in ENTRY_LIST_KEYS {
            if let Some(list) = obj.get(*key).and_then(Value::as_array) {
                debug!("Entries found under '{}'", key);
                return Some(list);
            }
        }
    }

    if let Value::Array(list) = root {
        debug!("Response is a bare entries list");
        return Some(list);
    }

    let list = root.get(FALLBACK_ENTRY_LIST_KEY)?.as_array()?;
    debug!("Entries found under '{}'", FALLBACK_ENTRY_LIST_KEY);
    Some(list)
}

/// Derive counts, primary field and confidence from normalized entries.
pub fn synthesize_analysis(entries: &[RecommendationEntry], config: &NormalizerConfig) -> MatchAnalysis {
    let count = |category: Category| entries.iter().filter(|e| e.category == category).count();
    let reach_count = count(Category::Reach);
    let target_count = count(Category::Target);
    let safety_count = count(Category::Safety);

    let full_spread = reach_count > 0 && target_count > 0 && safety_count > 0;

    MatchAnalysis {
        total_matches: entries.len(),
        reach_count,
        target_count,
        safety_count,
        primary_field: primary_field(entries.iter().map(|e| e.program.as_str())),
        confidence_score: if full_spread {
            config.confidence_full_spread
        } else {
            config.confidence_partial_spread
        },
    }
}

/// Supplied analysis wins over derived analysis; null counts as absent.
pub fn resolve_analysis(root: &Value, entries: &[RecommendationEntry], config: &NormalizerConfig) -> Analysis {
    match root.get("analysis") {
        Some(supplied) if !supplied.is_null() => {
            debug!("Using analysis supplied by the response");
            Analysis::from_supplied(supplied)
        }
        _ => {
            debug!("Deriving analysis from {} entries", entries.len());
            Analysis::Summary(synthesize_analysis(entries, config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> NormalizerConfig {
        NormalizerConfig::default()
    }

    #[test]
    fn test_score_fraction_and_percentage() {
        assert_eq!(normalize_match_score(Some(&json!(0.85)), 75), 85);
        assert_eq!(normalize_match_score(Some(&json!(85)), 75), 85);
        assert_eq!(normalize_match_score(Some(&json!(150)), 75), 100);
        assert_eq!(normalize_match_score(Some(&json!(-5)), 75), 0);
        assert_eq!(normalize_match_score(Some(&json!(1)), 75), 100);
        assert_eq!(normalize_match_score(Some(&json!(84.5)), 75), 85);
        assert_eq!(normalize_match_score(Some(&json!("92%")), 75), 92);
        assert_eq!(normalize_match_score(Some(&json!("excellent")), 75), 75);
        assert_eq!(normalize_match_score(None, 75), 75);
    }

    #[test]
    fn test_entry_defaults() {
        let entry = normalize_entry(&json!({}), &config());
        assert_eq!(entry.name, UNKNOWN_UNIVERSITY);
        assert_eq!(entry.program, UNKNOWN_PROGRAM);
        assert_eq!(entry.location, UNKNOWN_LOCATION);
        assert_eq!(entry.match_score, 75);
        assert_eq!(entry.category, Category::Target);
        assert!(entry.ranking.is_none());
        assert!(entry.why_recommended.is_empty());
        assert!(entry.research_areas.is_empty());
        assert_eq!(entry.admission_requirements, AdmissionRequirements::default());
    }

    #[test]
    fn test_entry_synonyms() {
        let raw = json!({
            "university_name": "ETH Zurich",
            "program_name": "MSc Robotics",
            "city": "Zurich",
            "score": "0.7",
            "tier": "Backup",
            "rank": 7,
            "strengths": "Strong robotics lab",
            "weaknesses": ["", "High cost of living"],
            "requirements": { "min_gpa": "3.5", "toefl_score": 100 },
            "researchAreas": ["Legged locomotion"],
            "faculty_highlights": "Prof. X"
        });

        let entry = normalize_entry(&raw, &config());
        assert_eq!(entry.name, "ETH Zurich");
        assert_eq!(entry.program, "MSc Robotics");
        assert_eq!(entry.location, "Zurich");
        assert_eq!(entry.match_score, 70);
        assert_eq!(entry.category, Category::Safety);
        assert_eq!(entry.ranking.as_deref(), Some("7"));
        assert_eq!(entry.why_recommended, vec!["Strong robotics lab"]);
        assert_eq!(entry.concerns, vec!["High cost of living"]);
        assert_eq!(entry.admission_requirements.gpa.as_deref(), Some("3.5"));
        assert_eq!(entry.admission_requirements.toefl.as_deref(), Some("100"));
        assert!(entry.admission_requirements.gre.is_none());
        assert_eq!(entry.research_areas, vec!["Legged locomotion"]);
        assert!(entry.faculty_highlights.is_empty());
    }

    #[test]
    fn test_first_present_score_wins_even_if_not_numeric() {
        let raw = json!({ "match_score": "high", "score": 90 });
        assert_eq!(normalize_entry(&raw, &config()).match_score, 75);
    }

    #[test]
    fn test_string_entry_becomes_name() {
        let entry = normalize_entry(&json!("University of Toronto"), &config());
        assert_eq!(entry.name, "University of Toronto");
        assert_eq!(entry.program, UNKNOWN_PROGRAM);
    }

    #[test]
    fn test_locate_entries_priority() {
        let root = json!({
            "recommendations": [{ "name": "C" }],
            "university_matches": [{ "name": "B" }],
            "universities": [{ "name": "A" }]
        });
        assert_eq!(locate_entries(&root).unwrap()[0]["name"], "A");

        let root = json!({ "recommendations": [{ "name": "C" }], "university_matches": [{ "name": "B" }] });
        assert_eq!(locate_entries(&root).unwrap()[0]["name"], "B");

        let root = json!([{ "name": "D" }]);
        assert_eq!(locate_entries(&root).unwrap()[0]["name"], "D");

        let root = json!({ "universities": "none", "recommendations": [{ "name": "C" }] });
        assert_eq!(locate_entries(&root).unwrap()[0]["name"], "C");

        assert!(locate_entries(&json!({})).is_none());
    }

    #[test]
    fn test_synthesized_confidence() {
        let entries: Vec<RecommendationEntry> = ["reach", "target", "safety"]
            .iter()
            .map(|c| normalize_entry(&json!({ "category": c, "program": "MS Computer Science" }), &config()))
            .collect();

        let analysis = synthesize_analysis(&entries, &config());
        assert_eq!(analysis.total_matches, 3);
        assert_eq!(analysis.confidence_score, 85);
        assert_eq!(analysis.primary_field, "Computer Science");

        let analysis = synthesize_analysis(&entries[..2], &config());
        assert_eq!(analysis.confidence_score, 70);
        assert_eq!(analysis.safety_count, 0);
    }

    #[test]
    fn test_supplied_analysis_kept_even_if_inconsistent() {
        let root = json!({
            "analysis": {
                "total_matches": 10,
                "reach_count": 1,
                "target_count": 1,
                "safety_count": 1,
                "primary_field": "Law",
                "confidence_score": 99
            }
        });
        let analysis = resolve_analysis(&root, &[], &config());
        let summary = analysis.summary().unwrap();
        assert_eq!(summary.total_matches, 10);
        assert_eq!(summary.primary_field, "Law");
    }

    #[test]
    fn test_unusual_supplied_analysis_stays_raw() {
        let root = json!({ "analysis": { "notes": "looks good" } });
        let analysis = resolve_analysis(&root, &[], &config());
        assert_eq!(analysis, Analysis::Raw(json!({ "notes": "looks good" })));
    }

    #[test]
    fn test_sorted_view_leaves_source_order() {
        let entries = vec![
            normalize_entry(&json!({ "name": "A", "match_score": 60 }), &config()),
            normalize_entry(&json!({ "name": "B", "match_score": 90 }), &config()),
            normalize_entry(&json!({ "name": "C", "match_score": 60 }), &config()),
        ];
        let analysis = Analysis::Summary(synthesize_analysis(&entries, &config()));
        let set = RecommendationSet { entries, analysis };

        let names: Vec<&str> = set.sorted_by_match_score().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(set.entries[0].name, "A");
    }
}

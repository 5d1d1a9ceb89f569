//! Prompt templates asking the model for JSON the normalizer understands

use crate::processing::scoring::CandidateProfile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub university_matching: String,
    pub cv_analysis: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            university_matching: UNIVERSITY_MATCHING_TEMPLATE.to_string(),
            cv_analysis: CV_ANALYSIS_TEMPLATE.to_string(),
        }
    }
}

/// Parameters for the university matching prompt
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchingParams {
    pub profile: CandidateProfile,
    pub target_field: Option<String>,
    pub max_results: usize,
}

fn or_not_provided(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "not provided",
    }
}

fn join_or_not_provided(items: &[String]) -> String {
    if items.is_empty() {
        "not provided".to_string()
    } else {
        items.join(", ")
    }
}

impl PromptTemplates {
    pub fn render_university_matching(&self, params: &MatchingParams) -> String {
        let profile = &params.profile;
        let gpa = profile
            .gpa
            .map(|g| format!("{:.2}", g))
            .unwrap_or_else(|| "not provided".to_string());
        let max_results = if params.max_results == 0 { 6 } else { params.max_results };

        self.university_matching
            .replace("{bio}", or_not_provided(profile.bio.as_deref()))
            .replace("{institution}", or_not_provided(profile.current_institution.as_deref()))
            .replace("{gpa}", &gpa)
            .replace("{interests}", &join_or_not_provided(&profile.research_interests))
            .replace("{skills}", &join_or_not_provided(&profile.skills))
            .replace("{field}", or_not_provided(params.target_field.as_deref()))
            .replace("{max_results}", &max_results.to_string())
    }

    pub fn render_cv_analysis(&self, cv_text: &str) -> String {
        self.cv_analysis.replace("{cv}", cv_text.trim())
    }
}

const UNIVERSITY_MATCHING_TEMPLATE: &str = r#"TASK: Recommend graduate programs for the applicant below.

<APPLICANT>
Bio: {bio}
Current institution: {institution}
GPA: {gpa}
Research interests: {interests}
Skills: {skills}
Preferred field: {field}
</APPLICANT>

Recommend up to {max_results} programs with a mix of reach, target and safety options.
Respond with a single ```json fenced block of this shape:

{
  "universities": [
    {
      "name": "University name",
      "program": "Program name",
      "location": "City, Country",
      "match_score": 0.0-1.0,
      "category": "reach" | "target" | "safety",
      "ranking": "optional ranking",
      "why_recommended": ["reason"],
      "concerns": ["concern"],
      "admission_requirements": { "gpa": "", "gre": "", "toefl": "", "ielts": "" },
      "research_areas": ["area"],
      "faculty_highlights": ["faculty member"]
    }
  ]
}"#;

const CV_ANALYSIS_TEMPLATE: &str = r#"TASK: Analyze the CV below for graduate school applications.

<CV>
{cv}
</CV>

Respond with a single ```json fenced block of this shape:

{
  "userProfile": {
    "education": [], "gpa": "", "testScores": {}, "skills": [], "researchExperience": []
  },
  "recommendations": {
    "strengths": [], "weaknesses": [], "suggestions": [], "strategy": ""
  },
  "universityMatches": [
    { "name": "", "program": "", "location": "", "match_score": 0.0-1.0, "category": "reach" | "target" | "safety" }
  ]
}"#;

//! Output formatters for reports

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{GradMatchError, Result};
use crate::output::report::{Report, ReportBody};
use crate::processing::category::Category;
use crate::processing::recommendations::{Analysis, RecommendationEntry, RecommendationSet};
use crate::processing::scoring::ScoredProfile;
use colored::{Color, Colorize};
use serde_json::Value;

/// Trait for rendering reports
pub trait OutputFormatter {
    fn format_report(&self, report: &Report) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    sort_by_score: bool,
}

/// JSON formatter for piping into other tools
pub struct JsonFormatter {
    pretty: bool,
}

/// Picks the formatter for the configured output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
            sort_by_score: false,
        }
    }

    /// Show recommendations highest score first instead of in response order.
    pub fn sorted(mut self, sort_by_score: bool) -> Self {
        self.sort_by_score = sort_by_score;
        self
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n# {}\n", title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            90..=100 => ("EXCELLENT", Color::Green),
            80..=89 => ("STRONG", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            _ => ("WEAK", Color::Red),
        };

        if self.use_colors {
            format!("{:>3} [{}]", score, badge.color(color).bold())
        } else {
            format!("{:>3} [{}]", score, badge)
        }
    }

    fn format_category(&self, category: Category) -> String {
        let color = match category {
            Category::Reach => Color::Red,
            Category::Target => Color::Yellow,
            Category::Safety => Color::Green,
        };
        self.colorize(&category.as_str().to_uppercase(), color)
    }

    fn format_list(&self, output: &mut String, label: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        output.push_str(&format!("     {}:\n", label));
        for item in items {
            output.push_str(&format!("       - {}\n", item));
        }
    }

    fn format_entry(&self, output: &mut String, index: usize, entry: &RecommendationEntry) {
        output.push_str(&format!(
            "  {}. {} | {}\n",
            index + 1,
            self.colorize(&entry.name, Color::Cyan),
            entry.program
        ));
        output.push_str(&format!(
            "     {} | {} | {}",
            entry.location,
            self.format_category(entry.category),
            self.format_score_badge(entry.match_score)
        ));
        if let Some(ranking) = &entry.ranking {
            output.push_str(&format!(" | Ranking: {}", ranking));
        }
        output.push('\n');

        if !self.detailed {
            return;
        }

        self.format_list(output, "Why recommended", &entry.why_recommended);
        self.format_list(output, "Concerns", &entry.concerns);

        let reqs = &entry.admission_requirements;
        let requirements: Vec<String> = [
            ("GPA", &reqs.gpa),
            ("GRE", &reqs.gre),
            ("TOEFL", &reqs.toefl),
            ("IELTS", &reqs.ielts),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| format!("{} {}", label, v)))
        .collect();
        if !requirements.is_empty() {
            output.push_str(&format!("     Requirements: {}\n", requirements.join(", ")));
        }
        if let Some(deadline) = &entry.application_deadline {
            output.push_str(&format!("     Deadline: {}\n", deadline));
        }
        if let Some(website) = &entry.website {
            output.push_str(&format!("     Website: {}\n", website));
        }

        self.format_list(output, "Research areas", &entry.research_areas);
        self.format_list(output, "Faculty", &entry.faculty_highlights);
    }

    fn format_entries<'a>(&self, output: &mut String, entries: impl IntoIterator<Item = &'a RecommendationEntry>) {
        for (i, entry) in entries.into_iter().enumerate() {
            self.format_entry(output, i, entry);
        }
    }

    fn format_analysis(&self, output: &mut String, analysis: &Analysis) -> Result<()> {
        output.push_str(&self.format_header("ANALYSIS"));
        match analysis {
            Analysis::Summary(summary) => {
                output.push_str(&format!("  Total matches: {}\n", summary.total_matches));
                output.push_str(&format!(
                    "  Reach: {} | Target: {} | Safety: {}\n",
                    summary.reach_count, summary.target_count, summary.safety_count
                ));
                output.push_str(&format!("  Primary field: {}\n", summary.primary_field));
                output.push_str(&format!("  Confidence: {}%\n", summary.confidence_score));
            }
            Analysis::Raw(value) => {
                output.push_str(&indent_json(value)?);
            }
        }
        Ok(())
    }

    fn format_recommendations(&self, output: &mut String, set: &RecommendationSet) -> Result<()> {
        output.push_str(&self.format_header("UNIVERSITY RECOMMENDATIONS"));
        if set.entries.is_empty() {
            output.push_str("  No recommendations in response\n");
        } else if self.sort_by_score {
            self.format_entries(output, set.sorted_by_match_score());
        } else {
            self.format_entries(output, &set.entries);
        }
        self.format_analysis(output, &set.analysis)
    }

    fn format_scores(&self, output: &mut String, scored: &[ScoredProfile]) {
        output.push_str(&self.format_header("PROFILE MATCH SCORES"));
        for (i, entry) in scored.iter().enumerate() {
            let label = entry
                .profile
                .name
                .clone()
                .unwrap_or_else(|| format!("Profile #{}", i + 1));
            output.push_str(&format!("  {}. {} {}\n", i + 1, self.format_score_badge(entry.score), label));
        }
    }
}

fn indent_json(value: &Value) -> Result<String> {
    let pretty = serde_json::to_string_pretty(value)?;
    Ok(pretty.lines().map(|line| format!("  {}\n", line)).collect())
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut output = String::new();

        match &report.body {
            ReportBody::Recommendations(set) => self.format_recommendations(&mut output, set)?,
            ReportBody::CvAnalysis {
                analysis,
                university_matches,
            } => {
                output.push_str(&self.format_header("APPLICANT PROFILE"));
                output.push_str(&indent_json(analysis.user_profile())?);
                output.push_str(&self.format_header("RECOMMENDATIONS"));
                output.push_str(&indent_json(analysis.recommendations())?);
                output.push_str(&self.format_header("UNIVERSITY MATCHES"));
                if university_matches.is_empty() {
                    output.push_str("  None listed\n");
                }
                self.format_entries(&mut output, university_matches);
            }
            ReportBody::Scores(scored) => self.format_scores(&mut output, scored),
            ReportBody::Unavailable { reason } => {
                output.push_str(&format!(
                    "{} {}\n",
                    self.colorize("AI response unavailable:", Color::Red),
                    reason
                ));
            }
        }

        if self.detailed {
            output.push_str(&format!(
                "\nSource: {} | Generated: {}\n",
                report.metadata.source,
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        rendered.map_err(|e| GradMatchError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl ReportGenerator {
    pub fn new(config: &OutputConfig, sort_by_score: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(config.color_output, config.detailed).sorted(sort_by_score),
            json_formatter: JsonFormatter::new(true),
        }
    }

    pub fn generate(&self, report: &Report, format: OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
        };
        debug_assert_eq!(formatter.supports_format(), format);
        formatter.format_report(report)
    }
}

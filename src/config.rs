//! Configuration management for grad-match

use crate::error::{GradMatchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Weights used by the profile match scorer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub base_score: i32,
    pub bio_bonus: i32,
    pub research_interests_bonus: i32,
    pub skills_bonus: i32,
    pub gpa_bonus: i32,
    pub gpa_threshold: f64,
    pub institution_bonus: i32,
    /// Lowest jitter value added to a score.
    pub jitter_min: i32,
    /// Number of distinct jitter values, starting at `jitter_min`.
    pub jitter_span: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NormalizerConfig {
    pub default_match_score: u8,
    pub confidence_full_spread: u32,
    pub confidence_partial_spread: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 50,
            bio_bonus: 10,
            research_interests_bonus: 15,
            skills_bonus: 10,
            gpa_bonus: 10,
            gpa_threshold: 3.5,
            institution_bonus: 5,
            jitter_min: -10,
            jitter_span: 20,
        }
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_match_score: 75,
            confidence_full_spread: 85,
            confidence_partial_spread: 70,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| GradMatchError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| GradMatchError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("grad-match")
            .join("config.toml")
    }
}

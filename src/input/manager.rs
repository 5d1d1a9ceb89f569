//! Input manager for AI responses and profile records

use crate::error::{GradMatchError, Result};
use crate::input::file_detector::FileType;
use crate::processing::scoring::CandidateProfile;
use log::info;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Path that stands for standard input.
pub const STDIN_PATH: &str = "-";

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read raw text from a `.json`, `.txt` or `.md` file, or from stdin for `-`.
    /// File contents are cached by path; stdin never is.
    pub async fn read_text(&mut self, path: &Path) -> Result<String> {
        if path == Path::new(STDIN_PATH) {
            info!("Reading from standard input");
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            return Ok(text);
        }

        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(GradMatchError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        match self.detect_file_type(path)? {
            FileType::Json | FileType::Text | FileType::Markdown => {}
            FileType::Unknown => {
                return Err(GradMatchError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        }

        info!("Reading response file: {}", path.display());
        let text = fs::read_to_string(path).await?;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Load one profile object or an array of them from JSON.
    pub async fn load_profiles(&mut self, path: &Path) -> Result<Vec<CandidateProfile>> {
        if path != Path::new(STDIN_PATH) && self.detect_file_type(path)? != FileType::Json {
            return Err(GradMatchError::UnsupportedFormat(format!(
                "Profiles must be JSON: {}",
                path.display()
            )));
        }

        let text = self.read_text(path).await?;
        let value: Value = serde_json::from_str(&text)?;

        let profiles = match value {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<std::result::Result<Vec<CandidateProfile>, _>>()?,
            Value::Object(_) => vec![serde_json::from_value(value)?],
            _ => {
                return Err(GradMatchError::InvalidInput(format!(
                    "Expected a profile object or array in {}",
                    path.display()
                )))
            }
        };

        info!("Loaded {} profile(s) from {}", profiles.len(), path.display());
        Ok(profiles)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                GradMatchError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

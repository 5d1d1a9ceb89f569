//! Input loading
//! Handles file detection and reading of AI responses and profile records

pub mod file_detector;
pub mod manager;

//! Response normalization and match scoring

pub mod category;
pub mod cv_analysis;
pub mod extract;
pub mod field_of_study;
pub mod fields;
pub mod normalizer;
pub mod recommendations;
pub mod scoring;

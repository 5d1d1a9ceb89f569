//! Prompts for the AI model whose output the normalizer consumes

pub mod prompts;

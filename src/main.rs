//! grad-match: normalize AI graduate program recommendations and score applicants

use clap::Parser;
use grad_match::cli::{self, Cli, Commands, ConfigAction, PromptKind};
use grad_match::config::Config;
use grad_match::error::{GradMatchError, Result};
use grad_match::input::manager::InputManager;
use grad_match::llm::prompts::{MatchingParams, PromptTemplates};
use grad_match::output::formatter::ReportGenerator;
use grad_match::output::report::{Report, ReportBody};
use grad_match::processing::normalizer::ResponseNormalizer;
use grad_match::processing::scoring::{CandidateProfile, MatchScorer};
use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use std::process;

const RESPONSE_EXTENSIONS: &[&str] = &["json", "txt", "md"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_result = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = match config_result {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if cli.no_color {
        config.output.color_output = false;
    }
    if cli.detailed {
        config.output.detailed = true;
    }
    if let Some(output) = &cli.output {
        match cli::parse_output_format(output) {
            Ok(format) => config.output.format = format,
            Err(e) => {
                error!("{}", e);
                process::exit(2);
            }
        }
    }

    match run_command(cli.command, &config, cli.config.as_deref()).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("Command failed: {}", e);
            process::exit(1);
        }
    }
}

fn emit(report: &Report, config: &Config, sort: bool) -> Result<()> {
    let generator = ReportGenerator::new(&config.output, sort);
    println!("{}", generator.generate(report, config.output.format)?);
    Ok(())
}

/// Returns `Ok(false)` when the AI response was unusable.
async fn run_command(command: Commands, config: &Config, config_path: Option<&Path>) -> Result<bool> {
    let normalizer = ResponseNormalizer::with_config(config.normalizer.clone());
    let mut input_manager = InputManager::new();

    match command {
        Commands::Recommendations { input, sort } => {
            cli::validate_file_extension(&input, RESPONSE_EXTENSIONS)
                .map_err(|e| GradMatchError::InvalidInput(format!("Response file: {}", e)))?;

            let text = input_manager.read_text(&input).await?;
            let source = input.display().to_string();

            let report = match normalizer.try_parse_recommendations(text) {
                Ok(set) => {
                    info!("Normalized {} recommendations", set.entries.len());
                    Report::new(source, ReportBody::Recommendations(set))
                }
                Err(e) => Report::new(source, ReportBody::Unavailable { reason: e.to_string() }),
            };

            emit(&report, config, sort)?;
            Ok(!report.is_unavailable())
        }

        Commands::CvAnalysis { input } => {
            cli::validate_file_extension(&input, RESPONSE_EXTENSIONS)
                .map_err(|e| GradMatchError::InvalidInput(format!("Response file: {}", e)))?;

            let text = input_manager.read_text(&input).await?;
            let source = input.display().to_string();

            let report = match normalizer.try_parse_cv_analysis(text) {
                Ok(analysis) => {
                    let university_matches = analysis.university_matches_with(normalizer.config());
                    Report::new(
                        source,
                        ReportBody::CvAnalysis {
                            analysis,
                            university_matches,
                        },
                    )
                }
                Err(e) => Report::new(source, ReportBody::Unavailable { reason: e.to_string() }),
            };

            emit(&report, config, false)?;
            Ok(!report.is_unavailable())
        }

        Commands::Score { input, seed } => {
            let profiles = input_manager.load_profiles(&input).await?;
            let scorer = MatchScorer::with_config(config.scoring.clone());

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let ranked = scorer.rank(profiles, || rng.gen::<f64>());

            emit(&Report::new(input.display().to_string(), ReportBody::Scores(ranked)), config, false)?;
            Ok(true)
        }

        Commands::Prompt {
            kind,
            input,
            field,
            max_results,
        } => {
            let templates = PromptTemplates::default();

            let prompt = match kind {
                PromptKind::Recommendations => {
                    let profile = match &input {
                        Some(path) => input_manager
                            .load_profiles(path)
                            .await?
                            .into_iter()
                            .next()
                            .unwrap_or_default(),
                        None => CandidateProfile::default(),
                    };
                    templates.render_university_matching(&MatchingParams {
                        profile,
                        target_field: field,
                        max_results,
                    })
                }
                PromptKind::Cv => {
                    let path = input.ok_or_else(|| {
                        GradMatchError::InvalidInput("A CV text file is required (--input)".to_string())
                    })?;
                    let cv_text = input_manager.read_text(&path).await?;
                    templates.render_cv_analysis(&cv_text)
                }
            };

            println!("{}", prompt);
            Ok(true)
        }

        Commands::Config { action } => {
            let path = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(Config::config_path);

            match action {
                Some(ConfigAction::Show) | None => {
                    let rendered = toml::to_string_pretty(config)
                        .map_err(|e| GradMatchError::Configuration(e.to_string()))?;
                    println!("# {}\n{}", path.display(), rendered);
                }
                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset: {}", path.display());
                }
            }
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grad_match::config::OutputFormat;

    #[tokio::test]
    async fn test_config_reset_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::default();

        let ok = run_command(Commands::Config { action: Some(ConfigAction::Reset) }, &config, Some(&path))
            .await
            .unwrap();
        assert!(ok);
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[tokio::test]
    async fn test_unusable_response_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reply.txt");
        std::fs::write(&path, "Sorry, I cannot help with that.").unwrap();

        let mut config = Config::default();
        config.output.format = OutputFormat::Json;

        let ok = run_command(Commands::Recommendations { input: path, sort: false }, &config, None)
            .await
            .unwrap();
        assert!(!ok);
    }
}

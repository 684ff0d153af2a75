//! resume-relevance: score resumes against structured job requirements

use clap::Parser;
use log::{error, info, warn};
use resume_relevance::cli::{Cli, Commands, ConfigAction, ModelAction};
use resume_relevance::config::{Config, OutputFormat};
use resume_relevance::enrichment::{EnrichedEvaluation, Enricher, GeminiClient};
use resume_relevance::error::{RelevanceError, Result};
use resume_relevance::input::{load_job, save_job, InputManager};
use resume_relevance::output::{
    plan_report_paths, save_report_to_file, EvaluationReport, ReportGenerator, ReportMetadata,
};
use resume_relevance::processing::embedding_manager::EmbeddingModelManager;
use resume_relevance::{Evaluator, JobSpec};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Evaluate {
            job,
            resume,
            output,
            save,
            no_enrich,
            detailed,
        } => {
            let options = EvaluateOptions {
                format: output.unwrap_or(config.output.format),
                detailed: detailed || config.output.detailed,
                enrich: !no_enrich && config.enrichment.enabled,
                save,
            };
            evaluate_resumes(&config, &job, &resume, options).await
        }

        Commands::Job {
            title,
            must_have,
            good_to_have,
            qualifications,
            save,
        } => {
            let job = JobSpec::from_form(&title, &must_have, &good_to_have, &qualifications);
            if job.must_have().is_empty() && job.good_to_have().is_empty() {
                warn!("Job '{}' has no requirements; every resume will get a full hard score", job.title());
            }

            match save {
                Some(path) => {
                    save_job(&job, &path).await?;
                    println!("Job '{}' saved to {}", job.title(), path.display());
                }
                None => print!("{}", toml::to_string_pretty(&job)?),
            }
            Ok(())
        }

        Commands::Models { action } => run_model_action(action, &config).await,

        Commands::Config { action } => {
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    println!("# {}", config_path.display());
                    print!("{}", toml::to_string_pretty(&config)?);
                }
                ConfigAction::Reset => {
                    Config::default().save_to(config_path)?;
                    println!("Configuration reset: {}", config_path.display());
                }
                ConfigAction::Path => println!("{}", config_path.display()),
            }
            Ok(())
        }
    }
}

struct EvaluateOptions {
    format: OutputFormat,
    detailed: bool,
    enrich: bool,
    save: Option<PathBuf>,
}

async fn evaluate_resumes(
    config: &Config,
    job_path: &Path,
    resume_paths: &[PathBuf],
    options: EvaluateOptions,
) -> Result<()> {
    let job = Arc::new(load_job(job_path).await?);

    let evaluator_config = config.clone();
    let evaluator = tokio::task::spawn_blocking(move || Evaluator::from_config(&evaluator_config))
        .await
        .map_err(|e| RelevanceError::ModelError(format!("Evaluator initialisation panicked: {}", e)))?;
    let evaluator = Arc::new(evaluator);
    info!("Semantic backend: {}", evaluator.semantic_backend());

    let enricher = if options.enrich {
        match GeminiClient::from_config(&config.enrichment) {
            Ok(client) => Some(Enricher::new(client, &config.enrichment)),
            Err(e) => {
                warn!("Enrichment disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let mut input_manager = InputManager::new();
    let mut tasks = Vec::with_capacity(resume_paths.len());
    let mut failures = 0usize;

    for (index, path) in resume_paths.iter().enumerate() {
        let resume_text = match input_manager.extract_text(path).await {
            Ok(text) => text,
            Err(e) => {
                error!("Skipping {}: {}", path.display(), e);
                failures += 1;
                continue;
            }
        };

        let evaluator = Arc::clone(&evaluator);
        let job = Arc::clone(&job);
        let handle = tokio::task::spawn_blocking(move || {
            let start_time = Instant::now();
            let (result, hard_match) = evaluator.evaluate_with_details(&resume_text, &job);
            (resume_text, result, hard_match, start_time.elapsed())
        });
        tasks.push((index, path.clone(), handle));
    }

    let generator = ReportGenerator::with_options(
        config.output.color_output && options.save.is_none(),
        options.detailed,
        true,
        true,
    );
    let report_paths = options
        .save
        .as_deref()
        .map(|target| plan_report_paths(target, resume_paths, &options.format));

    for (index, path, handle) in tasks {
        let (resume_text, result, hard_match, elapsed) = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Evaluation of {} failed: {}", path.display(), e);
                failures += 1;
                continue;
            }
        };

        let enriched = match &enricher {
            Some(enricher) => enricher.enrich(result, &job, &resume_text).await,
            None => EnrichedEvaluation::fallback(result),
        };

        let report = EvaluationReport::new(
            ReportMetadata::new(
                path.display().to_string(),
                job_path.display().to_string(),
                elapsed.as_millis() as u64,
            ),
            job.as_ref().clone(),
            enriched,
            options.detailed.then_some(hard_match),
        );
        let content = generator.generate_report(&report, &options.format)?;

        match &report_paths {
            Some(report_paths) => {
                let file_path = &report_paths[index];
                save_report_to_file(&content, file_path)?;
                println!("{}: {} -> {}", path.display(), report.evaluation.evaluation.score, file_path.display());
            }
            None => println!("{}", content),
        }
    }

    if failures > 0 {
        return Err(RelevanceError::InvalidInput(format!(
            "{} of {} resumes could not be evaluated",
            failures,
            resume_paths.len()
        )));
    }
    Ok(())
}

async fn run_model_action(action: ModelAction, config: &Config) -> Result<()> {
    let mut model_manager = EmbeddingModelManager::new(config.models_dir().clone())
        .await?
        .with_models(config.models.available_models.clone());
    let default_model = &config.models.default_embedding_model;

    match action {
        ModelAction::List => {
            println!("Embedding models ({})", config.models_dir().display());
            for (id, model) in model_manager.list_available_models() {
                let status = if model_manager.is_model_downloaded(id) {
                    "downloaded"
                } else {
                    "available"
                };
                let marker = if id == default_model { " (default)" } else { "" };
                println!("  {}{} [{}] - {} MB, {} dims", id, marker, status, model.size_mb, model.dimensions);
                println!("    {} ({})", model.description, model.repo_id);
            }
        }

        ModelAction::Download { model, force } => {
            let model_path = model_manager.download_model(&model, force).await?;
            println!("Model ready at {}", model_path.display());
            if model_manager.resolve_model_id(&model).as_deref() != Some(default_model.as_str()) {
                println!("Set models.default_embedding_model in the configuration to use it");
            }
        }

        ModelAction::Info { model } => {
            let info = model_manager.get_model_info(&model).ok_or_else(|| {
                let hint = model_manager
                    .suggest_model_id(&model)
                    .map(|s| format!(" (did you mean '{}'?)", s))
                    .unwrap_or_default();
                RelevanceError::ModelNotFound(format!("{}{}", model, hint))
            })?;
            println!("Name: {}", info.name);
            println!("Repository: {}", info.repo_id);
            println!("Size: {} MB", info.size_mb);
            println!("Dimensions: {}", info.dimensions);
            println!("Description: {}", info.description);

            let id = model_manager.resolve_model_id(&model).unwrap_or(model);
            match model_manager.get_model_path(&id) {
                Some(path) => println!("Location: {}", path.display()),
                None => println!("Not downloaded. Run: resume-relevance models download {}", id),
            }
        }
    }

    Ok(())
}

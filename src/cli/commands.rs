//! Command implementations for SkinMatch CLI.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::SkinMatchConfig;
use crate::dataset::{IngredientTable, load_training_samples};
use crate::error::{Result, SkinMatchError};
use crate::ml::features::FeatureExtractor;
use crate::ml::predictor::Predictor;
use crate::ml::skin_classifier::SkinClassifier;

/// Execute a CLI command.
pub fn execute_command(args: SkinMatchArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    match &args.command {
        Command::Analyze(analyze_args) => analyze(analyze_args, &config, &args),
        Command::Batch(batch_args) => batch(batch_args, &config, &args),
        Command::Features(features_args) => features(features_args, &config, &args),
        Command::Train(train_args) => train(train_args, &config, &args),
    }
}

/// Load the config file if one was given, then apply flag overrides.
pub fn resolve_config(args: &SkinMatchArgs) -> Result<SkinMatchConfig> {
    let mut config = match &args.config {
        Some(path) => SkinMatchConfig::from_file(path)?,
        None => SkinMatchConfig::default(),
    };
    if let Some(model) = &args.model {
        config.model_path = model.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Predict for one ingredient list.
fn analyze(args: &AnalyzeArgs, config: &SkinMatchConfig, cli_args: &SkinMatchArgs) -> Result<()> {
    let predictor = available_predictor(config)?;
    let probabilities = predictor.predict_one(&args.text)?;
    let features = args.features.then(|| predictor.features(&args.text));

    output_analysis(
        &AnalysisResult::new(&args.text, &probabilities, features),
        cli_args,
    )
}

/// Predict for every row of a CSV file.
fn batch(args: &BatchArgs, config: &SkinMatchConfig, cli_args: &SkinMatchArgs) -> Result<()> {
    let start = Instant::now();
    let text_column = args.text_column.as_deref().unwrap_or(&config.text_column);

    let predictor = available_predictor(config)?;
    let table = IngredientTable::read_csv(&args.input, text_column)?;
    let predictions = predictor.predict_batch(&table.texts())?;
    table.write_with_predictions(&args.output, &predictions)?;

    output_result(
        "Batch prediction finished",
        &table_result(&args.input, &args.output, table.len(), start),
        cli_args,
    )
}

/// Write extracted features for every row of a CSV file.
fn features(args: &FeaturesArgs, config: &SkinMatchConfig, cli_args: &SkinMatchArgs) -> Result<()> {
    let start = Instant::now();
    let text_column = args.text_column.as_deref().unwrap_or(&config.text_column);

    let extractor = FeatureExtractor::new()?.with_count_policy(config.ingredient_count_policy);
    let table = IngredientTable::read_csv(&args.input, text_column)?;
    let records = extractor.extract_all(&table.texts());
    table.write_with_features(&args.output, &records)?;

    output_result(
        "Feature extraction finished",
        &table_result(&args.input, &args.output, table.len(), start),
        cli_args,
    )
}

/// Train and save a model.
fn train(args: &TrainArgs, config: &SkinMatchConfig, cli_args: &SkinMatchArgs) -> Result<()> {
    let text_column = args.text_column.as_deref().unwrap_or(&config.text_column);
    let model_path = args.output.as_ref().unwrap_or(&config.model_path);

    let samples = load_training_samples(&args.dataset, text_column)?;
    let extractor = FeatureExtractor::new()?.with_count_policy(config.ingredient_count_policy);
    let (model, stats) = SkinClassifier::train(&samples, &extractor, &config.training)?;
    model.save(model_path)?;

    output_result(
        "Training finished",
        &TrainingResult {
            model_path: model_path.display().to_string(),
            examples: stats.examples,
            vocabulary_size: stats.vocabulary_size,
            training_time_ms: stats.training_time_ms,
            label_accuracy: stats.label_accuracy.into_iter().collect(),
        },
        cli_args,
    )
}

fn available_predictor(config: &SkinMatchConfig) -> Result<Predictor> {
    let predictor = Predictor::load(config)?;
    if !predictor.is_available() {
        return Err(SkinMatchError::model_unavailable(format!(
            "no usable model at {}; run `skinmatch train` first",
            config.model_path.display()
        )));
    }
    info!(model = %config.model_path.display(), "predictor ready");
    Ok(predictor)
}

fn table_result(input: &Path, output: &Path, rows: usize, start: Instant) -> TableResult {
    TableResult {
        input: input.display().to_string(),
        output: output.display().to_string(),
        rows,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}

//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SkinMatchArgs};
use crate::error::Result;
use crate::ml::features::FeatureRecord;
use crate::ml::types::ProbabilityVector;

/// One label with its probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelProbability {
    pub skin_type: String,
    pub probability: f64,
}

/// Result structure for single-text analysis.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub text: String,
    pub best_match: String,
    /// Sorted by descending probability.
    pub probabilities: Vec<LabelProbability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureRecord>,
}

impl AnalysisResult {
    pub fn new(text: &str, probabilities: &ProbabilityVector, features: Option<FeatureRecord>) -> Self {
        Self {
            text: text.to_string(),
            best_match: probabilities.best().to_string(),
            probabilities: probabilities
                .ranked()
                .into_iter()
                .map(|(label, probability)| LabelProbability {
                    skin_type: label.to_string(),
                    probability,
                })
                .collect(),
            features,
        }
    }
}

/// Result structure for CSV processing commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct TableResult {
    pub input: String,
    pub output: String,
    pub rows: usize,
    pub duration_ms: u64,
}

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingResult {
    pub model_path: String,
    pub examples: usize,
    pub vocabulary_size: usize,
    pub training_time_ms: u64,
    pub label_accuracy: BTreeMap<String, f64>,
}

/// Output a result according to the selected format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &SkinMatchArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output an analysis result; the human form is a ranked table.
pub fn output_analysis(result: &AnalysisResult, args: &SkinMatchArgs) -> Result<()> {
    if args.output_format == OutputFormat::Json {
        return output_json(result, args);
    }

    println!("Skin type suitability:");
    println!("══════════════════════");
    for entry in &result.probabilities {
        println!(
            "{:<12} {:>6.1}%  {}",
            entry.skin_type,
            entry.probability * 100.0,
            bar(entry.probability)
        );
    }
    println!();
    println!("Best match: {}", result.best_match);

    if let Some(features) = &result.features {
        println!();
        println!("Features:");
        println!("─────────");
        let value = serde_json::to_value(features)?;
        print_fields(&value);
    }
    Ok(())
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &SkinMatchArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }
    let value = serde_json::to_value(result)?;
    print_fields(&value);
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SkinMatchArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

fn print_fields(value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                println!("{key}: {}", format_value(val));
            }
        }
        _ => println!("{}", format_value(value)),
    }
}

fn bar(probability: f64) -> String {
    "█".repeat((probability.clamp(0.0, 1.0) * 20.0).round() as usize)
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(obj) => obj
            .iter()
            .map(|(k, v)| format!("{k}={}", format_value(v)))
            .collect::<Vec<_>>()
            .join(", "),
        serde_json::Value::Null => "null".to_string(),
    }
}

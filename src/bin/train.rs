use anyhow::{Context, Result};
use cardio_risk::application::training::{TrainingOptions, train_and_select};
use cardio_risk::config::ObservabilityEnvConfig;
use cardio_risk::infrastructure::load_dataset;
use cardio_risk::infrastructure::observability::init_tracing;
use cardio_risk::infrastructure::persistence::{save_model, save_scaler};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the labeled heart disease CSV
    #[arg(long, default_value = "data/Heart_Disease_Prediction.csv")]
    input: PathBuf,

    /// Path to output model file
    #[arg(long, default_value = "heart_disease_model.json")]
    model_output: PathBuf,

    /// Path to output scaler file
    #[arg(long, default_value = "scaler.json")]
    scaler_output: PathBuf,

    /// Fraction of rows held out for the test partition
    #[arg(long, default_value_t = 0.2)]
    test_size: f64,

    /// Seed for the split, the forest and the SVM
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stratified cross-validation folds
    #[arg(long, default_value_t = 5)]
    cv_folds: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();
    let observability = ObservabilityEnvConfig::from_env();
    init_tracing(observability.log_format);
    if let Some(warning) = observability.fallback_warning() {
        warn!("{}", warning);
    }

    let dataset = load_dataset(&args.input)
        .with_context(|| format!("Failed to load dataset {:?}", args.input))?;

    let options = TrainingOptions {
        test_size: args.test_size,
        seed: args.seed,
        cv_folds: args.cv_folds,
    };
    let outcome = train_and_select(&dataset, &options).context("Training failed")?;

    println!("\n══════════════════════════════════════════════════════");
    println!("  CANDIDATE SCORES");
    println!("══════════════════════════════════════════════════════");
    for score in &outcome.scores {
        println!(
            "  {:<20} Accuracy: {:.4}  CV Score: {:.4}",
            score.kind.display_name(),
            score.accuracy,
            score.cv_score
        );
    }

    println!(
        "\n  Best Model: {} (Accuracy: {:.4})",
        outcome.selected.kind, outcome.selected.accuracy
    );
    println!("\n  Classification Report:\n");
    println!("{}", outcome.report);
    println!("  Confusion Matrix:\n");
    println!("{}", outcome.report.confusion);
    println!("══════════════════════════════════════════════════════\n");

    save_model(&args.model_output, &outcome.model)
        .with_context(|| format!("Failed to save model to {:?}", args.model_output))?;
    save_scaler(&args.scaler_output, &outcome.scaler)
        .with_context(|| format!("Failed to save scaler to {:?}", args.scaler_output))?;

    info!(
        "Model saved to {:?}, scaler saved to {:?}",
        args.model_output, args.scaler_output
    );
    Ok(())
}

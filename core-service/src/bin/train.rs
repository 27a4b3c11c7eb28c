//! Pet Disease App - Trainer
//!
//! Reads the dataset, fits the random forest and writes the three artifacts.
//! Configuration comes from the environment (or `.env`).

use anyhow::Context;
use pet_diagnosis_core::constants::{APP_NAME, APP_VERSION};
use pet_diagnosis_core::logic::trainer;
use pet_diagnosis_core::TrainerConfig;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} trainer v{}", APP_NAME, APP_VERSION);

    let config = TrainerConfig::from_env();
    let report = trainer::run(&config)
        .with_context(|| format!("training from {} failed", config.dataset_path.display()))?;

    println!("Model retrained successfully");
    println!("  rows:       {}", report.rows);
    println!("  species:    {}", report.species.join(", "));
    println!("  symptoms:   {}", report.symptom_count);
    println!("  diseases:   {}", report.classes.len());
    println!("  accuracy:   {:.1}% (training set)", report.training_accuracy * 100.0);
    println!("  artifacts:  {}", config.artifact_dir.display());
    if !report.unmapped_diseases.is_empty() {
        println!("  no catalog entry: {}", report.unmapped_diseases.join(", "));
    }

    Ok(())
}

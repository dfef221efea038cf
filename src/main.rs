use clap::Parser;
use lead_scoring::config::Command;
use lead_scoring::core::stats::MatchStats;
use lead_scoring::core::ConfigProvider;
use lead_scoring::domain::model::{CompanyRecord, LeadRecord};
use lead_scoring::utils::error::ErrorSeverity;
use lead_scoring::utils::{logger, validation::Validate};
use lead_scoring::{CliConfig, JsonFileSink, LocalStorage, Result, ScoringEngine, ScoringError};
use serde::de::DeserializeOwned;
use std::path::Path;

async fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let data = tokio::fs::read(path).await?;
    let records = serde_json::from_slice(&data)?;
    Ok(records)
}

async fn run(cli: CliConfig) -> Result<()> {
    let config = cli.resolve()?;
    config.validate()?;
    tracing::debug!("Resolved config: {:?}", config);

    let storage = LocalStorage::new(".");
    let engine = ScoringEngine::from_config(storage.clone(), &config);
    engine.load_model().await;

    match cli.command {
        Command::Train { leads, companies } => {
            engine.ingest_leads(read_records::<LeadRecord>(&leads).await?)?;
            engine.ingest_companies(read_records::<CompanyRecord>(&companies).await?)?;

            let outcome = engine.train().await?;
            if !outcome.trained {
                return Err(ScoringError::missing_data("no data to train on"));
            }
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Score {
            leads, companies, ..
        } => {
            engine.ingest_companies(read_records::<CompanyRecord>(&companies).await?)?;
            let leads = read_records::<LeadRecord>(&leads).await?;

            let rankings = engine.score(&leads)?;
            let sink = JsonFileSink::new(storage, config.output_path());
            let forwarded = engine.forward(&rankings, &sink).await?;
            tracing::info!("📁 {} match rows saved to: {}", forwarded, config.output_path());

            let stats = MatchStats::compute(&leads, &rankings);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Status => {
            println!("{}", serde_json::to_string_pretty(&engine.status())?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting lead-scoring CLI");

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

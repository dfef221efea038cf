use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "lead-scoring")]
#[command(about = "Train and run the lead/company compatibility model")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the model slot path from the config
    #[arg(long, global = true)]
    pub model_path: Option<String>,

    /// Fix the seed for company sampling and label draws
    #[arg(long, global = true)]
    pub label_seed: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Ingest records and retrain the model
    Train {
        /// JSON array of normalized leads
        #[arg(long)]
        leads: PathBuf,
        /// JSON array of companies
        #[arg(long)]
        companies: PathBuf,
    },
    /// Rank every company for each lead and write the match rows
    Score {
        #[arg(long)]
        leads: PathBuf,
        #[arg(long)]
        companies: PathBuf,
        /// Override the output path from the config
        #[arg(long)]
        output: Option<String>,
    },
    /// Show whether a trained model is available
    Status,
}

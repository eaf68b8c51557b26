pub mod commands;
pub mod errors;
pub mod output;

use crate::config::{ConfigArgs, DiffConfig, OutputProfile};
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "workbook-diff",
    version,
    about = "Compare two workbook snapshots cell by cell",
    long_about = "Compare two workbook snapshots cell by cell.\n\nSnapshots are editor workbook JSON documents (sheets → cellData → row → column → cell).\nThe report lists added and deleted sheets, then every added, modified, or deleted cell\nwith flags for value, formula, and style changes."
)]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    #[arg(long, global = true)]
    pub compact: bool,

    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Full report: summary plus every cell change.
    Diff { old: PathBuf, new: PathBuf },
    /// Summary report: counts plus changed ranges per sheet.
    Summary { old: PathBuf, new: PathBuf },
    /// Print the JSON schema of the diff payload.
    Schema,
}

pub async fn run_command(command: Commands, config_args: ConfigArgs) -> Result<Value> {
    match command {
        Commands::Diff { old, new } => {
            let config = DiffConfig::from_args(config_args)?;
            commands::diff::diff(old, new, config).await
        }
        Commands::Summary { old, new } => {
            let mut config = DiffConfig::from_args(config_args)?;
            config.output_profile = OutputProfile::Summary;
            commands::diff::diff(old, new, config).await
        }
        Commands::Schema => commands::schema::schema(),
    }
}

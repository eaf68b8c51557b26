use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use workbook_diff::cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli_args = cli::Cli::parse();
    cli::errors::ensure_output_supported(cli_args.format)?;
    let payload = cli::run_command(cli_args.command, cli_args.config).await?;
    cli::output::emit_value(&payload, cli_args.compact, cli_args.quiet)?;
    Ok(())
}

//! Settle a round from an export document
//!
//! ```text
//! settle-round <round.json> [--config settlement.toml] [--out settled.json]
//! ```
//!
//! Reads a version 1 round export, settles it and writes the export back with
//! payments and transfers attached (stdout unless `--out` is given).

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use clap::Parser;
use round_events::{EventEnvelope, Notifier};
use settlement::{Config, RoundExport, SettlementEngine};
use std::path::PathBuf;
use std::sync::Arc;

/// Writes notifications to the log
struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, envelope: &EventEnvelope, text: &str) -> round_events::Result<()> {
        for line in text.lines() {
            tracing::info!(round = %envelope.round_id, "{}", line);
        }
        Ok(())
    }
}

/// Settle a round from an export document
#[derive(Parser, Debug)]
#[command(name = "settle-round", version, about)]
struct Args {
    /// Version 1 round export
    input: PathBuf,

    /// Settlement config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file; stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?
            .with_env_overrides()?,
        None => Config::from_env()?,
    };

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let export = RoundExport::from_json(&raw).context("parsing round export")?;

    tracing::info!(
        round = %export.round.id,
        scorecards = export.scorecards.len(),
        "settling round"
    );

    let engine = SettlementEngine::in_memory(config)?;
    let settlement = engine
        .run_settlement(&export.round, &export.scorecards)
        .await
        .context("settlement failed")?;

    let stats = settlement.stats();
    tracing::info!(
        payments = stats.gross_payment_count,
        transfers = stats.net_transfer_count,
        saved = %stats.amount_saved,
        "round settled"
    );

    engine.dispatcher(Arc::new(LogNotifier)).dispatch(Utc::now()).await;

    let json = export.with_settlement(&settlement).to_json_pretty()?;
    match &args.out {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_input_only() {
        let args = Args::try_parse_from(["settle-round", "round.json"]).unwrap();
        assert_eq!(args.input, PathBuf::from("round.json"));
        assert!(args.config.is_none());
        assert!(args.out.is_none());
    }

    #[test]
    fn test_args_with_flags() {
        let args = Args::try_parse_from([
            "settle-round",
            "--config",
            "settlement.toml",
            "round.json",
            "--out",
            "settled.json",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("settlement.toml")));
        assert_eq!(args.out, Some(PathBuf::from("settled.json")));
    }

    #[test]
    fn test_args_require_input() {
        assert!(Args::try_parse_from(["settle-round"]).is_err());
        assert!(Args::try_parse_from(["settle-round", "a.json", "--bogus"]).is_err());
    }
}

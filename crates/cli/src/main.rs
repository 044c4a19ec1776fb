use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;
use trigen::{ParryOracle, RootConfig, RunSummary};

mod provenance;

#[derive(Parser, Debug)]
#[command(name = "trigen")]
#[command(about = "Generate randomized triangle-intersection test corpora")]
struct Cmd {
    /// Path to the JSON config file
    config: PathBuf,

    /// RNG seed for the whole run; overrides `seed` in the config
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory; overrides `output_path` in the config
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cmd = Cmd::parse();
    let summary = generate(&cmd)?;
    if !summary.skipped.is_empty() {
        tracing::warn!(skipped = summary.skipped.len(), "some scenes were skipped");
    }
    Ok(())
}

fn generate(cmd: &Cmd) -> Result<RunSummary> {
    let mut config = RootConfig::load(&cmd.config)
        .with_context(|| format!("loading config {}", cmd.config.display()))?;
    if let Some(out) = &cmd.output {
        config.output_path = out.clone();
    }
    let seed = match cmd.seed.or(config.seed) {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            tracing::info!(seed, "no seed given; drew one from entropy");
            seed
        }
    };
    tracing::info!(config = %cmd.config.display(), seed, "run");

    let summary = trigen::run(&config, seed, ParryOracle).context("generating corpus")?;

    let params = serde_json::json!({
        "config_path": cmd.config.to_string_lossy(),
        "config": config,
    });
    let payload = provenance::Payload::new(params, summary.clone());
    let prov = provenance::write_sidecar(&config.output_path, payload)?;
    tracing::info!(provenance = %prov.display(), "wrote provenance");
    Ok(summary)
}

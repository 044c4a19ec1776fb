use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;
use trigen::RunSummary;

/// File name of the sidecar written next to the corpus.
pub const PROVENANCE_FILE: &str = "provenance.json";

/// Metadata used to generate a provenance sidecar.
pub struct Payload {
    pub params: Value,
    pub summary: RunSummary,
}

impl Payload {
    pub fn new(params: Value, summary: RunSummary) -> Self {
        Self { params, summary }
    }
}

/// Write `<out_dir>/provenance.json` with the git commit, callsite, seed, params, outputs and skips.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(out_dir: P, payload: Payload) -> Result<PathBuf> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating provenance dir {}", out_dir.display()))?;
    let provenance_path = out_dir.join(PROVENANCE_FILE);

    let callsite = Location::caller();
    let outputs: Vec<Value> = payload
        .summary
        .written
        .iter()
        .map(|w| json!([w.test.to_string_lossy(), w.answer.to_string_lossy()]))
        .collect();
    let doc = json!({
        "code_rev": current_git_rev(),
        "trigen_version": trigen::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "seed": payload.summary.seed,
        "params": payload.params,
        "outputs": outputs,
        "skipped": payload.summary.skipped,
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| "unknown".to_string())
}

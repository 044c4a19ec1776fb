//! Batch orchestration: groups → scenes → (test, answer) files.
//!
//! Randomness
//! - One `StdRng`, seeded once per run, is threaded through every draw. Same
//!   config + same seed ⇒ byte-identical files.
//! - Scenes are drawn in `(group, index)` order; a skipped scene still consumes
//!   the draws it made, so later scenes do not depend on earlier failures
//!   being retried.
//!
//! Failure policy
//! - Config problems and an unusable output directory are fatal (returned).
//! - Degenerate-triangle, oracle and write failures skip that one scene; they
//!   are logged and listed in `RunSummary::skipped`.

use crate::config::{GroupConfig, RootConfig};
use crate::error::TrigenError;
use crate::oracle::Oracle;
use crate::scene::{build_scene, Scene, SceneParams};
use crate::serialize::{render_scene, render_verdict};
use crate::writer::{CorpusWriter, WrittenPair};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;

/// One `(test, answer)` pair on disk.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct WrittenScene {
    pub group: usize,
    pub index: usize,
    pub triangles: usize,
    pub test: PathBuf,
    pub answer: PathBuf,
}

/// A scene that left a gap in its group's index sequence.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SkippedScene {
    pub group: usize,
    pub index: usize,
    pub reason: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub written: Vec<WrittenScene>,
    pub skipped: Vec<SkippedScene>,
}

/// Rendered payloads for one scene, not yet on disk.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneRecord {
    pub scene: Scene,
    pub test: String,
    pub answer: String,
}

/// Owns the run's RNG and the oracle.
pub struct Generator<O: Oracle> {
    seed: u64,
    rng: StdRng,
    oracle: O,
}

impl<O: Oracle> Generator<O> {
    pub fn new(seed: u64, oracle: O) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            oracle,
        }
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Build, evaluate and render one scene.
    pub fn record(
        &mut self,
        group: &GroupConfig,
        params: &SceneParams,
    ) -> Result<SceneRecord, TrigenError> {
        let scene = build_scene(&mut self.rng, params)?;
        let verdict = self.oracle.evaluate(&scene.triangles)?;
        let answer = render_verdict(&verdict, group.ans_format)?;
        let test = render_scene(&scene, params.digits);
        Ok(SceneRecord {
            scene,
            test,
            answer,
        })
    }

    /// Generate every group of `config` into its output directory.
    pub fn run(&mut self, config: &RootConfig) -> Result<RunSummary, TrigenError> {
        config.validate()?;
        let params = config
            .groups
            .iter()
            .map(SceneParams::from_group)
            .collect::<Result<Vec<_>, _>>()?;
        let writer = CorpusWriter::create(&config.output_path)?;
        let mut summary = RunSummary {
            seed: self.seed,
            ..RunSummary::default()
        };
        tracing::info!(
            seed = self.seed,
            groups = config.groups.len(),
            out = %writer.root().display(),
            "generating corpus"
        );
        for (g, (group, params)) in config.groups.iter().zip(&params).enumerate() {
            tracing::info!(group = g, scenes = group.number, "group");
            for index in 0..group.number {
                match self.emit(&writer, group, params, index) {
                    Ok((pair, triangles)) => {
                        tracing::debug!(group = g, index, triangles, "scene written");
                        summary.written.push(WrittenScene {
                            group: g,
                            index,
                            triangles,
                            test: pair.test,
                            answer: pair.answer,
                        });
                    }
                    Err(err) => {
                        tracing::warn!(group = g, index, %err, "scene skipped");
                        summary.skipped.push(SkippedScene {
                            group: g,
                            index,
                            reason: err.to_string(),
                        });
                    }
                }
            }
        }
        tracing::info!(
            written = summary.written.len(),
            skipped = summary.skipped.len(),
            "corpus done"
        );
        Ok(summary)
    }

    fn emit(
        &mut self,
        writer: &CorpusWriter,
        group: &GroupConfig,
        params: &SceneParams,
        index: usize,
    ) -> Result<(WrittenPair, usize), TrigenError> {
        let rec = self.record(group, params)?;
        let pair = writer.write_pair(
            &group.test_fmt_string,
            &group.ans_fmt_string,
            index,
            &rec.test,
            &rec.answer,
        )?;
        Ok((pair, rec.scene.len()))
    }
}

/// Convenience wrapper: fresh generator for `seed`, one run.
pub fn run<O: Oracle>(config: &RootConfig, seed: u64, oracle: O) -> Result<RunSummary, TrigenError> {
    Generator::new(seed, oracle).run(config)
}

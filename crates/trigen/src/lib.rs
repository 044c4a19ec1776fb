//! Randomized test corpora for triangle–triangle intersection.
//!
//! Pipeline per scene: radii (`sample`) → base triangle (`sample`) → rigid
//! placement + rounding (`geom::transform`) → text (`serialize`) and ground
//! truth (`oracle`) → files (`writer`). `generate` drives it per group and
//! owns the single seeded RNG.
//!
//! The intersection algorithm itself is not implemented here; `oracle`
//! adapts an external one (parry) behind the `Oracle` trait.

pub mod config;
pub mod error;
pub mod generate;
pub mod geom;
pub mod oracle;
pub mod sample;
pub mod scene;
pub mod serialize;
pub mod writer;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::{AnswerFormat, GroupConfig, RootConfig};
pub use error::TrigenError;
pub use generate::{run, Generator, RunSummary};
pub use geom::Triangle;
pub use oracle::{Oracle, ParryOracle, Verdict};
pub use scene::Scene;

/// Common exports for callers.
pub mod prelude {
    pub use crate::config::{
        format_index, AnswerFormat, CountRange, GroupConfig, HalfExtents, RootConfig,
    };
    pub use crate::error::TrigenError;
    pub use crate::generate::{run, Generator, RunSummary, SceneRecord, SkippedScene, WrittenScene};
    pub use crate::geom::{round_to, rounding_tolerance, Triangle};
    pub use crate::oracle::{
        BruteForceOracle, Contacts, Oracle, OracleError, ParryOracle, UnknownOracle, Verdict,
    };
    pub use crate::scene::{build_scene, draw_triangle, Scene, SceneParams};
    pub use crate::serialize::{parse_answer, parse_scene, render_scene, render_verdict, Answer};
    pub use crate::writer::CorpusWriter;
    pub use nalgebra::Vector3 as Vec3;
}

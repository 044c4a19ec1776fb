//! Error taxonomy for corpus generation.
//!
//! Fatal vs. per-scene is decided by the orchestrator, not here:
//! - `ConfigNotFound`, `ConfigParse`, `InvalidConfig` abort the run before any output.
//! - `DegenerateTriangle`, `Oracle`, `Write` abort a single `(group, index)` scene.

use crate::oracle::OracleError;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum TrigenError {
    ConfigNotFound { path: PathBuf },
    ConfigParse { path: Option<PathBuf>, reason: String },
    InvalidConfig { reason: String },
    DegenerateTriangle { reason: String },
    Oracle(OracleError),
    Write { path: PathBuf, source: std::io::Error },
}

impl TrigenError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateTriangle {
            reason: reason.into(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// True for errors that invalidate the whole run rather than one scene.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. } | Self::ConfigParse { .. } | Self::InvalidConfig { .. }
        )
    }
}

impl fmt::Display for TrigenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigNotFound { path } => {
                write!(f, "config file does not exist: {}", path.display())
            }
            Self::ConfigParse {
                path: Some(path),
                reason,
            } => write!(f, "failed to parse config {}: {reason}", path.display()),
            Self::ConfigParse { path: None, reason } => {
                write!(f, "failed to parse config: {reason}")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid config: {reason}"),
            Self::DegenerateTriangle { reason } => write!(f, "degenerate triangle: {reason}"),
            Self::Oracle(err) => write!(f, "oracle failure: {err}"),
            Self::Write { path, source } => write!(f, "writing {}: {source}", path.display()),
        }
    }
}

impl std::error::Error for TrigenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Oracle(err) => Some(err),
            Self::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<OracleError> for TrigenError {
    fn from(err: OracleError) -> Self {
        Self::Oracle(err)
    }
}

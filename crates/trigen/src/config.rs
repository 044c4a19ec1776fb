//! Run configuration (JSON) and its validation.
//!
//! Schema mirrors the corpus config files:
//! `{ "output_path", "seed"?, "groups": [ { "half", "number", "length", "mean",
//! "std", "round", "test_fmt_string", "ans_fmt_string", "ans_format"?,
//! "max_attempts"? } ] }`.
//!
//! Validation is all-or-nothing and runs before any file is written.

use crate::error::TrigenError;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Placeholder substituted with the scene index in filename templates.
pub const INDEX_PLACEHOLDER: &str = "{}";
/// Largest supported `round`; beyond this f64 carries no extra digits.
pub const MAX_ROUND_DIGITS: u32 = 15;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 64;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RootConfig {
    pub output_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub groups: Vec<GroupConfig>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct HalfExtents {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl HalfExtents {
    #[inline]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// Triangle count range, `max` exclusive.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

/// Answer file layout; see `serialize::render_verdict`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnswerFormat {
    /// Count, then the indices of triangles that intersect any other triangle.
    #[default]
    Indices,
    /// Count, then every intersecting pair `i j` with `i < j`.
    Pairs,
    /// `1` if any pair intersects, else `0`.
    Any,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GroupConfig {
    pub half: HalfExtents,
    /// Scenes to generate.
    pub number: usize,
    pub length: CountRange,
    pub mean: f64,
    pub std: f64,
    /// Decimal digits kept in coordinates.
    pub round: u32,
    pub test_fmt_string: String,
    pub ans_fmt_string: String,
    #[serde(default)]
    pub ans_format: AnswerFormat,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl RootConfig {
    /// Read, parse and validate a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TrigenError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(TrigenError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|e| TrigenError::ConfigParse {
            path: Some(path.to_path_buf()),
            reason: e.to_string(),
        })?;
        let cfg: Self = serde_json::from_str(&text).map_err(|e| TrigenError::ConfigParse {
            path: Some(path.to_path_buf()),
            reason: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self, TrigenError> {
        let cfg: Self = serde_json::from_str(text).map_err(|e| TrigenError::ConfigParse {
            path: None,
            reason: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), TrigenError> {
        if self.output_path.as_os_str().is_empty() {
            return Err(TrigenError::invalid("output_path must not be empty"));
        }
        for (i, group) in self.groups.iter().enumerate() {
            group.validate().map_err(|e| match e {
                TrigenError::InvalidConfig { reason } => {
                    TrigenError::invalid(format!("group {i}: {reason}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

impl GroupConfig {
    pub fn validate(&self) -> Result<(), TrigenError> {
        let h = self.half;
        // Uniform sampling over [-h, h] needs the width 2h to stay finite.
        if ![h.x, h.y, h.z]
            .iter()
            .all(|c| *c >= 0.0 && (2.0 * c).is_finite())
        {
            return Err(TrigenError::invalid(format!(
                "half extents must be non-negative with a finite span 2h, got ({}, {}, {})",
                h.x, h.y, h.z
            )));
        }
        if self.length.min >= self.length.max {
            return Err(TrigenError::invalid(format!(
                "length range [{}, {}) is empty; max is exclusive",
                self.length.min, self.length.max
            )));
        }
        if !self.mean.is_finite() {
            return Err(TrigenError::invalid("mean must be finite"));
        }
        if !(self.std.is_finite() && self.std >= 0.0) {
            return Err(TrigenError::invalid("std must be finite and non-negative"));
        }
        if self.mean == 0.0 && self.std == 0.0 {
            return Err(TrigenError::invalid(
                "mean = 0 with std = 0 makes every radius zero",
            ));
        }
        if self.round > MAX_ROUND_DIGITS {
            return Err(TrigenError::invalid(format!(
                "round must be <= {MAX_ROUND_DIGITS}, got {}",
                self.round
            )));
        }
        if self.max_attempts == 0 {
            return Err(TrigenError::invalid("max_attempts must be > 0"));
        }
        check_template("test_fmt_string", &self.test_fmt_string)?;
        check_template("ans_fmt_string", &self.ans_fmt_string)?;
        if self.test_fmt_string == self.ans_fmt_string {
            return Err(TrigenError::invalid(
                "test and answer templates must differ",
            ));
        }
        Ok(())
    }
}

fn check_template(field: &str, template: &str) -> Result<(), TrigenError> {
    let n = template.matches(INDEX_PLACEHOLDER).count();
    if n != 1 {
        return Err(TrigenError::invalid(format!(
            "{field} must contain exactly one `{INDEX_PLACEHOLDER}`, found {n} in {template:?}"
        )));
    }
    if template.contains('/') || template.contains('\\') {
        return Err(TrigenError::invalid(format!(
            "{field} must be a bare file name, got {template:?}"
        )));
    }
    Ok(())
}

/// Substitute `index` into a validated template.
pub fn format_index(template: &str, index: usize) -> String {
    template.replacen(INDEX_PLACEHOLDER, &index.to_string(), 1)
}

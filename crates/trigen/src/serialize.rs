//! Text rendering for test and answer files.
//!
//! Test file: `"<N> "` followed by `9·N` fixed-point coordinates (triangle
//! order, vertex order A/B/C, axis order x/y/z), each printed with exactly
//! `digits` decimals and followed by one space.
//!
//! Answer file (per `AnswerFormat`), every token followed by one space:
//! - `Indices`: `"<K> "` then the `K` ascending indices of triangles that
//!   intersect another one (`"0 "` when nothing intersects);
//! - `Pairs`: `"<K> "` then `K` pairs `i j` in ascending order;
//! - `Any`: `"1 "` or `"0 "`.
//!
//! Parsers split on ASCII whitespace and trust nothing else.

use crate::config::AnswerFormat;
use crate::geom::{round_to, Triangle};
use crate::oracle::{Contacts, OracleError, Verdict};
use crate::scene::Scene;
use nalgebra::Vector3;
use std::fmt::{self, Write as _};
use std::num::{ParseFloatError, ParseIntError};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Empty,
    BadCount(ParseIntError),
    BadNumber { token: String, source: ParseFloatError },
    BadIndex { token: String, source: ParseIntError },
    /// Token count does not match the declared count.
    Length { expected: usize, found: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "input is empty"),
            Self::BadCount(e) => write!(f, "bad leading count: {e}"),
            Self::BadNumber { token, source } => write!(f, "bad number {token:?}: {source}"),
            Self::BadIndex { token, source } => write!(f, "bad index {token:?}: {source}"),
            Self::Length { expected, found } => {
                write!(f, "expected {expected} tokens after the count, found {found}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Fixed-point rendering of one coordinate (`-0` prints as `0`).
pub fn format_coord(x: f64, digits: u32) -> String {
    format!("{:.*}", digits as usize, round_to(x, digits))
}

pub fn render_scene(scene: &Scene, digits: u32) -> String {
    render_triangles(&scene.triangles, digits)
}

pub fn render_triangles(triangles: &[Triangle], digits: u32) -> String {
    let mut out = String::with_capacity(8 + triangles.len() * 9 * (digits as usize + 6));
    // Writing into a String cannot fail.
    let _ = write!(out, "{} ", triangles.len());
    for tri in triangles {
        for v in tri.vertices() {
            for x in v.iter() {
                let _ = write!(out, "{} ", format_coord(*x, digits));
            }
        }
    }
    out
}

/// Parse a test file body back into triangles.
pub fn parse_scene(text: &str) -> Result<Vec<Triangle>, ParseError> {
    let mut tokens = text.split_ascii_whitespace();
    let n: usize = tokens
        .next()
        .ok_or(ParseError::Empty)?
        .parse()
        .map_err(ParseError::BadCount)?;
    let coords = tokens
        .map(|t| {
            t.parse::<f64>().map_err(|source| ParseError::BadNumber {
                token: t.to_string(),
                source,
            })
        })
        .collect::<Result<Vec<f64>, _>>()?;
    let expected = n.checked_mul(9).ok_or(ParseError::Length {
        expected: usize::MAX,
        found: coords.len(),
    })?;
    if coords.len() != expected {
        return Err(ParseError::Length {
            expected,
            found: coords.len(),
        });
    }
    Ok(coords
        .chunks_exact(9)
        .map(|c| {
            Triangle::new(
                Vector3::new(c[0], c[1], c[2]),
                Vector3::new(c[3], c[4], c[5]),
                Vector3::new(c[6], c[7], c[8]),
            )
        })
        .collect())
}

/// Render an oracle verdict; `Unknown` is an error, never an empty answer.
pub fn render_verdict(verdict: &Verdict, format: AnswerFormat) -> Result<String, OracleError> {
    Ok(render_contacts(verdict.contacts()?, format))
}

pub fn render_contacts(contacts: &Contacts, format: AnswerFormat) -> String {
    let mut out = String::new();
    match format {
        AnswerFormat::Indices => {
            let colliding = contacts.colliding();
            let _ = write!(out, "{} ", colliding.len());
            for i in colliding {
                let _ = write!(out, "{i} ");
            }
        }
        AnswerFormat::Pairs => {
            let _ = write!(out, "{} ", contacts.pairs.len());
            for (i, j) in &contacts.pairs {
                let _ = write!(out, "{i} {j} ");
            }
        }
        AnswerFormat::Any => {
            let _ = write!(out, "{} ", u8::from(contacts.any()));
        }
    }
    out
}

/// Parsed answer file, shaped by its format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    Indices(Vec<usize>),
    Pairs(Vec<(usize, usize)>),
    Any(bool),
}

pub fn parse_answer(text: &str, format: AnswerFormat) -> Result<Answer, ParseError> {
    let nums = text
        .split_ascii_whitespace()
        .map(|t| {
            t.parse::<usize>().map_err(|source| ParseError::BadIndex {
                token: t.to_string(),
                source,
            })
        })
        .collect::<Result<Vec<usize>, _>>()?;
    match format {
        AnswerFormat::Indices => {
            let (&k, rest) = nums.split_first().ok_or(ParseError::Empty)?;
            if rest.len() != k {
                return Err(ParseError::Length {
                    expected: k,
                    found: rest.len(),
                });
            }
            Ok(Answer::Indices(rest.to_vec()))
        }
        AnswerFormat::Pairs => {
            let (&k, rest) = nums.split_first().ok_or(ParseError::Empty)?;
            if rest.len() != 2 * k {
                return Err(ParseError::Length {
                    expected: 2 * k,
                    found: rest.len(),
                });
            }
            Ok(Answer::Pairs(
                rest.chunks_exact(2).map(|p| (p[0], p[1])).collect(),
            ))
        }
        AnswerFormat::Any => match nums.as_slice() {
            [v @ (0 | 1)] => Ok(Answer::Any(*v == 1)),
            [] => Err(ParseError::Empty),
            other => Err(ParseError::Length {
                expected: 1,
                found: other.len(),
            }),
        },
    }
}

//! Centralised error types used across the crate.

use std::io;

use thiserror::Error;

/// Plotting faults.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("x and y length differ: {x} vs {y}")]
    LengthMismatch { x: usize, y: usize },
    #[error("plot backend: {0}")]
    Backend(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("terminal preview: {0}")]
    Preview(#[source] Box<Error>),
}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("binary dump: {0}")]
    Dump(#[from] bincode::Error),
    #[error(transparent)]
    Plot(#[from] PlotError),
    #[error("terminal too small: need ≥{want_w}×{want_h}, got {got_w}×{got_h}")]
    GraphTooSmall {
        want_w: usize,
        want_h: usize,
        got_w: usize,
        got_h: usize,
    },
    #[error("data set is empty")]
    EmptyData,
    #[error("view missing field `{0}`")]
    MissingField(&'static str),
    #[error("y_min {low} must be < y_max {high}")]
    InvalidRange { low: f64, high: f64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Error enums for every stage, folded into `PiError` at the top.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Malformed decimal text or option value.
#[derive(Error, Debug)]
pub enum DecimalError {
    #[error("empty decimal literal")]
    Empty,
    #[error("invalid decimal literal `{0}`")]
    InvalidDigit(String),
    #[error("decimal literal has too many fractional digits")]
    TooLong,
    #[error("unknown rounding rule `{0}` (expected half-away or half-even)")]
    UnknownRounding(String),
}

/// The arithmetic layer cannot produce the requested precision.
#[derive(Error, Debug)]
pub enum PrecisionError {
    #[error("working precision must be at least 1 significant digit")]
    Zero,
    #[error("precision unavailable: {requested} significant digits requested, at most {max} supported")]
    Unavailable { requested: u32, max: u32 },
}

/// Run parameters rejected before any computation starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no checkpoints given")]
    NoCheckpoints,
    #[error("invalid checkpoint {decimals}: decimal places must be in 1..={max}")]
    InvalidCheckpoint { decimals: u32, max: u32 },
    #[error("radius must be positive, got {0}")]
    InvalidRadius(String),
    #[error(transparent)]
    Precision(#[from] PrecisionError),
}

/// Failures inside the numeric pipeline.
#[derive(Error, Debug)]
pub enum ComputeError {
    #[error(transparent)]
    Precision(#[from] PrecisionError),
    #[error("cannot cut π at {decimals} decimal places: only {available} available")]
    InsufficientPrecision { decimals: u32, available: u32 },
    #[error("checkpoint {decimals} failed: {source}")]
    Checkpoint {
        decimals: u32,
        #[source]
        source: Box<ComputeError>,
    },
}

#[derive(Error, Debug)]
pub enum ColorError {
    #[error("invalid hex colour digit")]
    InvalidHexDigit,
    #[error("hex colour must be exactly 6 digits")]
    InvalidHexLength,
}

/// Chart layout, drawing and saving faults.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("chart configuration missing field `{0}`")]
    MissingField(&'static str),
    #[error("axis minimum {low} must be < maximum {high}")]
    InvalidRange { low: f64, high: f64 },
    #[error("chart area too small: need ≥{want_w}×{want_h}, got {got_w}×{got_h}")]
    GraphTooSmall {
        want_w: usize,
        want_h: usize,
        got_w: usize,
        got_h: usize,
    },
    #[error("nothing to plot")]
    EmptyData,
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Top-level error type bubbled up by public APIs.
#[derive(Error, Debug)]
pub enum PiError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Compute(#[from] ComputeError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type PiResult<T> = Result<T, PiError>;

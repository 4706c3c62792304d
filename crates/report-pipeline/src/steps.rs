//! Step-count marker extraction.
//!
//! The segmentation prompt instructs the model to embed a literal
//! `[n_steps:X]` marker in its response. That marker is the only
//! machine-readable handshake between free-form model text and the
//! pipeline's control flow; no other heuristic is consulted.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Upper bound on the declared step count. A response claiming more steps
/// than this is treated as malformed rather than driving an unbounded
/// number of expansion calls.
pub const MAX_STEP_COUNT: u32 = 64;

// Models sometimes escape the underscore when the surrounding text is
// LaTeX, so `[n\_steps:3]` is accepted alongside `[n_steps:3]`.
static STEP_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[n(?:\\?_)?steps:(\d+)\]").expect("step marker regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StepMarkerError {
    #[error("no [n_steps:X] marker found in the segmentation response")]
    Missing,

    #[error("declared step count {0} is outside the accepted range 1..={MAX_STEP_COUNT}")]
    OutOfRange(u64),

    #[error("declared step count {0:?} could not be parsed")]
    Unparseable(String),
}

/// Extract the declared step count from a segmentation response.
///
/// Returns the first marker's value. Fails if no marker is present or the
/// declared count is zero or above [`MAX_STEP_COUNT`].
pub fn extract_step_count(text: &str) -> Result<u32, StepMarkerError> {
    let captures = STEP_MARKER.captures(text).ok_or(StepMarkerError::Missing)?;
    let digits = &captures[1];
    let count: u64 = digits
        .parse()
        .map_err(|_| StepMarkerError::Unparseable(digits.to_string()))?;
    if count == 0 || count > u64::from(MAX_STEP_COUNT) {
        return Err(StepMarkerError::OutOfRange(count));
    }
    Ok(count as u32)
}

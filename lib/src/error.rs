//! All kinds of errors in this crate.

use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// Cell at row {0}, column {1} is outside the world.
    InvalidCoordinate(usize, usize),
    /// Unable to start the worker threads: {0}.
    ResourceExhausted(String),
    /// Unable to draw the grid: {0}.
    MalformedGrid(String),
    /// Unable to write the grid: {0}.
    Output(String),
    /// Rows / columns / thread limit should be positive.
    NonPositive,
    /// A world of {0}×{1} cells is too large.
    TooLarge(usize, usize),
}

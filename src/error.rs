use std::fmt;

use crate::model::Span;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(DimensionFault),

    #[error("ragged grid: row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("span {span} out of bounds for {rows}x{cols} grid")]
    SpanOutOfBounds {
        span: Span,
        rows: usize,
        cols: usize,
    },

    #[error("span {span} overlaps span {other} at cell ({row}, {col})")]
    OverlappingSpan {
        span: Span,
        other: Span,
        row: usize,
        col: usize,
    },

    #[error("font {name}: {message}")]
    Font { name: String, message: String },

    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// What exactly was wrong with the grid shape or a dimension vector.
#[derive(Clone, Debug, PartialEq)]
pub enum DimensionFault {
    EmptyGrid,
    Length {
        axis: Axis,
        expected: usize,
        found: usize,
    },
    NonPositive {
        axis: Axis,
        index: usize,
        value: f32,
    },
}

impl fmt::Display for DimensionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionFault::EmptyGrid => f.write_str("grid needs at least one row and one column"),
            DimensionFault::Length {
                axis,
                expected,
                found,
            } => write!(f, "expected {expected} {axis} sizes, got {found}"),
            DimensionFault::NonPositive { axis, index, value } => {
                write!(f, "{axis} {index} has size {value}, must be positive and finite")
            }
        }
    }
}

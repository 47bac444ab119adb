use std::fmt;

use crate::error::{DimensionFault, Error, Result};

/// Top-left corner of a table in canvas coordinates. y grows upward, so
/// `y_top` is the largest y the table occupies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y_top: f32,
}

impl Point {
    pub fn new(x: f32, y_top: f32) -> Self {
        Self { x, y_top }
    }
}

/// Drawing box of a cell or merged region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellRect {
    pub x: f32,
    pub y_top: f32,
    pub width: f32,
    pub height: f32,
}

impl CellRect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y_top - self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Inclusive, zero-indexed merge region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl Span {
    pub const fn new(start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> Self {
        Self {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    pub fn anchor(&self) -> (usize, usize) {
        (self.start_row, self.start_col)
    }

    pub fn end(&self) -> (usize, usize) {
        (self.end_row, self.end_col)
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.start_row..=self.end_row).contains(&row)
            && (self.start_col..=self.end_col).contains(&col)
    }

    /// Cells of the region in row-major order, anchor first.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.start_row..=self.end_row)
            .flat_map(move |r| (self.start_col..=self.end_col).map(move |c| (r, c)))
    }
}

impl From<(usize, usize, usize, usize)> for Span {
    fn from((sr, sc, er, ec): (usize, usize, usize, usize)) -> Self {
        Self::new(sr, sc, er, ec)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.start_row, self.start_col, self.end_row, self.end_col
        )
    }
}

/// Rectangular table of optional cell text. Row 0 is just the first row;
/// whether it is a header is up to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Vec<Option<String>>,
    rows: usize,
    cols: usize,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || cols == 0 {
            return Err(Error::DimensionMismatch(DimensionFault::EmptyGrid));
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(Error::RaggedGrid {
                row,
                expected: cols,
                found: r.len(),
            });
        }
        let n_rows = rows.len();
        Ok(Self {
            cells: rows.into_iter().flatten().collect(),
            rows: n_rows,
            cols,
        })
    }

    /// Build a grid where every cell carries text.
    pub fn from_text<R, S>(rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .map(|r| r.into_iter().map(|s| Some(s.into())).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Text at (row, col); `None` for empty cells or out-of-range indices.
    pub fn text(&self, row: usize, col: usize) -> Option<&str> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col].as_deref()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);

    pub fn from_u8([r, g, b]: [u8; 3]) -> Self {
        Rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Rgb,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 0.5,
            color: Rgb::BLACK,
        }
    }
}

/// Width of each column and height of each row, in points.
#[derive(Clone, Debug, PartialEq)]
pub struct Dimensions {
    pub col_widths: Vec<f32>,
    pub row_heights: Vec<f32>,
}

impl Dimensions {
    pub fn new(col_widths: Vec<f32>, row_heights: Vec<f32>) -> Self {
        Self {
            col_widths,
            row_heights,
        }
    }

    pub fn uniform(rows: usize, cols: usize, col_width: f32, row_height: f32) -> Self {
        Self::new(vec![col_width; cols], vec![row_height; rows])
    }

    pub fn total_width(&self) -> f32 {
        self.col_widths.iter().sum()
    }

    pub fn total_height(&self) -> f32 {
        self.row_heights.iter().sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

pub fn mm(v: f32) -> f32 {
    v * POINTS_PER_MM
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 210.0 * POINTS_PER_MM,
        height: 297.0 * POINTS_PER_MM,
    };
}

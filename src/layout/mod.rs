//! Table geometry: plain cell rectangles, merge validation and the combined
//! per-table layout consumed by the renderer.

mod geometry;
mod spans;

pub use geometry::{CellRects, resolve};
pub use spans::{CellKind, SpanMap, merged_rect, resolve_spans};

use crate::error::{Error, Result};
use crate::model::{CellRect, Dimensions, Grid, Point, Span};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergedRegion {
    pub span: Span,
    pub rect: CellRect,
}

/// A cell that produces output: ordinary cells with their plain rectangle,
/// anchors with their merged rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleCell {
    pub row: usize,
    pub col: usize,
    pub rect: CellRect,
    pub kind: CellKind,
}

/// Fully validated layout of one table. Building it runs every check, so a
/// `TableLayout` can always be rendered without failing halfway.
#[derive(Clone, Debug)]
pub struct TableLayout {
    rects: CellRects,
    spans: SpanMap,
    merged: Vec<MergedRegion>,
    width: f32,
    height: f32,
}

impl TableLayout {
    pub fn new(grid: &Grid, dims: &Dimensions, spans: &[Span], anchor: Point) -> Result<Self> {
        let rows = grid.rows();
        let cols = grid.cols();
        let rects = resolve(rows, cols, &dims.col_widths, &dims.row_heights, anchor)?;
        let span_map = resolve_spans(rows, cols, spans)?;

        let merged = span_map
            .spans()
            .iter()
            .map(|span| {
                merged_rect(&rects, &dims.col_widths, &dims.row_heights, span)
                    .map(|rect| MergedRegion { span: *span, rect })
                    .ok_or(Error::SpanOutOfBounds {
                        span: *span,
                        rows,
                        cols,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let (width, height) = (dims.total_width(), dims.total_height());
        log::debug!(
            "TABLE {}x{} at ({:.2}, {:.2}) spans={} size={:.2}x{:.2}",
            rows,
            cols,
            anchor.x,
            anchor.y_top,
            merged.len(),
            width,
            height
        );
        for m in &merged {
            log::debug!(
                "  merge {} -> x={:.2} y_top={:.2} w={:.2} h={:.2}",
                m.span,
                m.rect.x,
                m.rect.y_top,
                m.rect.width,
                m.rect.height
            );
        }

        Ok(Self {
            rects,
            spans: span_map,
            merged,
            width,
            height,
        })
    }

    pub fn rows(&self) -> usize {
        self.rects.rows()
    }

    pub fn cols(&self) -> usize {
        self.rects.cols()
    }

    pub fn cell_rects(&self) -> &CellRects {
        &self.rects
    }

    pub fn span_map(&self) -> &SpanMap {
        &self.spans
    }

    pub fn kind(&self, row: usize, col: usize) -> Option<CellKind> {
        self.spans.kind(row, col)
    }

    /// Cells outside every span, row-major.
    pub fn ordinary_cells(&self) -> impl Iterator<Item = ((usize, usize), CellRect)> + '_ {
        self.rects
            .iter()
            .filter(|&((r, c), _)| self.spans.kind(r, c) == Some(CellKind::Ordinary))
    }

    /// Merged regions in span input order.
    pub fn merged_regions(&self) -> &[MergedRegion] {
        &self.merged
    }

    /// Ordinary and anchor cells, row-major; covered cells are skipped.
    pub fn visible_cells(&self) -> impl Iterator<Item = VisibleCell> + '_ {
        self.rects.iter().filter_map(|((row, col), plain)| {
            let kind = self.spans.kind(row, col)?;
            let rect = match kind {
                CellKind::Ordinary => plain,
                CellKind::Anchor { .. } => {
                    self.merged
                        .iter()
                        .find(|m| m.span.anchor() == (row, col))?
                        .rect
                }
                CellKind::Covered { .. } => return None,
            };
            Some(VisibleCell {
                row,
                col,
                rect,
                kind,
            })
        })
    }

    /// Overall `(width, height)`: the sums of the column widths and row heights.
    pub fn bounds(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

//! Placing tables on a page.

use crate::canvas::Canvas;
use crate::error::Result;
use crate::layout::TableLayout;
use crate::model::{Dimensions, Grid, PageSize, Point, Span, Stroke};
use crate::render::{TableStyle, render_table};

/// Row height used when a table has no explicit heights: 9pt text at 1.2
/// leading plus 3pt padding above and below.
pub const DEFAULT_ROW_HEIGHT: f32 = 9.0 * 1.2 + 3.0 + 3.0;

/// Validate, lay out and draw one table with its top-left corner at
/// `anchor`. Nothing is drawn if validation fails.
pub fn draw_table(
    canvas: &mut dyn Canvas,
    grid: &Grid,
    dims: &Dimensions,
    spans: &[Span],
    anchor: Point,
    style: &TableStyle,
) -> Result<(f32, f32)> {
    let layout = TableLayout::new(grid, dims, spans, anchor)?;
    Ok(render_table(canvas, grid, &layout, style))
}

/// Column widths with default row heights for `grid`.
pub fn default_dimensions(grid: &Grid, col_widths: Vec<f32>) -> Dimensions {
    Dimensions::new(col_widths, vec![DEFAULT_ROW_HEIGHT; grid.rows()])
}

/// `cols` equal columns filling the page width between two `margin`s.
pub fn even_columns(page: PageSize, margin: f32, cols: usize) -> Vec<f32> {
    let usable = page.width - 2.0 * margin;
    vec![usable / cols as f32; cols]
}

/// Anchor that centers a `width` wide table horizontally with its top at `y_top`.
pub fn centered_anchor(page: PageSize, width: f32, y_top: f32) -> Point {
    Point::new((page.width - width) / 2.0, y_top)
}

/// Vertical stacking of tables down a page from a fixed left edge.
pub struct Stack {
    x: f32,
    cursor: f32,
}

impl Stack {
    pub fn new(x: f32, y_top: f32) -> Self {
        Self { x, cursor: y_top }
    }

    /// Top of the next table.
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn table(
        &mut self,
        canvas: &mut dyn Canvas,
        grid: &Grid,
        dims: &Dimensions,
        spans: &[Span],
        style: &TableStyle,
    ) -> Result<(f32, f32)> {
        let (w, h) = draw_table(
            canvas,
            grid,
            dims,
            spans,
            Point::new(self.x, self.cursor),
            style,
        )?;
        self.cursor -= h;
        Ok((w, h))
    }

    /// Move the cursor down by `gap`.
    pub fn gap(&mut self, gap: f32) {
        self.cursor -= gap;
    }

    /// Move down by `offset`, draw a horizontal rule `width` long there.
    pub fn rule(&mut self, canvas: &mut dyn Canvas, offset: f32, width: f32, stroke: Stroke) {
        self.cursor -= offset;
        canvas.draw_line((self.x, self.cursor), (self.x + width, self.cursor), stroke);
    }
}

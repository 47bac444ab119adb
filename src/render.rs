use crate::canvas::Canvas;
use crate::fonts::HELVETICA;
use crate::layout::TableLayout;
use crate::model::{CellRect, Grid, Rgb, Stroke};

/// Vertical text offset as a fraction of the font size, added to the cell's
/// vertical midpoint. Empirical value for short single-line labels in 9pt
/// Helvetica; not derived from font metrics. Reference fixtures depend on it.
pub const BASELINE_FACTOR: f32 = 0.35;

pub const DEFAULT_FONT_SIZE: f32 = 9.0;

#[derive(Clone, Debug, PartialEq)]
pub struct TableStyle {
    pub stroke: Option<Stroke>,
    pub fill: Option<Rgb>,
    pub font: String,
    pub font_size: f32,
    pub baseline_factor: f32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            stroke: Some(Stroke::default()),
            fill: None,
            font: HELVETICA.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            baseline_factor: BASELINE_FACTOR,
        }
    }
}

/// Baseline start for `text_width` wide text centered in `rect`.
///
/// Horizontal centering is exact; vertical placement is the midpoint plus
/// `baseline_factor * font_size`. Text wider than the cell overflows both
/// sides, and multi-line text is not handled.
pub fn center_text(
    rect: &CellRect,
    text_width: f32,
    font_size: f32,
    baseline_factor: f32,
) -> (f32, f32) {
    let tx = rect.x + (rect.width - text_width) / 2.0;
    let ty = rect.y_top - rect.height / 2.0 + font_size * baseline_factor;
    (tx, ty)
}

/// Draw a laid-out table: ordinary cell rectangles, then merged region
/// rectangles, then the text of every visible cell. Covered cells draw
/// nothing. Returns the table's `(width, height)`.
///
/// `grid` must be the grid `layout` was built from.
pub fn render_table(
    canvas: &mut dyn Canvas,
    grid: &Grid,
    layout: &TableLayout,
    style: &TableStyle,
) -> (f32, f32) {
    debug_assert_eq!(
        (grid.rows(), grid.cols()),
        (layout.rows(), layout.cols()),
        "grid shape does not match the layout"
    );

    for (_, rect) in layout.ordinary_cells() {
        canvas.draw_rectangle(rect, style.stroke, style.fill);
    }

    for region in layout.merged_regions() {
        canvas.draw_rectangle(region.rect, style.stroke, style.fill);
    }

    for cell in layout.visible_cells() {
        let Some(text) = grid.text(cell.row, cell.col).filter(|t| !t.is_empty()) else {
            continue;
        };
        let tw = canvas.measure_text_width(text, &style.font, style.font_size);
        let (tx, ty) = center_text(&cell.rect, tw, style.font_size, style.baseline_factor);
        canvas.draw_text(tx, ty, text, &style.font, style.font_size);
    }

    layout.bounds()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Recorder;
    use crate::fonts::FontBook;
    use crate::model::{Dimensions, Point};

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "grid shape does not match the layout")]
    fn rejects_grid_smaller_than_layout() {
        let laid_out = Grid::from_text([["a", "b"], ["c", "d"]]).unwrap();
        let other = Grid::from_text([["a"]]).unwrap();
        let dims = Dimensions::uniform(2, 2, 10.0, 10.0);
        let layout = TableLayout::new(&laid_out, &dims, &[], Point::new(0.0, 50.0)).unwrap();
        let fonts = FontBook::default();
        let mut canvas = Recorder::new(&fonts);
        render_table(&mut canvas, &other, &layout, &TableStyle::default());
    }

    #[test]
    fn centers_horizontally_and_offsets_baseline() {
        let rect = CellRect {
            x: 10.0,
            y_top: 100.0,
            width: 40.0,
            height: 20.0,
        };
        let (x, y) = center_text(&rect, 10.0, 9.0, BASELINE_FACTOR);
        assert_eq!(x, 25.0);
        assert!((y - (90.0 + 9.0 * 0.35)).abs() < 1e-4);
    }

    #[test]
    fn wide_text_overflows_left_edge() {
        let rect = CellRect {
            x: 10.0,
            y_top: 100.0,
            width: 20.0,
            height: 20.0,
        };
        let (x, _) = center_text(&rect, 40.0, 9.0, BASELINE_FACTOR);
        assert_eq!(x, 0.0);
    }
}

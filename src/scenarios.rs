//! Built-in fixture pages. Each scenario draws one A4 page.

use crate::canvas::Canvas;
use crate::compose::{Stack, centered_anchor, default_dimensions, draw_table, even_columns};
use crate::error::{Error, Result};
use crate::model::{Dimensions, Grid, PageSize, Point, Span, mm};
use crate::render::TableStyle;

pub type ComposeFn = fn(&mut dyn Canvas, PageSize, &TableStyle) -> Result<()>;

#[derive(Clone, Copy)]
pub struct Scenario {
    pub file_name: &'static str,
    pub title: &'static str,
    pub compose: ComposeFn,
}

impl Scenario {
    /// File name without the `.pdf` extension, used to select scenarios.
    pub fn name(&self) -> &'static str {
        self.file_name.trim_end_matches(".pdf")
    }
}

pub const ALL: [Scenario; 6] = [
    Scenario {
        file_name: "01_centered_table.pdf",
        title: "Centered Table",
        compose: centered_table,
    },
    Scenario {
        file_name: "02_full_width_table.pdf",
        title: "Full Width Table",
        compose: full_width_table,
    },
    Scenario {
        file_name: "03_two_tables_same_cols.pdf",
        title: "Two Tables Same Cols",
        compose: two_tables_same_cols,
    },
    Scenario {
        file_name: "04_two_tables_diff_cols.pdf",
        title: "Two Tables Diff Cols",
        compose: two_tables_diff_cols,
    },
    Scenario {
        file_name: "05_row_merges_splits.pdf",
        title: "Row Merges/Splits (Manual)",
        compose: row_merges_splits,
    },
    Scenario {
        file_name: "06_col_merges_splits.pdf",
        title: "Col Merges/Splits (Manual)",
        compose: col_merges_splits,
    },
];

/// Look up scenarios by name (`05_row_merges_splits`) or file name. An empty
/// filter selects all of them, in catalogue order.
pub fn select(names: &[String]) -> Result<Vec<Scenario>> {
    if names.is_empty() {
        return Ok(ALL.to_vec());
    }
    names
        .iter()
        .map(|n| {
            ALL.iter()
                .find(|s| s.name() == n.as_str() || s.file_name == n.as_str())
                .copied()
                .ok_or_else(|| Error::UnknownScenario(n.clone()))
        })
        .collect()
}

fn letters_grid() -> Result<Grid> {
    Grid::from_text([
        ["H1", "H2", "H3", "H4"],
        ["A", "B", "C", "D"],
        ["E", "F", "G", "H"],
        ["I", "J", "K", "L"],
        ["M", "N", "O", "P"],
    ])
}

fn centered_table(canvas: &mut dyn Canvas, page: PageSize, style: &TableStyle) -> Result<()> {
    let grid = Grid::from_text([
        ["H1", "H2", "H3"],
        ["A1", "B1", "C1"],
        ["A2", "B2", "C2"],
        ["A3", "B3", "C3"],
    ])?;
    let dims = default_dimensions(&grid, vec![mm(30.0); 3]);
    let anchor = centered_anchor(page, dims.total_width(), page.height / 2.0);
    draw_table(canvas, &grid, &dims, &[], anchor, style)?;
    Ok(())
}

fn full_width_table(canvas: &mut dyn Canvas, page: PageSize, style: &TableStyle) -> Result<()> {
    let header = (1..=5).map(|c| format!("H{c}")).collect::<Vec<_>>();
    let body = (1..=7).map(|r| (1..=5).map(move |c| format!("R{r}C{c}")).collect::<Vec<_>>());
    let grid = Grid::from_text(std::iter::once(header).chain(body))?;
    let margin = mm(10.0);
    let dims = default_dimensions(&grid, even_columns(page, margin, 5));
    draw_table(
        canvas,
        &grid,
        &dims,
        &[],
        Point::new(margin, page.height - mm(60.0)),
        style,
    )?;
    Ok(())
}

fn two_tables_same_cols(canvas: &mut dyn Canvas, page: PageSize, style: &TableStyle) -> Result<()> {
    let first = Grid::from_text([["H1", "H2", "H3"], ["A", "B", "C"], ["D", "E", "F"]])?;
    let second = Grid::from_text([["H1", "H2", "H3"], ["1", "2", "3"], ["4", "5", "6"]])?;
    let col_widths = vec![mm(35.0); 3];

    let mut stack = Stack::new(mm(15.0), page.height - mm(40.0));
    let (w1, _) = stack.table(
        canvas,
        &first,
        &default_dimensions(&first, col_widths.clone()),
        &[],
        style,
    )?;
    let rule = style.stroke.unwrap_or_default();
    stack.rule(canvas, mm(2.0), w1, rule);
    stack.gap(mm(6.0));
    stack.table(
        canvas,
        &second,
        &default_dimensions(&second, col_widths),
        &[],
        style,
    )?;
    Ok(())
}

fn two_tables_diff_cols(canvas: &mut dyn Canvas, page: PageSize, style: &TableStyle) -> Result<()> {
    let first = Grid::from_text([["H1", "H2"], ["A", "B"], ["C", "D"]])?;
    let second = Grid::from_text([
        ["H1", "H2", "H3", "H4"],
        ["1", "2", "3", "4"],
        ["5", "6", "7", "8"],
    ])?;

    let mut stack = Stack::new(mm(15.0), page.height - mm(40.0));
    stack.table(
        canvas,
        &first,
        &default_dimensions(&first, vec![mm(45.0); 2]),
        &[],
        style,
    )?;
    stack.gap(mm(8.0));
    stack.table(
        canvas,
        &second,
        &default_dimensions(&second, vec![mm(25.0); 4]),
        &[],
        style,
    )?;
    Ok(())
}

fn row_merges_splits(canvas: &mut dyn Canvas, page: PageSize, style: &TableStyle) -> Result<()> {
    let grid = letters_grid()?;
    // Column 0, rows 2-3 ("E" over "I")
    let spans = [Span::new(2, 0, 3, 0)];
    let dims = Dimensions::uniform(grid.rows(), grid.cols(), mm(30.0), mm(10.0));
    draw_table(
        canvas,
        &grid,
        &dims,
        &spans,
        Point::new(mm(15.0), page.height - mm(40.0)),
        style,
    )?;
    Ok(())
}

fn col_merges_splits(canvas: &mut dyn Canvas, page: PageSize, style: &TableStyle) -> Result<()> {
    let grid = Grid::from_text([
        ["H1", "H2", "H3", "H4"],
        ["A", "B", "C", "D"],
        ["E", "F", "G", "H"],
        ["I", "J", "K", "L"],
    ])?;
    // Header row, columns 1-2 ("H2" over "H3")
    let spans = [Span::new(0, 1, 0, 2)];
    let dims = Dimensions::uniform(grid.rows(), grid.cols(), mm(30.0), mm(10.0));
    draw_table(
        canvas,
        &grid,
        &dims,
        &spans,
        Point::new(mm(15.0), page.height - mm(40.0)),
        style,
    )?;
    Ok(())
}

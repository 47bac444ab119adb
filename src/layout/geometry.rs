use crate::error::{Axis, DimensionFault, Error, Result};
use crate::model::{CellRect, Point};

/// Plain (unmerged) rectangle of every logical cell, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct CellRects {
    rects: Vec<CellRect>,
    rows: usize,
    cols: usize,
}

impl CellRects {
    pub fn get(&self, row: usize, col: usize) -> Option<CellRect> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.rects[row * self.cols + col])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `((row, col), rect)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), CellRect)> + '_ {
        let cols = self.cols;
        self.rects
            .iter()
            .enumerate()
            .map(move |(i, r)| ((i / cols, i % cols), *r))
    }
}

fn check_axis(axis: Axis, sizes: &[f32], expected: usize) -> Result<()> {
    if sizes.len() != expected {
        return Err(Error::DimensionMismatch(DimensionFault::Length {
            axis,
            expected,
            found: sizes.len(),
        }));
    }
    if let Some((index, &value)) = sizes
        .iter()
        .enumerate()
        .find(|&(_, &v)| v <= 0.0 || !v.is_finite())
    {
        return Err(Error::DimensionMismatch(DimensionFault::NonPositive {
            axis,
            index,
            value,
        }));
    }
    Ok(())
}

/// Tile the table area starting at `anchor`: rows run downward from
/// `anchor.y_top`, columns run rightward from `anchor.x`. Each edge is the
/// running sum of the sizes before it, so neighbours share edges exactly.
pub fn resolve(
    rows: usize,
    cols: usize,
    col_widths: &[f32],
    row_heights: &[f32],
    anchor: Point,
) -> Result<CellRects> {
    if rows == 0 || cols == 0 {
        return Err(Error::DimensionMismatch(DimensionFault::EmptyGrid));
    }
    check_axis(Axis::Column, col_widths, cols)?;
    check_axis(Axis::Row, row_heights, rows)?;

    let mut rects = Vec::with_capacity(rows * cols);
    let mut cur_y = anchor.y_top;
    for &h in row_heights {
        let mut cur_x = anchor.x;
        for &w in col_widths {
            rects.push(CellRect {
                x: cur_x,
                y_top: cur_y,
                width: w,
                height: h,
            });
            cur_x += w;
        }
        cur_y -= h;
    }

    Ok(CellRects { rects, rows, cols })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_down_and_right_from_anchor() {
        let rects = resolve(2, 3, &[10.0, 20.0, 30.0], &[5.0, 7.0], Point::new(100.0, 500.0))
            .unwrap();
        assert_eq!(
            rects.get(0, 0),
            Some(CellRect {
                x: 100.0,
                y_top: 500.0,
                width: 10.0,
                height: 5.0
            })
        );
        assert_eq!(
            rects.get(1, 2),
            Some(CellRect {
                x: 130.0,
                y_top: 495.0,
                width: 30.0,
                height: 7.0
            })
        );
        assert_eq!(rects.get(2, 0), None);
    }

    #[test]
    fn rejects_wrong_lengths() {
        let err = resolve(2, 2, &[10.0], &[5.0, 5.0], Point::new(0.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch(DimensionFault::Length {
                axis: Axis::Column,
                expected: 2,
                found: 1
            })
        ));
        let err =
            resolve(2, 2, &[10.0, 10.0], &[5.0, 5.0, 5.0], Point::new(0.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch(DimensionFault::Length { axis: Axis::Row, .. })
        ));
    }

    #[test]
    fn rejects_non_positive_and_nan() {
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let err = resolve(1, 2, &[10.0, bad], &[5.0], Point::new(0.0, 0.0)).unwrap_err();
            assert!(matches!(
                err,
                Error::DimensionMismatch(DimensionFault::NonPositive {
                    axis: Axis::Column,
                    index: 1,
                    ..
                })
            ));
        }
    }
}

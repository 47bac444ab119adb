mod common;

use common::{approx, labelled_grid, rect_approx, union};
use tablefix_pdf::layout::{merged_rect, resolve, resolve_spans};
use tablefix_pdf::{CellKind, CellRect, Dimensions, Error, Grid, Point, Span, TableLayout};

const COL_WIDTHS: [f32; 4] = [31.7, 12.25, 80.0, 0.3];
const ROW_HEIGHTS: [f32; 3] = [16.8, 9.99, 42.125];

#[test]
fn plain_cells_tile_the_table_exactly() {
    let anchor = Point::new(42.52, 727.5);
    let rects = resolve(3, 4, &COL_WIDTHS, &ROW_HEIGHTS, anchor).unwrap();

    for ((r, c), rect) in rects.iter() {
        // Neighbours share edges bit-for-bit
        if let Some(right) = rects.get(r, c + 1) {
            assert_eq!(rect.right(), right.x, "gap between ({r},{c}) and its right neighbour");
            assert_eq!(rect.y_top, right.y_top);
        }
        if let Some(below) = rects.get(r + 1, c) {
            assert_eq!(rect.bottom(), below.y_top, "gap between ({r},{c}) and the cell below");
            assert_eq!(rect.x, below.x);
        }
    }

    let total = union(rects.iter().map(|(_, r)| r)).unwrap();
    assert_eq!(total.x, anchor.x);
    assert_eq!(total.y_top, anchor.y_top);
    assert!(approx(total.width, COL_WIDTHS.iter().sum()));
    assert!(approx(total.height, ROW_HEIGHTS.iter().sum()));

    let area: f32 = rects.iter().map(|(_, r)| r.area()).sum();
    assert!((area - total.area()).abs() < 0.05, "cells overlap or leave holes");
}

#[test]
fn resolve_is_idempotent() {
    let anchor = Point::new(1.0 / 3.0, 800.0 / 7.0);
    let a = resolve(3, 4, &COL_WIDTHS, &ROW_HEIGHTS, anchor).unwrap();
    let b = resolve(3, 4, &COL_WIDTHS, &ROW_HEIGHTS, anchor).unwrap();
    for ((_, ra), (_, rb)) in a.iter().zip(b.iter()) {
        assert_eq!(ra.x.to_bits(), rb.x.to_bits());
        assert_eq!(ra.y_top.to_bits(), rb.y_top.to_bits());
        assert_eq!(ra.width.to_bits(), rb.width.to_bits());
        assert_eq!(ra.height.to_bits(), rb.height.to_bits());
    }
}

#[test]
fn merged_rect_equals_union_of_covered_cells() {
    let rects = resolve(3, 4, &COL_WIDTHS, &ROW_HEIGHTS, Point::new(10.0, 500.0)).unwrap();
    let spans = [
        Span::new(0, 0, 2, 0),
        Span::new(0, 1, 1, 3),
        Span::new(2, 2, 2, 3),
        Span::new(2, 1, 2, 1),
    ];
    for span in &spans {
        let merged = merged_rect(&rects, &COL_WIDTHS, &ROW_HEIGHTS, span).unwrap();
        let covered: Vec<CellRect> = span.cells().map(|(r, c)| rects.get(r, c).unwrap()).collect();
        let bounds = union(covered.iter().copied()).unwrap();
        let area: f32 = covered.iter().map(|r| r.area()).sum();

        assert!(rect_approx(&merged, &bounds), "{span}: {merged:?} != {bounds:?}");
        assert!((merged.area() - area).abs() < 0.01, "{span}: area mismatch");
    }
}

#[test]
fn every_cell_gets_exactly_one_kind() {
    let spans = [Span::new(0, 0, 1, 1), Span::new(3, 2, 4, 4), Span::new(2, 5, 2, 5)];
    let map = resolve_spans(5, 6, &spans).unwrap();

    let (mut ordinary, mut anchors, mut covered) = (0, 0, 0);
    for r in 0..5 {
        for c in 0..6 {
            match map.kind(r, c).unwrap() {
                CellKind::Ordinary => ordinary += 1,
                CellKind::Anchor { .. } => anchors += 1,
                CellKind::Covered { .. } => covered += 1,
            }
        }
    }
    assert_eq!(anchors, 3);
    assert_eq!(covered, 3 + 5);
    assert_eq!(ordinary + anchors + covered, 30);
    assert_eq!(map.covered().count(), covered);
    assert!(map.kind(5, 0).is_none());
}

#[test]
fn span_past_last_row_is_out_of_bounds() {
    let err = resolve_spans(3, 3, &[Span::new(2, 0, 3, 0)]).unwrap_err();
    match err {
        Error::SpanOutOfBounds { span, rows, cols } => {
            assert_eq!(span, Span::new(2, 0, 3, 0));
            assert_eq!((rows, cols), (3, 3));
        }
        e => panic!("expected SpanOutOfBounds, got {e}"),
    }
}

#[test]
fn span_past_last_column_is_out_of_bounds() {
    assert!(matches!(
        resolve_spans(3, 3, &[Span::new(0, 1, 0, 3)]),
        Err(Error::SpanOutOfBounds { .. })
    ));
}

#[test]
fn spans_sharing_a_cell_overlap() {
    let spans = [Span::new(0, 0, 1, 1), Span::new(1, 1, 2, 2)];
    match resolve_spans(4, 4, &spans).unwrap_err() {
        Error::OverlappingSpan {
            span,
            other,
            row,
            col,
        } => {
            assert_eq!(span, spans[1]);
            assert_eq!(other, spans[0]);
            assert_eq!((row, col), (1, 1));
        }
        e => panic!("expected OverlappingSpan, got {e}"),
    }
}

#[test]
fn ragged_grid_is_rejected() {
    let err = Grid::new(vec![
        vec![Some("a".into()), Some("b".into())],
        vec![Some("c".into())],
    ])
    .unwrap_err();
    assert!(matches!(
        err,
        Error::RaggedGrid {
            row: 1,
            expected: 2,
            found: 1
        }
    ));
}

#[test]
fn empty_grid_is_rejected() {
    assert!(matches!(Grid::new(vec![]), Err(Error::DimensionMismatch(_))));
    assert!(matches!(Grid::new(vec![vec![]]), Err(Error::DimensionMismatch(_))));
}

#[test]
fn table_layout_checks_dimensions_against_grid() {
    let grid = labelled_grid(2, 3);
    let dims = Dimensions::new(vec![10.0; 3], vec![5.0; 3]);
    let err = TableLayout::new(&grid, &dims, &[], Point::new(0.0, 0.0)).unwrap_err();
    assert!(err.to_string().contains("row"), "{err}");
}

#[test]
fn visible_cells_use_merged_rect_for_anchors() {
    let grid = labelled_grid(3, 3);
    let dims = Dimensions::uniform(3, 3, 20.0, 10.0);
    let layout = TableLayout::new(&grid, &dims, &[Span::new(1, 1, 2, 2)], Point::new(0.0, 100.0))
        .unwrap();

    let visible: Vec<_> = layout.visible_cells().collect();
    assert_eq!(visible.len(), 9 - 3);
    let anchor = visible.iter().find(|v| (v.row, v.col) == (1, 1)).unwrap();
    assert_eq!(
        anchor.rect,
        CellRect {
            x: 20.0,
            y_top: 90.0,
            width: 40.0,
            height: 20.0
        }
    );
    assert!(visible.iter().all(|v| !layout.span_map().is_covered(v.row, v.col)));
    assert_eq!(layout.ordinary_cells().count(), 5);
    assert_eq!(layout.bounds(), (60.0, 30.0));
}

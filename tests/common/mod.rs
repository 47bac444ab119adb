#![allow(dead_code)]

use std::path::PathBuf;

use tablefix_pdf::{CellRect, DrawOp, Grid};

pub const EPS: f32 = 1e-3;

/// Output directory: tests/output/<name>/, emptied first.
pub fn output_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("tests/output").join(name);
    std::fs::remove_dir_all(&dir).ok();
    std::fs::create_dir_all(&dir).expect("create output dir");
    dir
}

/// A TrueType font from `TABLEFIX_FONT` or a usual system location.
pub fn system_ttf() -> Option<PathBuf> {
    let from_env = std::env::var_os("TABLEFIX_FONT").map(PathBuf::from);
    let candidates = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];
    from_env
        .into_iter()
        .chain(candidates.iter().map(PathBuf::from))
        .find(|p| p.is_file())
}

/// The 5x4 grid used by the row-merge fixture.
pub fn letters_grid() -> Grid {
    Grid::from_text([
        ["H1", "H2", "H3", "H4"],
        ["A", "B", "C", "D"],
        ["E", "F", "G", "H"],
        ["I", "J", "K", "L"],
        ["M", "N", "O", "P"],
    ])
    .unwrap()
}

/// Grid with text "r{row}c{col}" in every cell.
pub fn labelled_grid(rows: usize, cols: usize) -> Grid {
    Grid::from_text((0..rows).map(|r| (0..cols).map(move |c| format!("r{r}c{c}"))))
        .unwrap()
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPS
}

pub fn rect_approx(a: &CellRect, b: &CellRect) -> bool {
    approx(a.x, b.x)
        && approx(a.y_top, b.y_top)
        && approx(a.width, b.width)
        && approx(a.height, b.height)
}

/// Bounding box of a set of rectangles.
pub fn union(rects: impl IntoIterator<Item = CellRect>) -> Option<CellRect> {
    let mut it = rects.into_iter();
    let first = it.next()?;
    let (mut x0, mut x1, mut y0, mut y1) = (first.x, first.right(), first.bottom(), first.y_top);
    for r in it {
        x0 = x0.min(r.x);
        x1 = x1.max(r.right());
        y0 = y0.min(r.bottom());
        y1 = y1.max(r.y_top);
    }
    Some(CellRect {
        x: x0,
        y_top: y1,
        width: x1 - x0,
        height: y1 - y0,
    })
}

pub fn rects(ops: &[DrawOp]) -> Vec<CellRect> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Rect { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect()
}

pub fn texts(ops: &[DrawOp]) -> Vec<(f32, f32, String)> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Text { x, y, text, .. } => Some((*x, *y, text.clone())),
            _ => None,
        })
        .collect()
}

/// Media box `[x0 y0 x1 y1]` of the first page, read from raw PDF bytes.
pub fn mediabox(pdf: &[u8]) -> Option<[f32; 4]> {
    let text = String::from_utf8_lossy(pdf);
    let start = text.find("/MediaBox")?;
    let open = start + text[start..].find('[')?;
    let close = open + text[open..].find(']')?;
    let nums: Vec<f32> = text[open + 1..close]
        .split_whitespace()
        .filter_map(|s| s.parse().ok())
        .collect();
    nums.try_into().ok()
}

/// Decompressed content streams of a PDF produced by this crate.
pub fn content_streams(pdf: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = pdf;
    while let Some(pos) = find(rest, b"stream\n") {
        let body = &rest[pos + b"stream\n".len()..];
        let Some(end) = find(body, b"\nendstream") else {
            break;
        };
        if let Ok(raw) = miniz_oxide::inflate::decompress_to_vec_zlib(&body[..end]) {
            out.push(String::from_utf8_lossy(&raw).into_owned());
        }
        rest = &body[end + b"\nendstream".len()..];
    }
    out
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

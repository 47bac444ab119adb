//! The drawing capability the table engine renders onto.
//!
//! The engine only needs rectangles, text and a width query, so it never
//! depends on a document format. [`Recorder`] keeps the calls as an ordered
//! list of [`DrawOp`]s; the PDF writer replays that list into a content stream.

use std::collections::{BTreeMap, HashSet};

use crate::fonts::FontBook;
use crate::model::{CellRect, Rgb, Stroke};

pub trait Canvas {
    /// Rectangle with top-left corner `(rect.x, rect.y_top)`. `None` for
    /// `stroke` or `fill` skips that paint.
    fn draw_rectangle(&mut self, rect: CellRect, stroke: Option<Stroke>, fill: Option<Rgb>);

    /// Single line of text with its baseline starting at `(x, y)`.
    fn draw_text(&mut self, x: f32, y: f32, text: &str, font: &str, size: f32);

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke);

    fn measure_text_width(&self, text: &str, font: &str, size: f32) -> f32;
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Rect {
        rect: CellRect,
        stroke: Option<Stroke>,
        fill: Option<Rgb>,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        font: String,
        size: f32,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        stroke: Stroke,
    },
}

/// Canvas that records every call in order.
pub struct Recorder<'a> {
    fonts: &'a FontBook,
    ops: Vec<DrawOp>,
}

impl<'a> Recorder<'a> {
    pub fn new(fonts: &'a FontBook) -> Self {
        Self {
            fonts,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    pub fn fonts(&self) -> &'a FontBook {
        self.fonts
    }
}

impl Canvas for Recorder<'_> {
    fn draw_rectangle(&mut self, rect: CellRect, stroke: Option<Stroke>, fill: Option<Rgb>) {
        if stroke.is_none() && fill.is_none() {
            return;
        }
        self.ops.push(DrawOp::Rect { rect, stroke, fill });
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, font: &str, size: f32) {
        if text.is_empty() {
            return;
        }
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            font: font.to_string(),
            size,
        });
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke) {
        self.ops.push(DrawOp::Line { from, to, stroke });
    }

    fn measure_text_width(&self, text: &str, font: &str, size: f32) -> f32 {
        self.fonts.text_width(text, font, size)
    }
}

/// Characters drawn per font name, in font-name order.
pub(crate) fn used_chars(ops: &[DrawOp]) -> BTreeMap<&str, HashSet<char>> {
    let mut used: BTreeMap<&str, HashSet<char>> = BTreeMap::new();
    for op in ops {
        if let DrawOp::Text { text, font, .. } = op {
            used.entry(font.as_str()).or_default().extend(text.chars());
        }
    }
    for chars in used.values_mut() {
        chars.insert(' ');
    }
    used
}

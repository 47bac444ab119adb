//! Single-page PDF output for recorded draw operations.
//!
//! The output has no timestamps or document IDs, so the same operations
//! always produce the same bytes.

use std::collections::{BTreeMap, HashMap, HashSet};

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::canvas::{DrawOp, used_chars};
use crate::fonts::{FontBook, FontEntry};
use crate::model::{PageSize, Rgb, Stroke};

/// Tracks graphics state already set in the content stream so repeated
/// operators are not emitted for every cell.
struct PaintState {
    line_width: Option<f32>,
    stroke: Option<Rgb>,
    fill: Rgb,
}

impl PaintState {
    fn new() -> Self {
        Self {
            line_width: None,
            stroke: None,
            fill: Rgb::BLACK,
        }
    }

    fn apply_stroke(&mut self, content: &mut Content, stroke: Stroke) {
        if self.line_width != Some(stroke.width) {
            content.set_line_width(stroke.width);
            self.line_width = Some(stroke.width);
        }
        if self.stroke != Some(stroke.color) {
            let Rgb(r, g, b) = stroke.color;
            content.set_stroke_rgb(r, g, b);
            self.stroke = Some(stroke.color);
        }
    }

    fn apply_fill(&mut self, content: &mut Content, fill: Rgb) {
        if self.fill != fill {
            let Rgb(r, g, b) = fill;
            content.set_fill_rgb(r, g, b);
            self.fill = fill;
        }
    }
}

fn write_ops(
    content: &mut Content,
    ops: &[DrawOp],
    fonts: &FontBook,
    entries: &HashMap<&str, FontEntry>,
) {
    let mut state = PaintState::new();

    for op in ops {
        match op {
            DrawOp::Rect { rect, stroke, fill } => {
                if let Some(s) = stroke {
                    state.apply_stroke(content, *s);
                }
                if let Some(f) = fill {
                    state.apply_fill(content, *f);
                }
                content.rect(rect.x, rect.bottom(), rect.width, rect.height);
                match (stroke, fill) {
                    (Some(_), Some(_)) => content.fill_nonzero_and_stroke(),
                    (Some(_), None) => content.stroke(),
                    (None, Some(_)) => content.fill_nonzero(),
                    (None, None) => content.end_path(),
                };
            }
            DrawOp::Line { from, to, stroke } => {
                state.apply_stroke(content, *stroke);
                content.move_to(from.0, from.1);
                content.line_to(to.0, to.1);
                content.stroke();
            }
            DrawOp::Text {
                x,
                y,
                text,
                font,
                size,
            } => {
                let Some(entry) = entries.get(fonts.get(font).name()) else {
                    log::warn!("no font registered for {font}, skipping text {text:?}");
                    continue;
                };
                state.apply_fill(content, Rgb::BLACK);
                content.begin_text();
                content.set_font(Name(entry.pdf_name.as_bytes()), *size);
                content.next_line(*x, *y);
                content.show(Str(&entry.encode(text)));
                content.end_text();
            }
        }
    }
}

/// Encode `ops` as the only page of a new PDF document.
pub fn write_page(title: &str, page: PageSize, fonts: &FontBook, ops: &[DrawOp]) -> Vec<u8> {
    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let page_id = alloc();
    let content_id = alloc();
    let info_id = alloc();

    // Merge used characters by resolved font so unknown names share Helvetica
    let mut per_font: BTreeMap<&str, HashSet<char>> = BTreeMap::new();
    for (name, chars) in used_chars(ops) {
        per_font
            .entry(fonts.get(name).name())
            .or_default()
            .extend(chars);
    }

    let mut entries: HashMap<&str, FontEntry> = HashMap::new();
    let mut font_pairs: Vec<(String, Ref)> = Vec::new();
    for (i, (name, chars)) in per_font.iter().enumerate() {
        let pdf_name = format!("F{}", i + 1);
        let entry = fonts.get(name).register(&mut pdf, pdf_name, &mut alloc, chars);
        font_pairs.push((entry.pdf_name.clone(), entry.font_ref));
        entries.insert(*name, entry);
    }
    let t_fonts = t0.elapsed();

    let mut content = Content::new();
    write_ops(&mut content, ops, fonts, &entries);
    let raw = content.finish();
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
    pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id).kids([page_id]).count(1);
    {
        let mut pg = pdf.page(page_id);
        pg.media_box(Rect::new(0.0, 0.0, page.width, page.height))
            .parent(pages_id)
            .contents(content_id);
        let mut resources = pg.resources();
        let mut font_dict = resources.fonts();
        for (name, font_ref) in &font_pairs {
            font_dict.pair(Name(name.as_bytes()), *font_ref);
        }
    }
    pdf.document_info(info_id).title(TextStr(title));

    let bytes = pdf.finish();
    log::debug!(
        "write_page: {} ops, fonts={:.1}ms, total={:.1}ms ({} bytes)",
        ops.len(),
        t_fonts.as_secs_f64() * 1000.0,
        t0.elapsed().as_secs_f64() * 1000.0,
        bytes.len()
    );
    bytes
}

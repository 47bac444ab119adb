use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use pdf_writer::{Name, Pdf, Rect, Ref};
use ttf_parser::Face;

use crate::error::{Error, Result};

pub const HELVETICA: &str = "Helvetica";

/// Where the table text font comes from.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FontSource {
    /// Standard Type1 Helvetica, not embedded.
    #[default]
    Helvetica,
    /// A TrueType/OpenType file, subset and embedded.
    File(PathBuf),
}

impl FontSource {
    /// `TABLEFIX_FONT` selects a font file; unset or empty means Helvetica.
    pub fn from_env() -> Self {
        match std::env::var("TABLEFIX_FONT") {
            Ok(val) if !val.trim().is_empty() => FontSource::File(PathBuf::from(val.trim())),
            _ => FontSource::Helvetica,
        }
    }
}

enum FontData {
    Standard { widths_1000: Vec<f32> },
    TrueType { data: Mmap, face_index: u32 },
}

/// A font that can be measured and later written into a PDF.
pub struct Font {
    name: String,
    data: FontData,
}

impl Font {
    pub fn helvetica() -> Self {
        Self {
            name: HELVETICA.to_string(),
            data: FontData::Standard {
                widths_1000: helvetica_widths(),
            },
        }
    }

    pub fn load(source: &FontSource) -> Result<Self> {
        match source {
            FontSource::Helvetica => Ok(Self::helvetica()),
            FontSource::File(path) => Self::from_file(path),
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let file = std::fs::File::open(path)?;
        let data = unsafe { Mmap::map(&file) }?;
        let face_index = 0;
        let face = Face::parse(&data, face_index).map_err(|e| Error::Font {
            name: display.clone(),
            message: e.to_string(),
        })?;
        let name = font_family_name(&face).ok_or_else(|| Error::Font {
            name: display.clone(),
            message: "no family name".to_string(),
        })?;
        log::debug!("loaded font {name} from {display}");
        Ok(Self {
            name,
            data: FontData::TrueType { data, face_index },
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self.data, FontData::TrueType { .. })
    }

    /// Advance width of `text` at `font_size`, no kerning.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: f32 = match &self.data {
            FontData::Standard { widths_1000 } => to_winansi_bytes(text)
                .iter()
                .filter(|&&b| b >= 32)
                .map(|&b| widths_1000[(b - 32) as usize])
                .sum(),
            FontData::TrueType { data, face_index } => match Face::parse(data, *face_index) {
                Ok(face) => {
                    let upem = face.units_per_em() as f32;
                    text.chars()
                        .filter_map(|ch| face.glyph_index(ch))
                        .filter_map(|gid| face.glyph_hor_advance(gid))
                        .map(|adv| adv as f32 / upem * 1000.0)
                        .sum()
                }
                Err(_) => 0.0,
            },
        };
        units * font_size / 1000.0
    }

    /// Write the font objects for this font into `pdf`. `used_chars` limits
    /// the embedded subset for file fonts.
    pub(crate) fn register(
        &self,
        pdf: &mut Pdf,
        pdf_name: String,
        alloc: &mut impl FnMut() -> Ref,
        used_chars: &HashSet<char>,
    ) -> FontEntry {
        let font_ref = alloc();
        let char_to_gid = match &self.data {
            FontData::Standard { .. } => None,
            FontData::TrueType { data, face_index } => {
                let descriptor_ref = alloc();
                let data_ref = alloc();
                embed_truetype(
                    pdf,
                    font_ref,
                    descriptor_ref,
                    data_ref,
                    &self.name,
                    data,
                    *face_index,
                    used_chars,
                    alloc,
                )
            }
        };
        if char_to_gid.is_none() {
            if self.is_embedded() {
                log::warn!("Font {} could not be embedded, using Helvetica", self.name);
            }
            pdf.type1_font(font_ref)
                .base_font(Name(b"Helvetica"))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }
        FontEntry {
            pdf_name,
            font_ref,
            char_to_gid,
        }
    }
}

/// Fonts available to a page, keyed by name. Helvetica is always present.
pub struct FontBook {
    fonts: BTreeMap<String, Font>,
}

impl Default for FontBook {
    fn default() -> Self {
        let mut fonts = BTreeMap::new();
        fonts.insert(HELVETICA.to_string(), Font::helvetica());
        Self { fonts }
    }
}

impl FontBook {
    /// Add a font and return the name to draw with.
    pub fn insert(&mut self, font: Font) -> String {
        let name = font.name().to_string();
        self.fonts.insert(name.clone(), font);
        name
    }

    /// Named font, or Helvetica when the name is unknown.
    pub fn get(&self, name: &str) -> &Font {
        self.fonts
            .get(name)
            .or_else(|| self.fonts.get(HELVETICA))
            .expect("font book always holds Helvetica")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    pub fn text_width(&self, text: &str, font: &str, font_size: f32) -> f32 {
        self.get(font).text_width(text, font_size)
    }
}

/// A font written into a PDF, ready for content stream use.
pub(crate) struct FontEntry {
    pub(crate) pdf_name: String,
    pub(crate) font_ref: Ref,
    pub(crate) char_to_gid: Option<HashMap<char, u16>>,
}

impl FontEntry {
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match &self.char_to_gid {
            Some(map) => encode_as_gids(text, map),
            None => to_winansi_bytes(text),
        }
    }
}

fn font_family_name(face: &Face) -> Option<String> {
    for name in face.names() {
        if name.name_id == ttf_parser::name_id::FAMILY
            && name.is_unicode()
            && let Some(s) = name.to_string()
        {
            return Some(s);
        }
    }
    None
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Characters outside the code page are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match c as u32 {
            0x0000..=0x007F => Some(c as u8),
            0x00A0..=0x00FF => Some(c as u8),
            0x20AC => Some(0x80),
            0x201A => Some(0x82),
            0x0192 => Some(0x83),
            0x201E => Some(0x84),
            0x2026 => Some(0x85),
            0x2020 => Some(0x86),
            0x2021 => Some(0x87),
            0x02C6 => Some(0x88),
            0x2030 => Some(0x89),
            0x0160 => Some(0x8A),
            0x2039 => Some(0x8B),
            0x0152 => Some(0x8C),
            0x017D => Some(0x8E),
            0x2018 => Some(0x91),
            0x2019 => Some(0x92),
            0x201C => Some(0x93),
            0x201D => Some(0x94),
            0x2022 => Some(0x95),
            0x2013 => Some(0x96),
            0x2014 => Some(0x97),
            0x02DC => Some(0x98),
            0x2122 => Some(0x99),
            0x0161 => Some(0x9A),
            0x203A => Some(0x9B),
            0x0153 => Some(0x9C),
            0x017E => Some(0x9E),
            0x0178 => Some(0x9F),
            _ => None,
        })
        .collect()
}

/// Encode UTF-8 text as big-endian 2-byte glyph IDs for CIDFont content streams.
pub(crate) fn encode_as_gids(text: &str, char_to_gid: &HashMap<char, u16>) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for ch in text.chars() {
        let gid = char_to_gid.get(&ch).copied().unwrap_or(0);
        out.push((gid >> 8) as u8);
        out.push((gid & 0xFF) as u8);
    }
    out
}

/// Helvetica advance widths at 1000 units/em for WinAnsi bytes 32..=255.
/// Printable ASCII follows the Adobe AFM; the upper half uses an average.
fn helvetica_widths() -> Vec<f32> {
    const ASCII: [u16; 95] = [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
        278, 278, 584, 584, 584, 556, 1015, // :..@
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
        278, 278, 278, 469, 556, 333, // [..`
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
        334, 260, 334, 584, // {..~
    ];
    (32u8..=255u8)
        .map(|b| match b {
            32..=126 => ASCII[(b - 32) as usize] as f32,
            0xA0 => 278.0,
            _ => 556.0,
        })
        .collect()
}

/// Embed a TrueType/OpenType font as a CIDFont (Type0 composite) with Identity-H encoding.
/// The font data is subsetted to only include glyphs used on the page.
/// Returns the char → subset glyph id map, or `None` if the face can't be parsed.
fn embed_truetype(
    pdf: &mut Pdf,
    font_ref: Ref,
    descriptor_ref: Ref,
    data_ref: Ref,
    font_name: &str,
    font_data: &[u8],
    face_index: u32,
    used_chars: &HashSet<char>,
    alloc: &mut impl FnMut() -> Ref,
) -> Option<HashMap<char, u16>> {
    let face = Face::parse(font_data, face_index).ok()?;

    let units = face.units_per_em() as f32;
    let ascent = face.ascender() as f32 / units * 1000.0;
    let descent = face.descender() as f32 / units * 1000.0;
    let cap_height = face
        .capital_height()
        .map(|h| h as f32 / units * 1000.0)
        .unwrap_or(700.0);

    let bb = face.global_bounding_box();
    let bbox = Rect::new(
        bb.x_min as f32 / units * 1000.0,
        bb.y_min as f32 / units * 1000.0,
        bb.x_max as f32 / units * 1000.0,
        bb.y_max as f32 / units * 1000.0,
    );

    // Sorted so glyph remapping (and therefore the output bytes) is stable
    let mut chars: Vec<char> = used_chars.iter().copied().collect();
    chars.sort_unstable();

    let mut remapper = subsetter::GlyphRemapper::new();
    let mut char_to_gid = HashMap::new();
    let mut gid_widths: Vec<(u16, f32)> = Vec::new();
    for ch in chars {
        if let Some(gid) = face.glyph_index(ch) {
            let new_gid = remapper.remap(gid.0);
            char_to_gid.insert(ch, new_gid);
            let w = face
                .glyph_hor_advance(gid)
                .map(|adv| adv as f32 / units * 1000.0)
                .unwrap_or(0.0);
            gid_widths.push((new_gid, w));
        }
    }
    gid_widths.sort_by_key(|&(gid, _)| gid);
    gid_widths.dedup_by_key(|&mut (gid, _)| gid);

    let subset_data = subsetter::subset(font_data, face_index, &remapper).unwrap_or_else(|e| {
        log::warn!("Font subsetting failed for {font_name}: {e}, embedding full font");
        font_data.to_vec()
    });

    let data_len = i32::try_from(subset_data.len()).ok()?;
    pdf.stream(data_ref, &subset_data)
        .pair(Name(b"Length1"), data_len);

    let ps_name = font_name.replace(' ', "");

    pdf.font_descriptor(descriptor_ref)
        .name(Name(ps_name.as_bytes()))
        .flags(pdf_writer::types::FontFlags::NON_SYMBOLIC)
        .bbox(bbox)
        .italic_angle(0.0)
        .ascent(ascent)
        .descent(descent)
        .cap_height(cap_height)
        .stem_v(80.0)
        .font_file2(data_ref);

    let cid_font_ref = alloc();
    let system_info = pdf_writer::types::SystemInfo {
        registry: pdf_writer::Str(b"Adobe"),
        ordering: pdf_writer::Str(b"Identity"),
        supplement: 0,
    };
    {
        let mut cid = pdf.cid_font(cid_font_ref);
        cid.subtype(pdf_writer::types::CidFontType::Type2);
        cid.base_font(Name(ps_name.as_bytes()));
        cid.system_info(system_info);
        cid.font_descriptor(descriptor_ref);
        cid.default_width(0.0);
        cid.cid_to_gid_map_predefined(Name(b"Identity"));
        if !gid_widths.is_empty() {
            let mut w = cid.widths();
            for &(gid, width) in &gid_widths {
                w.consecutive(gid, [width]);
            }
        }
    }

    let tounicode_ref = alloc();
    let cmap_name = format!("{}-UTF16", ps_name);
    let mut cmap = pdf_writer::types::UnicodeCmap::new(
        Name(cmap_name.as_bytes()),
        pdf_writer::types::SystemInfo {
            registry: pdf_writer::Str(b"Adobe"),
            ordering: pdf_writer::Str(b"Identity"),
            supplement: 0,
        },
    );
    let mut pairs: Vec<(u16, char)> = char_to_gid.iter().map(|(&ch, &gid)| (gid, ch)).collect();
    pairs.sort_unstable();
    for (gid, ch) in pairs {
        cmap.pair(gid, ch);
    }
    let cmap_data = cmap.finish();
    pdf.stream(tounicode_ref, cmap_data.as_slice());

    pdf.type0_font(font_ref)
        .base_font(Name(ps_name.as_bytes()))
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_font_ref)
        .to_unicode(tounicode_ref);

    Some(char_to_gid)
}

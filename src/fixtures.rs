use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canvas::Recorder;
use crate::error::Result;
use crate::fonts::{Font, FontBook, FontSource};
use crate::model::PageSize;
use crate::pdf::write_page;
use crate::render::TableStyle;
use crate::scenarios::{self, Scenario};

#[derive(Clone, Debug)]
pub struct GenerateOptions {
    pub out_dir: PathBuf,
    /// Scenario names to generate; empty means all.
    pub only: Vec<String>,
    pub font: FontSource,
    pub style: TableStyle,
}

impl GenerateOptions {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            only: Vec::new(),
            font: FontSource::default(),
            style: TableStyle::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestItem {
    pub file: String,
    pub sha256: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub page_size: String,
    pub items: Vec<ManifestItem>,
}

/// Draw one scenario and encode it as PDF bytes.
pub fn render_scenario(
    scenario: &Scenario,
    fonts: &FontBook,
    style: &TableStyle,
) -> Result<Vec<u8>> {
    let mut recorder = Recorder::new(fonts);
    (scenario.compose)(&mut recorder, PageSize::A4, style)?;
    Ok(write_page(scenario.title, PageSize::A4, fonts, recorder.ops()))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn sha256_of_file(path: &Path) -> Result<String> {
    Ok(sha256_hex(&std::fs::read(path)?))
}

/// Font book and style for a run: a file font replaces the style's font name.
fn prepare_fonts(options: &GenerateOptions) -> Result<(FontBook, TableStyle)> {
    let mut fonts = FontBook::default();
    let mut style = options.style.clone();
    if options.font != FontSource::Helvetica {
        style.font = fonts.insert(Font::load(&options.font)?);
    } else if !fonts.contains(&style.font) {
        log::warn!("Font not found: {}, using Helvetica", style.font);
    }
    Ok((fonts, style))
}

/// Write the selected scenario PDFs and `manifest.json` into `out_dir`.
pub fn generate(options: &GenerateOptions) -> Result<Manifest> {
    let t0 = Instant::now();
    let selected = scenarios::select(&options.only)?;
    let (fonts, style) = prepare_fonts(options)?;
    std::fs::create_dir_all(&options.out_dir)?;

    let mut items = Vec::with_capacity(selected.len());
    for scenario in &selected {
        let t_start = Instant::now();
        let bytes = render_scenario(scenario, &fonts, &style)?;
        let path = options.out_dir.join(scenario.file_name);
        std::fs::write(&path, &bytes)?;
        let sha256 = sha256_of_file(&path)?;
        log::info!(
            "{}: {} bytes, sha256={}, {:.1}ms",
            scenario.file_name,
            bytes.len(),
            &sha256[..16],
            t_start.elapsed().as_secs_f64() * 1000.0,
        );
        items.push(ManifestItem {
            file: scenario.file_name.to_string(),
            sha256,
        });
    }

    let manifest = Manifest {
        page_size: "A4".to_string(),
        items,
    };
    std::fs::write(
        options.out_dir.join("manifest.json"),
        serde_json::to_string_pretty(&manifest)?,
    )?;

    log::info!(
        "Generated {} fixtures in {:.1}ms",
        manifest.items.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );
    Ok(manifest)
}

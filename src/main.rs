use std::path::PathBuf;
use std::process;

use clap::Parser;
use tablefix_pdf::fonts::FontSource;
use tablefix_pdf::model::Stroke;
use tablefix_pdf::{GenerateOptions, TableStyle, scenarios};

/// Generate reproducible PDF table fixtures and a SHA-256 manifest.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Output directory for the PDFs and manifest.json
    #[arg(long, required_unless_present = "list")]
    out: Option<PathBuf>,

    /// Only generate these scenarios (e.g. 05_row_merges_splits); repeatable
    #[arg(long)]
    only: Vec<String>,

    /// TrueType/OpenType font file to embed instead of Helvetica
    /// (defaults to $TABLEFIX_FONT)
    #[arg(long)]
    font: Option<PathBuf>,

    #[arg(long, default_value_t = tablefix_pdf::render::DEFAULT_FONT_SIZE)]
    font_size: f32,

    /// Border line width in points
    #[arg(long, default_value_t = 0.5)]
    line_width: f32,

    /// Vertical text offset as a fraction of the font size
    #[arg(long, default_value_t = tablefix_pdf::render::BASELINE_FACTOR)]
    baseline_factor: f32,

    /// List the available scenarios and exit
    #[arg(long)]
    list: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if cli.list {
        for s in &scenarios::ALL {
            println!("{:<28} {}", s.name(), s.title);
        }
        return;
    }

    let Some(out) = cli.out else {
        eprintln!("Error: --out is required");
        process::exit(2);
    };

    let font = match cli.font {
        Some(path) => FontSource::File(path),
        None => FontSource::from_env(),
    };
    let style = TableStyle {
        stroke: Some(Stroke {
            width: cli.line_width,
            ..Stroke::default()
        }),
        font_size: cli.font_size,
        baseline_factor: cli.baseline_factor,
        ..TableStyle::default()
    };
    let options = GenerateOptions {
        out_dir: out,
        only: cli.only,
        font,
        style,
    };

    let manifest = match tablefix_pdf::generate(&options) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&manifest) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

pub mod canvas;
pub mod compose;
mod error;
pub mod fixtures;
pub mod fonts;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod render;
pub mod scenarios;

pub use canvas::{Canvas, DrawOp, Recorder};
pub use compose::draw_table;
pub use error::{Axis, DimensionFault, Error, Result};
pub use fixtures::{GenerateOptions, Manifest, ManifestItem, generate};
pub use layout::{CellKind, TableLayout};
pub use model::{CellRect, Dimensions, Grid, PageSize, Point, Span};
pub use render::{TableStyle, render_table};

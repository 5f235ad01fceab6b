//! Renders a two-module figure from generated placeholder images.
//!
//! Run with `cargo run --example two_modules`; outputs land in
//! `target/two_modules/`.

use std::fs;

use serde_json::{Map, json};

use gridfig::config::AppConfig;
use gridfig::export::Backend;
use gridfig::module::{ImageRef, RasterImage};
use gridfig::{CellData, FigureBuilder, FigureError, ModuleData, ModuleInput, color::Rgb};

fn cell(color: Rgb) -> CellData {
    CellData::single(ImageRef::Raw(RasterImage::filled(320, 240, color)))
}

fn main() -> Result<(), FigureError> {
    env_logger::init();

    let grid = ModuleInput {
        layout: json!({
            "captions.south.size": 3.0,
            "column_titles.north.size": 4.0,
            "column_titles.north.background_colors": [[70, 130, 180], [180, 130, 70]],
        })
        .as_object()
        .cloned()
        .unwrap_or_default(),
        data: ModuleData {
            elements: vec![
                vec![cell(Rgb::new(200, 80, 80)), cell(Rgb::new(80, 200, 80))],
                vec![cell(Rgb::new(80, 80, 200)), cell(Rgb::new(200, 200, 80))],
            ],
            column_titles: {
                let mut titles =
                    gridfig::geometry::NorthSouth::<gridfig::TitleOverride>::default();
                titles.north.content = Some(vec!["control".into(), "treated".into()]);
                titles
            },
            ..ModuleData::default()
        },
    };

    let single = ModuleInput {
        layout: Map::new(),
        data: ModuleData {
            elements: vec![vec![cell(Rgb::new(120, 120, 120))]],
            ..ModuleData::default()
        },
    };

    let out_dir = std::path::Path::new("target/two_modules");
    fs::create_dir_all(out_dir)?;

    let builder = FigureBuilder::new(AppConfig::default());
    let document = builder.horizontal_figure(vec![grid, single], 14.0, Some(Backend::Tikz), out_dir)?;

    println!("wrote {}", document.display());
    Ok(())
}

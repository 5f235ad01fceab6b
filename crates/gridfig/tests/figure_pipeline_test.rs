//! End-to-end tests for the figure assembly pipeline.

use std::fs;

use float_cmp::assert_approx_eq;
use serde_json::{Map, json};

use gridfig::config::AppConfig;
use gridfig::export::Backend;
use gridfig::module::{ImageRef, RasterImage};
use gridfig::{CellData, FigureBuilder, FigureError, ModuleData, ModuleInput, color::Rgb};

fn raw_image(px_width: u32, px_height: u32) -> ImageRef {
    ImageRef::Raw(RasterImage::filled(px_width, px_height, Rgb::new(80, 120, 160)))
}

fn grid_input(rows: usize, columns: usize, px_width: u32, px_height: u32) -> ModuleInput {
    let elements = (0..rows)
        .map(|_| {
            (0..columns)
                .map(|_| CellData::single(raw_image(px_width, px_height)))
                .collect()
        })
        .collect();
    ModuleInput {
        layout: Map::new(),
        data: ModuleData {
            elements,
            ..ModuleData::default()
        },
    }
}

#[test]
fn test_two_identical_modules_align_to_half_width_each() {
    let builder = FigureBuilder::default();
    let inputs = vec![grid_input(1, 1, 100, 200), grid_input(1, 1, 100, 200)];

    let mut modules = builder.assemble(inputs).unwrap();
    // Strip the default padding so the arithmetic is exact.
    for module in &mut modules {
        *module.layout_mut().padding_mut() = gridfig::geometry::Edges::uniform(0.0);
    }
    builder.align(&mut modules, 300.0).unwrap();

    for module in &modules {
        assert_approx_eq!(f64, module.total_width(), 150.0);
        assert_approx_eq!(f64, module.total_height(), 300.0);
    }
}

#[test]
fn test_tikz_figure_writes_images_fragments_and_document() {
    let dir = tempfile::tempdir().unwrap();
    let builder = FigureBuilder::default();
    let inputs = vec![grid_input(2, 2, 64, 64), grid_input(1, 1, 64, 64)];

    let document = builder
        .horizontal_figure(inputs, 14.0, Some(Backend::Tikz), dir.path())
        .unwrap();

    assert_eq!(document, dir.path().join("figure.tex"));
    assert!(dir.path().join("module0.tex").is_file());
    assert!(dir.path().join("module1.tex").is_file());
    assert!(dir.path().join("module0-1-1.png").is_file());
    assert!(dir.path().join("module0-2-2.png").is_file());
    assert!(dir.path().join("module1-1-1.png").is_file());

    let contents = fs::read_to_string(document).unwrap();
    assert!(contents.starts_with("\\documentclass{standalone}"));
    assert!(contents.contains("\\begin{tikzpicture}"));
    assert!(contents.trim_end().ends_with("\\end{document}"));
}

#[test]
fn test_html_backend_produces_an_html_document() {
    let dir = tempfile::tempdir().unwrap();
    let builder = FigureBuilder::default();

    let document = builder
        .horizontal_figure(
            vec![grid_input(1, 2, 32, 32)],
            10.0,
            Some(Backend::Html),
            dir.path(),
        )
        .unwrap();

    assert_eq!(document, dir.path().join("figure.html"));
    let contents = fs::read_to_string(document).unwrap();
    assert!(contents.contains("<img src="));
}

#[test]
fn test_backends_without_generator_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let builder = FigureBuilder::default();

    let err = builder
        .horizontal_figure(
            vec![grid_input(1, 1, 32, 32)],
            10.0,
            Some(Backend::Pptx),
            dir.path(),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        FigureError::UnsupportedBackend(Backend::Pptx)
    ));
    // Nothing was produced for the figure.
    assert!(!dir.path().join("figure.tex").exists());
}

#[test]
fn test_layout_overrides_flow_into_sizing() {
    let builder = FigureBuilder::default();

    let mut plain = grid_input(1, 1, 100, 100);
    plain.layout = json!({ "padding.north": 0.0, "padding.south": 0.0,
                           "padding.east": 0.0, "padding.west": 0.0 })
        .as_object()
        .unwrap()
        .clone();

    let mut captioned = grid_input(1, 1, 100, 100);
    captioned.layout = json!({ "padding.north": 0.0, "padding.south": 0.0,
                               "padding.east": 0.0, "padding.west": 0.0,
                               "captions.south.size": 3.0 })
        .as_object()
        .unwrap()
        .clone();

    let mut modules = builder.assemble(vec![plain, captioned]).unwrap();
    builder.align(&mut modules, 100.0).unwrap();

    // Both share one total height; the captioned module's image area is
    // shorter by the caption slot's extent.
    assert_approx_eq!(
        f64,
        modules[0].total_height(),
        modules[1].total_height(),
        epsilon = 1e-9
    );
    assert_approx_eq!(
        f64,
        modules[0].total_width() + modules[1].total_width(),
        100.0,
        epsilon = 1e-9
    );
    assert!(modules[1].total_width() < modules[0].total_width());
}

#[test]
fn test_unknown_layout_key_fails_assembly() {
    let builder = FigureBuilder::default();
    let mut input = grid_input(1, 1, 10, 10);
    input.layout = json!({ "padding.north": 1.0 }).as_object().unwrap().clone();

    assert!(matches!(
        builder.assemble(vec![input]),
        Err(FigureError::Merge(_))
    ));
}

#[test]
fn test_empty_figure_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let builder = FigureBuilder::new(AppConfig::default());

    let err = builder
        .horizontal_figure(vec![], 10.0, None, dir.path())
        .unwrap_err();
    assert!(matches!(err, FigureError::EmptyFigure));
}

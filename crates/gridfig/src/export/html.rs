//! HTML backend: renders a solved module as absolutely positioned
//! millimeter-unit elements inside one container `<div>`.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use log::debug;

use gridfig_core::dimension::GridFrame;
use gridfig_core::geometry::Direction;
use gridfig_core::module::{Cell, Module, TitleBar};

use super::{ExportError, Generator};

/// Renders modules as `position: absolute` HTML fragments.
pub struct HtmlGenerator;

impl Generator for HtmlGenerator {
    fn fragment_extension(&self) -> &'static str {
        "html"
    }

    fn document_prologue(&self) -> &'static str {
        "<!DOCTYPE html>\n<html>\n<body style=\"margin: 0; display: flex;\">\n"
    }

    fn document_epilogue(&self) -> &'static str {
        "</body>\n</html>\n"
    }

    fn generate(&self, module: &Module, dir: &Path, stem: &str) -> Result<(), ExportError> {
        let fragment = render_module(module)?;
        let path = dir.join(format!("{stem}.{}", self.fragment_extension()));
        debug!(path = path.display().to_string(); "writing html fragment");
        fs::write(path, fragment)?;
        Ok(())
    }
}

fn render_module(module: &Module) -> Result<String, ExportError> {
    let frame = GridFrame::of(module);

    let mut out = String::new();
    writeln!(
        out,
        "<div style=\"position: relative; width: {}mm; height: {}mm;\">",
        fmt_mm(module.total_width()),
        fmt_mm(module.total_height())
    )?;

    for (row, cells) in module.rows().iter().enumerate() {
        for (column, cell) in cells.iter().enumerate() {
            render_cell(&mut out, module, &frame, cell, row, column)?;
        }
    }

    render_title_bars(&mut out, module, &frame)?;

    writeln!(out, "</div>")?;
    Ok(out)
}

fn render_cell(
    out: &mut String,
    module: &Module,
    frame: &GridFrame,
    cell: &Cell,
    row: usize,
    column: usize,
) -> Result<(), ExportError> {
    let (x, y) = frame.cell_origin(row, column);
    let cw = frame.cell_width();
    let ch = frame.cell_height();

    for image in cell.images().as_slice() {
        let path = image
            .path()
            .ok_or(ExportError::UnmaterializedImage { row, column })?;
        writeln!(
            out,
            "<img src=\"{}\" style=\"position: absolute; left: {}mm; top: {}mm; \
             width: {}mm; height: {}mm;\">",
            path.display(),
            fmt_mm(x),
            fmt_mm(y),
            fmt_mm(cw),
            fmt_mm(ch)
        )?;
    }

    if let Some(outline) = cell.frame() {
        writeln!(
            out,
            "<div style=\"position: absolute; left: {}mm; top: {}mm; width: {}mm; \
             height: {}mm; box-sizing: border-box; border: {}pt solid {};\"></div>",
            fmt_mm(x),
            fmt_mm(y),
            fmt_mm(cw),
            fmt_mm(ch),
            outline.line_width,
            outline.color
        )?;
    }

    if let Some(marker) = cell.crop_marker() {
        writeln!(
            out,
            "<div style=\"position: absolute; left: {}mm; top: {}mm; width: {}mm; \
             height: {}mm; box-sizing: border-box; border: {}pt solid {};\"></div>",
            fmt_mm(x + marker.x * cw),
            fmt_mm(y + marker.y * ch),
            fmt_mm(marker.width * cw),
            fmt_mm(marker.height * ch),
            marker.line_width,
            marker.color
        )?;
    }

    let captions = module.layout().captions();
    for direction in Direction::ALL {
        let slot = captions.get(direction);
        let text = cell.caption(direction);
        if slot.size <= 0.0 || text.is_empty() {
            continue;
        }
        let (left, top, width, height) = match direction {
            Direction::North => (x, y - slot.offset - slot.size, cw, slot.size),
            Direction::South => (x, y + ch + slot.offset, cw, slot.size),
            Direction::West => (x - slot.offset - slot.size, y, slot.size, ch),
            Direction::East => (x + cw + slot.offset, y, slot.size, ch),
        };
        writeln!(
            out,
            "<div style=\"position: absolute; left: {}mm; top: {}mm; width: {}mm; \
             height: {}mm; display: flex; align-items: center; justify-content: center; \
             font-size: {}pt;\">{}</div>",
            fmt_mm(left),
            fmt_mm(top),
            fmt_mm(width),
            fmt_mm(height),
            slot.font_size,
            escape_html(text)
        )?;
    }

    Ok(())
}

fn render_title_bars(
    out: &mut String,
    module: &Module,
    frame: &GridFrame,
) -> Result<(), ExportError> {
    let layout = module.layout();
    let captions = layout.captions();
    let cw = frame.cell_width();
    let ch = frame.cell_height();

    let north = &layout.column_titles().north;
    if north.size > 0.0 {
        for column in 0..module.num_columns() {
            let (x, y) = frame.cell_origin(0, column);
            let top = y - captions.get(Direction::North).extent() - north.extent();
            render_bar_entry(out, north, column, x, top, cw, north.size)?;
        }
    }

    let south = &layout.column_titles().south;
    if south.size > 0.0 {
        for column in 0..module.num_columns() {
            let (x, y) = frame.cell_origin(module.num_rows() - 1, column);
            let top = y + ch + captions.get(Direction::South).extent() + south.offset;
            render_bar_entry(out, south, column, x, top, cw, south.size)?;
        }
    }

    let west = &layout.row_titles().west;
    if west.size > 0.0 {
        for row in 0..module.num_rows() {
            let (x, y) = frame.cell_origin(row, 0);
            let left = x - captions.get(Direction::West).extent() - west.extent();
            render_bar_entry(out, west, row, left, y, west.size, ch)?;
        }
    }

    let east = &layout.row_titles().east;
    if east.size > 0.0 {
        for row in 0..module.num_rows() {
            let (x, y) = frame.cell_origin(row, module.num_columns() - 1);
            let left = x + cw + captions.get(Direction::East).extent() + east.offset;
            render_bar_entry(out, east, row, left, y, east.size, ch)?;
        }
    }

    Ok(())
}

fn render_bar_entry(
    out: &mut String,
    bar: &TitleBar,
    index: usize,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
) -> Result<(), ExportError> {
    let text = bar.content.get(index).map(String::as_str).unwrap_or("");
    writeln!(
        out,
        "<div style=\"position: absolute; left: {}mm; top: {}mm; width: {}mm; \
         height: {}mm; background: {}; color: {}; display: flex; align-items: center; \
         justify-content: center; font-size: {}pt;\">{}</div>",
        fmt_mm(left),
        fmt_mm(top),
        fmt_mm(width),
        fmt_mm(height),
        bar.background_for(index),
        bar.text_color,
        bar.font_size,
        escape_html(text)
    )?;
    Ok(())
}

fn fmt_mm(value: f64) -> String {
    format!("{value:.3}")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

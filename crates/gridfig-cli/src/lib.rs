//! CLI logic for the gridfig figure generator.

mod args;
mod config;
mod error;
mod input;

pub use args::Args;
pub use error::CliError;

use std::{fs, path::Path};

use log::info;

use gridfig::FigureBuilder;
use gridfig::export::Backend;

/// Run the gridfig CLI application
///
/// Reads the JSON figure description, assembles and aligns its modules
/// to the requested width, and renders the combined document into the
/// output directory.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Description parsing errors
/// - Unreadable image files
/// - Configuration loading errors
/// - Figure assembly, alignment and rendering errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_dir = args.output_dir;
        "Generating figure"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let backend = args
        .backend
        .as_deref()
        .map(|name| {
            name.parse::<Backend>()
                .map_err(|_| CliError::UnknownBackend(name.to_string()))
        })
        .transpose()?;

    let source = fs::read_to_string(&args.input)?;
    let description = input::parse_description(&source)?;

    // Relative image paths resolve against the description's directory.
    let base_dir = Path::new(&args.input).parent().unwrap_or(Path::new("."));
    let inputs = input::into_inputs(description, base_dir)?;

    let output_dir = Path::new(&args.output_dir);
    fs::create_dir_all(output_dir)?;

    let builder = FigureBuilder::new(app_config);
    let document = builder.horizontal_figure(inputs, args.width, backend, output_dir)?;

    info!(document = document.display().to_string(); "Figure generated successfully");

    Ok(())
}

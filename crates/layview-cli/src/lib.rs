//! Layview CLI library
//!
//! This module contains the core CLI logic for the Layview renderer.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::{info, warn};

use layview::{
    LayviewError, MultiboxRenderer,
    config::{AppConfig, FontsConfig},
    export,
};

use error_adapter::{DiagnosticAdapter, Reportable, render_report};

/// Run the Layview CLI application
///
/// Renders every layout of the input file and writes the stacked image to
/// the output file as PNG. The output's parent directory is created when
/// missing.
///
/// # Errors
///
/// Returns `LayviewError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input and invalid commands
/// - Font errors
/// - PNG export errors
pub fn run(args: &Args) -> Result<(), LayviewError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing layout file"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(fonts_dir) = &args.fonts_dir {
        app_config = AppConfig::new(FontsConfig::new(fonts_dir));
    }

    let source = fs::read_to_string(&args.input)?;

    let mut renderer = MultiboxRenderer::new(source.as_str(), app_config.fonts().dir())?;
    for warning in renderer.warnings() {
        let report = render_report(&Reportable::Diagnostic(DiagnosticAdapter::new(
            warning, &source,
        )));
        warn!("{report}");
    }

    let image = renderer.render()?;

    let output = Path::new(&args.output);
    if let Some(parent) = output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    export::save_png(image, output)?;

    info!(output_file = args.output; "PNG exported successfully");

    Ok(())
}

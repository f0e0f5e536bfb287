//! MCA command implementation.

use super::output::{JsonMca, format_mca_text};
use super::{CliError, OutputFormat};
use gig::Sample;
use gig::gp::Mca;
use std::path::Path;

/// Execute the mca command.
///
/// # Errors
///
/// Returns an error if the sample cannot be loaded or S+ is empty.
pub(crate) fn execute(sample_path: &Path, format: OutputFormat) -> Result<(), CliError> {
    let sample = Sample::from_json_file(sample_path).map_err(|e| {
        CliError::new(format!("Failed to load {}: {e}", sample_path.display()))
    })?;
    let mca = Mca::from_sample(&sample)?;

    match format {
        OutputFormat::Text => print!("{}", format_mca_text(&mca, &sample)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonMca::from_mca(&mca))?;
            println!("{json}");
        }
    }

    Ok(())
}

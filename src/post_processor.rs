use std::io::Write;
use std::path::Path;

use crate::{datatypes::MeshElement, error::MeshtuneError};

pub const ORIGINAL_MESH_CSV: &str = "original_mesh_data.csv";
pub const OPTIMIZED_MESH_CSV: &str = "optimized_mesh_data.csv";
pub const POOR_ELEMENTS_CSV: &str = "poor_quality_elements.csv";

const CSV_HEADER: &str = "Element_ID,Aspect_Ratio,Jacobian,Skewness,Element_Quality";

/// Writes one mesh dataset to a CSV file
///
/// # Arguments
/// * `mesh` - A reference to the dataset to export
/// * `output` - The path of the output csv
pub fn csv_output(mesh: &Vec<MeshElement>, output: &Path) -> Result<(), MeshtuneError> {
    let mut file = match std::fs::File::create(output) {
        Ok(f) => f,
        Err(err) => {
            return Err(MeshtuneError::PostProcessor(format!(
                "Failed to create {}: {err}",
                output.display()
            )));
        }
    };

    if let Err(err) = writeln!(file, "{CSV_HEADER}") {
        return Err(MeshtuneError::PostProcessor(format!(
            "Failed to write to {}: {err}",
            output.display()
        )));
    }

    for element in mesh {
        if let Err(err) = writeln!(
            file,
            "{},{},{},{},{}",
            element.element_id,
            element.aspect_ratio,
            element.jacobian,
            element.skewness,
            element.element_quality
        ) {
            return Err(MeshtuneError::PostProcessor(format!(
                "Failed to write to {}: {err}",
                output.display()
            )));
        }
    }

    Ok(())
}

/// Writes the three result tables into the output directory
///
/// # Arguments
/// * `original` - The dataset as generated
/// * `optimized` - The dataset after the adjustment pass
/// * `poor` - The poor-quality subset flagged by the analyzer
/// * `output_dir` - The directory for the csv files
pub fn run(
    original: &Vec<MeshElement>,
    optimized: &Vec<MeshElement>,
    poor: &Vec<MeshElement>,
    output_dir: &Path,
) -> Result<(), MeshtuneError> {
    csv_output(original, &output_dir.join(ORIGINAL_MESH_CSV))?;
    csv_output(optimized, &output_dir.join(OPTIMIZED_MESH_CSV))?;
    csv_output(poor, &output_dir.join(POOR_ELEMENTS_CSV))?;

    log::info!(
        "wrote output to {ORIGINAL_MESH_CSV}, {OPTIMIZED_MESH_CSV}, and {POOR_ELEMENTS_CSV}"
    );

    Ok(())
}

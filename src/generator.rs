use std::ops::Range;

use indicatif::ProgressBar;
use json::JsonValue;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    datatypes::{MeshElement, SimulationParameters},
    error::MeshtuneError,
};

pub const DEFAULT_NUM_ELEMENTS: usize = 1000;
pub const DEFAULT_SEED: u64 = 42;

// Uniform sampling ranges for the simulated quality attributes
pub const ASPECT_RATIO_RANGE: Range<f64> = 1.0..5.0;
pub const JACOBIAN_RANGE: Range<f64> = 0.3..1.0;
pub const SKEWNESS_RANGE: Range<f64> = 0.0..0.8;
pub const ELEMENT_QUALITY_RANGE: Range<f64> = 0.4..1.0;

/// Parses the simulation input file into a JsonValue object
///
/// # Arguments
/// * `input_file` - The path to the input file
///
/// # Returns
/// A JsonValue object with a verified `simulation` section
fn load_input_file(input_file: &str) -> Result<JsonValue, MeshtuneError> {
    let file_string = match std::fs::read_to_string(input_file) {
        Ok(f) => f,
        Err(_err) => {
            return Err(MeshtuneError::Input(format!(
                "Unable to open input file {}",
                input_file
            )))
        }
    };

    let input_file_json = match json::parse(&file_string) {
        Ok(f) => f,
        Err(err) => {
            return Err(MeshtuneError::Input(format!(
                "Error in input file json: {err}"
            )))
        }
    };

    if !input_file_json.has_key("simulation") {
        return Err(MeshtuneError::Input(
            "Input json missing simulation section".to_string(),
        ));
    }

    Ok(input_file_json)
}

/// Parses SimulationParameters from the input json. Fields absent from the
/// `simulation` section fall back to the built-in defaults.
///
/// # Arguments
/// * `input_json` - The input file as a JsonValue object
///
/// # Returns
/// A SimulationParameters instance
fn parse_simulation_parameters(
    input_json: &JsonValue,
) -> Result<SimulationParameters, MeshtuneError> {
    let simulation = &input_json["simulation"];

    let num_elements = if simulation.has_key("num_elements") {
        match simulation["num_elements"].as_u64() {
            Some(n) => n as usize,
            None => {
                return Err(MeshtuneError::Input(
                    "Bad value for num_elements in simulation section".to_owned(),
                ))
            }
        }
    } else {
        DEFAULT_NUM_ELEMENTS
    };

    let seed = if simulation.has_key("seed") {
        match simulation["seed"].as_u64() {
            Some(s) => s,
            None => {
                return Err(MeshtuneError::Input(
                    "Bad value for seed in simulation section".to_owned(),
                ))
            }
        }
    } else {
        DEFAULT_SEED
    };

    Ok(SimulationParameters { num_elements, seed })
}

/// Resolves the run parameters, either from an optional json input file or
/// from the built-in defaults
///
/// # Arguments
/// * `input_file` - The path to the input file, if one was given
///
/// # Returns
/// A SimulationParameters instance
pub fn load_parameters(input_file: Option<&str>) -> Result<SimulationParameters, MeshtuneError> {
    match input_file {
        Some(path) => {
            let input_json = load_input_file(path)?;
            let params = parse_simulation_parameters(&input_json)?;
            log::info!("loaded simulation parameters from {}", path);
            Ok(params)
        }
        None => Ok(SimulationParameters {
            num_elements: DEFAULT_NUM_ELEMENTS,
            seed: DEFAULT_SEED,
        }),
    }
}

/// Runs the generator: fabricates the synthetic mesh dataset by drawing
/// every quality attribute from its documented uniform range. The element
/// count is the only validated input; the same seed always reproduces the
/// same dataset.
///
/// # Arguments
/// * `params` - The resolved simulation parameters
///
/// # Returns
/// A vector of MeshElement records with ids 1..=num_elements, in order
pub fn run(params: &SimulationParameters) -> Result<Vec<MeshElement>, MeshtuneError> {
    if params.num_elements == 0 {
        return Err(MeshtuneError::Generator(
            "Cannot generate a mesh with zero elements".to_owned(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut mesh: Vec<MeshElement> = Vec::with_capacity(params.num_elements);

    let bar = ProgressBar::new(params.num_elements as u64);
    for element_id in 1..=params.num_elements {
        bar.inc(1);

        mesh.push(MeshElement {
            element_id,
            aspect_ratio: rng.gen_range(ASPECT_RATIO_RANGE),
            jacobian: rng.gen_range(JACOBIAN_RANGE),
            skewness: rng.gen_range(SKEWNESS_RANGE),
            element_quality: rng.gen_range(ELEMENT_QUALITY_RANGE),
        });
    }
    bar.finish();

    log::info!(
        "generated {} mesh elements with seed {}",
        mesh.len(),
        params.seed
    );

    Ok(mesh)
}

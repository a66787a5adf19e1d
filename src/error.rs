use std::{error::Error, fmt};

/// Errors raised by the meshtune pipeline, one variant per fallible stage.
///
/// The quality classifier and the metrics comparator are pure arithmetic
/// over in-memory data and cannot fail, so they have no variants here.
#[derive(Debug)]
pub enum MeshtuneError {
    /// Problems with the simulation input file or its values
    Input(String),
    /// Problems while generating the synthetic mesh
    Generator(String),
    /// Problems while exporting the result tables
    PostProcessor(String),
}

impl fmt::Display for MeshtuneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshtuneError::Input(v) => write!(f, "input error: {v}"),
            MeshtuneError::Generator(v) => write!(f, "generator error: {v}"),
            MeshtuneError::PostProcessor(v) => write!(f, "post processor error: {v}"),
        }
    }
}

impl Error for MeshtuneError {}

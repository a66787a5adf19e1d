use crate::datatypes::{MeshElement, QualityReport};

// Fixed quality thresholds. All comparisons are strict: a value exactly at
// its threshold is still acceptable.
pub const MAX_ASPECT_RATIO: f64 = 3.5;
pub const MIN_JACOBIAN: f64 = 0.5;
pub const MAX_SKEWNESS: f64 = 0.6;
pub const MIN_ELEMENT_QUALITY: f64 = 0.6;

/// Returns true if the element fails at least one quality threshold
pub fn is_poor(element: &MeshElement) -> bool {
    element.aspect_ratio > MAX_ASPECT_RATIO
        || element.jacobian < MIN_JACOBIAN
        || element.skewness > MAX_SKEWNESS
        || element.element_quality < MIN_ELEMENT_QUALITY
}

/// Runs the quality analysis over a mesh dataset
///
/// # Arguments
/// * `mesh` - A reference to the mesh dataset
///
/// # Returns
/// A tuple of the aggregate quality report and the poor-quality subset,
/// in that order. The subset is an owned copy with the input order kept.
pub fn run(mesh: &Vec<MeshElement>) -> (QualityReport, Vec<MeshElement>) {
    let mut sum_aspect_ratio = 0.0;
    let mut sum_jacobian = 0.0;
    let mut sum_skewness = 0.0;
    let mut sum_element_quality = 0.0;

    for element in mesh {
        sum_aspect_ratio += element.aspect_ratio;
        sum_jacobian += element.jacobian;
        sum_skewness += element.skewness;
        sum_element_quality += element.element_quality;
    }

    let poor_elements: Vec<MeshElement> = mesh.iter().filter(|e| is_poor(e)).cloned().collect();

    let total = mesh.len() as f64;
    let report = QualityReport {
        total_elements: mesh.len(),
        poor_elements: poor_elements.len(),
        percent_poor: (poor_elements.len() as f64 / total) * 100.0,
        avg_aspect_ratio: sum_aspect_ratio / total,
        avg_jacobian: sum_jacobian / total,
        avg_skewness: sum_skewness / total,
        avg_element_quality: sum_element_quality / total,
    };

    log::info!(
        "flagged {} of {} elements as poor quality ({:.2}%)",
        report.poor_elements,
        report.total_elements,
        report.percent_poor
    );

    (report, poor_elements)
}

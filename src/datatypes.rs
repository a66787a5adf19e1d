/// A single mesh element row: id plus the four simulated quality attributes.
/// Aspect ratio and skewness are better low; jacobian and element quality
/// are better high.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshElement {
    pub element_id: usize,
    pub aspect_ratio: f64,
    pub jacobian: f64,
    pub skewness: f64,
    pub element_quality: f64,
}

#[derive(Debug, Clone)]
pub struct SimulationParameters {
    pub num_elements: usize,
    pub seed: u64,
}

#[derive(Debug)]
pub struct QualityReport {
    pub total_elements: usize,
    pub poor_elements: usize,
    pub percent_poor: f64,
    pub avg_aspect_ratio: f64,
    pub avg_jacobian: f64,
    pub avg_skewness: f64,
    pub avg_element_quality: f64,
}

#[derive(Debug)]
pub struct OptimizationMetrics {
    pub original_avg_quality: f64,
    pub optimized_avg_quality: f64,
    pub improvement_percentage: f64,
    pub time_reduction_percentage: f64,
}

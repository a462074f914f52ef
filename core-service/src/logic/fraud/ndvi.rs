//! NDVI Uniformity
//!
//! Uniformity = 1 - coefficient of variation of the NDVI samples across a
//! field, clamped to [0, 1]. Drip-irrigated plots show a very even canopy.

/// Uniformity of a series of NDVI samples.
///
/// Empty series or zero mean -> 0.0 (nothing to vouch for).
pub fn calculate_ndvi_uniformity(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    if mean <= 0.0 || !mean.is_finite() {
        return 0.0;
    }

    let variance = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let cv = variance.sqrt() / mean;

    (1.0 - cv).clamp(0.0, 1.0)
}

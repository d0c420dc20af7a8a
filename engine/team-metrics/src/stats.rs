//! Summary statistics over per-match contribution fractions

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation, 0 for an empty slice
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    let variance =
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// `1 - stddev / mean`, or 0 when the mean is not positive
pub fn consistency_rating(values: &[f64]) -> f64 {
    let mean = mean(values);
    if mean > 0.0 {
        1.0 - population_std_dev(values) / mean
    } else {
        0.0
    }
}

/// `numerator / denominator`, or 0 when the denominator is 0
pub fn rate(numerator: f64, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}

//! Offset removal and normalization helpers

/// Subtract `value` from every sample
pub fn cut_value(data: &[f64], value: f64) -> Vec<f64> {
    data.iter().map(|x| x - value).collect()
}

/// Subtract the sample mean; empty input stays empty
pub fn cut_mean(data: &[f64]) -> Vec<f64> {
    if data.is_empty() {
        return Vec::new();
    }
    let mean = data.iter().sum::<f64>() / data.len() as f64;
    cut_value(data, mean)
}

/// Scale samples into `[0, 1]`
///
/// A constant input maps to all zeros.
pub fn min_max_normalize(data: &[f64]) -> Vec<f64> {
    let min = data.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let max = data.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let range = max - min;

    if range > 0.0 {
        data.iter().map(|x| (x - min) / range).collect()
    } else {
        vec![0.0; data.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_mean() {
        let centered = cut_mean(&[1.0, 2.0, 3.0, 6.0]);
        assert_eq!(centered, vec![-2.0, -1.0, 0.0, 3.0]);
        assert!(cut_mean(&[]).is_empty());
    }

    #[test]
    fn test_min_max_normalize() {
        assert_eq!(min_max_normalize(&[2.0, 4.0, 3.0]), vec![0.0, 1.0, 0.5]);
        assert_eq!(min_max_normalize(&[5.0, 5.0]), vec![0.0, 0.0]);
    }
}

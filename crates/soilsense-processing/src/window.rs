//! Fixed-length window extraction around event centers

/// Default number of samples per event window
pub const DEFAULT_WINDOW_LENGTH: usize = 96;

/// Right-pad `data` with `value` up to `length`, or truncate it to `length`
pub fn fill_to_length(data: &[f64], value: f64, length: usize) -> Vec<f64> {
    let mut window = Vec::with_capacity(length);
    window.extend_from_slice(&data[..data.len().min(length)]);
    window.resize(length, value);
    window
}

/// Extract `length` samples from `[center - length/2, center + length/2)`
///
/// The range is clamped to the signal; whatever is missing is filled with
/// `fill` on the right. Centers far outside the signal give an all-fill window.
pub fn extract_centered(signal: &[f64], center: i64, fill: f64, length: usize) -> Vec<f64> {
    let half = (length / 2) as i64;
    let len = signal.len() as i64;

    let start = center.saturating_sub(half).clamp(0, len) as usize;
    let end = center.saturating_add(half).clamp(0, len) as usize;

    if start >= end {
        return vec![fill; length];
    }
    fill_to_length(&signal[start..end], fill, length)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_interior_window() {
        let signal = ramp(1000);
        let window = extract_centered(&signal, 500, -1.0, 96);

        assert_eq!(window.len(), 96);
        assert_eq!(window[0], 452.0);
        assert_eq!(window[95], 547.0);
    }

    #[test]
    fn test_length_at_every_boundary() {
        let signal = ramp(200);
        let centers = [-500, -48, -1, 0, 1, 47, 48, 100, 151, 152, 199, 200, 247, 248, 1000];

        for &center in &centers {
            for &length in &[1usize, 2, 95, 96, 97, 400] {
                let window = extract_centered(&signal, center, 7.5, length);
                assert_eq!(window.len(), length, "center {} length {}", center, length);
            }
        }
    }

    #[test]
    fn test_near_edges_pad_on_the_right() {
        let signal = ramp(100);

        // Left edge: samples 0..58 followed by fill
        let left = extract_centered(&signal, 10, -1.0, 96);
        assert_eq!(left[0], 0.0);
        assert_eq!(left[57], 57.0);
        assert!(left[58..].iter().all(|&v| v == -1.0));

        // Right edge: samples 42..100 followed by fill
        let right = extract_centered(&signal, 90, -1.0, 96);
        assert_eq!(right[0], 42.0);
        assert_eq!(right[57], 99.0);
        assert!(right[58..].iter().all(|&v| v == -1.0));
    }

    #[test]
    fn test_outside_center_is_all_fill() {
        let signal = ramp(100);
        assert!(extract_centered(&signal, 500, 3.0, 96).iter().all(|&v| v == 3.0));
        assert!(extract_centered(&signal, -500, 3.0, 96).iter().all(|&v| v == 3.0));
        assert!(extract_centered(&[], 0, 3.0, 8).iter().all(|&v| v == 3.0));
    }

    #[test]
    fn test_odd_length_is_padded_once() {
        let signal = ramp(1000);
        let window = extract_centered(&signal, 500, -1.0, 5);
        assert_eq!(window, vec![498.0, 499.0, 500.0, 501.0, -1.0]);
    }

    #[test]
    fn test_fill_is_idempotent_on_correct_length() {
        let slice = ramp(96);
        let once = fill_to_length(&slice, 0.0, 96);
        assert_eq!(once, slice);
        assert_eq!(fill_to_length(&once, 0.0, 96), once);
    }

    #[test]
    fn test_fill_truncates() {
        let slice = ramp(10);
        assert_eq!(fill_to_length(&slice, 0.0, 4), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(fill_to_length(&slice[..2], 9.0, 4), vec![0.0, 1.0, 9.0, 9.0]);
    }
}

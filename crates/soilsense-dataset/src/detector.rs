//! Unsupervised event detection
//!
//! Detectors return half-open index ranges of activity. The dataset builder
//! reduces each range to the integer mean of the indices it contains and uses
//! that as the event center.

use serde::{Deserialize, Serialize};
use soilsense_core::{Axis, Baseline, Recording, SoilError, SoilResult};
use soilsense_processing::{midspread, BaselineConfig};
use std::ops::Range;

/// Source of activity ranges within a recording
pub trait EventDetector: Send + Sync {
    /// Find activity ranges in a recording whose rest level is `baseline`,
    /// using the same sliding-window parameters as the baseline estimator
    fn detect(
        &self,
        recording: &Recording,
        baseline: &Baseline,
        params: &BaselineConfig,
    ) -> SoilResult<Vec<Range<usize>>>;

    fn name(&self) -> &str;
}

/// Event centers of the given ranges; empty ranges are dropped
pub fn range_centers(ranges: &[Range<usize>]) -> Vec<i64> {
    ranges.iter()
        .filter(|range| !range.is_empty())
        .map(|range| ((range.start + range.end - 1) / 2) as i64)
        .collect()
}

/// Energy detector parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyDetectorConfig {
    /// Multiple of the typical window deviation that marks activity
    pub threshold_factor: f64,
    /// Absolute deviation floor, in signal units
    pub min_deviation: f64,
}

impl Default for EnergyDetectorConfig {
    fn default() -> Self {
        Self {
            threshold_factor: 3.0,
            min_deviation: 0.05,
        }
    }
}

impl EnergyDetectorConfig {
    pub fn validate(&self) -> SoilResult<()> {
        if !(self.threshold_factor >= 0.0) || !(self.min_deviation >= 0.0) {
            return Err(SoilError::InvalidConfig {
                reason: "Detector threshold parameters must be non-negative".to_string(),
            });
        }
        Ok(())
    }
}

/// Flags windows whose mean distance from the baseline stands out
///
/// Each sliding window is scored by the mean 3-D distance of its samples from
/// the recording baseline. Windows scoring above
/// `threshold_factor * midspread(scores) + min_deviation` are active, and
/// runs of consecutive active windows are merged into one range.
pub struct EnergyDetector {
    config: EnergyDetectorConfig,
}

impl EnergyDetector {
    pub fn new(config: EnergyDetectorConfig) -> Self {
        Self { config }
    }

    fn window_scores(recording: &Recording, params: &BaselineConfig, baseline: [f64; 3]) -> Vec<f64> {
        let n = recording.len();
        let [xs, ys, zs] = Axis::ALL.map(|axis| recording.axis(axis));

        (0..n)
            .step_by(params.step_size)
            .map(|start| {
                let end = (start + params.window_size).min(n);
                let total: f64 = (start..end)
                    .map(|i| {
                        let dx = xs[i] - baseline[0];
                        let dy = ys[i] - baseline[1];
                        let dz = zs[i] - baseline[2];
                        (dx * dx + dy * dy + dz * dz).sqrt()
                    })
                    .sum();
                total / (end - start) as f64
            })
            .collect()
    }
}

impl Default for EnergyDetector {
    fn default() -> Self {
        Self::new(EnergyDetectorConfig::default())
    }
}

impl EventDetector for EnergyDetector {
    fn detect(
        &self,
        recording: &Recording,
        baseline: &Baseline,
        params: &BaselineConfig,
    ) -> SoilResult<Vec<Range<usize>>> {
        params.validate()?;
        let scores = Self::window_scores(recording, params, baseline.as_array());

        let mut sorted = scores.clone();
        let typical = midspread(&mut sorted).unwrap_or(0.0);
        let threshold = self.config.threshold_factor * typical + self.config.min_deviation;

        let n = recording.len();
        let mut ranges: Vec<Range<usize>> = Vec::new();
        let mut previous_active: Option<usize> = None;

        for (index, &score) in scores.iter().enumerate() {
            if score <= threshold {
                continue;
            }
            let start = index * params.step_size;
            let end = (start + params.window_size).min(n);

            let continues = previous_active.map_or(false, |previous| previous + 1 == index);
            // The previous active window opened or extended the last range
            if continues {
                if let Some(current) = ranges.last_mut() {
                    current.end = end;
                }
            } else {
                ranges.push(start..end);
            }
            previous_active = Some(index);
        }

        Ok(ranges)
    }

    fn name(&self) -> &str {
        "Energy Detector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soilsense_processing::estimate_baseline;

    fn detect(recording: &Recording) -> Vec<Range<usize>> {
        let params = BaselineConfig::default();
        let baseline = estimate_baseline(recording, &params).unwrap();
        EnergyDetector::default().detect(recording, &baseline, &params).unwrap()
    }

    fn recording_with_bursts(centers: &[usize]) -> Recording {
        let n = 2000;
        let mut x = vec![0.0; n];
        let mut y = vec![0.0; n];
        let z = vec![9.8; n];
        for &center in centers {
            for i in center - 30..center + 30 {
                x[i] = 3.0 * (i as f64 * 0.9).sin();
                y[i] = 2.0 * (i as f64 * 1.3).cos();
            }
        }
        Recording::new("zwy_jump_1.csv", x, y, z).unwrap()
    }

    #[test]
    fn test_range_centers() {
        assert_eq!(range_centers(&[0..10, 100..101, 5..5, 7..20]), vec![4, 100, 13]);
    }

    #[test]
    fn test_detects_bursts() {
        let recording = recording_with_bursts(&[530, 1530]);
        let ranges = detect(&recording);

        assert_eq!(ranges.len(), 2);
        let centers = range_centers(&ranges);
        assert!((centers[0] - 530).abs() <= 20, "{:?}", centers);
        assert!((centers[1] - 1530).abs() <= 20, "{:?}", centers);
    }

    #[test]
    fn test_quiet_recording_has_no_events() {
        let recording = recording_with_bursts(&[]);
        assert!(detect(&recording).is_empty());
    }

    #[test]
    fn test_scores_against_supplied_baseline() {
        let recording = recording_with_bursts(&[530, 1530]);
        let params = BaselineConfig::default();
        let rest = Baseline::new(0.0, 0.0, 9.8);

        let ranges = EnergyDetector::default().detect(&recording, &rest, &params).unwrap();
        assert_eq!(ranges, detect(&recording));

        // Against a rest level far from the data every window deviates alike
        let offset = Baseline::new(0.0, 0.0, -40.0);
        let ranges = EnergyDetector::default().detect(&recording, &offset, &params).unwrap();
        assert!(ranges.is_empty());

        let broken = BaselineConfig { step_size: 0, ..params };
        assert!(EnergyDetector::default().detect(&recording, &rest, &broken).is_err());
    }

    #[test]
    fn test_invalid_detector_config() {
        let config = EnergyDetectorConfig { threshold_factor: -1.0, min_deviation: 0.0 };
        assert!(config.validate().is_err());
        let config = EnergyDetectorConfig { threshold_factor: f64::NAN, min_deviation: 0.0 };
        assert!(config.validate().is_err());
    }
}

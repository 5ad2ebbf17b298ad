//! Robust rest-state baseline estimation
//!
//! The baseline of an axis is the midspread of its sliding-window means:
//! windows of `window_size` samples start every `step_size` samples, at most
//! `length` of them are kept, and the average of the 25th and 75th
//! percentile means is returned. Activity bursts move only the tails of the
//! sorted means, so the estimate stays at the rest level.

use soilsense_core::{Axis, Baseline, Recording, SoilError, SoilResult};
use serde::{Deserialize, Serialize};

/// Sliding-window parameters for baseline estimation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineConfig {
    /// Samples averaged per window
    pub window_size: usize,
    /// Samples between consecutive window starts
    pub step_size: usize,
    /// Maximum number of window means kept
    pub length: usize,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            window_size: 32,
            step_size: 16,
            length: 500,
        }
    }
}

impl BaselineConfig {
    pub fn validate(&self) -> SoilResult<()> {
        if self.window_size == 0 {
            return Err(SoilError::InvalidConfig {
                reason: "Baseline window size must be greater than 0".to_string(),
            });
        }
        if self.step_size == 0 {
            return Err(SoilError::InvalidConfig {
                reason: "Baseline step size must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Number of window means used for a recording of `samples` samples
    pub fn effective_length(&self, samples: usize) -> usize {
        (samples / self.step_size).min(self.length)
    }
}

/// Estimate the per-axis baseline of a recording
pub fn estimate_baseline(recording: &Recording, config: &BaselineConfig) -> SoilResult<Baseline> {
    config.validate()?;

    let count = config.effective_length(recording.len());
    let mut components = [0.0; 3];
    for axis in Axis::ALL {
        let mut means = window_means(recording.axis(axis), config, count);
        components[axis.index()] = midspread(&mut means).ok_or(SoilError::EmptyBaseline {
            samples: recording.len(),
        })?;
    }

    Ok(Baseline::new(components[0], components[1], components[2]))
}

/// Means of the first `count` windows of `data`
fn window_means(data: &[f64], config: &BaselineConfig, count: usize) -> Vec<f64> {
    (0..data.len())
        .step_by(config.step_size)
        .take(count)
        .map(|start| {
            let end = (start + config.window_size).min(data.len());
            let window = &data[start..end];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect()
}

/// Average of the values at the 25th and 75th percentile positions
///
/// Sorts `values` in place. Returns `None` for an empty slice.
pub fn midspread(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    values.sort_by(|a, b| a.total_cmp(b));
    let n = values.len() as f64;
    let lower = (0.25 * n) as usize;
    let upper = (0.75 * n) as usize;
    Some((values[lower] + values[upper]) / 2.0)
}

//! Synthetic trial generator with realistic rest noise and activity bursts

use crate::loader::{annotation_path, write_annotations, write_recording};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use soilsense_core::{config_error, Recording, SoilError, SoilResult};
use std::fs;
use std::path::Path;

/// Configuration for one synthetic trial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialConfig {
    /// Samples per axis
    pub samples: usize,
    /// Rest-state reading per axis (gravity mostly on z)
    pub rest: [f64; 3],
    /// Gaussian noise standard deviation (0.0 = no noise)
    pub noise_std: f64,
    /// Peak burst amplitude added around each event
    pub burst_amplitude: f64,
    /// Burst duration in samples
    pub burst_len: usize,
    /// Number of events, spread evenly across the trial
    pub events: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            samples: 4000,
            rest: [0.3, -0.2, 9.8],
            noise_std: 0.02,
            burst_amplitude: 2.5,
            burst_len: 60,
            events: 10,
            seed: None,
        }
    }
}

impl TrialConfig {
    pub fn validate(&self) -> SoilResult<()> {
        if self.samples == 0 {
            return Err(config_error!("Trial must have at least one sample"));
        }
        if !(self.noise_std >= 0.0) || !self.noise_std.is_finite() {
            return Err(config_error!("Noise standard deviation {} is invalid", self.noise_std));
        }
        Ok(())
    }
}

/// A generated recording and the event centers injected into it
#[derive(Debug, Clone)]
pub struct SyntheticTrial {
    pub recording: Recording,
    pub events: Vec<i64>,
}

/// Seeded accelerometer trial simulator
pub struct TrialSimulator {
    config: TrialConfig,
    rng: StdRng,
    noise: Normal<f64>,
}

impl TrialSimulator {
    pub fn new(config: TrialConfig) -> SoilResult<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let noise = Normal::new(0.0, config.noise_std).map_err(|e| SoilError::InvalidConfig {
            reason: format!("Failed to create normal distribution: {}", e),
        })?;

        Ok(TrialSimulator { config, rng, noise })
    }

    pub fn config(&self) -> &TrialConfig {
        &self.config
    }

    /// Evenly spaced event centers, away from both ends
    pub fn event_centers(&self) -> Vec<i64> {
        let n = self.config.samples as i64;
        let count = self.config.events as i64;
        (1..=count).map(|k| k * n / (count + 1)).collect()
    }

    /// Generate one trial recording named `name`
    pub fn generate(&mut self, name: &str) -> SoilResult<SyntheticTrial> {
        let n = self.config.samples;
        let events = self.event_centers();

        let mut axes: [Vec<f64>; 3] = Default::default();
        for (axis, rest) in axes.iter_mut().zip(self.config.rest) {
            *axis = (0..n).map(|_| rest + self.noise.sample(&mut self.rng)).collect();
        }

        for &center in &events {
            self.add_burst(&mut axes, center);
        }

        let [x, y, z] = axes;
        Ok(SyntheticTrial {
            recording: Recording::new(name, x, y, z)?,
            events,
        })
    }

    /// Hann-windowed oscillation around `center`, with a random phase per axis
    fn add_burst(&mut self, axes: &mut [Vec<f64>; 3], center: i64) {
        let half = (self.config.burst_len / 2) as i64;
        if half == 0 {
            return;
        }
        let n = self.config.samples as i64;

        for axis in axes.iter_mut() {
            let phase = self.rng.gen_range(0.0..std::f64::consts::TAU);
            let frequency = self.rng.gen_range(0.15..0.35);

            for i in (center - half).max(0)..(center + half).min(n) {
                let t = (i - center + half) as f64 / (2 * half) as f64;
                let envelope = (std::f64::consts::PI * t).sin().powi(2);
                axis[i as usize] += self.config.burst_amplitude
                    * envelope
                    * (frequency * i as f64 + phase).sin();
            }
        }
    }
}

/// Write trials as `<root>/data/<name>` tables and `<root>/txt/<stem>.txt` events
pub fn write_trial_root(root: &Path, trials: &[SyntheticTrial]) -> SoilResult<()> {
    let data_dir = root.join("data");
    let annotation_dir = root.join("txt");
    fs::create_dir_all(&data_dir).map_err(|e| SoilError::io(&data_dir, e))?;
    fs::create_dir_all(&annotation_dir).map_err(|e| SoilError::io(&annotation_dir, e))?;

    for trial in trials {
        let name = &trial.recording.name;
        write_recording(&data_dir.join(name), &trial.recording)?;
        write_annotations(&annotation_path(&annotation_dir, name), &trial.events)?;
    }
    Ok(())
}

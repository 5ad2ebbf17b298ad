//! Power-ratio signal-to-noise estimate

use soilsense_core::{SoilError, SoilResult};

/// Ratio of signal power to noise-reference power, `Σs² / Σn²`
///
/// The signal is not separated from the noise, so this is an estimate rather
/// than a true SNR.
pub fn signal_to_noise_ratio(signal: &[f64], noise: &[f64]) -> SoilResult<f64> {
    if signal.len() != noise.len() {
        return Err(SoilError::LengthMismatch {
            expected: signal.len(),
            actual: noise.len(),
        });
    }

    let noise_power: f64 = noise.iter().map(|v| v * v).sum();
    if noise_power == 0.0 {
        return Err(SoilError::InvalidSignalData {
            reason: "Noise reference has zero power".to_string(),
        });
    }

    let signal_power: f64 = signal.iter().map(|v| v * v).sum();
    Ok(signal_power / noise_power)
}

//! Configuration management for feature extraction

use crate::baseline::BaselineConfig;
use crate::transform::{SignalTransformer, TransformMode};
use crate::wavelet::{WaveletConfig, WaveletPacket};
use crate::window::DEFAULT_WINDOW_LENGTH;
use serde::{Deserialize, Serialize};
use soilsense_core::{SoilError, SoilResult};

/// Feature extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Configuration name/profile
    pub name: String,
    /// Baseline estimator parameters
    pub baseline: BaselineConfig,
    /// Samples per event window
    pub window_length: usize,
    /// Representation produced at materialization time
    pub mode: TransformMode,
    /// Wavelet-packet settings for `wavelet` mode
    pub wavelet: WaveletConfig,
}

impl ProcessingConfig {
    /// Baseline-subtracted raw axes
    pub fn origin() -> Self {
        ProcessingConfig {
            name: "Origin".to_string(),
            baseline: BaselineConfig::default(),
            window_length: DEFAULT_WINDOW_LENGTH,
            mode: TransformMode::Origin,
            wavelet: WaveletConfig::default(),
        }
    }

    /// Orientation-invariant channels
    pub fn combine() -> Self {
        ProcessingConfig {
            name: "Combine".to_string(),
            mode: TransformMode::Combine,
            ..Self::origin()
        }
    }

    /// Wavelet-packet sub-bands
    pub fn wavelet() -> Self {
        ProcessingConfig {
            name: "Wavelet".to_string(),
            mode: TransformMode::Wavelet,
            ..Self::origin()
        }
    }

    pub fn for_mode(mode: TransformMode) -> Self {
        match mode {
            TransformMode::Origin => Self::origin(),
            TransformMode::Combine => Self::combine(),
            TransformMode::Wavelet => Self::wavelet(),
        }
    }

    /// Validate entire configuration
    pub fn validate(&self) -> SoilResult<()> {
        self.baseline.validate()?;

        if self.window_length == 0 {
            return Err(SoilError::InvalidConfig {
                reason: "Window length must be greater than 0".to_string(),
            });
        }

        if self.mode == TransformMode::Wavelet {
            let (_, coefs) = WaveletPacket::new(self.wavelet).output_shape(self.window_length);
            if self.wavelet.level == 0 || coefs == 0 {
                return Err(SoilError::InvalidConfig {
                    reason: format!(
                        "Wavelet level {} is unusable for {}-sample windows",
                        self.wavelet.level, self.window_length
                    ),
                });
            }
        }

        Ok(())
    }

    /// Transformer for the configured mode
    pub fn transformer(&self) -> SignalTransformer {
        SignalTransformer::new(self.mode, self.wavelet)
    }

    /// Export configuration to JSON
    pub fn to_json(&self) -> SoilResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SoilError::Serialization {
            reason: format!("Failed to serialize configuration: {}", e),
        })
    }

    /// Import configuration from JSON
    pub fn from_json(json: &str) -> SoilResult<Self> {
        serde_json::from_str(json).map_err(|e| SoilError::Serialization {
            reason: format!("Failed to deserialize configuration: {}", e),
        })
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self::origin()
    }
}

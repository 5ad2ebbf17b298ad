//! Dataset build configuration

use crate::detector::EnergyDetectorConfig;
use serde::{Deserialize, Serialize};
use soilsense_core::{config_error, SoilError, SoilResult};
use soilsense_processing::ProcessingConfig;

/// Where event centers come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventSource {
    /// One integer per line in `<annotation_dir>/<stem>.txt`
    Annotations,
    /// Ranges from an event detector, reduced to their midpoints
    Detector,
}

/// Per-file train/test partitioning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Leading fraction of each file's records assigned to the test set
    pub test_fraction: f64,
    /// Shuffle each file's records before splitting
    pub shuffle: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            shuffle: true,
        }
    }
}

/// Dataset build configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Feature extraction settings
    pub processing: ProcessingConfig,
    /// Event center source
    pub event_source: EventSource,
    /// Train/test split settings
    pub split: SplitConfig,
    /// Settings for the built-in energy detector
    pub detector: EnergyDetectorConfig,
    /// Signal sub-directory under the root
    pub data_dir: String,
    /// Annotation sub-directory under the root
    pub annotation_dir: String,
}

impl DatasetConfig {
    /// Events from annotation files
    pub fn annotated() -> Self {
        DatasetConfig {
            processing: ProcessingConfig::default(),
            event_source: EventSource::Annotations,
            split: SplitConfig::default(),
            detector: EnergyDetectorConfig::default(),
            data_dir: "data".to_string(),
            annotation_dir: "txt".to_string(),
        }
    }

    /// Events from the event detector
    pub fn detected() -> Self {
        DatasetConfig {
            event_source: EventSource::Detector,
            ..Self::annotated()
        }
    }

    /// Validate entire configuration
    pub fn validate(&self) -> SoilResult<()> {
        self.processing.validate()?;
        self.detector.validate()?;

        if !(0.0..=1.0).contains(&self.split.test_fraction) {
            return Err(config_error!(
                "Test fraction {} must be between 0.0 and 1.0",
                self.split.test_fraction
            ));
        }

        if self.data_dir.is_empty() || self.annotation_dir.is_empty() {
            return Err(config_error!("Data and annotation directory names cannot be empty"));
        }

        Ok(())
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

impl Default for DatasetConfig {
    fn default() -> Self {
        Self::annotated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DatasetConfig::default();
        assert_eq!(config.event_source, EventSource::Annotations);
        assert_eq!(config.split.test_fraction, 0.2);
        assert!(config.split.shuffle);
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.annotation_dir, "txt");
        assert!(config.validate().is_ok());

        assert_eq!(DatasetConfig::detected().event_source, EventSource::Detector);
    }

    #[test]
    fn test_config_validation() {
        let mut config = DatasetConfig::default();
        config.split.test_fraction = 1.5;
        assert!(config.validate().is_err());

        config.split.test_fraction = 0.2;
        config.data_dir.clear();
        assert!(config.validate().is_err());

        let mut config = DatasetConfig::default();
        config.processing.window_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_serialization() {
        let mut config = DatasetConfig::detected();
        config.split.shuffle = false;

        let json = config.to_json().unwrap();
        let restored = DatasetConfig::from_json(&json).unwrap();
        assert_eq!(restored, config);

        assert!(DatasetConfig::from_json("not json").is_err());
    }
}

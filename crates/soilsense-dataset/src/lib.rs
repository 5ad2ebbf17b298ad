//! soilsense-dataset: Labeled event datasets from field trial recordings
//!
//! Loads signal tables and event annotations, builds per-event records and
//! partitions them per file into train and test sets. Also generates
//! synthetic trials for testing.

pub mod builder;
pub mod config;
pub mod dataset;
pub mod detector;
pub mod loader;
pub mod synthetic;

pub use builder::{build_records, resolve_area, DatasetBuilder};
pub use config::{DatasetConfig, EventSource, SplitConfig};
pub use dataset::{test_count, Dataset, FileRecords, Partition};
pub use detector::{range_centers, EnergyDetector, EnergyDetectorConfig, EventDetector};
pub use loader::{
    annotation_path, list_signal_files, parse_annotations, parse_recording, read_annotations,
    read_recording, write_annotations, write_recording,
};
pub use synthetic::{write_trial_root, SyntheticTrial, TrialConfig, TrialSimulator};

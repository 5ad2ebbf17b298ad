//! soilsense-processing: Feature extraction for accelerometer event windows
//!
//! Baseline estimation, event windowing, gravity angles and the feature
//! transforms applied when training arrays are materialized.

pub mod angles;
pub mod baseline;
pub mod config;
pub mod snr;
pub mod stats;
pub mod transform;
pub mod wavelet;
pub mod window;

pub use angles::gravity_angles;
pub use baseline::{estimate_baseline, midspread, BaselineConfig};
pub use config::ProcessingConfig;
pub use snr::signal_to_noise_ratio;
pub use stats::{cut_mean, cut_value, min_max_normalize};
pub use transform::{
    combined_channels, stack_features, CombinedChannels, FeatureTransform, SignalTransformer,
    TransformMode,
};
pub use wavelet::{ExtensionMode, Wavelet, WaveletConfig, WaveletPacket};
pub use window::{extract_centered, fill_to_length, DEFAULT_WINDOW_LENGTH};

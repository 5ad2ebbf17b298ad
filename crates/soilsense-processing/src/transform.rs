//! Record-to-feature transforms
//!
//! Three representations of an event record are available:
//! - `origin`: each axis window minus its baseline component
//! - `combine`: orientation-invariant channels (3-D magnitude, horizontal
//!   magnitude, gravity-projected vertical), each mean-centered
//! - `wavelet`: wavelet-packet sub-bands of each baseline-subtracted axis

use crate::stats::{cut_mean, cut_value};
use crate::wavelet::{WaveletConfig, WaveletPacket};
use ndarray::{Array1, Array2, Array3, ArrayD, ArrayViewD, IxDyn, ShapeError};
use soilsense_core::{Axis, Record, SoilError, SoilResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn shape_error(error: ShapeError) -> SoilError {
    SoilError::InvalidSignalData {
        reason: format!("Feature shape error: {}", error),
    }
}

/// Stack equally shaped feature arrays along a new leading axis
///
/// An empty input yields shape `[0]`.
pub fn stack_features(items: &[ArrayD<f64>]) -> SoilResult<ArrayD<f64>> {
    if items.is_empty() {
        return Ok(ArrayD::zeros(IxDyn(&[0])));
    }
    let views: Vec<ArrayViewD<f64>> = items.iter().map(|item| item.view()).collect();
    ndarray::stack(ndarray::Axis(0), &views).map_err(shape_error)
}

/// Feature representation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    Origin,
    Combine,
    Wavelet,
}

impl FromStr for TransformMode {
    type Err = SoilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "origin" => Ok(TransformMode::Origin),
            "combine" => Ok(TransformMode::Combine),
            "wavelet" => Ok(TransformMode::Wavelet),
            other => Err(SoilError::UnknownMode { mode: other.to_string() }),
        }
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformMode::Origin => write!(f, "origin"),
            TransformMode::Combine => write!(f, "combine"),
            TransformMode::Wavelet => write!(f, "wavelet"),
        }
    }
}

/// A single feature representation of an event record
pub trait FeatureTransform: Send + Sync {
    /// Convert one record into a feature array
    fn transform(&self, record: &Record) -> SoilResult<ArrayD<f64>>;

    /// Shape produced for records with `window_len` samples per axis
    fn output_shape(&self, window_len: usize) -> Vec<usize>;

    fn mode(&self) -> TransformMode;
}

/// Baseline-subtracted axes, `[3, len]`
pub struct OriginTransform;

impl FeatureTransform for OriginTransform {
    fn transform(&self, record: &Record) -> SoilResult<ArrayD<f64>> {
        let mut features = Array2::<f64>::zeros((3, record.window_len()));
        for axis in Axis::ALL {
            let centered = cut_value(record.window(axis), record.baseline().component(axis));
            features.row_mut(axis.index()).assign(&Array1::from(centered));
        }
        Ok(features.into_dyn())
    }

    fn output_shape(&self, window_len: usize) -> Vec<usize> {
        vec![3, window_len]
    }

    fn mode(&self) -> TransformMode {
        TransformMode::Origin
    }
}

/// Orientation-invariant channels before mean-centering
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedChannels {
    /// `|v - b|` over all three axes
    pub magnitude_3d: Vec<f64>,
    /// `|v - b|` over x and y only
    pub magnitude_2d: Vec<f64>,
    /// Signal projected on the gravity direction, minus the projected baseline
    pub vertical: Vec<f64>,
}

/// Derive the combined channels of a record
pub fn combined_channels(record: &Record) -> CombinedChannels {
    let [bx, by, bz] = record.baseline().as_array();
    let [cx, cy, cz] = record.angles().cosines();
    let base_vertical = bx * cx + by * cy + bz * cz;

    let xs = record.window(Axis::X);
    let ys = record.window(Axis::Y);
    let zs = record.window(Axis::Z);

    let n = record.window_len();
    let mut channels = CombinedChannels {
        magnitude_3d: Vec::with_capacity(n),
        magnitude_2d: Vec::with_capacity(n),
        vertical: Vec::with_capacity(n),
    };

    for ((&x, &y), &z) in xs.iter().zip(ys).zip(zs) {
        let (dx, dy, dz) = (x - bx, y - by, z - bz);
        channels.magnitude_3d.push((dx * dx + dy * dy + dz * dz).sqrt());
        channels.magnitude_2d.push((dx * dx + dy * dy).sqrt());
        channels.vertical.push(x * cx + y * cy + z * cz - base_vertical);
    }

    channels
}

/// Mean-centered combined channels, `[3, len]`
pub struct CombineTransform;

impl FeatureTransform for CombineTransform {
    fn transform(&self, record: &Record) -> SoilResult<ArrayD<f64>> {
        let channels = combined_channels(record);
        let rows = [&channels.magnitude_3d, &channels.magnitude_2d, &channels.vertical];

        let mut features = Array2::<f64>::zeros((3, record.window_len()));
        for (i, channel) in rows.into_iter().enumerate() {
            features.row_mut(i).assign(&Array1::from(cut_mean(channel)));
        }
        Ok(features.into_dyn())
    }

    fn output_shape(&self, window_len: usize) -> Vec<usize> {
        vec![3, window_len]
    }

    fn mode(&self) -> TransformMode {
        TransformMode::Combine
    }
}

/// Wavelet-packet sub-bands per axis, `[3, bands, coefficients]`
pub struct WaveletTransform {
    packet: WaveletPacket,
}

impl WaveletTransform {
    pub fn new(config: WaveletConfig) -> Self {
        Self { packet: WaveletPacket::new(config) }
    }
}

impl FeatureTransform for WaveletTransform {
    fn transform(&self, record: &Record) -> SoilResult<ArrayD<f64>> {
        let (bands, coefs) = self.packet.output_shape(record.window_len());
        let mut data = Vec::with_capacity(3 * bands * coefs);
        for axis in Axis::ALL {
            let centered = cut_value(record.window(axis), record.baseline().component(axis));
            for band in self.packet.decompose(&centered)? {
                data.extend(band);
            }
        }
        let features = Array3::from_shape_vec((3, bands, coefs), data).map_err(shape_error)?;
        Ok(features.into_dyn())
    }

    fn output_shape(&self, window_len: usize) -> Vec<usize> {
        let (bands, coefs) = self.packet.output_shape(window_len);
        vec![3, bands, coefs]
    }

    fn mode(&self) -> TransformMode {
        TransformMode::Wavelet
    }
}

/// Mode-dispatching transformer used to materialize training arrays
pub struct SignalTransformer {
    inner: Box<dyn FeatureTransform>,
}

impl SignalTransformer {
    pub fn new(mode: TransformMode, wavelet: WaveletConfig) -> Self {
        let inner: Box<dyn FeatureTransform> = match mode {
            TransformMode::Origin => Box::new(OriginTransform),
            TransformMode::Combine => Box::new(CombineTransform),
            TransformMode::Wavelet => Box::new(WaveletTransform::new(wavelet)),
        };
        Self { inner }
    }

    /// Build from a mode string such as `"combine"`
    pub fn from_mode_str(mode: &str, wavelet: WaveletConfig) -> SoilResult<Self> {
        Ok(Self::new(mode.parse()?, wavelet))
    }

    pub fn mode(&self) -> TransformMode {
        self.inner.mode()
    }

    pub fn transform(&self, record: &Record) -> SoilResult<ArrayD<f64>> {
        self.inner.transform(record)
    }

    /// Stack the features of every record whose file is in `file_filter`
    ///
    /// Returns the `[N, ...]` batch and the parallel activity labels. A
    /// `None` filter keeps every record.
    pub fn transform_batch<'a, I>(
        &self,
        records: I,
        file_filter: Option<&[String]>,
    ) -> SoilResult<(ArrayD<f64>, Vec<usize>)>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut features = Vec::new();
        let mut labels = Vec::new();

        for record in records {
            let selected = file_filter
                .map_or(true, |names| names.iter().any(|name| name == record.file_name()));
            if !selected {
                continue;
            }
            features.push(self.transform(record)?);
            labels.push(record.activity().label());
        }

        Ok((stack_features(&features)?, labels))
    }
}

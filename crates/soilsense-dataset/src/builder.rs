//! Dataset assembly from a trial root directory
//!
//! A root holds `data/<name>.csv` signal tables and `txt/<stem>.txt` event
//! annotations. The root's final path component names the field site; each
//! signal file name names the activity performed.

use crate::config::{DatasetConfig, EventSource};
use crate::dataset::{Dataset, FileRecords};
use crate::detector::{range_centers, EnergyDetector, EventDetector};
use crate::loader::{annotation_path, list_signal_files, read_annotations, read_recording};
use rand::seq::SliceRandom;
use rand::Rng;
use soilsense_core::{
    Activity, Area, Axis, Baseline, Record, Recording, SoilError, SoilResult,
};
use soilsense_processing::{estimate_baseline, extract_centered, gravity_angles};
use std::path::Path;
use tracing::{debug, info, warn};

/// Builds labeled event records from trial recordings
pub struct DatasetBuilder {
    config: DatasetConfig,
    detector: Box<dyn EventDetector>,
}

impl DatasetBuilder {
    /// Create a builder; the configuration is validated up front
    pub fn new(config: DatasetConfig) -> SoilResult<Self> {
        config.validate()?;
        let detector = Box::new(EnergyDetector::new(config.detector));
        Ok(DatasetBuilder { config, detector })
    }

    /// Replace the detector used when the event source is `Detector`
    pub fn with_detector(mut self, detector: Box<dyn EventDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Load every signal file under `root` and split each file's records
    ///
    /// Files are visited in name order and each file's records are shuffled
    /// with `rng` (when enabled) before the leading test share is taken, so a
    /// seeded generator reproduces the same partitions.
    pub fn generate_data<R: Rng + ?Sized>(&self, root: &Path, rng: &mut R) -> SoilResult<Dataset> {
        let area = resolve_area(root)?;
        let data_dir = root.join(&self.config.data_dir);
        let files = list_signal_files(&data_dir)?;
        info!(
            "Building dataset from {} ({} files, area {}, events from {:?})",
            root.display(),
            files.len(),
            area,
            self.config.event_source
        );

        let mut dataset = Dataset::new();
        for file_name in &files {
            let mut records = self.load_file(root, file_name, area)?;
            if self.config.split.shuffle {
                records.shuffle(rng);
            }

            let file = FileRecords::split(file_name.as_str(), records, self.config.split.test_fraction);
            debug!(
                "{}: {} train, {} test",
                file_name,
                file.train().len(),
                file.test().len()
            );
            dataset.push(file);
        }

        info!(
            "Dataset ready: {} train records, {} test records",
            dataset.train_len(),
            dataset.test_len()
        );
        Ok(dataset)
    }

    /// Records of one activity at one distance, optionally resampled to `num`
    ///
    /// Files qualify when their name contains both the activity token and
    /// `distance`. With `num = Some(k)` exactly `k` records are drawn with
    /// replacement.
    pub fn get_specific_data<R: Rng + ?Sized>(
        &self,
        root: &Path,
        activity: Activity,
        distance: &str,
        num: Option<usize>,
        rng: &mut R,
    ) -> SoilResult<Vec<Record>> {
        let area = resolve_area(root)?;
        let files = list_signal_files(&root.join(&self.config.data_dir))?;

        let mut pool = Vec::new();
        for file_name in files
            .iter()
            .filter(|name| name.contains(activity.token()) && name.contains(distance))
        {
            pool.extend(self.load_file(root, file_name, area)?);
        }
        debug!(
            "{} {} records at distance {:?} in {}",
            pool.len(),
            activity,
            distance,
            root.display()
        );

        let Some(count) = num else {
            return Ok(pool);
        };
        if count > 0 && pool.is_empty() {
            return Err(SoilError::InvalidSignalData {
                reason: format!(
                    "No {} records at distance {:?} to sample {} from",
                    activity, distance, count
                ),
            });
        }

        Ok((0..count)
            .map(|_| pool[rng.gen_range(0..pool.len())].clone())
            .collect())
    }

    /// Records for every event of one signal file, in event order
    fn load_file(&self, root: &Path, file_name: &str, area: Area) -> SoilResult<Vec<Record>> {
        let activity = Activity::from_file_name(file_name)?;
        let recording = read_recording(&root.join(&self.config.data_dir).join(file_name))?;
        let baseline = estimate_baseline(&recording, &self.config.processing.baseline)?;

        let events = match self.config.event_source {
            EventSource::Annotations => {
                read_annotations(&annotation_path(&root.join(&self.config.annotation_dir), file_name))?
            }
            EventSource::Detector => {
                let ranges = self.detector.detect(&recording, &baseline, &self.config.processing.baseline)?;
                range_centers(&ranges)
            }
        };
        if events.is_empty() {
            warn!("{}: no events", file_name);
        }

        build_records(
            &recording,
            &events,
            activity,
            area,
            baseline,
            self.config.processing.window_length,
        )
    }
}

/// One record per event center; each axis window is padded with its baseline
pub fn build_records(
    recording: &Recording,
    events: &[i64],
    activity: Activity,
    area: Area,
    baseline: Baseline,
    window_length: usize,
) -> SoilResult<Vec<Record>> {
    let angles = gravity_angles(&baseline);

    events.iter()
        .map(|&center| {
            let windows = Axis::ALL.map(|axis| {
                extract_centered(recording.axis(axis), center, baseline.component(axis), window_length)
            });
            Record::new(windows, activity, area, recording.name.as_str(), baseline, angles)
        })
        .collect()
}

/// Field site named by the root directory's final path component
pub fn resolve_area(root: &Path) -> SoilResult<Area> {
    let name = root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    Area::from_dir_name(&name)
}

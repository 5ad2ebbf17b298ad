//! In-memory dataset with per-file train/test partitions

use ndarray::ArrayD;
use soilsense_core::{Record, SoilResult};
use soilsense_processing::SignalTransformer;

/// Number of test records for a file with `n` records
pub fn test_count(n: usize, test_fraction: f64) -> usize {
    ((test_fraction * n as f64).floor() as usize).min(n)
}

/// Records loaded from one signal file, in their post-shuffle order
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecords {
    name: String,
    records: Vec<Record>,
    test_len: usize,
}

impl FileRecords {
    /// The leading `floor(test_fraction * n)` records form the test partition
    pub fn split(name: impl Into<String>, records: Vec<Record>, test_fraction: f64) -> Self {
        let test_len = test_count(records.len(), test_fraction);
        FileRecords {
            name: name.into(),
            records,
            test_len,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn test(&self) -> &[Record] {
        &self.records[..self.test_len]
    }

    pub fn train(&self) -> &[Record] {
        &self.records[self.test_len..]
    }
}

/// Which records to materialize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Train,
    Test,
    All,
}

/// Records of every processed file plus their train/test views
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    files: Vec<FileRecords>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file: FileRecords) {
        self.files.push(file);
    }

    pub fn files(&self) -> &[FileRecords] {
        &self.files
    }

    /// Processed file names, in processing order
    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(FileRecords::name).collect()
    }

    /// All records of one file
    pub fn records_for(&self, file_name: &str) -> Option<&[Record]> {
        self.files.iter()
            .find(|file| file.name == file_name)
            .map(FileRecords::records)
    }

    pub fn train(&self) -> impl Iterator<Item = &Record> {
        self.files.iter().flat_map(|file| file.train().iter())
    }

    pub fn test(&self) -> impl Iterator<Item = &Record> {
        self.files.iter().flat_map(|file| file.test().iter())
    }

    pub fn all(&self) -> impl Iterator<Item = &Record> {
        self.files.iter().flat_map(|file| file.records().iter())
    }

    pub fn train_len(&self) -> usize {
        self.files.iter().map(|file| file.train().len()).sum()
    }

    pub fn test_len(&self) -> usize {
        self.files.iter().map(|file| file.test().len()).sum()
    }

    /// Feature batch and activity labels for one partition
    ///
    /// `file_filter` restricts the batch to the named files, e.g. to evaluate
    /// a few held-out trials on their own.
    pub fn materialize(
        &self,
        partition: Partition,
        file_filter: Option<&[String]>,
        transformer: &SignalTransformer,
    ) -> SoilResult<(ArrayD<f64>, Vec<usize>)> {
        match partition {
            Partition::Train => transformer.transform_batch(self.train(), file_filter),
            Partition::Test => transformer.transform_batch(self.test(), file_filter),
            Partition::All => transformer.transform_batch(self.all(), file_filter),
        }
    }
}

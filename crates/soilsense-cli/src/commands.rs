//! Subcommand implementations

use crate::{BuildArgs, SampleArgs, SimulateArgs};
use anyhow::{Context, Result};
use ndarray::ArrayD;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use soilsense_core::{Activity, Axis};
use soilsense_dataset::{
    write_trial_root, DatasetBuilder, DatasetConfig, EventSource, Partition, TrialConfig,
    TrialSimulator,
};
use soilsense_processing::{ProcessingConfig, TransformMode};
use std::fs;
use tracing::info;

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Materialized dataset written by `build --output`
#[derive(Serialize)]
struct FeatureDump {
    mode: TransformMode,
    files: Vec<String>,
    train: ArrayD<f64>,
    train_labels: Vec<usize>,
    test: ArrayD<f64>,
    test_labels: Vec<usize>,
}

fn load_config(args: &BuildArgs) -> Result<DatasetConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            DatasetConfig::from_json(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => DatasetConfig::default(),
    };

    if let Some(mode) = &args.mode {
        let mode: TransformMode = mode.parse()?;
        config.processing = ProcessingConfig {
            baseline: config.processing.baseline,
            window_length: config.processing.window_length,
            wavelet: config.processing.wavelet,
            ..ProcessingConfig::for_mode(mode)
        };
    }
    if let Some(factor) = args.factor {
        config.split.test_fraction = factor;
    }
    if args.detector {
        config.event_source = EventSource::Detector;
    }
    if args.no_shuffle {
        config.split.shuffle = false;
    }
    Ok(config)
}

pub fn build(args: BuildArgs) -> Result<()> {
    let config = load_config(&args)?;
    let transformer = config.processing.transformer();
    let builder = DatasetBuilder::new(config).context("invalid dataset configuration")?;

    let mut rng = seeded_rng(args.seed);
    let dataset = builder
        .generate_data(&args.root, &mut rng)
        .with_context(|| format!("building dataset from {}", args.root.display()))?;

    let (train, train_labels) = dataset.materialize(Partition::Train, None, &transformer)?;
    let (test, test_labels) = dataset.materialize(Partition::Test, None, &transformer)?;
    info!(
        "{} features: train {:?}, test {:?}",
        transformer.mode(),
        train.shape(),
        test.shape()
    );

    for file in dataset.files() {
        println!(
            "{:<40} {:>5} train {:>5} test",
            file.name(),
            file.train().len(),
            file.test().len()
        );
    }
    println!("train shape {:?}, test shape {:?}", train.shape(), test.shape());

    if let Some(path) = &args.output {
        let dump = FeatureDump {
            mode: transformer.mode(),
            files: dataset.file_names().into_iter().map(str::to_string).collect(),
            train,
            train_labels,
            test,
            test_labels,
        };
        let json = serde_json::to_string(&dump)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!("Features written to {}", path.display());
    }

    Ok(())
}

pub fn sample(args: SampleArgs) -> Result<()> {
    let activity: Activity = args.activity.parse()?;
    let builder = DatasetBuilder::new(DatasetConfig::default())?;

    let mut rng = seeded_rng(args.seed);
    let records = builder
        .get_specific_data(&args.root, activity, &args.distance, args.num, &mut rng)
        .with_context(|| format!("sampling {} records from {}", activity, args.root.display()))?;

    for record in &records {
        let peak = Axis::ALL
            .iter()
            .map(|&axis| {
                let rest = record.baseline().component(axis);
                record.window(axis).iter().map(|v| (v - rest).abs()).fold(0.0, f64::max)
            })
            .fold(0.0, f64::max);
        println!("{:<40} {} {} peak {:.3}", record.file_name(), record.activity(), record.area(), peak);
    }
    println!("{} records", records.len());
    Ok(())
}

pub fn simulate(args: SimulateArgs) -> Result<()> {
    let area = args.out
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut simulator = TrialSimulator::new(TrialConfig {
        events: args.events,
        seed: args.seed,
        ..TrialConfig::default()
    })?;

    let mut trials = Vec::new();
    for activity in Activity::all() {
        for index in 1..=args.files {
            let name = format!("{}_{}_1.0_{}.csv", area, activity, index);
            trials.push(simulator.generate(&name)?);
        }
    }

    write_trial_root(&args.out, &trials)
        .with_context(|| format!("writing trials to {}", args.out.display()))?;
    info!("Wrote {} trials to {}", trials.len(), args.out.display());
    Ok(())
}

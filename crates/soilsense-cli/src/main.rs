//! soilsense command line: build feature datasets from field trial roots

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "soilsense", about = "Accelerometer soil-disturbance dataset builder")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build train/test feature arrays from a trial root
    Build(BuildArgs),
    /// Draw records of one activity and distance from a trial root
    Sample(SampleArgs),
    /// Write a synthetic trial root
    Simulate(SimulateArgs),
}

#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Trial root holding data/ and txt/; its name selects the area
    #[arg(long, value_name = "DIR")]
    pub root: PathBuf,

    /// Feature representation: origin, combine or wavelet
    #[arg(long)]
    pub mode: Option<String>,

    /// Fraction of each file's records assigned to the test set
    #[arg(long)]
    pub factor: Option<f64>,

    /// Seed for the per-file shuffle (entropy when absent)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Find events with the energy detector instead of annotation files
    #[arg(long)]
    pub detector: bool,

    /// Keep each file's records in event order
    #[arg(long)]
    pub no_shuffle: bool,

    /// Dataset configuration JSON; flags override its fields
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the feature arrays and labels as JSON
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct SampleArgs {
    #[arg(long, value_name = "DIR")]
    pub root: PathBuf,

    /// dig, jump or walk
    #[arg(long)]
    pub activity: String,

    /// Distance substring matched in file names, e.g. 1.0
    #[arg(long)]
    pub distance: String,

    /// Number of records to draw with replacement (all when absent)
    #[arg(long)]
    pub num: Option<usize>,

    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(clap::Args, Debug)]
pub struct SimulateArgs {
    /// Output root; its name should contain an area token such as zwy
    #[arg(long, value_name = "DIR")]
    pub out: PathBuf,

    /// Trials per activity
    #[arg(long, default_value = "2")]
    pub files: usize,

    /// Events per trial
    #[arg(long, default_value = "10")]
    pub events: usize,

    #[arg(long)]
    pub seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    match args.command {
        Command::Build(build) => commands::build(build),
        Command::Sample(sample) => commands::sample(sample),
        Command::Simulate(simulate) => commands::simulate(simulate),
    }
}

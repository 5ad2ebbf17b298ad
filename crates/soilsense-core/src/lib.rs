//! soilsense-core: Foundation types for soil-disturbance signal datasets
//!
//! Recordings, per-event records, label categories and the shared error type.

pub mod error;
pub mod labels;
pub mod record;
pub mod recording;

pub use error::{SoilError, SoilResult};
pub use labels::{get_activity_label, get_area_label, Activity, Area};
pub use record::{AngleSet, Baseline, Record};
pub use recording::{Axis, Recording};

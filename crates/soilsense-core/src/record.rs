//! Per-event record types

use crate::error::{SoilError, SoilResult};
use crate::labels::{Activity, Area};
use crate::recording::Axis;
use serde::{Deserialize, Serialize};

/// Rest-state offset of a recording, one scalar per axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Baseline {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Component for one axis
    pub fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Inclination of each axis against the gravity vector, in radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSet {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AngleSet {
    pub fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Direction cosines of the gravity vector in sensor coordinates
    pub fn cosines(&self) -> [f64; 3] {
        [self.x.cos(), self.y.cos(), self.z.cos()]
    }
}

/// One labeled, fixed-length tri-axial window plus its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    activity: Activity,
    area: Area,
    file_name: String,
    baseline: Baseline,
    angles: AngleSet,
}

impl Record {
    /// Assemble a record; the three windows must have equal, non-zero length
    pub fn new(
        windows: [Vec<f64>; 3],
        activity: Activity,
        area: Area,
        file_name: impl Into<String>,
        baseline: Baseline,
        angles: AngleSet,
    ) -> SoilResult<Self> {
        let [x, y, z] = windows;
        if x.is_empty() {
            return Err(SoilError::InvalidSignalData {
                reason: "Record windows must not be empty".to_string(),
            });
        }
        for other in [&y, &z] {
            if other.len() != x.len() {
                return Err(SoilError::LengthMismatch {
                    expected: x.len(),
                    actual: other.len(),
                });
            }
        }

        Ok(Record {
            x,
            y,
            z,
            activity,
            area,
            file_name: file_name.into(),
            baseline,
            angles,
        })
    }

    pub fn window(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// Length shared by all three windows
    pub fn window_len(&self) -> usize {
        self.x.len()
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn area(&self) -> Area {
        self.area
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    pub fn angles(&self) -> &AngleSet {
        &self.angles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angles() -> AngleSet {
        AngleSet { x: 0.0, y: 0.0, z: 0.0 }
    }

    #[test]
    fn test_record_accessors() {
        let record = Record::new(
            [vec![1.0; 8], vec![2.0; 8], vec![3.0; 8]],
            Activity::Jump,
            Area::Zwy,
            "zwy_jump_1.csv",
            Baseline::new(1.0, 2.0, 3.0),
            angles(),
        ).unwrap();

        assert_eq!(record.window_len(), 8);
        assert_eq!(record.window(Axis::Y)[0], 2.0);
        assert_eq!(record.activity(), Activity::Jump);
        assert_eq!(record.area(), Area::Zwy);
        assert_eq!(record.file_name(), "zwy_jump_1.csv");
        assert_eq!(record.baseline().component(Axis::Z), 3.0);
    }

    #[test]
    fn test_unequal_windows_rejected() {
        let result = Record::new(
            [vec![1.0; 8], vec![2.0; 7], vec![3.0; 8]],
            Activity::Dig,
            Area::Syf,
            "syf_dig_1.csv",
            Baseline::new(0.0, 0.0, 0.0),
            angles(),
        );
        assert_eq!(result, Err(SoilError::LengthMismatch { expected: 8, actual: 7 }));
    }

    #[test]
    fn test_cosines() {
        let set = AngleSet { x: 0.0, y: std::f64::consts::FRAC_PI_2, z: std::f64::consts::PI };
        let [cx, cy, cz] = set.cosines();
        assert!((cx - 1.0).abs() < 1e-12);
        assert!(cy.abs() < 1e-12);
        assert!((cz + 1.0).abs() < 1e-12);
    }
}

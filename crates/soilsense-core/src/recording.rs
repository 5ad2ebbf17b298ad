//! Recording: container for one tri-axial accelerometer trial

use crate::error::{SoilError, SoilResult};
use serde::{Deserialize, Serialize};

/// Accelerometer axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in column order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Column index of this axis
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Three synchronized acceleration columns read from one source file
#[derive(Debug, Clone)]
pub struct Recording {
    /// Source file name (no directory)
    pub name: String,
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl Recording {
    /// Create a recording from three equally long columns
    pub fn new(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> SoilResult<Self> {
        if x.len() != y.len() || x.len() != z.len() {
            return Err(SoilError::InvalidSignalData {
                reason: format!(
                    "Axis lengths differ: x={}, y={}, z={}",
                    x.len(),
                    y.len(),
                    z.len()
                ),
            });
        }

        Ok(Recording {
            name: name.into(),
            x,
            y,
            z,
        })
    }

    /// Number of time steps
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if recording is empty
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Samples of one axis
    pub fn axis(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

//! Inclination of the sensor axes against gravity

use soilsense_core::{AngleSet, Baseline};
use std::f64::consts::FRAC_PI_2;

/// Angle between each axis and the baseline (gravity) vector
///
/// For each axis: `atan(sqrt(a² + b²) / c)` where `c` is that axis's baseline
/// component and `a`, `b` are the other two. An axis whose component is
/// exactly zero is perpendicular to gravity and gets `π/2`.
pub fn gravity_angles(baseline: &Baseline) -> AngleSet {
    let [x, y, z] = baseline.as_array();
    AngleSet {
        x: inclination(x, y, z),
        y: inclination(y, x, z),
        z: inclination(z, x, y),
    }
}

fn inclination(along: f64, other_a: f64, other_b: f64) -> f64 {
    if along == 0.0 {
        return FRAC_PI_2;
    }
    ((other_a * other_a + other_b * other_b).sqrt() / along).atan()
}

//! Unit systems and frame transforms.
//!
//! A position moves through three coordinate spaces on its way from the
//! G-code interpreter to the downstream motion queue:
//!
//! - **program units** — whatever the active `G20`/`G21`/G-code-dialect
//!   unit is (inch, millimetre, centimetre); angles are always degrees.
//! - **internal units** — millimetres and degrees, used by every
//!   calculation in this crate ([`crate::kinematics`], [`crate::chain`],
//!   [`crate::curves`]).
//! - **external units** — whatever the downstream motion planner expects,
//!   described by the per-axis unit ratios in [`crate::config::MachineConfig`].
//!
//! Frame transforms (origin offset, XY rotation, tool length offset) are
//! applied once a pose is in internal units.

use serde::Deserialize;

use crate::pose::{Axis, Pose9};

/// The program-side length unit in effect (`G20`/`G21`/`G21.1`-equivalent).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    Inch,
    Millimeter,
    Centimeter,
}

impl LengthUnit {
    /// Internal units are always millimetres; this is the multiplier that
    /// converts one unit of this length unit into millimetres.
    fn mm_per_unit(self) -> f64 {
        match self {
            LengthUnit::Inch => 25.4,
            LengthUnit::Millimeter => 1.0,
            LengthUnit::Centimeter => 10.0,
        }
    }
}

/// Converts a program-unit length into internal millimetres.
pub fn to_internal_length(program_value: f64, unit: LengthUnit) -> f64 {
    program_value * unit.mm_per_unit()
}

/// Converts an internal millimetre length back into program units.
pub fn from_internal_length(internal_mm: f64, unit: LengthUnit) -> f64 {
    internal_mm / unit.mm_per_unit()
}

/// Converts an internal millimetre length into external (motion-planner) units
/// using the per-axis ratio from the machine configuration.
pub fn to_external_length(internal_mm: f64, external_ratio: f64) -> f64 {
    internal_mm * external_ratio
}

/// Converts an external (motion-planner) length back into internal millimetres.
pub fn from_external_length(external_value: f64, external_ratio: f64) -> f64 {
    external_value / external_ratio
}

/// Converts an internal (degree) angle into external units using the
/// configured angular ratio (e.g. degrees-to-radians for a planner that
/// speaks radians).
pub fn to_external_angle(internal_deg: f64, external_ratio: f64) -> f64 {
    internal_deg * external_ratio
}

/// Converts an external angle back into internal degrees.
pub fn from_external_angle(external_value: f64, external_ratio: f64) -> f64 {
    external_value / external_ratio
}

/// Converts a full pose from program units into internal units (mm/deg).
/// Angles pass through unchanged — program-side angles are always degrees.
pub fn pose_to_internal(p: &Pose9, unit: LengthUnit) -> Pose9 {
    let mut out = *p;
    for axis in [Axis::X, Axis::Y, Axis::Z, Axis::U, Axis::V, Axis::W] {
        out.set(axis, to_internal_length(p.get(axis), unit));
    }
    out
}

/// Converts a full pose from internal units back into program units.
pub fn pose_to_program(p: &Pose9, unit: LengthUnit) -> Pose9 {
    let mut out = *p;
    for axis in [Axis::X, Axis::Y, Axis::Z, Axis::U, Axis::V, Axis::W] {
        out.set(axis, from_internal_length(p.get(axis), unit));
    }
    out
}

/// Rotates `p` about Z by `xy_rotation_deg`, then adds `origin` and
/// `tool_offset`. This is the forward program-frame → internal-frame
/// transform: rotate first, offset second.
pub fn rotate_and_offset(p: &Pose9, origin: &Pose9, xy_rotation_deg: f64, tool_offset: &Pose9) -> Pose9 {
    let theta = xy_rotation_deg.to_radians();
    let (s, c) = theta.sin_cos();
    let rx = p.x * c - p.y * s;
    let ry = p.x * s + p.y * c;

    let mut out = p.plus(origin).plus(tool_offset);
    out.x = rx + origin.x + tool_offset.x;
    out.y = ry + origin.y + tool_offset.y;
    out
}

/// Inverse of [`rotate_and_offset`]: unoffsets `p` (subtracts `origin` and
/// `tool_offset`) *before* unrotating it. This order is not interchangeable
/// with rotate-then-offset's order reversed naively — unoffset must happen
/// first or the rotation is applied about the wrong center.
pub fn unoffset_and_unrotate(p: &Pose9, origin: &Pose9, xy_rotation_deg: f64, tool_offset: &Pose9) -> Pose9 {
    let unoffset = p.minus(origin).minus(tool_offset);

    let theta = -xy_rotation_deg.to_radians();
    let (s, c) = theta.sin_cos();
    let mut out = unoffset;
    out.x = unoffset.x * c - unoffset.y * s;
    out.y = unoffset.x * s + unoffset.y * c;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inch_to_mm_uses_25_4() {
        assert_eq!(to_internal_length(1.0, LengthUnit::Inch), 25.4);
    }

    #[test]
    fn mm_round_trips_through_program_and_internal() {
        let internal = to_internal_length(10.0, LengthUnit::Millimeter);
        assert_eq!(from_internal_length(internal, LengthUnit::Millimeter), 10.0);
    }

    #[test]
    fn centimeter_conversion() {
        assert_eq!(to_internal_length(2.5, LengthUnit::Centimeter), 25.0);
    }

    #[test]
    fn external_length_ratio_round_trips() {
        let ratio = 0.03937007874; // mm -> inch, as an external-units example
        let external = to_external_length(25.4, ratio);
        let back = from_external_length(external, ratio);
        assert!((back - 25.4).abs() < 1e-9);
    }

    #[test]
    fn rotate_and_offset_with_zero_rotation_is_plain_offset() {
        let p = Pose9 {
            x: 1.0,
            y: 2.0,
            ..Pose9::ZERO
        };
        let origin = Pose9 {
            x: 10.0,
            y: 20.0,
            ..Pose9::ZERO
        };
        let result = rotate_and_offset(&p, &origin, 0.0, &Pose9::ZERO);
        assert!((result.x - 11.0).abs() < 1e-9);
        assert!((result.y - 22.0).abs() < 1e-9);
    }

    #[test]
    fn rotate_and_offset_90_degrees() {
        let p = Pose9 {
            x: 1.0,
            y: 0.0,
            ..Pose9::ZERO
        };
        let result = rotate_and_offset(&p, &Pose9::ZERO, 90.0, &Pose9::ZERO);
        assert!(result.x.abs() < 1e-9);
        assert!((result.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unoffset_and_unrotate_inverts_rotate_and_offset() {
        let p = Pose9 {
            x: 3.0,
            y: 4.0,
            z: 5.0,
            ..Pose9::ZERO
        };
        let origin = Pose9 {
            x: 1.0,
            y: -2.0,
            z: 0.5,
            ..Pose9::ZERO
        };
        let tool_offset = Pose9 {
            z: 0.25,
            ..Pose9::ZERO
        };
        let forward = rotate_and_offset(&p, &origin, 30.0, &tool_offset);
        let back = unoffset_and_unrotate(&forward, &origin, 30.0, &tool_offset);
        assert!(p.approx_eq(&back, 1e-9));
    }
}

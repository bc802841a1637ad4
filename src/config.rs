//! Machine configuration: the contract a host must supply before driving a
//! [`crate::session::CanonSession`].
//!
//! Loaded from a TOML string with `serde` + `toml`, then validated — the
//! same two-step shape used throughout this crate's ancestry for
//! configuration that can't be fully expressed in the type system alone.

use serde::Deserialize;

use crate::error::CanonError;
use crate::pose::Axis;
use crate::units::LengthUnit;

/// Per-axis kinematic limits, used by [`crate::kinematics`].
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AxisLimits {
    pub max_velocity: f64,
    pub max_acceleration: f64,
}

/// `[axes]` — per-axis kinematic limits for all nine canonical axes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AxesConfig {
    pub x: AxisLimits,
    pub y: AxisLimits,
    pub z: AxisLimits,
    pub a: AxisLimits,
    pub b: AxisLimits,
    pub c: AxisLimits,
    pub u: AxisLimits,
    pub v: AxisLimits,
    pub w: AxisLimits,
}

impl AxesConfig {
    pub fn limits(&self, axis: Axis) -> AxisLimits {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            Axis::A => self.a,
            Axis::B => self.b,
            Axis::C => self.c,
            Axis::U => self.u,
            Axis::V => self.v,
            Axis::W => self.w,
        }
    }
}

/// `[units]` — the program-side default length unit and the external
/// (motion-planner) conversion ratios.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UnitsConfig {
    /// Default program length unit, in effect until the interpreter issues
    /// a `SET_LENGTH_UNITS` call.
    pub default_program_units: LengthUnit,
    /// External-units-per-internal-millimetre ratio for the downstream
    /// motion planner (e.g. `1.0` if the planner also speaks millimetres).
    pub linear_unit_ratio: f64,
    /// External-units-per-internal-degree ratio (e.g. `std::f64::consts::PI / 180.0`
    /// if the planner speaks radians).
    pub angular_unit_ratio: f64,
}

/// `[tolerances]` — default path and naive-CAM tolerances, in millimetres.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TolerancesConfig {
    /// Default chord-deviation tolerance for arc flattening.
    pub path_tolerance: f64,
    /// Default perpendicular-distance tolerance for the naive-CAM segment collapser.
    pub naive_cam_tolerance: f64,
    /// Maximum number of points the segment chain will hold before a forced flush.
    #[serde(default = "default_max_chain_points")]
    pub max_chain_points: usize,
}

fn default_max_chain_points() -> usize {
    100
}

/// Fully describes the motion envelope and unit contract of one machine.
/// Loaded from a TOML file by the embedding host.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MachineConfig {
    pub axes: AxesConfig,
    pub units: UnitsConfig,
    pub tolerances: TolerancesConfig,
}

/// Parses a TOML string into a [`MachineConfig`], running validation.
pub fn parse(toml_str: &str) -> Result<MachineConfig, CanonError> {
    let cfg: MachineConfig =
        toml::from_str(toml_str).map_err(|e| CanonError::Config(e.to_string()))?;
    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &MachineConfig) -> Result<(), CanonError> {
    for axis in Axis::ALL {
        let limits = cfg.axes.limits(axis);
        // Zero is a legitimate "this axis is disabled" limit, not an error —
        // kinematics::governing_time already treats a sub-TINY limit as
        // contributing no time budget, so a zero-limit axis just never governs.
        if limits.max_velocity < 0.0 {
            return Err(CanonError::Config(format!(
                "axes.{axis:?}.max_velocity must not be negative"
            )));
        }
        if limits.max_acceleration < 0.0 {
            return Err(CanonError::Config(format!(
                "axes.{axis:?}.max_acceleration must not be negative"
            )));
        }
    }

    if cfg.units.linear_unit_ratio <= 0.0 {
        return Err(CanonError::Config(
            "units.linear_unit_ratio must be positive".to_string(),
        ));
    }
    if cfg.units.angular_unit_ratio <= 0.0 {
        return Err(CanonError::Config(
            "units.angular_unit_ratio must be positive".to_string(),
        ));
    }

    if cfg.tolerances.path_tolerance <= 0.0 {
        return Err(CanonError::Config(
            "tolerances.path_tolerance must be positive".to_string(),
        ));
    }
    if cfg.tolerances.naive_cam_tolerance < 0.0 {
        return Err(CanonError::Config(
            "tolerances.naive_cam_tolerance must not be negative".to_string(),
        ));
    }
    if cfg.tolerances.max_chain_points == 0 {
        return Err(CanonError::Config(
            "tolerances.max_chain_points must be at least 1".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_valid_toml() -> String {
        r#"
[axes.x]
max_velocity = 5000.0
max_acceleration = 2000.0
[axes.y]
max_velocity = 5000.0
max_acceleration = 2000.0
[axes.z]
max_velocity = 3000.0
max_acceleration = 1500.0
[axes.a]
max_velocity = 3600.0
max_acceleration = 1800.0
[axes.b]
max_velocity = 3600.0
max_acceleration = 1800.0
[axes.c]
max_velocity = 3600.0
max_acceleration = 1800.0
[axes.u]
max_velocity = 3000.0
max_acceleration = 1500.0
[axes.v]
max_velocity = 3000.0
max_acceleration = 1500.0
[axes.w]
max_velocity = 3000.0
max_acceleration = 1500.0

[units]
default_program_units = "millimeter"
linear_unit_ratio = 1.0
angular_unit_ratio = 1.0

[tolerances]
path_tolerance = 0.01
naive_cam_tolerance = 0.02
"#
        .to_string()
    }

    #[test]
    fn valid_config_parses_successfully() {
        assert!(parse(&minimal_valid_toml()).is_ok());
    }

    #[test]
    fn default_max_chain_points_is_100_when_omitted() {
        let cfg = parse(&minimal_valid_toml()).unwrap();
        assert_eq!(cfg.tolerances.max_chain_points, 100);
    }

    #[test]
    fn invalid_toml_returns_config_error() {
        let result = parse("not valid toml :::");
        assert!(matches!(result, Err(CanonError::Config(_))));
    }

    #[test]
    fn zero_velocity_limit_is_accepted_as_a_disabled_axis() {
        let toml = minimal_valid_toml().replace(
            "[axes.x]\nmax_velocity = 5000.0",
            "[axes.x]\nmax_velocity = 0.0",
        );
        assert!(parse(&toml).is_ok());
    }

    #[test]
    fn negative_velocity_limit_is_rejected() {
        let toml = minimal_valid_toml().replace(
            "[axes.x]\nmax_velocity = 5000.0",
            "[axes.x]\nmax_velocity = -1.0",
        );
        let result = parse(&toml);
        assert!(matches!(result, Err(CanonError::Config(_))));
    }

    #[test]
    fn zero_linear_unit_ratio_is_rejected() {
        let toml = minimal_valid_toml().replace(
            "linear_unit_ratio = 1.0",
            "linear_unit_ratio = 0.0",
        );
        let result = parse(&toml);
        assert!(matches!(result, Err(CanonError::Config(_))));
    }

    #[test]
    fn negative_naive_cam_tolerance_is_rejected() {
        let toml = minimal_valid_toml().replace(
            "naive_cam_tolerance = 0.02",
            "naive_cam_tolerance = -0.02",
        );
        let result = parse(&toml);
        assert!(matches!(result, Err(CanonError::Config(_))));
    }
}

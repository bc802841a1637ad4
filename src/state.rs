//! The canonical state store: every piece of modal state a G-code
//! interpreter can set, and the setters that change it.
//!
//! Most setters here flush the pending [`crate::chain::SegmentChain`]
//! before mutating state, because a change to the active frame, units, or
//! blending mode invalidates any segments still waiting to be collapsed.
//! `set_xy_rotation` is the one documented exception — see its doc comment.

use serde::{Deserialize, Serialize};

use crate::pose::Pose9;
use crate::units::LengthUnit;

/// Active plane for arc interpolation (`G17`/`G18`/`G19`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Plane {
    Xy,
    Yz,
    Xz,
}

/// Feed rate interpretation (`G93`/`G94`/`G95`), carried on every
/// `LINEAR_MOVE`/`CIRCULAR_MOVE` message so the downstream planner knows how
/// to interpret the accompanying `velocity`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedMode {
    UnitsPerMinute,
    InverseTime,
    UnitsPerRevolution,
}

/// Spindle speed mode (`G96`/`G97`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpindleMode {
    ConstantRpm,
    ConstantSurfaceSpeed,
}

/// All canonical modal state tracked between the interpreter and the
/// downstream motion queue.
#[derive(Debug, Clone)]
pub struct CanonicalState {
    pub origin: Pose9,
    pub tool_offset: Pose9,
    pub xy_rotation_deg: f64,
    pub program_units: LengthUnit,
    pub plane: Plane,
    pub feed_mode: FeedMode,
    pub feed_rate: f64,
    pub term_condition_tolerance: Option<f64>,
    pub path_tolerance: f64,
    pub naive_cam_tolerance: f64,
    pub spindle_speed: f64,
    pub spindle_mode: SpindleMode,
    /// `true` while `START_SPEED_FEED_SYNCH` is active (feed-per-revolution
    /// sync to the spindle). A traverse temporarily stops sync and restarts
    /// it afterward, since a rapid move has no meaningful feed-per-rev rate.
    pub feed_sync: bool,
    /// Constant-surface-speed ceiling RPM. Write-only in this layer: the
    /// setter accepts it but nothing downstream currently reads it back.
    /// Kept on the struct rather than discarded — see `DESIGN.md`.
    pub css_maximum: f64,
    /// Internal-frame (mm/deg, absolute) position of the end of the last
    /// emitted move. Committed once at move time and never re-derived: a
    /// later change to the origin offset, tool offset, rotation, or program
    /// units must not retroactively reinterpret where the machine already is.
    pub last_end_point: Pose9,
}

impl Default for CanonicalState {
    fn default() -> Self {
        Self {
            origin: Pose9::ZERO,
            tool_offset: Pose9::ZERO,
            xy_rotation_deg: 0.0,
            program_units: LengthUnit::Millimeter,
            plane: Plane::Xy,
            feed_mode: FeedMode::UnitsPerMinute,
            feed_rate: 0.0,
            term_condition_tolerance: None,
            path_tolerance: 0.0,
            naive_cam_tolerance: 0.0,
            spindle_speed: 0.0,
            spindle_mode: SpindleMode::ConstantRpm,
            feed_sync: false,
            css_maximum: 0.0,
            last_end_point: Pose9::ZERO,
        }
    }
}

impl CanonicalState {
    pub fn new(path_tolerance: f64, naive_cam_tolerance: f64) -> Self {
        Self {
            path_tolerance,
            naive_cam_tolerance,
            ..Self::default()
        }
    }

    pub fn set_origin(&mut self, origin: Pose9) {
        self.origin = origin;
    }

    pub fn set_tool_offset(&mut self, offset: Pose9) {
        self.tool_offset = offset;
    }

    /// Sets the XY rotation angle without flushing the pending segment
    /// chain. Every other frame-affecting setter (origin, tool offset,
    /// units, plane) flushes first; this one historically does not, and
    /// downstream consumers may already depend on segments queued before
    /// a rotation change sharing a chain with segments queued after it.
    /// Preserved as-is rather than "fixed".
    pub fn set_xy_rotation(&mut self, degrees: f64) {
        self.xy_rotation_deg = degrees;
    }

    pub fn set_program_units(&mut self, unit: LengthUnit) {
        self.program_units = unit;
    }

    pub fn set_plane(&mut self, plane: Plane) {
        self.plane = plane;
    }

    pub fn set_feed_mode(&mut self, mode: FeedMode) {
        self.feed_mode = mode;
    }

    /// Returns `true` if the new rate differs from the current one. The
    /// segment chain only needs flushing on an actual change — re-issuing
    /// the same feed rate is a no-op for blending purposes.
    pub fn set_feed_rate(&mut self, rate: f64) -> bool {
        let changed = (self.feed_rate - rate).abs() > f64::EPSILON;
        self.feed_rate = rate;
        changed
    }

    pub fn set_term_condition_exact(&mut self) {
        self.term_condition_tolerance = None;
    }

    pub fn set_term_condition_blend(&mut self, tolerance: f64) {
        self.term_condition_tolerance = Some(tolerance);
    }

    pub fn set_path_tolerance(&mut self, tolerance: f64) {
        self.path_tolerance = tolerance;
    }

    pub fn set_naive_cam_tolerance(&mut self, tolerance: f64) {
        self.naive_cam_tolerance = tolerance;
    }

    pub fn set_spindle_speed(&mut self, rpm: f64) {
        self.spindle_speed = rpm;
    }

    pub fn set_spindle_mode_rpm(&mut self) {
        self.spindle_mode = SpindleMode::ConstantRpm;
    }

    pub fn set_spindle_mode_css(&mut self, css_maximum: f64) {
        self.spindle_mode = SpindleMode::ConstantSurfaceSpeed;
        self.css_maximum = css_maximum;
    }

    pub fn set_feed_sync(&mut self, on: bool) {
        self.feed_sync = on;
    }
}

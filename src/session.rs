//! [`CanonSession`]: the orchestrator an embedding interpreter drives.
//!
//! Ties the canonical state store, the kinematic envelope calculator, the
//! segment chain, and the curve emitters together behind the operation set
//! described by the canonical motion interface, and exposes the read-only
//! query surface alongside it.

use tracing::{debug, warn};

use crate::chain::{CollapsedMove, SegmentChain};
use crate::config::MachineConfig;
use crate::curves::arc::{arc_geometry, chord_deviation, flatten_arc, turn_count, ArcGeometry};
use crate::curves::nurbs::{biarcs_to_points, decompose_to_biarcs, ControlPoint};
use crate::kinematics::{self, KinematicEnvelope};
use crate::pose::{Axis, Pose9};
use crate::queue::{MotionMessage, MotionQueue, MotionType, TermCondition};
use crate::state::{CanonicalState, FeedMode, Plane, SpindleMode};
use crate::units;

/// The live canonical motion layer for one machine session.
pub struct CanonSession {
    config: MachineConfig,
    state: CanonicalState,
    chain: SegmentChain,
}

impl CanonSession {
    pub fn new(config: MachineConfig) -> Self {
        let state = CanonicalState::new(
            config.tolerances.path_tolerance,
            config.tolerances.naive_cam_tolerance,
        );
        let chain = SegmentChain::new(
            config.tolerances.naive_cam_tolerance,
            config.tolerances.max_chain_points,
        );
        Self { config, state, chain }
    }

    /// `INIT_CANON` — resets all modal state to its power-on defaults and
    /// discards any pending, not-yet-flushed segment chain without emitting
    /// a collapsed move for it. The machine configuration supplied at
    /// construction is untouched.
    pub fn init_canon(&mut self) {
        self.chain = SegmentChain::new(
            self.config.tolerances.naive_cam_tolerance,
            self.config.tolerances.max_chain_points,
        );
        self.state = CanonicalState::new(
            self.config.tolerances.path_tolerance,
            self.config.tolerances.naive_cam_tolerance,
        );
    }

    /// `CANON_UPDATE_END_POINT` — overwrites the committed machine position
    /// directly, converting only program units to internal (mm/deg); unlike
    /// every move-emitting call, this does not apply the origin offset, tool
    /// offset, or XY rotation, and never touches the queue. Used by a host
    /// reconciling canonical state after skipping program lines out of band.
    pub fn update_end_point(&mut self, point: Pose9) {
        self.state.last_end_point = units::pose_to_internal(&point, self.state.program_units);
    }

    // ── frame transforms ────────────────────────────────────────────────

    fn to_internal(&self, p: Pose9) -> Pose9 {
        let internal = units::pose_to_internal(&p, self.state.program_units);
        units::rotate_and_offset(
            &internal,
            &self.state.origin,
            self.state.xy_rotation_deg,
            &self.state.tool_offset,
        )
    }

    fn to_external(&self, p: Pose9) -> Pose9 {
        let mut out = p;
        for axis in [Axis::X, Axis::Y, Axis::Z, Axis::U, Axis::V, Axis::W] {
            out.set(
                axis,
                units::to_external_length(p.get(axis), self.config.units.linear_unit_ratio),
            );
        }
        for axis in [Axis::A, Axis::B, Axis::C] {
            out.set(
                axis,
                units::to_external_angle(p.get(axis), self.config.units.angular_unit_ratio),
            );
        }
        out
    }

    // ── chain / queue plumbing ──────────────────────────────────────────

    /// Flushes any pending segment chain into the queue as a single
    /// collapsed linear move.
    pub fn flush(&mut self, queue: &mut dyn MotionQueue) {
        if let Some(collapsed) = self.chain.flush() {
            self.emit_collapsed(queue, collapsed);
        }
    }

    fn emit_collapsed(&self, queue: &mut dyn MotionQueue, collapsed: CollapsedMove) {
        let delta = collapsed.end.minus(&collapsed.start);
        let env = kinematics::envelope(
            &delta,
            collapsed.feed_rate,
            collapsed.is_rapid,
            &self.config.axes,
        );
        let motion_type = if collapsed.is_rapid { MotionType::Traverse } else { MotionType::Feed };
        self.push_linear(queue, collapsed.end_line, collapsed.end, env, motion_type);
    }

    fn push_linear(
        &self,
        queue: &mut dyn MotionQueue,
        line_number: u32,
        end_internal: Pose9,
        env: KinematicEnvelope,
        motion_type: MotionType,
    ) {
        queue.push(
            line_number,
            MotionMessage::LinearMove {
                end: self.to_external(end_internal),
                velocity: units::to_external_length(env.velocity, self.config.units.linear_unit_ratio),
                ini_maxvel: units::to_external_length(
                    env.ini_maxvel,
                    self.config.units.linear_unit_ratio,
                ),
                acceleration: units::to_external_length(
                    env.acceleration,
                    self.config.units.linear_unit_ratio,
                ),
                feed_mode: self.state.feed_mode,
                motion_type,
            },
        );
    }

    // ── moves ────────────────────────────────────────────────────────────

    fn straight_move(
        &mut self,
        queue: &mut dyn MotionQueue,
        line_number: u32,
        end_program: Pose9,
        is_rapid: bool,
    ) {
        // A rapid traverse has no meaningful feed-per-revolution rate, so an
        // active feed sync is stopped for its duration and restarted after.
        let resume_feed_sync = is_rapid && self.state.feed_sync;
        if resume_feed_sync {
            self.emit_feed_sync_cmd(queue, line_number, false);
        }

        let start_internal = self.state.last_end_point;
        let end_internal = self.to_internal(end_program);
        let feed_rate = if is_rapid { 0.0 } else { self.state.feed_rate };

        if let Some(collapsed) = self
            .chain
            .see(line_number, start_internal, end_internal, feed_rate, is_rapid)
        {
            self.emit_collapsed(queue, collapsed);
        }

        // EXACT_STOP carries no blending across moves: every commanded move
        // terminates the chain immediately instead of waiting to see if the
        // next one is collinear.
        if self.state.term_condition_tolerance.is_none() {
            self.flush(queue);
        }
        self.state.last_end_point = end_internal;

        if resume_feed_sync {
            self.emit_feed_sync_cmd(queue, line_number, true);
        }
    }

    fn emit_feed_sync_cmd(&mut self, queue: &mut dyn MotionQueue, line_number: u32, on: bool) {
        self.state.set_feed_sync(on);
        let command = if on {
            format!("start_sync {}", self.state.feed_rate)
        } else {
            "stop_sync".to_string()
        };
        queue.push(line_number, MotionMessage::SystemCmd { command });
    }

    /// `START_SPEED_FEED_SYNCH` — feed rate tracks spindle revolutions
    /// instead of time.
    pub fn start_feed_sync(&mut self, queue: &mut dyn MotionQueue, line_number: u32) {
        self.emit_feed_sync_cmd(queue, line_number, true);
    }

    /// `STOP_SPEED_FEED_SYNCH` — returns to ordinary units-per-minute feed.
    pub fn stop_feed_sync(&mut self, queue: &mut dyn MotionQueue, line_number: u32) {
        self.emit_feed_sync_cmd(queue, line_number, false);
    }

    /// `STRAIGHT_TRAVERSE` — an uncommanded rapid move to `end` (program units).
    pub fn straight_traverse(&mut self, queue: &mut dyn MotionQueue, line_number: u32, end: Pose9) {
        self.straight_move(queue, line_number, end, true);
    }

    /// `STRAIGHT_FEED` — a programmed feed move to `end` (program units).
    pub fn straight_feed(&mut self, queue: &mut dyn MotionQueue, line_number: u32, end: Pose9) {
        self.straight_move(queue, line_number, end, false);
    }

    /// `ARC_FEED` — a circular arc to `end` around a center given as an
    /// `(i, j)` offset from the current position, in the active plane, with
    /// `turn` extra full rotations (the G-code `P`-word). `turn == 0` means
    /// this isn't really an arc and degenerates to a single linear move
    /// (still tagged as having come from `ARC_FEED`). Degrades to a
    /// straight feed if the geometry is otherwise inconsistent (the usual
    /// cause: `end` isn't equidistant from the center). A short XY arc
    /// under a blend term condition folds into the segment chain as two
    /// straight segments through its midpoint rather than emitting its own
    /// circular move — the same shortcut a short arc gets when it's cheaper
    /// to treat it as two chords than as a curve.
    pub fn arc_feed(
        &mut self,
        queue: &mut dyn MotionQueue,
        line_number: u32,
        end: Pose9,
        center_offset: (f64, f64),
        clockwise: bool,
        turn: i32,
    ) {
        let start_internal = self.state.last_end_point;
        let end_internal = self.to_internal(end);
        let plane = self.state.plane;

        if turn == 0 {
            self.flush(queue);
            let delta = end_internal.minus(&start_internal);
            let env = kinematics::envelope(&delta, self.state.feed_rate, false, &self.config.axes);
            self.push_linear(queue, line_number, end_internal, env, MotionType::Arc);
            self.state.last_end_point = end_internal;
            return;
        }

        let geometry = match arc_geometry(
            &start_internal,
            &end_internal,
            center_offset,
            clockwise,
            turn,
            plane,
        ) {
            Ok(g) => g,
            Err(reason) => {
                warn!(reason, "ARC_FEED geometry invalid, degrading to a straight feed");
                self.straight_move(queue, line_number, end, false);
                return;
            }
        };

        if plane == Plane::Xy && self.state.term_condition_tolerance.is_some() {
            let deviation = chord_deviation(geometry.radius, geometry.sweep());
            if deviation < self.state.naive_cam_tolerance {
                self.fold_short_arc_into_chain(queue, line_number, &geometry, &start_internal, &end_internal);
                self.state.last_end_point = end_internal;
                return;
            }
        }

        self.flush(queue);

        let (normal_start, normal_end) = match plane {
            Plane::Xy => (start_internal.z, end_internal.z),
            Plane::Yz => (start_internal.x, end_internal.x),
            Plane::Xz => (start_internal.y, end_internal.y),
        };

        let points = flatten_arc(
            &geometry,
            normal_start,
            normal_end,
            &end_internal,
            self.state.path_tolerance,
        );

        let delta = end_internal.minus(&start_internal);
        let env = kinematics::envelope(&delta, self.state.feed_rate, false, &self.config.axes);
        let turn_field = turn_count(turn);

        for point in &points {
            queue.push(
                line_number,
                MotionMessage::CircularMove {
                    end: self.to_external(*point),
                    center: (geometry.center_u, geometry.center_v),
                    normal: normal_vector(plane),
                    clockwise,
                    turn: turn_field,
                    velocity: units::to_external_length(
                        env.velocity,
                        self.config.units.linear_unit_ratio,
                    ),
                    ini_maxvel: units::to_external_length(
                        env.ini_maxvel,
                        self.config.units.linear_unit_ratio,
                    ),
                    acceleration: units::to_external_length(
                        env.acceleration,
                        self.config.units.linear_unit_ratio,
                    ),
                    feed_mode: self.state.feed_mode,
                },
            );
        }

        self.state.last_end_point = end_internal;
    }

    /// Feeds the two chords of a short XY arc (start→midpoint, midpoint→end)
    /// into the segment chain exactly as two ordinary `STRAIGHT_FEED`
    /// endpoints would be.
    fn fold_short_arc_into_chain(
        &mut self,
        queue: &mut dyn MotionQueue,
        line_number: u32,
        geometry: &ArcGeometry,
        start_internal: &Pose9,
        end_internal: &Pose9,
    ) {
        let direction = if geometry.clockwise { -1.0 } else { 1.0 };
        let mid_angle = geometry.start_angle + direction * geometry.sweep() / 2.0;

        let mut midpoint = *start_internal;
        midpoint.x = geometry.center_u + geometry.radius * mid_angle.cos();
        midpoint.y = geometry.center_v + geometry.radius * mid_angle.sin();
        midpoint.z = (start_internal.z + end_internal.z) / 2.0;

        let feed_rate = self.state.feed_rate;
        if let Some(collapsed) = self.chain.see(line_number, *start_internal, midpoint, feed_rate, false) {
            self.emit_collapsed(queue, collapsed);
        }
        if let Some(collapsed) = self.chain.see(line_number, midpoint, *end_internal, feed_rate, false) {
            self.emit_collapsed(queue, collapsed);
        }
    }

    /// `NURBS_FEED` — decomposes the curve described by `control_points`
    /// (in program-unit coordinates within the active plane) into a
    /// sequence of biarcs and emits each as a circular or linear move.
    pub fn nurbs_feed(
        &mut self,
        queue: &mut dyn MotionQueue,
        line_number: u32,
        control_points: &[(f64, f64, f64, f64)],
        order: usize,
    ) {
        self.flush(queue);
        let plane = self.state.plane;

        let internal_points: Vec<ControlPoint> = control_points
            .iter()
            .map(|&(u, v, normal, weight)| {
                let internal = self.to_internal(plane_pose(plane, u, v, normal));
                let (iu, iv, in_normal) = plane_coords(plane, &internal);
                ControlPoint {
                    u: iu,
                    v: iv,
                    normal: in_normal,
                    weight,
                }
            })
            .collect();

        if internal_points.len() < order {
            warn!("NURBS_FEED has fewer control points than its order; nothing to emit");
            return;
        }

        let last_cp = internal_points.last().expect("checked len >= order >= 1 above");
        let end_pose = plane_pose(plane, last_cp.u, last_cp.v, last_cp.normal);
        let biarcs = decompose_to_biarcs(&internal_points, order, plane);
        let points = biarcs_to_points(&biarcs, end_pose, plane);

        let feed_rate = self.state.feed_rate;
        for point in &points {
            let start = self.state.last_end_point;
            let delta = point.minus(&start);
            let env = kinematics::envelope(&delta, feed_rate, false, &self.config.axes);
            self.push_linear(queue, line_number, *point, env, MotionType::Feed);
            self.state.last_end_point = *point;
        }
    }

    /// `DELAY` — pauses program execution for `seconds`.
    pub fn dwell(&mut self, queue: &mut dyn MotionQueue, line_number: u32, seconds: f64) {
        self.flush(queue);
        queue.push(line_number, MotionMessage::Delay { seconds });
    }

    // ── modal setters ────────────────────────────────────────────────────

    pub fn set_origin_offset(&mut self, queue: &mut dyn MotionQueue, origin: Pose9) {
        self.flush(queue);
        self.state.set_origin(units::pose_to_internal(&origin, self.state.program_units));
    }

    pub fn set_tool_length_offset(&mut self, queue: &mut dyn MotionQueue, offset: Pose9) {
        self.flush(queue);
        self.state
            .set_tool_offset(units::pose_to_internal(&offset, self.state.program_units));
    }

    /// `SET_XY_ROTATION` — does **not** flush the pending chain. See
    /// [`CanonicalState::set_xy_rotation`].
    pub fn set_xy_rotation(&mut self, degrees: f64) {
        self.state.set_xy_rotation(degrees);
    }

    pub fn set_plane(&mut self, queue: &mut dyn MotionQueue, plane: Plane) {
        self.flush(queue);
        self.state.set_plane(plane);
    }

    pub fn set_program_units(
        &mut self,
        queue: &mut dyn MotionQueue,
        unit: crate::units::LengthUnit,
    ) {
        self.flush(queue);
        self.state.set_program_units(unit);
    }

    pub fn set_feed_mode(&mut self, queue: &mut dyn MotionQueue, mode: FeedMode) {
        self.flush(queue);
        self.state.set_feed_mode(mode);
    }

    /// `SET_FEED_RATE` — only flushes the chain when the rate actually changed.
    pub fn set_feed_rate(&mut self, queue: &mut dyn MotionQueue, rate: f64) {
        let internal_rate = units::to_internal_length(rate, self.state.program_units);
        if self.state.set_feed_rate(internal_rate) {
            self.flush(queue);
        }
    }

    pub fn set_term_condition_exact(&mut self, queue: &mut dyn MotionQueue, line_number: u32) {
        self.flush(queue);
        self.state.set_term_condition_exact();
        queue.push(
            line_number,
            MotionMessage::SetTermCond {
                condition: TermCondition::ExactStop,
            },
        );
    }

    pub fn set_term_condition_blend(
        &mut self,
        queue: &mut dyn MotionQueue,
        line_number: u32,
        tolerance: f64,
    ) {
        self.flush(queue);
        let internal_tolerance = units::to_internal_length(tolerance, self.state.program_units);
        self.state.set_term_condition_blend(internal_tolerance);
        queue.push(
            line_number,
            MotionMessage::SetTermCond {
                condition: TermCondition::Blend {
                    tolerance: internal_tolerance,
                },
            },
        );
    }

    /// `SET_MOTION_CONTROL_TOLERANCE` — the arc chord-deviation tolerance.
    /// Does not flush: it only constrains moves issued from now on.
    pub fn set_path_tolerance(&mut self, tolerance: f64) {
        let internal = units::to_internal_length(tolerance, self.state.program_units);
        self.state.set_path_tolerance(internal);
    }

    /// `SET_NAIVECAM_TOLERANCE` — does not flush for the same reason.
    pub fn set_naive_cam_tolerance(&mut self, tolerance: f64) {
        let internal = units::to_internal_length(tolerance, self.state.program_units);
        self.state.set_naive_cam_tolerance(internal);
        self.chain.set_tolerance(internal);
    }

    // ── non-goal stubs: enqueue-only side channels ──────────────────────

    pub fn spindle_on(&mut self, queue: &mut dyn MotionQueue, line_number: u32, rpm: f64, clockwise: bool) {
        self.flush(queue);
        self.state.set_spindle_speed(rpm);
        queue.push(
            line_number,
            MotionMessage::SystemCmd {
                command: format!("spindle_on {} {rpm}", if clockwise { "cw" } else { "ccw" }),
            },
        );
    }

    pub fn spindle_off(&mut self, queue: &mut dyn MotionQueue, line_number: u32) {
        self.flush(queue);
        self.state.set_spindle_speed(0.0);
        queue.push(
            line_number,
            MotionMessage::SystemCmd {
                command: "spindle_off".to_string(),
            },
        );
    }

    pub fn set_spindle_mode_rpm(&mut self) {
        self.state.set_spindle_mode_rpm();
    }

    pub fn set_spindle_mode_css(&mut self, css_maximum: f64) {
        self.state.set_spindle_mode_css(css_maximum);
    }

    pub fn coolant_flood(&mut self, queue: &mut dyn MotionQueue, line_number: u32, on: bool) {
        self.flush(queue);
        queue.push(
            line_number,
            MotionMessage::SystemCmd {
                command: format!("coolant_flood {}", if on { "on" } else { "off" }),
            },
        );
    }

    pub fn coolant_mist(&mut self, queue: &mut dyn MotionQueue, line_number: u32, on: bool) {
        self.flush(queue);
        queue.push(
            line_number,
            MotionMessage::SystemCmd {
                command: format!("coolant_mist {}", if on { "on" } else { "off" }),
            },
        );
    }

    pub fn tool_change(&mut self, queue: &mut dyn MotionQueue, line_number: u32, tool_number: u32) {
        self.flush(queue);
        queue.push(
            line_number,
            MotionMessage::SystemCmd {
                command: format!("tool_change {tool_number}"),
            },
        );
    }

    /// Rigid tapping, straight probing, cutter-radius compensation,
    /// adaptive feed, and feed hold are non-goals of this layer: each logs
    /// once and returns without touching the queue.
    pub fn unsupported(&self, operation: &str) {
        warn!(operation, "operation is not implemented by the canonical motion layer");
    }

    pub fn plan_pause(&mut self, queue: &mut dyn MotionQueue, line_number: u32) {
        self.flush(queue);
        queue.push(line_number, MotionMessage::PlanPause);
    }

    pub fn plan_end(&mut self, queue: &mut dyn MotionQueue, line_number: u32) {
        self.flush(queue);
        queue.push(line_number, MotionMessage::PlanEnd);
    }

    // ── query surface ────────────────────────────────────────────────────

    pub fn get_program_units(&self) -> crate::units::LengthUnit {
        self.state.program_units
    }

    pub fn get_plane(&self) -> Plane {
        self.state.plane
    }

    pub fn get_feed_rate(&self) -> f64 {
        units::from_internal_length(self.state.feed_rate, self.state.program_units)
    }

    pub fn get_spindle_speed(&self) -> f64 {
        self.state.spindle_speed
    }

    pub fn get_spindle_mode(&self) -> SpindleMode {
        self.state.spindle_mode
    }

    /// Flushes the pending chain before answering, so the position
    /// reported matches what has actually reached the downstream queue.
    pub fn get_external_position(&mut self, queue: &mut dyn MotionQueue) -> Pose9 {
        self.flush(queue);
        debug!("GET_EXTERNAL_POSITION flushed the pending chain before answering");
        self.to_external(self.state.last_end_point)
    }

    /// The current position as the interpreter sees it, in program units,
    /// un-rotated and un-offset — distinct from [`Self::get_external_position`],
    /// which reports in the downstream motion planner's units and frame.
    pub fn get_program_position(&mut self, queue: &mut dyn MotionQueue) -> Pose9 {
        self.flush(queue);
        let program_frame = units::unoffset_and_unrotate(
            &self.state.last_end_point,
            &self.state.origin,
            self.state.xy_rotation_deg,
            &self.state.tool_offset,
        );
        units::pose_to_program(&program_frame, self.state.program_units)
    }

    pub fn get_external_length_units(&self) -> f64 {
        self.config.units.linear_unit_ratio
    }

    pub fn get_external_angle_units(&self) -> f64 {
        self.config.units.angular_unit_ratio
    }

    /// The active tool length offset, in program units.
    pub fn get_tool_offset(&self) -> Pose9 {
        units::pose_to_program(&self.state.tool_offset, self.state.program_units)
    }

    /// Bitmask of the nine canonical axes this layer tracks (bit 0 = X
    /// through bit 8 = W). A [`MachineConfig`] always supplies limits for
    /// every axis, so every bit is always set; which axes a given machine
    /// physically has is a property of the machine-configuration source,
    /// not of this layer.
    pub fn get_axis_mask(&self) -> u16 {
        0b1_1111_1111
    }

    /// The active term condition and, for a blend mode, its tolerance in
    /// program units.
    pub fn get_term_condition(&self) -> Option<f64> {
        self.state
            .term_condition_tolerance
            .map(|t| units::from_internal_length(t, self.state.program_units))
    }

    /// The fastest rapid-traverse rate across the six linear axes, in
    /// program units.
    pub fn get_traverse_rate(&self) -> f64 {
        let max_velocity = [Axis::X, Axis::Y, Axis::Z, Axis::U, Axis::V, Axis::W]
            .into_iter()
            .map(|axis| self.config.axes.limits(axis).max_velocity)
            .fold(0.0_f64, f64::max);
        units::from_internal_length(max_velocity, self.state.program_units)
    }

    // Hardware-feedback stubs: preserved with their original hardcoded
    // return values. No probe/IO/override hardware exists behind this layer.
    pub fn probe_tripped(&self) -> bool {
        false
    }

    /// Always the origin: no probing hardware exists behind this layer.
    pub fn probe_position(&self) -> Pose9 {
        Pose9::ZERO
    }

    pub fn digital_input(&self, _index: u32) -> bool {
        false
    }

    pub fn analog_input(&self, _index: u32) -> f64 {
        0.0
    }

    /// Always stopped: no spindle hardware exists behind this layer.
    pub fn spindle_direction(&self) -> SpindleDirection {
        SpindleDirection::Stopped
    }

    pub fn mist(&self) -> bool {
        false
    }

    pub fn flood(&self) -> bool {
        false
    }

    pub fn feed_override_enabled(&self) -> bool {
        false
    }

    pub fn spindle_override_enabled(&self) -> bool {
        false
    }

    pub fn adaptive_feed_enabled(&self) -> bool {
        false
    }

    pub fn feed_hold_enabled(&self) -> bool {
        false
    }
}

/// Current spindle rotation direction, as reported by hardware feedback.
/// This layer has no spindle hardware behind it, so [`CanonSession::spindle_direction`]
/// always reports [`SpindleDirection::Stopped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpindleDirection {
    Clockwise,
    CounterClockwise,
    Stopped,
}

fn normal_vector(plane: Plane) -> (f64, f64, f64) {
    match plane {
        Plane::Xy => (0.0, 0.0, 1.0),
        Plane::Yz => (1.0, 0.0, 0.0),
        Plane::Xz => (0.0, 1.0, 0.0),
    }
}

fn plane_pose(plane: Plane, u: f64, v: f64, normal: f64) -> Pose9 {
    let mut p = Pose9::ZERO;
    match plane {
        Plane::Xy => {
            p.x = u;
            p.y = v;
            p.z = normal;
        }
        Plane::Yz => {
            p.y = u;
            p.z = v;
            p.x = normal;
        }
        Plane::Xz => {
            p.z = u;
            p.x = v;
            p.y = normal;
        }
    }
    p
}

fn plane_coords(plane: Plane, p: &Pose9) -> (f64, f64, f64) {
    match plane {
        Plane::Xy => (p.x, p.y, p.z),
        Plane::Yz => (p.y, p.z, p.x),
        Plane::Xz => (p.z, p.x, p.y),
    }
}

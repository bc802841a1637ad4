//! Arc geometry: plane-aware circle solving, chord-deviation flattening,
//! and the turn-count convention G-code arcs use for more than one full
//! revolution.
//!
//! Grounded on the original canonical interface's `ARC_FEED`, generalized
//! in the quadrant/sweep style of a postprocessor's arc-geometry helpers
//! (`ijk_from_arc`, `arc_sweep_degrees`, `r_from_arc`).

use std::f64::consts::PI;

use crate::pose::Pose9;
use crate::state::Plane;

/// The two in-plane axes and the plane's normal axis, read out of a [`Pose9`].
fn plane_axes(plane: Plane, p: &Pose9) -> (f64, f64, f64) {
    match plane {
        Plane::Xy => (p.x, p.y, p.z),
        Plane::Yz => (p.y, p.z, p.x),
        Plane::Xz => (p.z, p.x, p.y),
    }
}

fn set_plane_axes(plane: Plane, p: &mut Pose9, u: f64, v: f64, normal: f64) {
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
}

/// A solved circular arc in its active plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub center_u: f64,
    pub center_v: f64,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub clockwise: bool,
    pub plane: Plane,
}

impl ArcGeometry {
    /// Total angle swept, in radians, always positive regardless of direction.
    pub fn sweep(&self) -> f64 {
        (self.end_angle - self.start_angle).abs()
    }
}

/// Converts a G-code `P`-word turn count into the extra full rotations to
/// add on top of the base (less-than-one-revolution) sweep. `turn == 0`
/// means "this isn't an arc at all" and is the caller's responsibility to
/// route to a straight feed before calling here.
fn extra_rotations(turn: i32) -> i32 {
    match turn {
        1 => 0,
        t if t >= 2 => t - 1,
        t if t <= -1 => t,
        _ => 0,
    }
}

/// The wire `turn` count emitted on a `CIRCULAR_MOVE`: `rotation - 1` for a
/// positive rotation, `rotation` for a negative one. Coincides exactly with
/// [`extra_rotations`] — both describe "how many extra full revolutions
/// beyond the base sweep" — but is exposed separately since that's an
/// implementation detail of [`arc_geometry`], not something callers should
/// reach into.
pub fn turn_count(rotation: i32) -> i32 {
    extra_rotations(rotation)
}

/// Applies the sign correction that turns a raw `atan2` angle difference
/// into a same-direction sweep, twice in a row. A single pass is enough
/// except right at the `atan2` branch cut (±π), where floating-point
/// rounding can leave `dth` a hair on the wrong side of zero after the
/// first correction; the second pass catches that residue.
fn resolve_sweep(start_angle: f64, mut end_angle: f64, clockwise: bool) -> f64 {
    for _ in 0..2 {
        let dth = end_angle - start_angle;
        if clockwise {
            if dth >= -1e-5 {
                end_angle -= 2.0 * PI;
            }
        } else if dth <= 1e-5 {
            end_angle += 2.0 * PI;
        }
    }
    end_angle
}

/// Solves the arc from `start` to `end` around a center given as an
/// `(i, j)` offset from `start` in the active plane, honoring `turn` extra
/// revolutions.
pub fn arc_geometry(
    start: &Pose9,
    end: &Pose9,
    center_offset: (f64, f64),
    clockwise: bool,
    turn: i32,
    plane: Plane,
) -> Result<ArcGeometry, &'static str> {
    let (su, sv, _) = plane_axes(plane, start);
    let (eu, ev, _) = plane_axes(plane, end);

    let center_u = su + center_offset.0;
    let center_v = sv + center_offset.1;

    let radius = (center_offset.0 * center_offset.0 + center_offset.1 * center_offset.1).sqrt();
    if radius < 1e-9 {
        return Err("arc radius is degenerate (start coincides with center)");
    }

    let end_radius = ((eu - center_u).powi(2) + (ev - center_v).powi(2)).sqrt();
    if (end_radius - radius).abs() > radius * 1e-3 + 1e-6 {
        return Err("arc end point is not equidistant from the center within tolerance");
    }

    let start_angle = (sv - center_v).atan2(su - center_u);
    let raw_end_angle = (ev - center_v).atan2(eu - center_u);
    let mut end_angle = resolve_sweep(start_angle, raw_end_angle, clockwise);

    let extra = extra_rotations(turn);
    let full_turn = 2.0 * PI * extra as f64;
    end_angle += if clockwise { -full_turn.abs() } else { full_turn.abs() };

    Ok(ArcGeometry {
        center_u,
        center_v,
        radius,
        start_angle,
        end_angle,
        clockwise,
        plane,
    })
}

/// Sagitta of a chord subtending `included_angle` radians on a circle of
/// `radius`: the perpendicular distance from the chord's midpoint to the
/// arc. This is the quantity `tolerance` bounds when deciding how many
/// chords an arc must be split into.
pub fn chord_deviation(radius: f64, included_angle: f64) -> f64 {
    radius * (1.0 - (included_angle / 2.0).cos())
}

/// Flattens `geometry` into a sequence of points (excluding the arc's own
/// start, including its end) such that no chord deviates from the true arc
/// by more than `tolerance`. `normal_start`/`normal_end` are the out-of-plane
/// coordinate at the arc's start/end, interpolated linearly (helical moves).
pub fn flatten_arc(
    geometry: &ArcGeometry,
    normal_start: f64,
    normal_end: f64,
    tail: &Pose9,
    tolerance: f64,
) -> Vec<Pose9> {
    let sweep = geometry.sweep();
    if sweep < 1e-9 {
        return vec![*tail];
    }

    // Solve for the largest per-chord angle whose sagitta stays within tolerance:
    // tolerance = r * (1 - cos(theta/2))  =>  theta = 2 * acos(1 - tolerance/r).
    let max_chord_angle = if tolerance <= 0.0 || tolerance >= geometry.radius {
        sweep
    } else {
        2.0 * (1.0 - tolerance / geometry.radius).acos()
    };
    let max_chord_angle = max_chord_angle.max(1e-6);

    let steps = (sweep / max_chord_angle).ceil().max(1.0) as usize;
    let direction = if geometry.clockwise { -1.0 } else { 1.0 };
    let signed_sweep = direction * sweep;

    let mut points = Vec::with_capacity(steps);
    for i in 1..=steps {
        let frac = i as f64 / steps as f64;
        let angle = geometry.start_angle + signed_sweep * frac;
        let u = geometry.center_u + geometry.radius * angle.cos();
        let v = geometry.center_v + geometry.radius * angle.sin();
        let normal = normal_start + (normal_end - normal_start) * frac;

        let mut pose = *tail;
        set_plane_axes(geometry.plane, &mut pose, u, v, normal);
        points.push(pose);
    }
    points
}

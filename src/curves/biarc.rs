//! Biarc construction: fit a pair of tangent-matching circular arcs between
//! two points with prescribed tangent directions, for flattening NURBS
//! curves into primitives the motion queue understands.
//!
//! The join parameter is solved as the positive root of a quadratic in the
//! tangent-weighted chord length, in the same discriminant-guarded style as
//! the corpus's other geometric solvers (a negative discriminant, like a
//! line-circle intersection with no real roots, means "no consistent arc
//! pair exists here" rather than a numerical failure to patch around).
//! When the discriminant is negative, or the two points and tangents are
//! effectively colinear, construction falls back to a single straight
//! segment.

use crate::curves::arc::ArcGeometry;
use crate::pose::Pose9;
use crate::state::Plane;

/// A 2-D unit tangent direction within the active plane.
pub type Tangent = (f64, f64);

/// The result of fitting a biarc between two points: either a genuine pair
/// of arcs, or a degenerate straight segment.
#[derive(Debug, Clone, PartialEq)]
pub enum Biarc {
    Arcs { first: ArcGeometry, second: ArcGeometry, joint: Pose9 },
    Straight,
}

fn dot(a: Tangent, b: Tangent) -> f64 {
    a.0 * b.0 + a.1 * b.1
}

fn add(a: Tangent, b: Tangent) -> Tangent {
    (a.0 + b.0, a.1 + b.1)
}

/// Circle center for a circle through `p` and `q` that is tangent to
/// direction `t` at `p`. Returns `None` when `t` is colinear with `q - p`
/// (infinite radius — the arc degenerates to a line).
fn center_from_point_tangent_and_second_point(
    p: (f64, f64),
    t: Tangent,
    q: (f64, f64),
) -> Option<(f64, f64)> {
    let normal = (-t.1, t.0);
    let w = (p.0 - q.0, p.1 - q.1);
    let w_dot_n = w.0 * normal.0 + w.1 * normal.1;
    if w_dot_n.abs() < 1e-9 {
        return None;
    }
    let w_dot_w = w.0 * w.0 + w.1 * w.1;
    let k = -w_dot_w / (2.0 * w_dot_n);
    Some((p.0 + k * normal.0, p.1 + k * normal.1))
}

fn arc_from_center(
    plane: Plane,
    center: (f64, f64),
    from: (f64, f64),
    to: (f64, f64),
    clockwise: bool,
) -> ArcGeometry {
    let radius = ((from.0 - center.0).powi(2) + (from.1 - center.1).powi(2)).sqrt();
    let start_angle = (from.1 - center.1).atan2(from.0 - center.0);
    let mut end_angle = (to.1 - center.1).atan2(to.0 - center.0);

    // Bring end_angle onto the same winding side as start_angle, same
    // sign-correction idiom used for full arcs.
    let dth = end_angle - start_angle;
    if clockwise && dth >= 0.0 {
        end_angle -= 2.0 * std::f64::consts::PI;
    } else if !clockwise && dth <= 0.0 {
        end_angle += 2.0 * std::f64::consts::PI;
    }

    ArcGeometry {
        center_u: center.0,
        center_v: center.1,
        radius,
        start_angle,
        end_angle,
        clockwise,
        plane,
    }
}

/// Fits a biarc in the given `plane` from `(p0, t0)` to `(p1, t1)` (points
/// as in-plane `(u, v)` pairs, tangents as unit vectors), carrying the
/// out-of-plane coordinate through linear interpolation at the joint.
pub fn fit(
    p0: (f64, f64),
    t0: Tangent,
    p1: (f64, f64),
    t1: Tangent,
    normal0: f64,
    normal1: f64,
    plane: Plane,
) -> Biarc {
    let d = (p1.0 - p0.0, p1.1 - p0.1);
    let d_dot_d = dot(d, d);
    if d_dot_d < 1e-12 {
        return Biarc::Straight;
    }

    let a = 2.0 * (1.0 - dot(t0, t1));
    let b = 2.0 * dot(d, add(t0, t1));
    let c = -d_dot_d;

    if a.abs() < 1e-9 {
        return Biarc::Straight;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Biarc::Straight;
    }

    let sqrt_disc = discriminant.sqrt();
    let s1 = (-b - sqrt_disc) / (2.0 * a);
    let s2 = (-b + sqrt_disc) / (2.0 * a);
    let s = if s1 > 1e-9 {
        s1
    } else if s2 > 1e-9 {
        s2
    } else {
        return Biarc::Straight;
    };

    let joint_from_start = (p0.0 + s * t0.0, p0.1 + s * t0.1);
    let joint_from_end = (p1.0 - s * t1.0, p1.1 - s * t1.1);
    let joint = (
        (joint_from_start.0 + joint_from_end.0) / 2.0,
        (joint_from_start.1 + joint_from_end.1) / 2.0,
    );

    let center1 = match center_from_point_tangent_and_second_point(p0, t0, joint) {
        Some(c) => c,
        None => return Biarc::Straight,
    };
    let center2 = match center_from_point_tangent_and_second_point(p1, t1, joint) {
        Some(c) => c,
        None => return Biarc::Straight,
    };

    // Direction is derived from whether the tangent turns clockwise or
    // counter-clockwise relative to the radius vector at the start point.
    let cw1 = cross(t0, (p0.0 - center1.0, p0.1 - center1.1)) > 0.0;
    let cw2 = cross(t1, (p1.0 - center2.0, p1.1 - center2.1)) < 0.0;

    let normal_joint = (normal0 + normal1) / 2.0;
    let mut joint_pose = Pose9::ZERO;
    let first = arc_from_center(plane, center1, p0, joint, cw1);
    let second = arc_from_center(plane, center2, joint, p1, cw2);

    set_plane_point(plane, &mut joint_pose, joint.0, joint.1, normal_joint);

    Biarc::Arcs {
        first,
        second,
        joint: joint_pose,
    }
}

fn cross(a: Tangent, b: Tangent) -> f64 {
    a.0 * b.1 - a.1 * b.0
}

fn set_plane_point(plane: Plane, p: &mut Pose9, u: f64, v: f64, normal: f64) {
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

/// Convenience wrapper matching the crate's straight/arc message shape:
/// returns the points a biarc should emit (excluding the curve's own
/// start), or `None` when it degenerated to a straight segment (the
/// caller should emit a single straight feed to the end point instead).
pub fn biarc_segments(
    p0: (f64, f64),
    t0: Tangent,
    p1: (f64, f64),
    t1: Tangent,
    normal0: f64,
    normal1: f64,
    plane: Plane,
) -> Option<Biarc> {
    match fit(p0, t0, p1, t1, normal0, normal1, plane) {
        Biarc::Straight => None,
        arcs => Some(arcs),
    }
}

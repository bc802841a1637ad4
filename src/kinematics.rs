//! Kinematic envelope calculation: the maximum velocity and acceleration a
//! move may run at, and which category of move it is.
//!
//! The original implementation this is derived from carried two
//! near-duplicate routines, one for velocity limits and one for
//! acceleration limits, that differed only in which per-axis limit array
//! they read from. [`envelope`] replaces both with a single routine
//! parameterized over [`LimitKind`], and returns a structured
//! [`MoveCategory`] instead of setting side-channel flags.

use crate::config::{AxesConfig, AxisLimits};
use crate::pose::{Axis, Pose9};

/// Which per-axis limit a kinematic computation should draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LimitKind {
    Velocity,
    Acceleration,
}

impl LimitKind {
    fn read(self, limits: AxisLimits) -> f64 {
        match self {
            LimitKind::Velocity => limits.max_velocity,
            LimitKind::Acceleration => limits.max_acceleration,
        }
    }
}

/// What kind of move a delta pose represents, per NIST IR6556 §2.1.2.5¶A:
/// a move touches either the linear axes only, the rotary axes only, or
/// both at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCategory {
    Linear,
    Angular,
    Combined,
}

/// The computed velocity/acceleration ceiling and category for one move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicEnvelope {
    pub category: MoveCategory,
    /// The per-axis-governed velocity ceiling before the feed-rate clamp —
    /// what the original calls `ini_maxvel`.
    pub ini_maxvel: f64,
    /// The velocity actually commanded: `ini_maxvel` clamped to the feed
    /// rate for a non-rapid move, or `ini_maxvel` unclamped for a rapid one.
    pub velocity: f64,
    pub acceleration: f64,
}

const TINY: f64 = 1e-7;

/// The per-axis time-budget method: for each axis that actually moves,
/// `t = |delta| / limit`; the move as a whole is constrained by whichever
/// axis takes the longest, so the governing time is the max over all
/// participating axes.
fn governing_time(delta: &Pose9, limits: &AxesConfig, kind: LimitKind) -> f64 {
    Axis::ALL
        .into_iter()
        .map(|axis| {
            let d = delta.get(axis).abs();
            if d < TINY {
                return 0.0_f64;
            }
            let limit = kind.read(limits.limits(axis));
            if limit < TINY {
                0.0
            } else {
                d / limit
            }
        })
        .fold(0.0_f64, f64::max)
}

fn classify(delta: &Pose9) -> MoveCategory {
    let linear_moves = [Axis::X, Axis::Y, Axis::Z, Axis::U, Axis::V, Axis::W]
        .into_iter()
        .any(|axis| delta.get(axis).abs() >= TINY);
    let angular_moves = [Axis::A, Axis::B, Axis::C]
        .into_iter()
        .any(|axis| delta.get(axis).abs() >= TINY);

    match (linear_moves, angular_moves) {
        (true, true) => MoveCategory::Combined,
        (false, true) => MoveCategory::Angular,
        _ => MoveCategory::Linear,
    }
}

/// Computes the kinematic envelope for a move spanning `delta` (the
/// component-wise difference between the move's start and end poses),
/// clamped so velocity never exceeds the currently commanded `feed_rate`
/// (a feed rate of `0.0` is treated as "unbounded", matching a rapid
/// traverse which ignores the programmed feed rate entirely).
pub fn envelope(delta: &Pose9, feed_rate: f64, is_rapid: bool, axes: &AxesConfig) -> KinematicEnvelope {
    let category = classify(delta);
    let distance = straight_distance(delta, category);

    let ini_maxvel = rate_from_time_budget(distance, governing_time(delta, axes, LimitKind::Velocity));
    let acceleration =
        rate_from_time_budget(distance, governing_time(delta, axes, LimitKind::Acceleration));

    let velocity = if is_rapid || feed_rate <= 0.0 {
        ini_maxvel
    } else {
        ini_maxvel.min(feed_rate)
    };

    KinematicEnvelope {
        category,
        ini_maxvel,
        velocity,
        acceleration,
    }
}

/// Straight-line distance covered by a move, in the units appropriate to
/// its category: cartesian mm for a linear/combined move (falling back to
/// the u/v/w triple when x/y/z didn't move at all, e.g. a pure auxiliary-axis
/// feed), degrees of combined rotary travel for a pure angular move.
fn straight_distance(delta: &Pose9, category: MoveCategory) -> f64 {
    match category {
        MoveCategory::Linear | MoveCategory::Combined => {
            if delta.x.abs() >= TINY || delta.y.abs() >= TINY || delta.z.abs() >= TINY {
                (delta.x * delta.x + delta.y * delta.y + delta.z * delta.z).sqrt()
            } else {
                (delta.u * delta.u + delta.v * delta.v + delta.w * delta.w).sqrt()
            }
        }
        MoveCategory::Angular => {
            (delta.a * delta.a + delta.b * delta.b + delta.c * delta.c).sqrt()
        }
    }
}

fn rate_from_time_budget(distance: f64, time: f64) -> f64 {
    if time < TINY {
        0.0
    } else {
        distance / time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axes() -> AxesConfig {
        let limit = AxisLimits {
            max_velocity: 100.0,
            max_acceleration: 50.0,
        };
        AxesConfig {
            x: limit,
            y: limit,
            z: limit,
            a: AxisLimits {
                max_velocity: 360.0,
                max_acceleration: 180.0,
            },
            b: AxisLimits {
                max_velocity: 360.0,
                max_acceleration: 180.0,
            },
            c: AxisLimits {
                max_velocity: 360.0,
                max_acceleration: 180.0,
            },
            u: limit,
            v: limit,
            w: limit,
        }
    }

    #[test]
    fn pure_x_move_is_linear_category() {
        let delta = Pose9 {
            x: 10.0,
            ..Pose9::ZERO
        };
        let env = envelope(&delta, 0.0, true, &axes());
        assert_eq!(env.category, MoveCategory::Linear);
    }

    #[test]
    fn pure_a_move_is_angular_category() {
        let delta = Pose9 {
            a: 90.0,
            ..Pose9::ZERO
        };
        let env = envelope(&delta, 0.0, true, &axes());
        assert_eq!(env.category, MoveCategory::Angular);
    }

    #[test]
    fn xyz_plus_rotary_is_combined_category() {
        let delta = Pose9 {
            x: 10.0,
            a: 5.0,
            ..Pose9::ZERO
        };
        let env = envelope(&delta, 0.0, true, &axes());
        assert_eq!(env.category, MoveCategory::Combined);
    }

    #[test]
    fn rapid_velocity_ignores_feed_rate() {
        let delta = Pose9 {
            x: 100.0,
            ..Pose9::ZERO
        };
        let env = envelope(&delta, 5.0, true, &axes());
        assert_eq!(env.velocity, 100.0);
    }

    #[test]
    fn feed_move_velocity_clamped_to_feed_rate() {
        let delta = Pose9 {
            x: 100.0,
            ..Pose9::ZERO
        };
        let env = envelope(&delta, 5.0, false, &axes());
        assert_eq!(env.velocity, 5.0);
        assert_eq!(env.ini_maxvel, 100.0, "ini_maxvel reports the pre-clamp ceiling");
    }

    #[test]
    fn diagonal_move_is_governed_by_the_slower_axis() {
        // x takes 10/100=0.1s, y takes 50/100=0.5s -> governed by y's time budget.
        let delta = Pose9 {
            x: 10.0,
            y: 50.0,
            ..Pose9::ZERO
        };
        let env = envelope(&delta, 0.0, true, &axes());
        let expected_distance = (10.0_f64 * 10.0 + 50.0 * 50.0).sqrt();
        let expected_velocity = expected_distance / 0.5;
        assert!((env.velocity - expected_velocity).abs() < 1e-9);
    }

    #[test]
    fn pure_uvw_move_falls_back_to_the_auxiliary_triple_for_distance() {
        let delta = Pose9 {
            u: 30.0,
            ..Pose9::ZERO
        };
        let env = envelope(&delta, 0.0, true, &axes());
        assert_eq!(env.category, MoveCategory::Linear);
        assert!((env.velocity - 100.0).abs() < 1e-9, "a real U-only move must not stall at zero velocity");
    }

    #[test]
    fn zero_length_move_has_zero_velocity() {
        let env = envelope(&Pose9::ZERO, 0.0, true, &axes());
        assert_eq!(env.velocity, 0.0);
        assert_eq!(env.acceleration, 0.0);
    }
}

//! The 9-axis machine position shared by every component of the canonical
//! motion layer.
//!
//! [`Pose9`] mirrors the `CANON_POSITION` tuple from the NIST canonical
//! interface: three primary linear axes, three rotary axes, and three
//! auxiliary linear axes. Every move, offset, and query in this crate is
//! expressed in terms of it.

use serde::{Deserialize, Serialize};

/// One of the nine axes a [`Pose9`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
    A,
    B,
    C,
    U,
    V,
    W,
}

impl Axis {
    /// All nine axes, in `Pose9` field order.
    pub const ALL: [Axis; 9] = [
        Axis::X,
        Axis::Y,
        Axis::Z,
        Axis::A,
        Axis::B,
        Axis::C,
        Axis::U,
        Axis::V,
        Axis::W,
    ];

    /// `true` for the three rotary axes (A, B, C); `false` for every linear axis.
    pub fn is_angular(self) -> bool {
        matches!(self, Axis::A | Axis::B | Axis::C)
    }
}

/// A position across all nine canonical axes.
///
/// X/Y/Z are the primary linear axes, A/B/C the rotary axes (degrees), and
/// U/V/W the auxiliary linear axes. Distances are always in millimetres
/// once a pose has crossed into internal units (see [`crate::units`]).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose9 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub u: f64,
    pub v: f64,
    pub w: f64,
}

impl Pose9 {
    pub const ZERO: Pose9 = Pose9 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        a: 0.0,
        b: 0.0,
        c: 0.0,
        u: 0.0,
        v: 0.0,
        w: 0.0,
    };

    /// Read one axis out by value.
    pub fn get(&self, axis: Axis) -> f64 {
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

    /// Write one axis in place.
    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
            Axis::A => self.a = value,
            Axis::B => self.b = value,
            Axis::C => self.c = value,
            Axis::U => self.u = value,
            Axis::V => self.v = value,
            Axis::W => self.w = value,
        }
    }

    /// Component-wise difference, `self - other`.
    pub fn minus(&self, other: &Pose9) -> Pose9 {
        let mut out = Pose9::ZERO;
        for axis in Axis::ALL {
            out.set(axis, self.get(axis) - other.get(axis));
        }
        out
    }

    /// Component-wise sum.
    pub fn plus(&self, other: &Pose9) -> Pose9 {
        let mut out = Pose9::ZERO;
        for axis in Axis::ALL {
            out.set(axis, self.get(axis) + other.get(axis));
        }
        out
    }

    /// Euclidean distance across the three primary linear axes only (X, Y, Z).
    /// Used by the kinematic envelope and naive-CAM collapser, which measure
    /// cartesian path length independently of rotary travel.
    pub fn xyz_distance(&self, other: &Pose9) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// `true` if every axis is within `tol` of `other`.
    pub fn approx_eq(&self, other: &Pose9, tol: f64) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| (self.get(axis) - other.get(axis)).abs() <= tol)
    }
}

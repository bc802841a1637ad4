//! Curve emitters: the geometry that turns a programmed arc, NURBS curve,
//! or straight move into the flattened primitive shapes the downstream
//! motion queue understands.

pub mod arc;
pub mod biarc;
pub mod nurbs;

pub use arc::{flatten_arc, ArcGeometry};
pub use biarc::{biarc_segments, Biarc};

//! A canonical motion layer: the boundary between a G-code interpreter and
//! a downstream trajectory-planner motion queue.
//!
//! An embedding interpreter drives a [`session::CanonSession`] with the
//! canonical operation set (straight/arc/NURBS feeds, modal setters, the
//! query surface) and supplies a [`queue::MotionQueue`] for it to append
//! flattened motion messages to.

pub mod chain;
pub mod config;
pub mod curves;
pub mod error;
pub mod kinematics;
pub mod pose;
pub mod queue;
pub mod session;
pub mod state;
pub mod units;

pub use config::MachineConfig;
pub use error::CanonError;
pub use pose::{Axis, Pose9};
pub use queue::{MotionMessage, MotionQueue, VecQueue};
pub use session::CanonSession;

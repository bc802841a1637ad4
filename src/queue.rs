//! The motion message types this crate emits, and the sink trait that
//! accepts them.
//!
//! Message shape is grounded on the toolpath's tagged-enum `MoveKind`: one
//! `#[serde(tag = "type", rename_all = "snake_case")]` enum covering every
//! downstream motion-queue entry, generalized from "one CNC move" to the
//! full canonical message set (moves, dwell, termination condition, a
//! generic system command, and plan control).

use serde::{Deserialize, Serialize};

use crate::pose::Pose9;
use crate::state::FeedMode;

/// Blending behavior at the end of a move, set by `SET_TERM_COND`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermCondition {
    /// Stop exactly at the programmed endpoint before starting the next move.
    ExactStop,
    /// Slow to cornering speed but don't come to a full stop.
    ExactPath,
    /// Blend through the corner, staying within `tolerance` of the programmed path.
    Blend { tolerance: f64 },
}

/// What originated a `LinearMove`: a rapid traverse, a programmed straight
/// feed, or a degenerate (`rotation == 0`) arc collapsed to a straight line.
/// A `CircularMove` is always `Arc`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionType {
    Traverse,
    Feed,
    Arc,
}

/// One entry appended to the downstream motion queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MotionMessage {
    /// A straight traverse (rapid), straight feed, or degenerate (zero-rotation) arc move to `end`.
    LinearMove {
        end: Pose9,
        velocity: f64,
        /// The per-axis-governed velocity ceiling before the feed-rate clamp.
        ini_maxvel: f64,
        acceleration: f64,
        feed_mode: FeedMode,
        motion_type: MotionType,
    },
    /// A circular arc feed move.
    CircularMove {
        end: Pose9,
        center: (f64, f64),
        normal: (f64, f64, f64),
        /// `true` for clockwise as viewed from the positive normal direction.
        clockwise: bool,
        /// Extra full turns beyond the base sweep: `rotation - 1` for a
        /// positive rotation count, `rotation` for a negative one.
        turn: i32,
        velocity: f64,
        ini_maxvel: f64,
        acceleration: f64,
        feed_mode: FeedMode,
    },
    /// Pause program execution for `seconds`.
    Delay { seconds: f64 },
    /// Change the blending behavior applied to subsequent moves.
    SetTermCond { condition: TermCondition },
    /// A side-channel command with no direct kinematic effect (spindle,
    /// coolant, tool change, and every other enqueue-only non-goal of this
    /// layer).
    SystemCmd { command: String },
    /// Pause the motion plan until explicitly resumed.
    PlanPause,
    /// Mark the end of the motion plan.
    PlanEnd,
}

/// The downstream sink this crate appends motion messages to.
///
/// Kept as a narrow trait rather than a concrete queue type so a host can
/// plug in whatever synchronized, possibly cross-thread collection backs
/// its actual trajectory planner.
pub trait MotionQueue {
    fn push(&mut self, line_number: u32, message: MotionMessage);
}

/// A simple owned [`MotionQueue`] backed by a `Vec`, for tests and for
/// callers that just want a plain buffer.
#[derive(Debug, Default)]
pub struct VecQueue {
    pub entries: Vec<(u32, MotionMessage)>,
}

impl VecQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MotionQueue for VecQueue {
    fn push(&mut self, line_number: u32, message: MotionMessage) {
        self.entries.push((line_number, message));
    }
}

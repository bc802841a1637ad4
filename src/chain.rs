//! Naive-CAM tolerance collapser: merges consecutive short straight feed
//! segments into one blended move as long as every buffered point stays
//! within tolerance of the straight line from the chain's first point to
//! the candidate new point.
//!
//! A chain never spans a rapid/feed mode change, a feed-rate change, or any
//! motion that touches an axis outside X/Y/Z (rotary and auxiliary-linear
//! moves always break the chain — their geometry can't be represented by a
//! single cartesian line). A chain is also capped at a configured point
//! count, after which it is force-flushed regardless of tolerance.

use crate::pose::Pose9;

/// A single buffered point awaiting collapse.
#[derive(Debug, Clone, Copy)]
struct ChainPoint {
    line_number: u32,
    pos: Pose9,
}

/// One collapsed straight move, produced when a chain is flushed.
#[derive(Debug, Clone, PartialEq)]
pub struct CollapsedMove {
    pub start_line: u32,
    pub end_line: u32,
    pub start: Pose9,
    pub end: Pose9,
    pub feed_rate: f64,
    pub is_rapid: bool,
}

/// The pending, not-yet-flushed segment chain.
#[derive(Debug)]
pub struct SegmentChain {
    points: Vec<ChainPoint>,
    feed_rate: f64,
    is_rapid: bool,
    tolerance: f64,
    max_points: usize,
}

/// Perpendicular distance from `p` to the segment `a..b`, clamping the
/// projection parameter to `[0, 1]` so a point beyond either endpoint is
/// measured against the nearest endpoint rather than the infinite line.
fn point_to_segment_distance(p: &Pose9, a: &Pose9, b: &Pose9) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let abz = b.z - a.z;
    let len_sq = abx * abx + aby * aby + abz * abz;

    if len_sq < 1e-12 {
        return a.xyz_distance(p);
    }

    let apx = p.x - a.x;
    let apy = p.y - a.y;
    let apz = p.z - a.z;
    let t = ((apx * abx + apy * aby + apz * abz) / len_sq).clamp(0.0, 1.0);

    let projx = a.x + t * abx;
    let projy = a.y + t * aby;
    let projz = a.z + t * abz;

    let dx = p.x - projx;
    let dy = p.y - projy;
    let dz = p.z - projz;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// `true` when `to` is identical to `anchor` in x/y/z. A candidate point
/// that doesn't actually move the tool trivially satisfies any
/// perpendicular-distance tolerance test and must never be treated as
/// linkable on that basis alone.
fn is_zero_move(anchor: &Pose9, to: &Pose9) -> bool {
    const TINY: f64 = 1e-9;
    (anchor.x - to.x).abs() < TINY && (anchor.y - to.y).abs() < TINY && (anchor.z - to.z).abs() < TINY
}

/// `true` when a move from `from` to `to` touches only X/Y/Z — a move that
/// also carries rotary or auxiliary-linear travel can't be represented by
/// the chain's cartesian-line tolerance test.
fn is_pure_cartesian_move(from: &Pose9, to: &Pose9) -> bool {
    const TINY: f64 = 1e-9;
    (from.a - to.a).abs() < TINY
        && (from.b - to.b).abs() < TINY
        && (from.c - to.c).abs() < TINY
        && (from.u - to.u).abs() < TINY
        && (from.v - to.v).abs() < TINY
        && (from.w - to.w).abs() < TINY
}

impl SegmentChain {
    pub fn new(tolerance: f64, max_points: usize) -> Self {
        Self {
            points: Vec::new(),
            feed_rate: 0.0,
            is_rapid: false,
            tolerance,
            max_points: max_points.max(2),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Updates the tolerance future `see` calls check against. Does not
    /// retroactively re-validate points already buffered.
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance;
    }

    /// Drains the chain into a single collapsed move spanning its first
    /// and last buffered points, or `None` if nothing is pending.
    pub fn flush(&mut self) -> Option<CollapsedMove> {
        if self.points.len() < 2 {
            self.points.clear();
            return None;
        }
        let first = self.points.first().copied().unwrap();
        let last = self.points.last().copied().unwrap();
        self.points.clear();
        Some(CollapsedMove {
            start_line: first.line_number,
            end_line: last.line_number,
            start: first.pos,
            end: last.pos,
            feed_rate: self.feed_rate,
            is_rapid: self.is_rapid,
        })
    }

    /// Offers a new straight-move endpoint to the chain. If it can be
    /// absorbed (same feed rate, same rapid/feed mode, pure X/Y/Z travel,
    /// and every buffered point stays within tolerance of the new
    /// first-to-candidate line), it is buffered and `None` is returned.
    /// Otherwise the existing chain is flushed into `Some(CollapsedMove)`
    /// and a new chain is started, seeded with `from` and `to`.
    pub fn see(
        &mut self,
        line_number: u32,
        from: Pose9,
        to: Pose9,
        feed_rate: f64,
        is_rapid: bool,
    ) -> Option<CollapsedMove> {
        let compatible_modal = (self.feed_rate - feed_rate).abs() < 1e-9 && self.is_rapid == is_rapid;
        let cartesian_only = is_pure_cartesian_move(&from, &to);

        if self.points.is_empty() {
            self.feed_rate = feed_rate;
            self.is_rapid = is_rapid;
            self.points.push(ChainPoint {
                line_number: line_number.saturating_sub(1),
                pos: from,
            });
            self.points.push(ChainPoint { line_number, pos: to });
            return None;
        }

        if !cartesian_only || !compatible_modal {
            let flushed = self.flush();
            self.feed_rate = feed_rate;
            self.is_rapid = is_rapid;
            self.points.push(ChainPoint {
                line_number: line_number.saturating_sub(1),
                pos: from,
            });
            self.points.push(ChainPoint { line_number, pos: to });
            return flushed;
        }

        let first_pos = self.points.first().unwrap().pos;
        let linkable = !is_zero_move(&first_pos, &to)
            && self
                .points
                .iter()
                .all(|pt| point_to_segment_distance(&pt.pos, &first_pos, &to) <= self.tolerance);

        if linkable && self.points.len() < self.max_points {
            self.points.push(ChainPoint { line_number, pos: to });
            None
        } else {
            let flushed = self.flush();
            self.feed_rate = feed_rate;
            self.is_rapid = is_rapid;
            self.points.push(ChainPoint {
                line_number: line_number.saturating_sub(1),
                pos: from,
            });
            self.points.push(ChainPoint { line_number, pos: to });
            flushed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Pose9 {
        Pose9 {
            x,
            y,
            ..Pose9::ZERO
        }
    }

    #[test]
    fn point_to_segment_distance_is_zero_on_the_line() {
        let d = point_to_segment_distance(&p(5.0, 0.0), &p(0.0, 0.0), &p(10.0, 0.0));
        assert!(d < 1e-9);
    }

    #[test]
    fn point_to_segment_distance_clamps_beyond_endpoint() {
        let d = point_to_segment_distance(&p(20.0, 0.0), &p(0.0, 0.0), &p(10.0, 0.0));
        assert!((d - 10.0).abs() < 1e-9);
    }

    #[test]
    fn collinear_points_collapse_into_one_move() {
        let mut chain = SegmentChain::new(0.01, 100);
        assert!(chain.see(1, p(0.0, 0.0), p(1.0, 0.0), 100.0, false).is_none());
        assert!(chain.see(2, p(1.0, 0.0), p(2.0, 0.0), 100.0, false).is_none());
        assert!(chain.see(3, p(2.0, 0.0), p(3.0, 0.0), 100.0, false).is_none());
        let collapsed = chain.flush().expect("chain had buffered points");
        assert_eq!(collapsed.start, p(0.0, 0.0));
        assert_eq!(collapsed.end, p(3.0, 0.0));
    }

    #[test]
    fn point_outside_tolerance_forces_a_flush() {
        let mut chain = SegmentChain::new(0.01, 100);
        assert!(chain.see(1, p(0.0, 0.0), p(1.0, 0.0), 100.0, false).is_none());
        // Jump well off the x-axis: breaks tolerance against the (0,0)->(1,5) line test.
        let flushed = chain.see(2, p(1.0, 0.0), p(1.0, 5.0), 100.0, false);
        assert!(flushed.is_some());
        assert_eq!(flushed.unwrap().end, p(1.0, 0.0));
    }

    #[test]
    fn feed_rate_change_forces_a_flush() {
        let mut chain = SegmentChain::new(0.01, 100);
        assert!(chain.see(1, p(0.0, 0.0), p(1.0, 0.0), 100.0, false).is_none());
        let flushed = chain.see(2, p(1.0, 0.0), p(2.0, 0.0), 200.0, false);
        assert!(flushed.is_some());
    }

    #[test]
    fn rotary_axis_travel_forces_a_flush() {
        let mut chain = SegmentChain::new(0.01, 100);
        assert!(chain.see(1, p(0.0, 0.0), p(1.0, 0.0), 100.0, false).is_none());
        let mut with_rotary = p(1.0, 0.0);
        with_rotary.a = 10.0;
        let flushed = chain.see(2, p(1.0, 0.0), with_rotary, 100.0, false);
        assert!(flushed.is_some());
    }

    #[test]
    fn chain_force_flushes_once_max_points_reached() {
        let mut chain = SegmentChain::new(1000.0, 3);
        assert!(chain.see(1, p(0.0, 0.0), p(1.0, 0.0), 100.0, false).is_none());
        // Chain now holds 2 points (cap is 3); still room for one more.
        assert!(chain.see(2, p(1.0, 0.0), p(2.0, 0.0), 100.0, false).is_none());
        // Chain is now at the cap — the next point must force a flush even
        // though it is well within the (huge) tolerance.
        let flushed = chain.see(3, p(2.0, 0.0), p(3.0, 0.0), 100.0, false);
        assert!(flushed.is_some(), "chain at max_points must force a flush");
    }

    #[test]
    fn set_tolerance_affects_subsequent_see_calls_only() {
        let mut chain = SegmentChain::new(1000.0, 100);
        assert!(chain.see(1, p(0.0, 0.0), p(1.0, 0.0), 100.0, false).is_none());
        chain.set_tolerance(0.0);
        let flushed = chain.see(2, p(1.0, 0.0), p(1.0, 5.0), 100.0, false);
        assert!(flushed.is_some(), "tighter tolerance should reject an off-axis point");
    }

    #[test]
    fn zero_move_back_to_the_anchor_forces_a_flush() {
        let mut chain = SegmentChain::new(1000.0, 100);
        assert!(chain.see(1, p(0.0, 0.0), p(1.0, 0.0), 100.0, false).is_none());
        // Candidate point coincides with the chain's anchor in x/y/z: trivially
        // zero perpendicular distance from every buffered point, but not a
        // real move and must not be absorbed.
        let flushed = chain.see(2, p(1.0, 0.0), p(0.0, 0.0), 100.0, false);
        assert!(flushed.is_some(), "a zero move back to the anchor must force a flush");
    }

    #[test]
    fn flush_on_empty_chain_returns_none() {
        let mut chain = SegmentChain::new(0.01, 100);
        assert!(chain.flush().is_none());
    }
}

//! End-to-end scenarios exercising `CanonSession` the way an embedding
//! G-code interpreter would: through its public API only, checking what
//! lands in the motion queue.

use canon_motion::queue::MotionMessage;
use canon_motion::session::CanonSession;
use canon_motion::units::LengthUnit;
use canon_motion::{config, Pose9, VecQueue};

fn test_config() -> config::MachineConfig {
    config::parse(
        r#"
[axes.x]
max_velocity = 5000.0
max_acceleration = 2000.0
[axes.y]
max_velocity = 5000.0
max_acceleration = 2000.0
[axes.z]
max_velocity = 3000.0
max_acceleration = 1500.0
[axes.a]
max_velocity = 3600.0
max_acceleration = 1800.0
[axes.b]
max_velocity = 3600.0
max_acceleration = 1800.0
[axes.c]
max_velocity = 3600.0
max_acceleration = 1800.0
[axes.u]
max_velocity = 3000.0
max_acceleration = 1500.0
[axes.v]
max_velocity = 3000.0
max_acceleration = 1500.0
[axes.w]
max_velocity = 3000.0
max_acceleration = 1500.0

[units]
default_program_units = "millimeter"
linear_unit_ratio = 1.0
angular_unit_ratio = 1.0

[tolerances]
path_tolerance = 0.01
naive_cam_tolerance = 0.02
"#,
    )
    .expect("valid scenario config")
}

fn linear_moves(queue: &VecQueue) -> Vec<Pose9> {
    queue
        .entries
        .iter()
        .filter_map(|(_, m)| match m {
            MotionMessage::LinearMove { end, .. } => Some(*end),
            _ => None,
        })
        .collect()
}

fn pose_xyz(x: f64, y: f64, z: f64) -> Pose9 {
    Pose9 { x, y, z, ..Pose9::ZERO }
}

/// Scenario 1: three collinear feeds within the naive-cam tolerance, under
/// a continuous (blend) motion mode, collapse into a single linear move.
#[test]
fn scenario_1_collinear_feeds_under_blend_mode_collapse_to_one_move() {
    let mut session = CanonSession::new(test_config());
    let mut queue = VecQueue::new();

    session.set_program_units(&mut queue, LengthUnit::Millimeter);
    session.set_feed_rate(&mut queue, 600.0);
    session.set_term_condition_blend(&mut queue, 1, 0.1);
    session.set_naive_cam_tolerance(0.05);

    session.straight_feed(&mut queue, 2, pose_xyz(1.0, 0.0, 0.0));
    session.straight_feed(&mut queue, 3, pose_xyz(2.0, 0.0, 0.0));
    session.straight_feed(&mut queue, 4, pose_xyz(3.0, 0.0, 0.0));
    session.flush(&mut queue);

    let moves = linear_moves(&queue);
    assert_eq!(moves.len(), 1, "all three feeds should collapse into one move");
    assert!(moves[0].approx_eq(&pose_xyz(3.0, 0.0, 0.0), 1e-9));
}

/// Scenario 2: a second point deviating past the naive-cam tolerance
/// forces a flush at the point of deviation, then a second flush at
/// program end emits the remainder as its own move.
#[test]
fn scenario_2_deviating_point_forces_a_flush_at_the_break() {
    let mut session = CanonSession::new(test_config());
    let mut queue = VecQueue::new();

    session.set_feed_rate(&mut queue, 600.0);
    session.set_term_condition_blend(&mut queue, 1, 0.1);
    session.set_naive_cam_tolerance(0.05);

    session.straight_feed(&mut queue, 2, pose_xyz(1.0, 0.0, 0.0));
    session.straight_feed(&mut queue, 3, pose_xyz(1.0, 0.2, 0.0));
    session.flush(&mut queue);

    let moves = linear_moves(&queue);
    assert_eq!(moves.len(), 2, "deviation beyond tolerance must break the chain in two");
    assert!(moves[0].approx_eq(&pose_xyz(1.0, 0.0, 0.0), 1e-9));
    assert!(moves[1].approx_eq(&pose_xyz(1.0, 0.2, 0.0), 1e-9));
}

/// Scenario 3: a position query reports the current position back in
/// program units, not internal millimetres.
#[test]
fn scenario_3_position_query_reports_program_units() {
    let mut session = CanonSession::new(test_config());
    let mut queue = VecQueue::new();

    session.set_program_units(&mut queue, LengthUnit::Inch);
    session.straight_feed(&mut queue, 1, pose_xyz(1.0, 0.0, 0.0));

    let position = session.get_program_position(&mut queue);
    assert!(position.approx_eq(&pose_xyz(1.0, 0.0, 0.0), 1e-9));
}

/// Scenario 4: an arc with an explicit extra-turn count sweeps more than
/// one revolution and carries the XY-plane's normal on every emitted point.
#[test]
fn scenario_4_arc_feed_with_extra_turn_emits_plane_normal() {
    let mut session = CanonSession::new(test_config());
    let mut queue = VecQueue::new();

    session.set_feed_rate(&mut queue, 600.0);
    session.arc_feed(&mut queue, 1, pose_xyz(1.0, 0.0, 0.0), (0.5, 0.0), false, 2);
    session.flush(&mut queue);

    let circular_moves: Vec<_> = queue
        .entries
        .iter()
        .filter_map(|(_, m)| match m {
            MotionMessage::CircularMove { normal, turn, .. } => Some((*normal, *turn)),
            _ => None,
        })
        .collect();

    assert!(!circular_moves.is_empty(), "a valid arc must emit circular moves");
    assert!(circular_moves.iter().all(|(n, _)| *n == (0.0, 0.0, 1.0)));
    assert!(circular_moves.iter().all(|(_, turn)| *turn == 1), "rotation=2 must emit turn=1");
}

/// Scenario 4b: rotation 0 degenerates an arc to a single linear move
/// carrying no circular-move payload at all.
#[test]
fn scenario_4b_zero_rotation_arc_degenerates_to_a_linear_move() {
    let mut session = CanonSession::new(test_config());
    let mut queue = VecQueue::new();

    session.set_feed_rate(&mut queue, 600.0);
    session.arc_feed(&mut queue, 1, pose_xyz(1.0, 0.0, 0.0), (0.5, 0.0), false, 0);

    let moves = linear_moves(&queue);
    assert_eq!(moves.len(), 1, "rotation=0 must degenerate to exactly one linear move");
    assert!(moves[0].approx_eq(&pose_xyz(1.0, 0.0, 0.0), 1e-9));
    let has_circular = queue.entries.iter().any(|(_, m)| matches!(m, MotionMessage::CircularMove { .. }));
    assert!(!has_circular, "rotation=0 must never emit a circular move");
}

/// Scenario 5: a NURBS curve along a straight line degenerates every
/// candidate biarc to a straight segment, collapsing to a move ending at
/// the curve's last control point.
#[test]
fn scenario_5_straight_line_nurbs_degenerates_to_a_linear_move() {
    let mut session = CanonSession::new(test_config());
    let mut queue = VecQueue::new();

    session.set_feed_rate(&mut queue, 600.0);
    let control_points = [
        (0.0, 0.0, 0.0, 1.0),
        (5.0, 0.0, 0.0, 1.0),
        (10.0, 0.0, 0.0, 1.0),
        (15.0, 0.0, 0.0, 1.0),
    ];
    session.nurbs_feed(&mut queue, 1, &control_points, 3);

    let moves = linear_moves(&queue);
    assert!(!moves.is_empty(), "a degenerate NURBS curve still emits a move to its endpoint");
    let last = moves.last().unwrap();
    assert!((last.x - 15.0).abs() < 1e-6);
    assert!(last.y.abs() < 1e-6);
}

/// Scenario 6: EXACT_STOP mode never blends, even across collinear feeds.
#[test]
fn scenario_6_exact_stop_emits_separate_moves() {
    let mut session = CanonSession::new(test_config());
    let mut queue = VecQueue::new();

    session.set_feed_rate(&mut queue, 600.0);
    session.set_term_condition_exact(&mut queue, 1);
    session.straight_feed(&mut queue, 2, pose_xyz(1.0, 0.0, 0.0));
    session.straight_feed(&mut queue, 3, pose_xyz(2.0, 0.0, 0.0));

    let moves = linear_moves(&queue);
    assert_eq!(moves.len(), 2, "EXACT_STOP must not blend collinear feeds");
}

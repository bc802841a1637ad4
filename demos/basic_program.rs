//! Drives a `CanonSession` through a short toy program and prints the
//! resulting motion queue as JSON. Not part of the library's public API —
//! a standalone sanity check for wiring a host around this crate.

use canon_motion::{CanonSession, MachineConfig, Pose9, VecQueue};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config: MachineConfig = canon_motion::config::parse(DEMO_CONFIG).expect("valid demo config");
    let mut session = CanonSession::new(config);
    let mut queue = VecQueue::new();

    session.straight_traverse(&mut queue, 1, Pose9 { z: 10.0, ..Pose9::ZERO });
    session.set_feed_rate(&mut queue, 500.0);
    session.straight_feed(&mut queue, 2, Pose9 { x: 20.0, z: 10.0, ..Pose9::ZERO });
    session.arc_feed(
        &mut queue,
        3,
        Pose9 { x: 0.0, y: 20.0, z: 10.0, ..Pose9::ZERO },
        (-20.0, 0.0),
        false,
        1,
    );
    session.dwell(&mut queue, 4, 0.5);
    session.plan_end(&mut queue, 5);

    let json = serde_json::to_string_pretty(&queue.entries).expect("serialize demo queue");
    println!("{json}");
}

const DEMO_CONFIG: &str = r#"
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
"#;

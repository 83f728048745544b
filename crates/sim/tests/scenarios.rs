use glam::{Vec2, Vec3};
use locomote_common::{Capsule, ControllerConfig};
use locomote_sim::{InputScript, RunOptions, Runner, SimEvent, SimWorld, Slab, StaticWorld};

fn runner(world: SimWorld, script: InputScript) -> Runner {
    Runner::new(world, ControllerConfig::default(), script, RunOptions::default()).unwrap()
}

fn dropped_from(height: f32) -> SimWorld {
    SimWorld::new(
        StaticWorld::flat(0.0),
        Vec3::new(0.0, height, 0.0),
        Capsule::default(),
    )
}

#[test]
fn forward_input_moves_at_move_speed() {
    let script = InputScript::new().move_from(0, Vec2::new(0.0, 1.0));
    let mut r = runner(SimWorld::standing_on_flat_ground(), script);
    let records = r.run_ticks(1);
    assert!(records[0].grounded);
    assert!(records[0].velocity.abs_diff_eq(Vec3::new(0.0, 0.0, 6.0), 1e-5));

    let records = r.run_ticks(49);
    let z = records.last().unwrap().position.z;
    // One second at 6 m/s.
    assert!((z - 6.0).abs() < 1e-3, "z = {z}");
}

#[test]
fn releasing_move_stops_immediately() {
    let script = InputScript::new()
        .move_from(0, Vec2::new(1.0, 0.0))
        .at(10, locomote_input::ActionEvent::MoveCanceled);
    let mut r = runner(SimWorld::standing_on_flat_ground(), script);
    let records = r.run_ticks(12);
    assert!((records[9].velocity.x - 6.0).abs() < 1e-5);
    assert_eq!(records[10].velocity.x, 0.0);
    assert_eq!(records[11].position, records[10].position);
}

#[test]
fn jump_launches_and_lands() {
    let config = ControllerConfig::default();
    let script = InputScript::new().jump_at(0);
    let mut r = runner(SimWorld::standing_on_flat_ground(), script);
    let records = r.run_ticks(150);

    assert!(records[0].jumped);
    assert!((records[0].velocity.y - 9.905).abs() < 1e-3);
    assert!(!records[1].grounded);

    let peak = records
        .iter()
        .map(|rec| rec.position.y - 1.0)
        .fold(f32::MIN, f32::max);
    assert!(
        (peak - config.jump_force).abs() < 0.3,
        "peak height {peak}"
    );

    let last = records.last().unwrap();
    assert!(last.grounded);
    assert!((last.position.y - 1.0).abs() < 1e-4);
    assert_eq!(records.iter().filter(|rec| rec.jumped).count(), 1);
    assert!(r
        .world()
        .events()
        .iter()
        .any(|e| matches!(e, SimEvent::LeftGround { .. })));
}

#[test]
fn grounded_ticks_never_sink() {
    let script = InputScript::new()
        .move_from(0, Vec2::new(0.7, -0.7))
        .jump_at(3)
        .jump_at(60)
        .jump_at(61)
        .jump_at(140);
    let mut r = runner(dropped_from(4.0), script);
    for rec in r.run_ticks(300) {
        if rec.grounded {
            assert!(rec.velocity.y >= 0.0, "tick {} vy {}", rec.tick, rec.velocity.y);
        }
    }
}

#[test]
fn airborne_velocity_decreases_by_gravity_each_tick() {
    let config = ControllerConfig::default();
    let dt = 1.0 / RunOptions::default().tick_rate as f32;
    let mut r = runner(dropped_from(30.0), InputScript::new());
    let records = r.run_ticks(200);

    let airborne: Vec<_> = records.iter().take_while(|rec| !rec.grounded).collect();
    assert!(airborne.len() > 50);
    for pair in airborne.windows(2) {
        let drop = pair[0].velocity.y - pair[1].velocity.y;
        assert!((drop - config.gravity * dt).abs() < 1e-3, "drop {drop}");
    }
    assert!(records.last().unwrap().grounded);
    assert_eq!(records.last().unwrap().velocity.y, 0.0);
}

#[test]
fn jump_while_airborne_is_ignored() {
    let script = InputScript::new().jump_at(2).jump_at(5);
    let mut r = runner(dropped_from(20.0), script);
    let records = r.run_ticks(10);
    assert!(records.iter().all(|rec| !rec.jumped && !rec.grounded));
    // No buffering: the edges do not fire after landing either.
    let later = r.run_ticks(200);
    assert!(later.iter().all(|rec| !rec.jumped));
}

#[test]
fn holding_jump_jumps_once() {
    let script = InputScript::new().hold_jump(0, 250);
    let mut r = runner(SimWorld::standing_on_flat_ground(), script);
    let records = r.run_ticks(300);
    assert_eq!(records.iter().filter(|rec| rec.jumped).count(), 1);
}

#[test]
fn pitch_saturates_at_limit() {
    let script = InputScript::new().look_from(0, Vec2::new(0.0, -20.0));
    let mut r = runner(SimWorld::standing_on_flat_ground(), script);
    let records = r.run_ticks(200);
    for rec in &records {
        assert!(rec.pitch_degrees <= 45.0);
    }
    assert_eq!(records.last().unwrap().pitch_degrees, 45.0);
}

#[test]
fn look_release_holds_orientation() {
    let script = InputScript::new()
        .look_from(0, Vec2::new(30.0, 10.0))
        .at(20, locomote_input::ActionEvent::LookCanceled);
    let mut r = runner(SimWorld::standing_on_flat_ground(), script);
    let records = r.run_ticks(40);
    let held = &records[21..];
    assert!(held.iter().all(|rec| rec.yaw_degrees == held[0].yaw_degrees));
    assert!(held.iter().all(|rec| rec.pitch_degrees == held[0].pitch_degrees));
    assert!(held[0].pitch_degrees < 0.0);
}

#[test]
fn walking_off_a_ledge_falls_to_the_ground() {
    let world = SimWorld::new(
        StaticWorld::flat(0.0).with_slab(Slab::new(
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, 1.0),
            2.0,
        )),
        Vec3::new(0.0, 3.0, 0.0),
        Capsule::default(),
    );
    let script = InputScript::new().move_from(0, Vec2::new(0.0, 1.0));
    let mut r = runner(world, script);
    let records = r.run_ticks(120);

    assert!(records[0].grounded);
    let left = records.iter().position(|rec| !rec.grounded).unwrap();
    assert!(records[left].position.z > 1.0);
    let last = records.last().unwrap();
    assert!(last.grounded);
    assert!((last.position.y - 1.0).abs() < 1e-4);
}

#[test]
fn no_geometry_means_free_fall() {
    let world = SimWorld::new(StaticWorld::empty(), Vec3::ZERO, Capsule::default());
    let script = InputScript::new().jump_at(0);
    let mut r = runner(world, script);
    let records = r.run_ticks(20);
    assert!(records.iter().all(|rec| !rec.grounded && !rec.jumped));
    assert!(records.last().unwrap().velocity.y < 0.0);
    assert!(r.controller().velocity().is_finite());
}

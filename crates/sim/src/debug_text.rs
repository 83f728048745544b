//! Human-readable dumps of simulation state for the CLI, logs, and tests.

use crate::runner::TickRecord;
use crate::world::{SimEvent, SimWorld};
use locomote_kernel::FpsController;

/// Multi-line summary of the world and the controller driving it.
pub fn describe(world: &SimWorld, controller: &FpsController) -> String {
    let body = world.body();
    let p = body.transform.position;
    let v = body.velocity;
    let landings = world
        .events()
        .iter()
        .filter(|e| matches!(e, SimEvent::Landed { .. }))
        .count();

    let mut out = String::new();
    out.push_str(&format!("=== Sim State (tick={}) ===\n", world.tick()));
    out.push_str(&format!("Body: pos=({:.2}, {:.2}, {:.2})\n", p.x, p.y, p.z));
    out.push_str(&format!("      vel=({:.2}, {:.2}, {:.2})\n", v.x, v.y, v.z));
    out.push_str(&format!(
        "Grounded: {}  Contact: {}  Landings: {}\n",
        controller.is_grounded(),
        world.in_contact(),
        landings
    ));
    let statics = world.statics();
    match statics.ground() {
        Some(h) => out.push_str(&format!(
            "Statics: ground={:.2}  slabs={}\n",
            h,
            statics.slabs().len()
        )),
        None => out.push_str(&format!(
            "Statics: no ground  slabs={}\n",
            statics.slabs().len()
        )),
    }
    out.push_str(&format!(
        "Pitch: {:.1} deg (limit {:.1})\n",
        controller.pitch(),
        controller.config().look_x_limit
    ));
    out
}

/// One trace line per fixed tick.
pub fn format_record(r: &TickRecord) -> String {
    format!(
        "[{:>5}] pos=({:>7.2}, {:>6.2}, {:>7.2}) vel=({:>6.2}, {:>6.2}, {:>6.2}) {}{} yaw={:>6.1} pitch={:>5.1}",
        r.tick,
        r.position.x,
        r.position.y,
        r.position.z,
        r.velocity.x,
        r.velocity.y,
        r.velocity.z,
        if r.grounded { "G" } else { "A" },
        if r.jumped { "J" } else { " " },
        r.yaw_degrees,
        r.pitch_degrees,
    )
}

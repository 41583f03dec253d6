//! Gravity, grounding and friction
//!
//! The order inside a tick is load-bearing: base translation first, then the
//! grounded/airborne evaluation and its transitions, then the friction delta,
//! then the gravity delta. Integrating gravity before the grounding check
//! lets a fast body step through a thin platform in a single tick.

use crate::consts::*;

use super::entity::Entity;
use super::query::{find_nearest_below, support_at};

/// Whether the body has no support under its projected next position. The
/// probe point is the bottom edge advanced by the current fall speed, which
/// is what catches a platform the body would otherwise pass through.
pub fn is_airborne(body: &Entity, entities: &[Entity], skip: usize) -> bool {
    support_at(entities, skip, body.pos.x, body.bottom() + body.fall_speed()).is_none()
}

/// One gravity pass for `body`, a working copy of `entities[skip]`.
///
/// Airborne bodies accumulate fall speed. Supported bodies land flush when
/// the contact is soft, or bounce with inverted, damped speed when it is
/// hard; the bounce decays geometrically until a soft contact grounds the
/// body. Grounded/airborne is re-evaluated from the entity list every tick,
/// never cached across frames.
pub fn step(body: &mut Entity, entities: &[Entity], skip: usize, bottom_bound: f32, scale: f32) {
    let Some(mut g) = body.gravity else {
        return;
    };

    if support_at(entities, skip, body.pos.x, body.bottom() + g.fall_speed).is_none() {
        g.fall_speed += GRAVITY_ACCEL * scale;
    } else if g.fall_speed.abs() < BOUNCE_THRESHOLD {
        land(body, &mut g.fall_speed, entities, skip, bottom_bound);
    } else {
        g.fall_speed *= -BOUNCE_DAMPING;
    }

    // Friction propagates from whatever supports the body after the
    // transition above; a bouncing body counts as airborne here
    if support_at(entities, skip, body.pos.x, body.bottom() + g.fall_speed).is_none() {
        g.friction_speed = 0.0;
    } else if let Some(below) =
        find_nearest_below(entities, skip, body.pos.x, body.pos.y, bottom_bound)
    {
        let floor = &entities[below];
        g.friction_speed = floor.gravity.map_or(floor.speed_h, |fg| fg.friction_speed);
    }

    body.pos.x += g.friction_speed * scale;
    body.pos.y += g.fall_speed * scale;
    body.gravity = Some(g);
}

/// Landing snap: the body's bottom edge ends up flush with the support's top
/// edge, with no residual overlap or gap.
fn land(body: &mut Entity, fall_speed: &mut f32, entities: &[Entity], skip: usize, bottom_bound: f32) {
    if let Some(below) = find_nearest_below(entities, skip, body.pos.x, body.pos.y, bottom_bound) {
        let support_top = entities[below].top();
        body.pos.y = support_top - body.extent.y + body.origin.y;
    }
    *fall_speed = 0.0;
}

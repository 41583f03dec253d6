//! Per-tick simulation pass
//!
//! `tick` drives the fixed update order: score and level, entity updates in
//! insertion order, the out-of-bounds cull, then the spawn policy. An entity
//! mutates only itself during its own update; effects on other entities go
//! through `Response` values applied between updates, and removal is always
//! deferred to the cull step so iteration order stays well-defined.

use crate::consts::*;

use super::entity::{Entity, EntityKind};
use super::gravity;
use super::query;
use super::room::{ControlState, Room, RoomConfig, level_for_score, scroll_speed_for};

/// Input state for a single tick. The host delivers pointer events
/// out-of-band; they land here as plain writes and are consumed at the start
/// of the next tick, never mid-pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Wall-clock milliseconds at which the pointer went down, if it did
    pub pressed_at: Option<f64>,
    /// Wall-clock milliseconds at which the pointer was released, if it was
    pub released_at: Option<f64>,
    /// Horizontal position the player should run toward
    pub target_x: Option<f32>,
}

/// Cross-entity effect raised during one entity's update, applied before the
/// next entity runs
enum Response {
    /// Lethal contact: zero the victim's horizontal speed and end the run
    Kill { target: usize },
    /// Shove the target far below the room; the next cull removes it
    Eject { target: usize },
}

/// Advance the room by one tick. `scale` is the caller's measured frame delta
/// divided by the reference interval; all integration multiplies by it, so
/// simulation speed is frame-rate-independent.
pub fn tick(room: &mut Room, input: &TickInput, scale: f32) {
    // A finished room is frozen; the only way forward is a fresh room
    if room.ended {
        return;
    }

    if let Some(x) = input.target_x {
        room.control.target_x = x.clamp(0.0, room.config.width);
    }
    if let Some(t) = input.pressed_at {
        room.control.pressed_at = Some(t);
    }
    room.control.released_at = input.released_at;

    room.score += (-room.speed * scale).round() as u64;
    room.level = level_for_score(room.score);

    for i in 0..room.entities.len() {
        let mut entity = room.entities[i];
        let mut responses = Vec::new();
        update_entity(
            &mut entity,
            i,
            &room.entities,
            &mut room.control,
            &room.config,
            scale,
            &mut responses,
        );
        room.entities[i] = entity;
        for response in responses {
            apply_response(room, response);
        }
    }

    room.cull();

    let batch = room.spawner.evaluate(room.score, room.level);
    if !batch.is_empty() {
        // The scroll speed is only reapplied at these discrete moments
        room.set_speed(scroll_speed_for(room.score));
        for (_, cmd) in batch {
            room.spawn(cmd);
        }
    }
}

/// One entity's update, dispatched on its kind tag. `entity` is a working
/// copy of `entities[i]`; queries against the list exclude the stale slot.
fn update_entity(
    entity: &mut Entity,
    idx: usize,
    entities: &[Entity],
    control: &mut ControlState,
    config: &RoomConfig,
    scale: f32,
    responses: &mut Vec<Response>,
) {
    // Base translation, shared by every kind
    entity.pos.x += entity.speed_h * scale;
    entity.pos.y += entity.speed_v * scale;

    match entity.kind {
        EntityKind::Player => update_player(entity, idx, entities, control, config, scale),
        EntityKind::PlatformSegment | EntityKind::PlatformTop => update_platform(entity, config),
        EntityKind::FallingBlock => {
            gravity::step(entity, entities, idx, config.height, scale);
            crush_below(entity, entities, idx, config, responses);
        }
        EntityKind::EnemyEasy | EntityKind::EnemyMedium | EntityKind::Pole | EntityKind::PoleTop => {
            gravity::step(entity, entities, idx, config.height, scale);
        }
        EntityKind::EnemyHard => {
            gravity::step(entity, entities, idx, config.height, scale);
            hop_when_grounded(entity, entities, idx);
        }
    }

    if entity.kind.is_hazard() {
        lethal_contact(entity, entities, responses);
    }
    // The player never leaves on the left; it is clamped at the edge
    if entity.kind.has_gravity() && entity.kind != EntityKind::Player {
        discard_past_left(entity, config);
    }
}

fn apply_response(room: &mut Room, response: Response) {
    match response {
        Response::Kill { target } => {
            room.entities[target].speed_h = 0.0;
            room.end();
        }
        Response::Eject { target } => {
            room.entities[target].pos.y = room.config.height * 2.0;
        }
    }
}

fn update_player(
    player: &mut Entity,
    idx: usize,
    entities: &[Entity],
    control: &mut ControlState,
    config: &RoomConfig,
    scale: f32,
) {
    gravity::step(player, entities, idx, config.height, scale);

    // A release resolves the armed press: grounded and short enough jumps,
    // anything else just disarms
    if let Some(released) = control.released_at {
        if let Some(pressed) = control.pressed_at.take() {
            let held = released - pressed;
            if (0.0..=JUMP_MAX_HOLD_MS).contains(&held)
                && !gravity::is_airborne(player, entities, idx)
            {
                let velocity = (held as f32 / JUMP_HOLD_DIVISOR).min(JUMP_MAX_VELOCITY);
                if let Some(g) = &mut player.gravity {
                    g.fall_speed = -velocity;
                }
                player.speed_h /= 2.0;
            }
        }
    }

    // Run toward the target while supported. Friction is cancelled out so
    // the easing term is the net drift and the player holds position on a
    // scrolling floor.
    if !gravity::is_airborne(player, entities, idx) {
        let friction = player.gravity.map_or(0.0, |g| g.friction_speed);
        let distance = control.target_x - player.pos.x;
        player.speed_h = -friction + distance / RUN_EASE_DIVISOR;
    }

    // Room edge clamps
    if player.left() <= 0.0 {
        player.speed_h = player.speed_h.max(0.0);
        if let Some(g) = &mut player.gravity {
            g.friction_speed = 0.0;
        }
        player.pos.x = player.origin.x;
    }
    if player.right() >= config.width {
        player.speed_h = player.speed_h.min(0.0);
    }
}

/// Platforms scrolled out on the left either wrap back past the right edge
/// (floor columns) or are dropped below the room for the next cull (spawned
/// ledges)
fn update_platform(platform: &mut Entity, config: &RoomConfig) {
    if platform.right() < 0.0 {
        if platform.recycle {
            platform.pos.x += config.width + PLATFORM_BUFFER * platform.extent.x;
        } else {
            platform.pos.y = config.height * 2.0;
        }
    }
}

/// Bottom-corner contact: the player dies when caught under either lower
/// corner of a hazard
fn lethal_contact(hazard: &Entity, entities: &[Entity], responses: &mut Vec<Response>) {
    let bounds = hazard.bounds();
    if let Some(target) = entities.iter().position(|e| e.kind == EntityKind::Player) {
        let player = &entities[target];
        if player.contains_point(bounds.left, bounds.bottom())
            || player.contains_point(bounds.right(), bounds.bottom())
        {
            responses.push(Response::Kill { target });
        }
    }
}

/// A falling block coming down on something signals it from above; the
/// response dispatches on the kind tag of whatever is underneath. Platform
/// kinds carry the block, the player dies, and anything else is treated as
/// non-solid: ejected below the room, gone at the next cull.
fn crush_below(
    block: &Entity,
    entities: &[Entity],
    idx: usize,
    config: &RoomConfig,
    responses: &mut Vec<Response>,
) {
    if gravity::is_airborne(block, entities, idx) {
        return;
    }
    let Some(below) =
        query::find_nearest_below(entities, idx, block.pos.x, block.pos.y, config.height)
    else {
        return;
    };
    match entities[below].kind {
        EntityKind::Player => responses.push(Response::Kill { target: below }),
        EntityKind::PlatformSegment | EntityKind::PlatformTop => {}
        _ => responses.push(Response::Eject { target: below }),
    }
}

/// Hard enemies hop off every surface they land on
fn hop_when_grounded(enemy: &mut Entity, entities: &[Entity], idx: usize) {
    if enemy.fall_speed() == 0.0 && !gravity::is_airborne(enemy, entities, idx) {
        if let Some(g) = &mut enemy.gravity {
            g.fall_speed = -ENEMY_HOP_VELOCITY;
        }
    }
}

/// Mobile entities that scroll out on the left are dropped below the room so
/// the ordinary cull removes them, keeping the list bounded on an unbounded
/// run
fn discard_past_left(entity: &mut Entity, config: &RoomConfig) {
    if entity.right() < 0.0 {
        entity.pos.y = config.height * 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::SpawnCommand;

    /// A still room with a plain floor strip whose top surface is at y=750
    fn room_with_floor() -> Room {
        let mut room = Room::empty(RoomConfig::default());
        room.set_speed(0.0);
        for i in 0..20 {
            room.push(EntityKind::PlatformSegment, i as f32 * 64.0 + 32.0, 782.0);
        }
        room
    }

    fn hold_at(x: f32) -> TickInput {
        TickInput {
            target_x: Some(x),
            ..Default::default()
        }
    }

    fn run_until_grounded(room: &mut Room, idx: usize, input: &TickInput) {
        for _ in 0..100 {
            tick(room, input, 1.0);
            let e = room.entities()[idx];
            if e.fall_speed() == 0.0 && !gravity::is_airborne(&e, room.entities(), idx) {
                return;
            }
        }
        panic!("entity {idx} never grounded");
    }

    #[test]
    fn test_entity_below_the_room_is_culled_after_one_tick() {
        let mut room = Room::empty(RoomConfig::default());
        room.push(EntityKind::FallingBlock, 100.0, room.config.height + 1.0);
        tick(&mut room, &TickInput::default(), 1.0);
        assert!(room.entities().is_empty());
    }

    #[test]
    fn test_ended_room_is_frozen() {
        let mut room = Room::new(RoomConfig::default());
        for _ in 0..5 {
            tick(&mut room, &TickInput::default(), 1.0);
        }
        room.end();

        let before: Vec<_> = room.entities().iter().map(|e| (e.id, e.pos)).collect();
        let score = room.score();
        for _ in 0..10 {
            tick(&mut room, &TickInput::default(), 1.0);
        }
        let after: Vec<_> = room.entities().iter().map(|e| (e.id, e.pos)).collect();
        assert_eq!(before, after);
        assert_eq!(score, room.score());
        assert_eq!(room.speed(), 0.0);
    }

    #[test]
    fn test_body_dropped_into_an_800_room_grounds_flush_at_750() {
        let mut room = Room::empty(RoomConfig::default());
        room.set_speed(0.0);
        room.push(EntityKind::PlatformSegment, 100.0, 782.0);
        let body = room.push(EntityKind::FallingBlock, 100.0, 0.0);
        assert_eq!(room.entities()[body].fall_speed(), 1.0);

        run_until_grounded(&mut room, body, &TickInput::default());
        let e = room.entities()[body];
        assert_eq!(e.bottom(), 750.0);
        assert_eq!(e.fall_speed(), 0.0);
    }

    #[test]
    fn test_score_accrues_from_scroll_speed() {
        let mut room = Room::new(RoomConfig::default());
        for _ in 0..10 {
            tick(&mut room, &hold_at(70.0), 1.0);
        }
        // speed -5 at scale 1.0 scores 5 per tick
        assert_eq!(room.score(), 50);
        assert_eq!(room.level(), 1);
    }

    #[test]
    fn test_spawn_firing_reapplies_the_scroll_speed() {
        let mut room = Room::new(RoomConfig::default());
        for _ in 0..150 {
            tick(&mut room, &hold_at(70.0), 1.0);
        }
        assert!(!room.ended());
        // The pole category fired past score 700 and dragged the speed down
        assert!(room.score() > 700);
        assert!(room.speed() < BASE_SCROLL_SPEED);
        assert!(room.speed() >= MAX_SCROLL_SPEED);
    }

    #[test]
    fn test_short_press_jumps_scaled_by_hold_time() {
        let mut room = room_with_floor();
        let player = room.push(EntityKind::Player, 100.0, 700.0);
        run_until_grounded(&mut room, player, &hold_at(100.0));
        assert_eq!(room.entities()[player].bottom(), 750.0);

        tick(
            &mut room,
            &TickInput {
                pressed_at: Some(1000.0),
                target_x: Some(100.0),
                ..Default::default()
            },
            1.0,
        );
        tick(
            &mut room,
            &TickInput {
                released_at: Some(1100.0),
                target_x: Some(100.0),
                ..Default::default()
            },
            1.0,
        );
        // 100 ms held, divisor 4
        assert_eq!(room.entities()[player].fall_speed(), -25.0);
    }

    #[test]
    fn test_jump_halves_horizontal_speed() {
        let mut room = room_with_floor();
        let player = room.push(EntityKind::Player, 100.0, 700.0);
        run_until_grounded(&mut room, player, &hold_at(100.0));

        // Build up run speed toward a far target, then jump
        tick(&mut room, &hold_at(400.0), 1.0);
        tick(
            &mut room,
            &TickInput {
                pressed_at: Some(2000.0),
                target_x: Some(400.0),
                ..Default::default()
            },
            1.0,
        );
        let before = room.entities()[player].speed_h;
        assert!(before > 0.0);

        tick(
            &mut room,
            &TickInput {
                released_at: Some(2050.0),
                target_x: Some(400.0),
                ..Default::default()
            },
            1.0,
        );
        let e = room.entities()[player];
        assert!(e.fall_speed() < 0.0);
        assert_eq!(e.speed_h, before / 2.0);
    }

    #[test]
    fn test_long_hold_is_stale_and_does_not_jump() {
        let mut room = room_with_floor();
        let player = room.push(EntityKind::Player, 100.0, 700.0);
        run_until_grounded(&mut room, player, &hold_at(100.0));

        tick(
            &mut room,
            &TickInput {
                pressed_at: Some(0.0),
                target_x: Some(100.0),
                ..Default::default()
            },
            1.0,
        );
        tick(
            &mut room,
            &TickInput {
                released_at: Some(600.0),
                target_x: Some(100.0),
                ..Default::default()
            },
            1.0,
        );
        assert_eq!(room.entities()[player].fall_speed(), 0.0);
    }

    #[test]
    fn test_player_runs_toward_the_target() {
        let mut room = room_with_floor();
        let player = room.push(EntityKind::Player, 100.0, 700.0);
        run_until_grounded(&mut room, player, &hold_at(100.0));

        for _ in 0..30 {
            tick(&mut room, &hold_at(600.0), 1.0);
        }
        let x = room.entities()[player].pos.x;
        assert!(x > 200.0, "player should have moved right, got {x}");
    }

    #[test]
    fn test_pole_base_contact_kills_the_player() {
        let mut room = room_with_floor();
        let player = room.push(EntityKind::Player, 100.0, 718.0);
        run_until_grounded(&mut room, player, &hold_at(100.0));

        // The pole lands beside the player; its bottom-left corner touches
        room.push(EntityKind::Pole, 130.0, 718.0);
        for _ in 0..5 {
            tick(&mut room, &hold_at(100.0), 1.0);
        }
        assert!(room.ended());
        let player = room
            .entities()
            .iter()
            .find(|e| e.kind == EntityKind::Player)
            .unwrap();
        assert_eq!(player.speed_h, 0.0);
    }

    #[test]
    fn test_falling_block_rests_on_platforms() {
        let mut room = room_with_floor();
        let block = room.push(EntityKind::FallingBlock, 300.0, 600.0);
        run_until_grounded(&mut room, block, &TickInput::default());

        assert!(!room.ended());
        assert_eq!(room.entities()[block].bottom(), 750.0);
    }

    #[test]
    fn test_falling_block_ejects_what_it_crushes() {
        let mut room = room_with_floor();
        room.push(EntityKind::EnemyEasy, 500.0, 726.0);
        room.push(EntityKind::FallingBlock, 500.0, 600.0);

        for _ in 0..100 {
            tick(&mut room, &TickInput::default(), 1.0);
        }
        // The enemy was ejected below the room and culled; the block ends up
        // resting on the floor
        assert!(
            !room
                .entities()
                .iter()
                .any(|e| e.kind == EntityKind::EnemyEasy)
        );
        let block = room
            .entities()
            .iter()
            .find(|e| e.kind == EntityKind::FallingBlock)
            .unwrap();
        assert_eq!(block.bottom(), 750.0);
        assert!(!room.ended());
    }

    #[test]
    fn test_falling_block_on_the_player_is_lethal() {
        let mut room = room_with_floor();
        let player = room.push(EntityKind::Player, 100.0, 718.0);
        run_until_grounded(&mut room, player, &hold_at(100.0));

        room.push(EntityKind::FallingBlock, 100.0, 500.0);
        for _ in 0..60 {
            tick(&mut room, &hold_at(100.0), 1.0);
            if room.ended() {
                break;
            }
        }
        assert!(room.ended());
    }

    #[test]
    fn test_hard_enemy_hops() {
        let mut room = room_with_floor();
        let enemy = room.push(EntityKind::EnemyHard, 600.0, 700.0);
        let mut saw_hop = false;
        for _ in 0..100 {
            tick(&mut room, &TickInput::default(), 1.0);
            saw_hop |= room.entities()[enemy].fall_speed() == -ENEMY_HOP_VELOCITY;
        }
        assert!(saw_hop);
    }

    #[test]
    fn test_spawned_enemies_walk_their_pace() {
        let mut room = Room::empty(RoomConfig::default());
        room.spawn(SpawnCommand::Enemy {
            kind: EntityKind::EnemyMedium,
        });
        room.spawn(SpawnCommand::Enemy {
            kind: EntityKind::EnemyHard,
        });
        let speeds: Vec<f32> = room.entities().iter().map(|e| e.speed_h).collect();
        assert_eq!(speeds, vec![ENEMY_MEDIUM_PACE, ENEMY_HARD_PACE]);
    }

    #[test]
    fn test_floor_columns_wrap_and_spawned_ledges_do_not() {
        let mut room = Room::empty(RoomConfig::default());
        room.set_speed(0.0);
        let wrap = room.push(EntityKind::PlatformTop, -100.0, 400.0);
        room.entities[wrap].recycle = true;
        room.push(EntityKind::PlatformTop, -100.0, 400.0);

        tick(&mut room, &TickInput::default(), 1.0);
        // The recycled column wrapped past the right edge; the ledge is gone
        assert_eq!(room.entities().len(), 1);
        assert!(room.entities()[0].recycle);
        assert_eq!(room.entities()[0].pos.x, 1164.0);
    }

    #[test]
    fn test_losing_the_player_off_the_bottom_ends_the_run() {
        let mut room = Room::empty(RoomConfig::default());
        // No floor: the player falls straight out of the room
        room.push(EntityKind::Player, 100.0, 700.0);
        for _ in 0..20 {
            tick(&mut room, &hold_at(100.0), 1.0);
        }
        assert!(room.ended());
        assert!(room.entities().is_empty());
    }

    #[test]
    fn test_a_full_session_reaches_game_over() {
        // With nobody steering, the first poles eventually catch the player
        let mut room = Room::new(RoomConfig::default());
        for _ in 0..5000 {
            tick(&mut room, &TickInput::default(), 1.0);
            if room.ended() {
                break;
            }
        }
        assert!(room.ended());
        assert!(room.score() > 0);
    }
}

//! Player movement against the sector graph.
//!
//! One [`step`] per tic, in this order:
//!
//! 1. [`apply_intent`]     – look, stance, jump, wished velocity
//! 2. [`vertical_step`]    – gravity, floor / ceiling clamp
//! 3. [`horizontal_step`]  – wall slide, then [`move_player`] which crosses
//!    portals and updates the current sector
//!
//! Only the edges of the *current* sector are tested, so a single tic must
//! not travel further than one sector (speeds here are a fraction of a map
//! unit).

use glam::Vec2;

use super::components::{
    ACCEL, DECEL, GRAVITY, HEAD_MARGIN, Intent, JUMP_IMPULSE, KNEE_HEIGHT, MOVE_SPEED, TILT_DAMP,
    TILT_LIMIT, TILT_SCALE, TURN_SCALE,
};
use crate::world::intersect::{boxes_intersect, point_side};
use crate::world::{Edge, Level, Neighbor, Player, PlayerState, SectorId};

/// What the horizontal pass did this tic.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveResult {
    pub delta: Vec2,               // displacement actually applied
    pub hit_wall: Option<usize>,   // edge index we slid along
    pub entered: Option<SectorId>, // new sector, if a portal was crossed
}

/// Outcome of the vertical pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vertical {
    /// Not falling: nothing to do.
    Supported,
    /// Still in the air after this tic.
    Airborne,
    /// Clamped to the floor this tic.
    Landed,
    /// Head hit the ceiling; vertical speed killed, still falling.
    HitCeiling,
}

/* ─────────────────────────────  DRIVER  ──────────────────────────────── */

/// Run one full tic of player movement.
pub fn step(player: &mut Player, level: &Level, intent: &Intent) -> MoveResult {
    apply_intent(player, intent);
    vertical_step(player, level);
    horizontal_step(player, level)
}

/* ─────────────────────────────  INTENT  ──────────────────────────────── */

/// Turn the intent into heading, tilt, stance and horizontal velocity.
pub fn apply_intent(player: &mut Player, intent: &Intent) {
    /* ----- stance & jump ------------------------------------------------ */
    if intent.duck != player.state.contains(PlayerState::DUCKING) {
        player.state.set(PlayerState::DUCKING, intent.duck);
        player.state.insert(PlayerState::FALLING); // re-check the floor clamp
    }
    if intent.jump && player.state.contains(PlayerState::GROUND) {
        player.vel.z += JUMP_IMPULSE;
        player.state.insert(PlayerState::FALLING);
    }

    /* ----- look --------------------------------------------------------- */
    player.angle += intent.look.x * TURN_SCALE;
    player.tilt = (player.tilt - intent.look.y * TILT_SCALE).clamp(-TILT_LIMIT, TILT_LIMIT);
    player.yaw = player.tilt - player.vel.z * TILT_DAMP;
    player.refresh_angle();

    /* ----- wished velocity, relative to the view ------------------------ */
    let fwd = player.forward();
    let right = player.right();
    let mut wish = Vec2::ZERO;
    if intent.forward {
        wish += fwd * MOVE_SPEED;
    }
    if intent.back {
        wish -= fwd * MOVE_SPEED;
    }
    if intent.left {
        wish -= right * MOVE_SPEED;
    }
    if intent.right {
        wish += right * MOVE_SPEED;
    }

    // exponential smoothing: quick to speed up, slow to coast down
    let pushing = intent.pushing();
    let blend = if pushing { ACCEL } else { DECEL };
    let vel = player.vel.truncate() * (1.0 - blend) + wish * blend;
    player.vel.x = vel.x;
    player.vel.y = vel.y;

    if pushing {
        player.state.insert(PlayerState::MOVING);
    }
}

/* ─────────────────────────────  VERTICAL  ────────────────────────────── */

/// Gravity and floor/ceiling clamping in the current sector.
pub fn vertical_step(player: &mut Player, level: &Level) -> Vertical {
    let eye = player.eye_height();
    let falling = player.state.contains(PlayerState::FALLING);
    player.state.set(PlayerState::GROUND, !falling);
    if !falling {
        return Vertical::Supported;
    }

    let sector = level.sector(player.sector);
    player.vel.z -= GRAVITY;
    let next_z = player.pos.z + player.vel.z;

    let mut outcome = Vertical::Airborne;
    if player.vel.z < 0.0 && next_z < sector.floor + eye {
        // fix to the ground
        player.pos.z = sector.floor + eye;
        player.vel.z = 0.0;
        player.state.remove(PlayerState::FALLING);
        player.state.insert(PlayerState::GROUND);
        outcome = Vertical::Landed;
    } else if player.vel.z > 0.0 && next_z > sector.ceil {
        // no jumping through the ceiling
        player.vel.z = 0.0;
        outcome = Vertical::HitCeiling;
    }

    if player.state.contains(PlayerState::FALLING) {
        player.pos.z += player.vel.z;
        player.state.insert(PlayerState::MOVING);
    }
    outcome
}

/* ─────────────────────────────  HORIZONTAL  ──────────────────────────── */

/// Does the step `from → to` leave the sector through `edge`?
#[inline]
pub fn crosses(from: Vec2, to: Vec2, edge: &Edge) -> bool {
    boxes_intersect(from, to, edge.a, edge.b) && point_side(to, edge.a, edge.b) < 0.0
}

/// Return `true` if `neighbor` stops a player whose eye is at `z` with
/// `eye` height above its feet, when leaving sector `from`.
#[inline]
fn edge_blocks(level: &Level, from: SectorId, neighbor: Neighbor, z: f32, eye: f32) -> bool {
    let (hole_low, hole_high) = match neighbor {
        Neighbor::Solid => return true,
        Neighbor::Portal(to) => level.opening(from, to),
    };
    // head would hit the lintel, or the step is above the knees
    hole_high < z + HEAD_MARGIN || hole_low > z - eye + KNEE_HEIGHT
}

/// Vector projection of `v` onto the direction of `wall`.
///
/// Keeps the tangential component and removes the normal one. A zero-length
/// wall has no direction, so `v` comes back unchanged.
#[inline]
pub fn slide_along(v: Vec2, wall: Vec2) -> Vec2 {
    let len2 = wall.length_squared();
    if len2 <= f32::EPSILON {
        return v;
    }
    wall * (v.dot(wall) / len2)
}

/// Wall collision and sliding, then the actual move.
///
/// Every blocking edge the (possibly already slid) displacement crosses
/// turns it into a slide along that wall, once per edge in polygon order.
/// If the result still leaves through a blocking edge (a corner) the move
/// is cancelled. The slid velocity is what moves the player and what is
/// kept for the next tic.
pub fn horizontal_step(player: &mut Player, level: &Level) -> MoveResult {
    if !player.state.contains(PlayerState::MOVING) {
        return MoveResult::default();
    }

    let from = player.xy();
    let mut delta = player.vel.truncate();
    let mut hit_wall = None;

    if delta != Vec2::ZERO {
        let eye = player.eye_height();
        let sector = level.sector(player.sector);
        for edge in sector.edges() {
            if edge.is_degenerate() || !crosses(from, from + delta, &edge) {
                continue;
            }
            if edge_blocks(level, player.sector, edge.neighbor, player.pos.z, eye) {
                delta = slide_along(delta, edge.dir());
                player.state.remove(PlayerState::MOVING);
                hit_wall.get_or_insert(edge.index);
            }
        }
        if hit_wall.is_some() {
            let to = from + delta;
            let stuck = sector.edges().any(|edge| {
                !edge.is_degenerate()
                    && crosses(from, to, &edge)
                    && edge_blocks(level, player.sector, edge.neighbor, player.pos.z, eye)
            });
            if stuck {
                delta = Vec2::ZERO;
            }
        }
        player.vel.x = delta.x;
        player.vel.y = delta.y;
    }

    let entered = move_player(player, level, delta);
    // next tic re-checks floor support (walking off a ledge)
    player.state.insert(PlayerState::FALLING);

    MoveResult {
        delta,
        hit_wall,
        entered,
    }
}

/// Move by `delta`, switching sector if the destination leaves through a
/// portal edge. The first qualifying portal in polygon order wins.
pub fn move_player(player: &mut Player, level: &Level, delta: Vec2) -> Option<SectorId> {
    if delta == Vec2::ZERO {
        return None;
    }
    let from = player.xy();
    let to = from + delta;

    let entered = level.sector(player.sector).edges().find_map(|edge| match edge.neighbor {
        Neighbor::Portal(next) if crosses(from, to, &edge) => Some(next),
        _ => None,
    });
    if let Some(next) = entered {
        log::trace!("sector {} → {next}", player.sector);
        player.sector = next;
    }

    player.pos.x = to.x;
    player.pos.y = to.y;
    entered
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{DUCK_HEIGHT, EYE_HEIGHT};
    use crate::testing::{square_room, two_rooms};
    use glam::{Vec3, vec2};

    fn moving(level: &Level, x: f32, y: f32, vel: Vec2) -> Player {
        let mut p = Player::spawn(level, x, y, 0.0, 0);
        p.vel = vel.extend(0.0);
        p.state.insert(PlayerState::MOVING);
        p
    }

    #[test]
    fn zero_move_changes_nothing() {
        let lvl = two_rooms(0.0, 20.0);
        // standing exactly on the portal edge
        let mut p = moving(&lvl, 20.0, 10.0, Vec2::ZERO);
        let r = horizontal_step(&mut p, &lvl);
        assert_eq!(r.entered, None);
        assert_eq!(p.sector, 0);
        assert_eq!(p.xy(), vec2(20.0, 10.0));

        assert_eq!(move_player(&mut p, &lvl, Vec2::ZERO), None);
        assert_eq!(p.xy(), vec2(20.0, 10.0));
    }

    #[test]
    fn interior_move_keeps_sector() {
        let lvl = two_rooms(0.0, 20.0);
        let mut p = moving(&lvl, 5.0, 5.0, vec2(3.0, 2.0));
        let r = horizontal_step(&mut p, &lvl);
        assert_eq!(r.hit_wall, None);
        assert_eq!(r.entered, None);
        assert_eq!(p.sector, 0);
        assert!((p.xy() - vec2(8.0, 7.0)).length() < 1e-5);
    }

    #[test]
    fn crossing_a_portal_enters_the_neighbor() {
        let lvl = two_rooms(0.0, 20.0);
        let mut p = moving(&lvl, 19.0, 10.0, vec2(2.0, 0.0));
        let r = horizontal_step(&mut p, &lvl);
        assert_eq!(r.hit_wall, None);
        assert_eq!(r.entered, Some(1));
        assert_eq!(p.sector, 1);
        assert!((p.xy() - vec2(21.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn solid_wall_slides_and_keeps_tangential_speed() {
        let lvl = square_room();
        let before = vec2(1.0, 0.5);
        let mut p = moving(&lvl, 19.5, 10.0, before);
        let r = horizontal_step(&mut p, &lvl);

        assert_eq!(r.hit_wall, Some(1)); // (20,0) → (20,20)
        let wall = lvl.sector(0).edge(1).dir().normalize();
        let after = p.vel.truncate();
        assert!((after.dot(wall) - before.dot(wall)).abs() < 1e-6);
        assert!(after.dot(wall.perp()).abs() < 1e-6);
        assert!(!p.state.contains(PlayerState::MOVING));
        assert!((p.xy() - vec2(19.5, 10.5)).length() < 1e-5);
        assert_eq!(p.sector, 0);
    }

    #[test]
    fn diagonal_into_a_corner_stays_inside() {
        let lvl = square_room();
        let mut p = Player::spawn(&lvl, 15.0, 15.0, std::f32::consts::FRAC_PI_4, 0);
        let fwd = Intent {
            forward: true,
            ..Intent::default()
        };
        for tic in 0..300 {
            step(&mut p, &lvl, &fwd);
            assert!(lvl.sector(0).contains(p.xy()), "tic {tic}: left at {}", p.xy());
        }
        assert_eq!(p.sector, 0);
        // wedged into the (20, 20) corner
        assert!(p.pos.x > 19.0 && p.pos.y > 19.0);
    }

    #[test]
    fn corner_slides_cancel_out() {
        let lvl = square_room();
        // slides along x = 20, then the slide itself meets y = 20
        let mut p = moving(&lvl, 19.8, 19.8, vec2(0.5, 0.5));
        let r = horizontal_step(&mut p, &lvl);
        assert_eq!(r.hit_wall, Some(1));
        assert_eq!(r.delta, Vec2::ZERO);
        assert_eq!(p.xy(), vec2(19.8, 19.8));
        assert_eq!(p.vel.truncate(), Vec2::ZERO);
    }

    #[test]
    fn high_step_blocks_low_step_passes() {
        // knee clearance: eye 6 above floor 0, knee 2 → step of 4 is too high
        let high = two_rooms(4.0, 20.0);
        let mut p = moving(&high, 19.5, 10.0, vec2(1.0, 0.0));
        let r = horizontal_step(&mut p, &high);
        assert_eq!(r.hit_wall, Some(1));
        assert_eq!(p.sector, 0);

        let low = two_rooms(1.0, 20.0);
        let mut p = moving(&low, 19.5, 10.0, vec2(1.0, 0.0));
        let r = horizontal_step(&mut p, &low);
        assert_eq!(r.hit_wall, None);
        assert_eq!(p.sector, 1);
    }

    #[test]
    fn low_lintel_blocks() {
        // neighbor ceiling 6.5 < eye 6 + head margin 1
        let lvl = two_rooms(0.0, 6.5);
        let mut p = moving(&lvl, 19.5, 10.0, vec2(1.0, 0.0));
        assert_eq!(horizontal_step(&mut p, &lvl).hit_wall, Some(1));
    }

    #[test]
    fn slide_along_degenerate_wall_is_identity() {
        let v = vec2(1.0, 2.0);
        assert_eq!(slide_along(v, Vec2::ZERO), v);
        assert!((slide_along(v, vec2(3.0, 0.0)) - vec2(1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn falling_player_lands_on_floor() {
        let lvl = square_room();
        let mut p = Player::spawn(&lvl, 10.0, 10.0, 0.0, 0);
        p.pos.z = EYE_HEIGHT + 0.02;
        p.state = PlayerState::FALLING;
        assert_eq!(vertical_step(&mut p, &lvl), Vertical::Landed);
        assert_eq!(p.pos.z, EYE_HEIGHT);
        assert_eq!(p.vel.z, 0.0);
        assert!(p.state.contains(PlayerState::GROUND));
        assert!(!p.state.contains(PlayerState::FALLING));
        // next tic: supported, gravity does not apply
        assert_eq!(vertical_step(&mut p, &lvl), Vertical::Supported);
        assert_eq!(p.pos.z, EYE_HEIGHT);
    }

    #[test]
    fn jump_only_from_ground_and_rises() {
        let lvl = square_room();
        let mut p = Player::spawn(&lvl, 10.0, 10.0, 0.0, 0);
        let jump = Intent {
            jump: true,
            ..Intent::default()
        };
        apply_intent(&mut p, &jump);
        assert_eq!(p.vel.z, JUMP_IMPULSE);
        assert!(p.state.contains(PlayerState::FALLING));

        assert_eq!(vertical_step(&mut p, &lvl), Vertical::Airborne);
        assert!(p.pos.z > EYE_HEIGHT);
        assert!(!p.state.contains(PlayerState::GROUND));

        // a second press mid-air adds nothing
        let vz = p.vel.z;
        apply_intent(&mut p, &jump);
        assert_eq!(p.vel.z, vz);
    }

    #[test]
    fn ceiling_kills_upward_speed() {
        let lvl = square_room();
        let mut p = Player::spawn(&lvl, 10.0, 10.0, 0.0, 0);
        p.pos.z = 19.8;
        p.vel = Vec3::new(0.0, 0.0, 0.5);
        p.state = PlayerState::FALLING;
        assert_eq!(vertical_step(&mut p, &lvl), Vertical::HitCeiling);
        assert_eq!(p.vel.z, 0.0);
        assert_eq!(p.pos.z, 19.8);
        assert!(p.state.contains(PlayerState::FALLING));
    }

    #[test]
    fn duck_toggles_stance_and_sinks() {
        let lvl = square_room();
        let mut p = Player::spawn(&lvl, 10.0, 10.0, 0.0, 0);
        let duck = Intent {
            duck: true,
            ..Intent::default()
        };
        apply_intent(&mut p, &duck);
        assert!(p.state.contains(PlayerState::DUCKING | PlayerState::FALLING));
        for _ in 0..200 {
            vertical_step(&mut p, &lvl);
        }
        assert_eq!(p.pos.z, DUCK_HEIGHT);

        apply_intent(&mut p, &Intent::default());
        assert!(!p.state.contains(PlayerState::DUCKING));
        assert_eq!(vertical_step(&mut p, &lvl), Vertical::Landed);
        assert_eq!(p.pos.z, EYE_HEIGHT);
    }

    #[test]
    fn velocity_blends_towards_wish() {
        let lvl = square_room();
        let mut p = Player::spawn(&lvl, 10.0, 10.0, 0.0, 0);
        let fwd = Intent {
            forward: true,
            ..Intent::default()
        };
        apply_intent(&mut p, &fwd);
        assert!((p.vel.x - MOVE_SPEED * ACCEL).abs() < 1e-6);
        assert!(p.vel.y.abs() < 1e-6);
        assert!(p.state.contains(PlayerState::MOVING));

        apply_intent(&mut p, &Intent::default());
        assert!((p.vel.x - MOVE_SPEED * ACCEL * (1.0 - DECEL)).abs() < 1e-6);
    }

    #[test]
    fn strafe_right_is_plus_y_when_facing_plus_x() {
        let lvl = square_room();
        let mut p = Player::spawn(&lvl, 10.0, 10.0, 0.0, 0);
        let right = Intent {
            right: true,
            ..Intent::default()
        };
        apply_intent(&mut p, &right);
        assert!(p.vel.x.abs() < 1e-6);
        assert!(p.vel.y > 0.0);
    }

    #[test]
    fn tilt_is_clamped() {
        let lvl = square_room();
        let mut p = Player::spawn(&lvl, 10.0, 10.0, 0.0, 0);
        let look = Intent {
            look: vec2(0.0, -1000.0),
            ..Intent::default()
        };
        apply_intent(&mut p, &look);
        assert_eq!(p.tilt, TILT_LIMIT);
        assert_eq!(p.yaw, TILT_LIMIT);
    }

    #[test]
    fn full_step_walks_between_rooms() {
        let lvl = two_rooms(0.0, 20.0);
        let mut p = Player::spawn(&lvl, 15.0, 10.0, 0.0, 0);
        let fwd = Intent {
            forward: true,
            ..Intent::default()
        };
        for _ in 0..100 {
            step(&mut p, &lvl, &fwd);
        }
        assert_eq!(p.sector, 1);
        assert!(p.pos.x > 20.0 && p.pos.x < 40.0);
        assert_eq!(p.pos.z, EYE_HEIGHT);
    }
}

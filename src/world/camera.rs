use bitflags::bitflags;
use glam::{Vec2, Vec3, vec2};

use crate::sim::{DUCK_HEIGHT, EYE_HEIGHT};
use crate::world::{Level, SectorId};

bitflags! {
    /// Discrete movement state of the player.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PlayerState: u8 {
        const GROUND  = 0x01;
        const FALLING = 0x02;
        const DUCKING = 0x04;
        const MOVING  = 0x08;
    }
}

/// Player view-point in world space; doubles as the render camera.
///
/// * `pos.z` is the absolute eye altitude, not the height above the floor.
/// * `yaw` is the vertical look tilt used by the projection
///   (`height + depth · yaw`), not a heading.
/// * Only the movement resolver writes position, velocity and sector; the
///   renderer borrows the player immutably.
#[derive(Clone, Copy, Debug)]
pub struct Player {
    pub pos: Vec3,
    pub vel: Vec3,
    pub angle: f32,     // heading, radians (0 = +x)
    pub angle_sin: f32, // cached by the resolver
    pub angle_cos: f32,
    pub yaw: f32,  // effective tilt (look tilt damped by vertical speed)
    pub tilt: f32, // accumulated look tilt, clamped
    pub sector: SectorId,
    pub state: PlayerState,
}

impl Player {
    /// Stand a new player on the floor of `sector` at `(x, y)`.
    pub fn spawn(level: &Level, x: f32, y: f32, angle: f32, sector: SectorId) -> Self {
        let floor = level.sector(sector).floor;
        let (angle_sin, angle_cos) = angle.sin_cos();
        Self {
            pos: Vec3::new(x, y, floor + EYE_HEIGHT),
            vel: Vec3::ZERO,
            angle,
            angle_sin,
            angle_cos,
            yaw: 0.0,
            tilt: 0.0,
            sector,
            state: PlayerState::GROUND,
        }
    }

    #[inline]
    pub fn xy(&self) -> Vec2 {
        self.pos.truncate()
    }

    /// Eye height above the floor for the current stance.
    #[inline]
    pub fn eye_height(&self) -> f32 {
        if self.state.contains(PlayerState::DUCKING) {
            DUCK_HEIGHT
        } else {
            EYE_HEIGHT
        }
    }

    /// Refresh the cached sine/cosine after `angle` changed.
    #[inline]
    pub fn refresh_angle(&mut self) {
        (self.angle_sin, self.angle_cos) = self.angle.sin_cos();
    }

    /// Transform a map point into camera-local coords:
    ///  .x = lateral offset (+ = left of screen centre)
    ///  .y = depth along the view direction
    #[inline]
    pub fn to_cam(&self, p: Vec2) -> Vec2 {
        let dx = p.x - self.pos.x;
        let dy = p.y - self.pos.y;
        vec2(
            dx * self.angle_sin - dy * self.angle_cos,
            dx * self.angle_cos + dy * self.angle_sin,
        )
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the player looks on the map plane.
    #[inline(always)]
    pub fn forward(&self) -> Vec2 {
        vec2(self.angle_cos, self.angle_sin)
    }

    /// Unit vector pointing to the player's right (y-down map frame).
    #[inline(always)]
    pub fn right(&self) -> Vec2 {
        vec2(-self.angle_sin, self.angle_cos)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/

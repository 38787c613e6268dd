use glam::Vec2;

/* ----------------------------------------------------------------- */
/*  Player attributes (map units)                                    */
/* ----------------------------------------------------------------- */
pub const EYE_HEIGHT: f32 = 6.0; // camera height above the floor, standing
pub const DUCK_HEIGHT: f32 = 2.5; // … and crouching
pub const HEAD_MARGIN: f32 = 1.0; // room above the eye before the head hits
pub const KNEE_HEIGHT: f32 = 2.0; // tallest step walked over without a jump

/* ----------------------------------------------------------------- */
/*  Per-tick dynamics                                                */
/* ----------------------------------------------------------------- */
pub const MOVE_SPEED: f32 = 0.2; // wished speed per active direction
pub const ACCEL: f32 = 0.4; // velocity blend while a direction is held
pub const DECEL: f32 = 0.2; // … and while idle
pub const GRAVITY: f32 = 0.05;
pub const JUMP_IMPULSE: f32 = 0.5;

/* ----------------------------------------------------------------- */
/*  Look                                                             */
/* ----------------------------------------------------------------- */
pub const TURN_SCALE: f32 = 0.03; // radians per look unit
pub const TILT_SCALE: f32 = 0.05;
pub const TILT_LIMIT: f32 = 5.0;
pub const TILT_DAMP: f32 = 0.5; // vertical speed → head bob

/// Normalized per-tick intent handed over by the input layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Intent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,  // strafe
    pub right: bool, // strafe
    pub duck: bool,  // held
    pub jump: bool,  // edge-triggered: true only on the press
    pub look: Vec2,  // x = turn, y = tilt (mouse-style deltas)
}

impl Intent {
    /// True if any directional key is held.
    #[inline]
    pub fn pushing(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

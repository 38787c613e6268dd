mod components;
pub mod movement;
mod tic;

pub use components::{
    ACCEL, DECEL, DUCK_HEIGHT, EYE_HEIGHT, GRAVITY, HEAD_MARGIN, Intent, JUMP_IMPULSE,
    KNEE_HEIGHT, MOVE_SPEED, TILT_DAMP, TILT_LIMIT, TILT_SCALE, TURN_SCALE,
};
pub use movement::{MoveResult, Vertical, step};
pub use tic::{SIM_FPS, TicRunner};

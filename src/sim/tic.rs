use glam::Vec2;

use super::{Intent, movement};
use crate::world::{Level, Player};
use std::time::{Duration, Instant};

pub const SIM_FPS: u32 = 35;
const TIC: Duration = Duration::from_micros(1_000_000 / SIM_FPS as u64);

/// Upper bound on catch-up tics per pump (e.g. after a debugger pause).
const MAX_CATCH_UP: u32 = 8;

/// Owns the live player and drives the movement resolver at a fixed rate.
pub struct TicRunner {
    player: Player,
    last: Instant,
    tics: u64,
    // edge-triggered input gathered since the last tic
    jump: bool,
    look: Vec2,
}

impl TicRunner {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            last: Instant::now(),
            tics: 0,
            jump: false,
            look: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Total number of tics run so far.
    #[inline]
    pub fn tics(&self) -> u64 {
        self.tics
    }

    /// Advance enough tics to synchronise simulation with real time.
    ///
    /// Edge-triggered parts of `intent` (jump, look deltas) accumulate
    /// across pumps that run no tic and are applied by the next tic that
    /// does run. Returns the number of tics run.
    pub fn pump(&mut self, level: &Level, intent: &Intent) -> u32 {
        self.jump |= intent.jump;
        self.look += intent.look;

        let mut ran = 0;
        while self.last.elapsed() >= TIC {
            if ran < MAX_CATCH_UP {
                let cmd = Intent {
                    jump: std::mem::take(&mut self.jump),
                    look: std::mem::take(&mut self.look),
                    ..*intent
                };
                self.tick(level, &cmd);
                ran += 1;
            }
            self.last += TIC;
        }
        ran
    }

    /* ---------------------------------------------------------------- */
    /* run one fixed‑rate game tic                                       */
    /* ---------------------------------------------------------------- */
    pub fn tick(&mut self, level: &Level, intent: &Intent) {
        movement::step(&mut self.player, level, intent);
        self.tics += 1;
    }
}

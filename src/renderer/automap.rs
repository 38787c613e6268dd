//! Overhead map: every sector edge as a line, plus the player's heading.
//!
//! Map space is y-down like the screen, so no axis flip is needed.

use glam::Vec2;

use super::{Renderer, Rgba};
use crate::world::{Level, Player};

pub const SOLID_COLOR: Rgba = 0xFF_E0E0E0;
pub const PORTAL_COLOR: Rgba = 0xFF_C04040;
pub const PLAYER_COLOR: Rgba = 0xFF_40FF40;

/// Map-space → screen-space fit with a 10 % margin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapTransform {
    min: Vec2,
    scale: f32,
    offset: Vec2,
}

impl MapTransform {
    /// Fit the bounding box of every vertex of `level` into `w × h`.
    pub fn fit(level: &Level, w: usize, h: usize) -> Self {
        let (min, max) = level
            .sectors
            .iter()
            .flat_map(|s| s.vertices.iter())
            .fold((Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)), |(lo, hi), v| {
                (lo.min(v.pos), hi.max(v.pos))
            });
        if min.x > max.x {
            // empty level
            return Self {
                min: Vec2::ZERO,
                scale: 1.0,
                offset: Vec2::ZERO,
            };
        }
        let size = (max - min).max(Vec2::splat(1.0));
        let scale = (w as f32 / size.x).min(h as f32 / size.y) * 0.9;
        let offset = (Vec2::new(w as f32, h as f32) - size * scale) * 0.5;
        Self { min, scale, offset }
    }

    #[inline]
    pub fn to_screen(&self, p: Vec2) -> (i32, i32) {
        let s = (p - self.min) * self.scale + self.offset;
        (s.x as i32, s.y as i32)
    }
}

/// Draw the whole level into an already begun frame.
pub fn draw_automap<R: Renderer + ?Sized>(
    r: &mut R,
    level: &Level,
    player: &Player,
    w: usize,
    h: usize,
) {
    let xf = MapTransform::fit(level, w, h);

    for sector in &level.sectors {
        for e in sector.edges() {
            let (x0, y0) = xf.to_screen(e.a);
            let (x1, y1) = xf.to_screen(e.b);
            let c = if e.neighbor.is_portal() {
                PORTAL_COLOR
            } else {
                SOLID_COLOR
            };
            r.draw_line(x0, y0, x1, y1, c);
        }
    }

    /* player: short heading tick */
    let p = player.xy();
    let (px, py) = xf.to_screen(p);
    let (hx, hy) = xf.to_screen(p + player.forward() * 2.0);
    r.draw_line(px, py, hx, hy, PLAYER_COLOR);
    r.draw_line(px - 1, py, px + 1, py, PLAYER_COLOR);
    r.draw_line(px, py - 1, px, py + 1, PLAYER_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Software;
    use crate::testing::two_rooms;
    use glam::vec2;

    #[test]
    fn fit_centres_the_level() {
        let lvl = two_rooms(0.0, 20.0); // 40 × 20
        let xf = MapTransform::fit(&lvl, 100, 100);
        let (x0, y0) = xf.to_screen(vec2(0.0, 0.0));
        let (x1, y1) = xf.to_screen(vec2(40.0, 20.0));
        // 2.25 px per unit, 27.5 px of slack top and bottom
        assert!((x0 - 5).abs() <= 1 && (x1 - 95).abs() <= 1);
        assert!((y0 - 27).abs() <= 1 && (y1 - 72).abs() <= 1);
    }

    #[test]
    fn portals_and_solids_use_different_colours() {
        let lvl = two_rooms(0.0, 20.0);
        let player = Player::spawn(&lvl, 10.0, 10.0, 0.0, 0);
        let mut sw = Software::default();
        sw.begin_frame(100, 100);
        draw_automap(&mut sw, &lvl, &player, 100, 100);

        let xf = MapTransform::fit(&lvl, 100, 100);
        // shared edge at x = 20 is a portal
        let (px, py) = xf.to_screen(vec2(20.0, 10.0));
        assert_eq!(sw.pixel(px as usize, py as usize), Some(PORTAL_COLOR));
        // outer wall at x = 0
        let (sx, sy) = xf.to_screen(vec2(0.0, 10.0));
        assert_eq!(sw.pixel(sx as usize, sy as usize), Some(SOLID_COLOR));
        // player marker
        let (mx, my) = xf.to_screen(vec2(10.0, 10.0));
        assert_eq!(sw.pixel(mx as usize, my as usize), Some(PLAYER_COLOR));
    }
}

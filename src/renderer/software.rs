//! ---------------------------------------------------------------------------
//! Software (CPU) column renderer
//!
//! * Fills a scratch frame-buffer in **0xAARRGGBB** format.
//! * The portal engine feeds it spans that are already clipped against the
//!   per-column window, so it never needs a Z-buffer. Bounds are still
//!   checked here so a bad span can never write outside the frame.
//! ---------------------------------------------------------------------------

use crate::{
    renderer::{ColumnSpan, Fill, Renderer, Rgba},
    world::TextureBank,
};

/// Colour the frame is cleared to; visible only where nothing was drawn.
const CLEAR: Rgba = 0xFF_202020;

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl Software {
    /// Pixel at `(x, y)` of the frame being built.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.scratch[y * self.width + x])
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, c: Rgba) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.scratch[y as usize * self.width + x as usize] = c;
        }
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.scratch.fill(CLEAR);
    }

    fn draw_column(&mut self, s: &ColumnSpan, bank: &TextureBank) {
        if s.x < 0 || s.x as usize >= self.width || self.height == 0 {
            return;
        }
        let y0 = s.y_top.max(0);
        let y1 = s.y_bot.min(self.height as i32 - 1);
        if y0 > y1 {
            return;
        }

        let col = s.x as usize;
        match s.fill {
            Fill::Flat(c) => {
                for y in y0..=y1 {
                    self.scratch[y as usize * self.width + col] = c;
                }
            }
            Fill::Textured {
                tex_id,
                u,
                v_top,
                v_step,
            } => {
                let tex = bank.texture_or_missing(tex_id);
                let mut v = v_top + (y0 - s.y_top) as f32 * v_step;
                for y in y0..=y1 {
                    self.scratch[y as usize * self.width + col] = tex.sample(u, v.floor() as i32);
                    v += v_step;
                }
            }
        }

        /* outline the ends of the run (unclipped ends only) */
        if let Some(c) = s.outline {
            if s.y_top == y0 {
                self.put(s.x, y0, c);
            }
            if s.y_bot == y1 {
                self.put(s.x, y1, c);
            }
        }
    }

    /// Bresenham, one pixel at a time; off-screen pixels are skipped.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
        let (mut x, mut y) = (x0, y0);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        renderer::RendererExt,
        world::{Texture, TextureBank},
    };

    /* tiny helpers ---------------------------------------------------*/
    fn tiny_bank() -> TextureBank {
        let mut bank = TextureBank::default_with_checker();
        // two rows: red on top, blue below
        let mut pixels = vec![0xFF_FF0000; 4];
        pixels.extend([0xFF_0000FF; 4]);
        bank.insert(
            "STRIPE",
            Texture {
                name: "STRIPE".into(),
                w: 4,
                h: 2,
                pixels,
            },
        )
        .unwrap();
        bank
    }

    fn flat(x: i32, y_top: i32, y_bot: i32, c: Rgba) -> ColumnSpan {
        ColumnSpan {
            x,
            y_top,
            y_bot,
            fill: Fill::Flat(c),
            outline: None,
        }
    }

    #[test]
    fn software_renders_flat_span() {
        let bank = tiny_bank();
        let mut sw = Software::default();
        let mut out = Vec::new();
        sw.draw_frame(8, 8, &[flat(2, 1, 4, 0xFF_00FF00)], &bank, |fb, w, h| {
            assert_eq!((w, h), (8, 8));
            out = fb.to_vec();
        });
        let green: Vec<usize> = (0..8).filter(|&y| out[y * 8 + 2] == 0xFF_00FF00).collect();
        assert_eq!(green, vec![1, 2, 3, 4]);
        assert_eq!(out.iter().filter(|&&p| p == 0xFF_00FF00).count(), 4);
    }

    #[test]
    fn spans_are_clipped_to_the_buffer() {
        let bank = tiny_bank();
        let mut sw = Software::default();
        sw.begin_frame(4, 4);
        sw.draw_column(&flat(1, -10, 10, 0xFF_FFFFFF), &bank);
        sw.draw_column(&flat(-1, 0, 3, 0xFF_FF00FF), &bank);
        sw.draw_column(&flat(4, 0, 3, 0xFF_FF00FF), &bank);
        for y in 0..4 {
            assert_eq!(sw.pixel(1, y), Some(0xFF_FFFFFF));
            assert_eq!(sw.pixel(0, y), Some(CLEAR));
        }
        assert_eq!(sw.pixel(4, 0), None);
    }

    #[test]
    fn textured_span_wraps_vertically() {
        let bank = tiny_bank();
        let id = bank.id("STRIPE").unwrap();
        let mut sw = Software::default();
        sw.begin_frame(2, 6);
        sw.draw_column(
            &ColumnSpan {
                x: 0,
                y_top: 0,
                y_bot: 5,
                fill: Fill::Textured {
                    tex_id: id,
                    u: 5, // wraps to column 1
                    v_top: 0.0,
                    v_step: 1.0,
                },
                outline: None,
            },
            &bank,
        );
        let col: Vec<Rgba> = (0..6).map(|y| sw.pixel(0, y).unwrap()).collect();
        assert_eq!(
            col,
            vec![0xFF_FF0000, 0xFF_0000FF, 0xFF_FF0000, 0xFF_0000FF, 0xFF_FF0000, 0xFF_0000FF]
        );
    }

    #[test]
    fn outline_marks_run_ends() {
        let bank = tiny_bank();
        let mut sw = Software::default();
        sw.begin_frame(1, 8);
        let mut s = flat(0, 2, 5, 0xFF_FFFFFF);
        s.outline = Some(0xFF_000000);
        sw.draw_column(&s, &bank);
        assert_eq!(sw.pixel(0, 2), Some(0xFF_000000));
        assert_eq!(sw.pixel(0, 3), Some(0xFF_FFFFFF));
        assert_eq!(sw.pixel(0, 4), Some(0xFF_FFFFFF));
        assert_eq!(sw.pixel(0, 5), Some(0xFF_000000));
    }

    #[test]
    fn line_hits_both_endpoints() {
        let mut sw = Software::default();
        sw.begin_frame(10, 10);
        sw.draw_line(1, 1, 8, 5, 0xFF_FF0000);
        assert_eq!(sw.pixel(1, 1), Some(0xFF_FF0000));
        assert_eq!(sw.pixel(8, 5), Some(0xFF_FF0000));
        // off-screen parts are dropped silently
        sw.draw_line(-5, -5, 20, 20, 0xFF_00FF00);
        assert_eq!(sw.pixel(9, 9), Some(0xFF_00FF00));
    }
}

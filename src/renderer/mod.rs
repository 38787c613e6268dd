//! Rendering abstraction layer.
//!
//! *The portal engine never touches a pixel buffer directly.*
//! It produces vertical [`ColumnSpan`]s (ceiling, wall, sliver, floor) and
//! hands them to a type that implements [`Renderer`].
//!
//! * Back-ends can be swapped without touching the traversal.
//! * A blanket impl [`RendererExt`] adds `draw_frame` so call-sites stay
//!   short.

use crate::world::{TextureBank, TextureId};

pub mod automap;
pub mod software;

pub use software::Software;

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

/// How the rows of a [`ColumnSpan`] are coloured.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Fill {
    Flat(Rgba),
    /// Texel column `u`; row `y` samples `v_top + (y - y_top) * v_step`.
    Textured {
        tex_id: TextureId,
        u: i32,
        v_top: f32,
        v_step: f32,
    },
}

/// One vertical run of pixels, `y_top ..= y_bot` in column `x`.
/// Already clipped by the engine; the backend only guards the buffer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColumnSpan {
    pub x: i32,
    pub y_top: i32,
    pub y_bot: i32,
    pub fill: Fill,
    /// Paint the first and last pixel with `outline_color`.
    pub outline: Option<Rgba>,
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Rasterise one vertical run.
    fn draw_column(&mut self, span: &ColumnSpan, bank: &TextureBank);

    /// Plot a line, clipped to the frame. Used by the overhead map.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software callers pass `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(
        &mut self,
        width: usize,
        height: usize,
        spans: &[ColumnSpan],
        bank: &TextureBank,
        submit: F,
    ) where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame(width, height);
        for s in spans {
            self.draw_column(s, bank);
        }
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

//! Render-side tuning. Physical constants of the player live in [`crate::sim`].

use crate::renderer::Rgba;
use crate::world::{NO_TEXTURE, TextureId};

/// Everything the portal renderer needs to know about the output surface.
#[derive(Clone, Debug)]
pub struct ViewConfig {
    pub width: usize,
    pub height: usize,
    /// Horizontal projection scale as a fraction of the screen height.
    pub hfov: f32,
    /// Vertical projection scale as a fraction of the screen height.
    pub vfov: f32,

    pub ceil_color: Rgba,
    pub floor_color: Rgba,
    pub outline_color: Rgba,
    /// Wall colours cycled by edge index when `flat_walls` is set.
    pub wall_palette: [Rgba; 5],

    /// Capacity of the draw-task ring; tasks beyond it are dropped.
    pub queue_capacity: usize,
    /// How many times one sector may be drawn per frame (through different
    /// portals) before further tasks for it are ignored.
    pub max_sector_passes: u8,

    /// Paint the first/last pixel of every run and the borders of solid
    /// walls with `outline_color`.
    pub outline: bool,
    /// Colour walls from `wall_palette` instead of sampling `wall_texture`.
    pub flat_walls: bool,
    pub wall_texture: TextureId,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            hfov: 0.73,
            vfov: 0.2,
            ceil_color: 0xFF_CB997E,
            floor_color: 0xFF_B7B7A4,
            outline_color: 0xFF_000000,
            wall_palette: [
                0xFF_14213D, // charcoal
                0xFF_2A9D8F, // persian green
                0xFF_E9C46A, // orange yellow
                0xFF_F4A261, // sandy brown
                0xFF_E76F51, // burnt sienna
            ],
            queue_capacity: 32,
            max_sector_passes: 16,
            outline: true,
            flat_walls: false,
            wall_texture: NO_TEXTURE,
        }
    }
}

impl ViewConfig {
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Horizontal projection scale in pixels.
    #[inline]
    pub fn hfov_px(&self) -> f32 {
        self.hfov * self.height as f32
    }

    /// Vertical projection scale in pixels.
    #[inline]
    pub fn vfov_px(&self) -> f32 {
        self.vfov * self.height as f32
    }
}

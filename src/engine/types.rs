use crate::{config::ViewConfig, world::SectorId};

/// Constants that depend on the *frame-buffer*, not on the map.
#[derive(Clone, Copy, Debug)]
pub struct Screen {
    pub w: usize,
    pub h: usize,
    pub half_w: i32, // integer centre, as used by the projection
    pub half_h: i32,
    pub hfov: f32, // horizontal scale, pixels
    pub vfov: f32, // vertical scale, pixels
}

impl Screen {
    pub fn new(cfg: &ViewConfig) -> Self {
        Self {
            w: cfg.width,
            h: cfg.height,
            half_w: (cfg.width / 2) as i32,
            half_h: (cfg.height / 2) as i32,
            hfov: cfg.hfov_px(),
            vfov: cfg.vfov_px(),
        }
    }

    /// Screen row of a point `height` above the eye at `depth`, tilted by
    /// `yaw`.
    #[inline]
    pub fn row(&self, height: f32, depth: f32, yaw: f32) -> i32 {
        self.half_h - to_px((height + depth * yaw) * self.vfov / depth)
    }

    /// Screen column of a point `lateral` to the left at `depth`.
    #[inline]
    pub fn column(&self, lateral: f32, depth: f32) -> i32 {
        self.half_w - to_px(lateral * self.hfov / depth)
    }
}

/// Near-plane projections blow up; keep pixel coords well inside `i32`.
const PX_LIMIT: f32 = 1.0e7;

#[inline]
fn to_px(v: f32) -> i32 {
    v.clamp(-PX_LIMIT, PX_LIMIT) as i32
}

/// "Draw sector `sector`, restricted to columns `x1 ..= x2`."
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawTask {
    pub sector: SectorId,
    pub x1: i32,
    pub x2: i32,
}

/// Per-sector bookkeeping for one frame of the portal walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visit {
    #[default]
    Unvisited,
    /// Being drawn. Tasks it enqueues are popped only after it is `Done`,
    /// so the walk never meets this state; `may_draw` refuses it anyway.
    InProgress,
    /// Drawn `passes` times through different portals.
    Done { passes: u8 },
}

impl Visit {
    /// May another task for this sector be drawn?
    #[inline]
    pub fn may_draw(self, max_passes: u8) -> bool {
        match self {
            Visit::Unvisited => true,
            Visit::InProgress => false,
            Visit::Done { passes } => passes < max_passes,
        }
    }

    #[inline]
    pub fn passes(self) -> u8 {
        match self {
            Visit::Done { passes } => passes,
            _ => 0,
        }
    }
}

/// Remaining drawable window of every column, `top ..= bottom`.
#[derive(Default, Debug)]
pub struct ClipBands {
    pub top: Vec<i32>,
    pub bottom: Vec<i32>,
}

impl ClipBands {
    /// Fully open: `[0, h - 1]` for all `w` columns.
    pub fn reset(&mut self, w: usize, h: usize) {
        self.top.clear();
        self.top.resize(w, 0);
        self.bottom.clear();
        self.bottom.resize(w, h as i32 - 1);
    }
}

/// Counters for one rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub tasks_drawn: u32,
    /// Popped but ignored (sector in progress or out of passes).
    pub tasks_skipped: u32,
    /// Refused by a full queue.
    pub tasks_dropped: u32,
    /// Edge × column pairs rasterised.
    pub columns: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visit_guard() {
        assert!(Visit::Unvisited.may_draw(16));
        assert!(!Visit::InProgress.may_draw(16));
        assert!(Visit::Done { passes: 15 }.may_draw(16));
        assert!(!Visit::Done { passes: 16 }.may_draw(16));
    }

    #[test]
    fn huge_projections_saturate() {
        let s = Screen::new(&ViewConfig::with_size(640, 480));
        assert_eq!(s.column(0.0, 10.0), 320);
        let far_left = s.column(1.0e3, 1.0e-6);
        assert!(far_left < -1_000_000);
        // row of the eye level is the centre line
        assert_eq!(s.row(0.0, 5.0, 0.0), 240);
    }
}

//! Column rasteriser for one projected sector edge.

use crate::{
    config::ViewConfig,
    engine::{
        projection::ProjectedEdge,
        types::{ClipBands, DrawTask, Screen},
    },
    renderer::{ColumnSpan, Fill, Renderer, Rgba},
    world::{Edge, Player, Sector, TextureBank},
};

/// Read-only state shared by every edge of a frame.
pub struct FrameCtx<'a> {
    pub player: &'a Player,
    pub screen: &'a Screen,
    pub cfg: &'a ViewConfig,
    pub bank: &'a TextureBank,
}

/// Row pair `(ceiling, floor)` at both ends of an edge.
#[derive(Clone, Copy)]
struct Rows {
    a1: i32,
    b1: i32,
    a2: i32,
    b2: i32,
}

impl Rows {
    fn project(ctx: &FrameCtx, sector: &Sector, e: &ProjectedEdge) -> Self {
        let eye = ctx.player.pos.z;
        let yaw = ctx.player.yaw;
        let (ceil, floor) = (sector.ceil - eye, sector.floor - eye);
        Self {
            a1: ctx.screen.row(ceil, e.z1, yaw),
            b1: ctx.screen.row(floor, e.z1, yaw),
            a2: ctx.screen.row(ceil, e.z2, yaw),
            b2: ctx.screen.row(floor, e.z2, yaw),
        }
    }

    /// Ceiling and floor rows at column `x` (affine in screen space).
    #[inline]
    fn at(&self, x: i32, e: &ProjectedEdge) -> (i32, i32) {
        (lerp(x, e, self.a1, self.a2), lerp(x, e, self.b1, self.b2))
    }
}

#[inline]
fn lerp(x: i32, e: &ProjectedEdge, y1: i32, y2: i32) -> i32 {
    let t = (x - e.x1) as i64 * (y2 - y1) as i64 / (e.x2 - e.x1) as i64;
    (t + y1 as i64).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Draw the visible columns of `edge` inside `task`, shrink the clip window
/// behind portals, and return the task for the neighbor, if any.
///
/// The second value is the number of columns drawn.
#[allow(clippy::too_many_arguments)]
pub fn draw_edge<R: Renderer + ?Sized>(
    ctx: &FrameCtx,
    renderer: &mut R,
    bands: &mut ClipBands,
    sector: &Sector,
    neighbor: Option<&Sector>,
    edge: &Edge,
    proj: &ProjectedEdge,
    task: &DrawTask,
) -> (Option<DrawTask>, u32) {
    let begin = proj.x1.max(task.x1).max(0);
    let end = proj.last().min(task.x2).min(ctx.screen.w as i32 - 1);
    if begin > end {
        return (None, 0);
    }

    let ours = Rows::project(ctx, sector, proj);
    let theirs = neighbor.map(|n| Rows::project(ctx, n, proj));
    let outline = ctx.cfg.outline.then_some(ctx.cfg.outline_color);
    let last_row = ctx.screen.h as i32 - 1;
    let mut columns = 0;

    for x in begin..=end {
        let col = x as usize;
        let (top, bottom) = (bands.top[col], bands.bottom[col]);
        if top > bottom {
            continue; // window already closed
        }
        columns += 1;

        let (ya, yb) = ours.at(x, proj);
        let cya = ya.clamp(top, bottom);
        let cyb = yb.clamp(top, bottom);

        let mut emit = |y_top: i32, y_bot: i32, fill: Fill| {
            if y_top <= y_bot {
                renderer.draw_column(
                    &ColumnSpan {
                        x,
                        y_top,
                        y_bot,
                        fill,
                        outline,
                    },
                    ctx.bank,
                );
            }
        };

        /* ceiling above, floor below */
        emit(top, cya - 1, Fill::Flat(ctx.cfg.ceil_color));
        emit(cyb + 1, bottom, Fill::Flat(ctx.cfg.floor_color));

        match theirs {
            Some(rows) => {
                let (nya, nyb) = rows.at(x, proj);
                let cnya = nya.clamp(top, bottom);
                let cnyb = nyb.clamp(top, bottom);

                // our ceiling down to theirs, their floor down to ours
                emit(cya, cnya - 1, wall_fill(ctx, edge, x, proj, ya, yb, cya));
                emit(cnyb + 1, cyb, wall_fill(ctx, edge, x, proj, ya, yb, cnyb + 1));

                bands.top[col] = cya.max(cnya).clamp(top, last_row);
                bands.bottom[col] = cyb.min(cnyb).clamp(0, bottom);
            }
            None => {
                let fill = match outline {
                    Some(c) if x == begin || x == end => Fill::Flat(c),
                    _ => wall_fill(ctx, edge, x, proj, ya, yb, cya),
                };
                emit(cya, cyb, fill);
            }
        }
    }

    let next = edge.neighbor.sector().map(|id| DrawTask {
        sector: id,
        x1: begin,
        x2: end,
    });
    (next, columns)
}

/// Colour source for wall rows starting at `y_start`.
///
/// Texture `u` follows the column's position inside the whole projected
/// wall; `v` follows the row's position inside the unclipped wall height.
#[allow(clippy::too_many_arguments)]
fn wall_fill(
    ctx: &FrameCtx,
    edge: &Edge,
    x: i32,
    proj: &ProjectedEdge,
    ya: i32,
    yb: i32,
    y_start: i32,
) -> Fill {
    if ctx.cfg.flat_walls {
        return Fill::Flat(palette(ctx.cfg, edge.index));
    }
    let tex = ctx.bank.texture_or_missing(ctx.cfg.wall_texture);
    let u = (x - proj.x1) as i64 * tex.w as i64 / (proj.x2 - proj.x1) as i64;
    let v_step = tex.h as f32 / (yb - ya).max(1) as f32;
    Fill::Textured {
        tex_id: ctx.cfg.wall_texture,
        u: u as i32,
        v_top: (y_start - ya) as f32 * v_step,
        v_step,
    }
}

#[inline]
fn palette(cfg: &ViewConfig, edge: usize) -> Rgba {
    cfg.wall_palette[edge % cfg.wall_palette.len()]
}

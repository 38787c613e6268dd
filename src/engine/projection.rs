use glam::{Vec2, vec2};

use crate::{
    engine::types::Screen,
    world::{Player, intersect::line_intersect},
};

/* near-plane clip lines, camera space (lateral, depth) */
const NEAR_Z: f32 = 1e-4;
const FAR_Z: f32 = 5.0;
const NEAR_SIDE: f32 = 1e-5;
const FAR_SIDE: f32 = 20.0;

/// A wall edge after camera transform, near clip and X projection.
///
/// Columns are half-open: the edge covers `x1 .. x2`, so two edges meeting
/// at a corner never claim the same column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedEdge {
    pub x1: i32,
    pub x2: i32,
    /// Depth of the (possibly clipped) endpoints, always `> 0`.
    pub z1: f32,
    pub z2: f32,
}

impl ProjectedEdge {
    /// Last covered column.
    #[inline]
    pub fn last(&self) -> i32 {
        self.x2 - 1
    }
}

/// Project the map edge `a → b` for `player`.
///
/// `None` when the edge is entirely behind the camera, cannot be clipped, or
/// faces away / collapses to zero columns (`x1 >= x2`).
pub fn project_edge(player: &Player, screen: &Screen, a: Vec2, b: Vec2) -> Option<ProjectedEdge> {
    let mut p1 = player.to_cam(a);
    let mut p2 = player.to_cam(b);

    if p1.y <= 0.0 && p2.y <= 0.0 {
        return None;
    }
    if p1.y <= 0.0 || p2.y <= 0.0 {
        clip_near(&mut p1, &mut p2)?;
    }

    let x1 = screen.column(p1.x, p1.y);
    let x2 = screen.column(p2.x, p2.y);
    if x1 >= x2 {
        return None;
    }
    Some(ProjectedEdge {
        x1,
        x2,
        z1: p1.y,
        z2: p2.y,
    })
}

/// Pull endpoints with depth `< NEAR_Z` onto one of the two slanted clip
/// lines that flank the view. An intersection inside the segment wins over
/// one on its extension; either must lie in front of the camera.
fn clip_near(p1: &mut Vec2, p2: &mut Vec2) -> Option<()> {
    let (a, b) = (*p1, *p2);
    let left = line_intersect(a, b, vec2(-NEAR_SIDE, NEAR_Z), vec2(-FAR_SIDE, FAR_Z));
    let right = line_intersect(a, b, vec2(NEAR_SIDE, NEAR_Z), vec2(FAR_SIDE, FAR_Z));

    let in_front = |p: &Vec2| p.y > 0.0;
    let pick = [left, right]
        .into_iter()
        .flatten()
        .filter(in_front)
        .min_by(|u, v| {
            off_segment(*u, a, b)
                .partial_cmp(&off_segment(*v, a, b))
                .unwrap_or(core::cmp::Ordering::Equal)
        })?;

    if p1.y < NEAR_Z {
        *p1 = pick;
    }
    if p2.y < NEAR_Z {
        *p2 = pick;
    }
    Some(())
}

/// How far outside `[0, 1]` the parameter of `p` along `a → b` lies.
fn off_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let d = b - a;
    let len2 = d.length_squared();
    if len2 == 0.0 {
        return 0.0;
    }
    let t = (p - a).dot(d) / len2;
    (-t).max(t - 1.0).max(0.0)
}

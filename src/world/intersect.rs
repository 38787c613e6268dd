//! Scalar / 2-D primitives shared by the movement resolver and the portal
//! renderer. Everything here is pure and allocation free.

use glam::{Vec2, vec2};

/// Determinant below which two lines are treated as parallel.
const PARALLEL_EPS: f32 = 1e-12;

/// 2-D cross product `x0·y1 − x1·y0`.
#[inline(always)]
pub fn cross(x0: f32, y0: f32, x1: f32, y1: f32) -> f32 {
    x0 * y1 - x1 * y0
}

/// Do the closed ranges `[a0, a1]` and `[b0, b1]` overlap? Endpoints may come
/// in either order.
#[inline(always)]
pub fn ranges_overlap(a0: f32, a1: f32, b0: f32, b1: f32) -> bool {
    a0.min(a1) <= b0.max(b1) && b0.min(b1) <= a0.max(a1)
}

/// Do the bounding boxes of segments `p0→p1` and `q0→q1` intersect?
#[inline(always)]
pub fn boxes_intersect(p0: Vec2, p1: Vec2, q0: Vec2, q1: Vec2) -> bool {
    ranges_overlap(p0.x, p1.x, q0.x, q1.x) && ranges_overlap(p0.y, p1.y, q0.y, q1.y)
}

/// Which side of the directed line `a→b` is `p` on?
///
/// `< 0` = right of the line (outside a clockwise edge), `>= 0` = on/inside.
#[inline(always)]
pub fn point_side(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    cross(b.x - a.x, b.y - a.y, p.x - a.x, p.y - a.y)
}

/// Intersection of the infinite lines `p1p2` and `p3p4`.
///
/// `None` when the lines are parallel (or one of them has zero length).
pub fn line_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let det = cross(p1.x - p2.x, p1.y - p2.y, p3.x - p4.x, p3.y - p4.y);
    if det.abs() <= PARALLEL_EPS {
        return None;
    }
    let c12 = cross(p1.x, p1.y, p2.x, p2.y);
    let c34 = cross(p3.x, p3.y, p4.x, p4.y);
    Some(vec2(
        cross(c12, p1.x - p2.x, c34, p3.x - p4.x) / det,
        cross(c12, p1.y - p2.y, c34, p3.y - p4.y) / det,
    ))
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/

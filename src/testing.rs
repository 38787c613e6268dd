//! Hand-built sector graphs shared by the unit tests.

use glam::vec2;

use crate::world::{Level, Neighbor, Sector, Vertex};

fn v(x: f32, y: f32) -> Vertex {
    Vertex { pos: vec2(x, y) }
}

/// Axis-aligned box, corners clockwise in the y-down frame, all walls solid.
pub fn boxed(x0: f32, y0: f32, x1: f32, y1: f32, floor: f32, ceil: f32) -> Sector {
    Sector {
        floor,
        ceil,
        vertices: vec![v(x0, y0), v(x1, y0), v(x1, y1), v(x0, y1)],
        neighbors: vec![Neighbor::Solid; 4],
    }
}

/// One 20×20 room, floor 0, ceiling 20.
pub fn square_room() -> Level {
    Level {
        name: "square".into(),
        sectors: vec![boxed(0.0, 0.0, 20.0, 20.0, 0.0, 20.0)],
    }
}

/// Room 0 = `[0,20]²`, room 1 = `[20,40]×[0,20]`; they share the edge
/// `x = 20` (edge 1 of room 0, edge 3 of room 1).
pub fn two_rooms(floor1: f32, ceil1: f32) -> Level {
    let mut a = boxed(0.0, 0.0, 20.0, 20.0, 0.0, 20.0);
    let mut b = boxed(20.0, 0.0, 40.0, 20.0, floor1, ceil1);
    a.neighbors[1] = Neighbor::Portal(1);
    b.neighbors[3] = Neighbor::Portal(0);
    Level {
        name: "two".into(),
        sectors: vec![a, b],
    }
}

/// `rooms` boxes in a row along +x, each opening into the next.
pub fn corridor(rooms: usize) -> Level {
    let mut sectors = Vec::with_capacity(rooms);
    for i in 0..rooms {
        let x0 = i as f32 * 20.0;
        let mut s = boxed(x0, 0.0, x0 + 20.0, 20.0, 0.0, 20.0);
        if i + 1 < rooms {
            s.neighbors[1] = Neighbor::Portal(i as u16 + 1);
        }
        if i > 0 {
            s.neighbors[3] = Neighbor::Portal(i as u16 - 1);
        }
        sectors.push(s);
    }
    Level {
        name: "corridor".into(),
        sectors,
    }
}

/// Room 0 = `[0,20]²` whose right side is split at `y = 10` into two
/// portals: edge 1 opens into room 1 (`[20,40]×[0,10]`), edge 2 into
/// room 2 (`[20,40]×[10,20]`). Rooms 1 and 2 also open into each other
/// along `y = 10`.
pub fn split_room() -> Level {
    let a = Sector {
        floor: 0.0,
        ceil: 20.0,
        vertices: vec![
            v(0.0, 0.0),
            v(20.0, 0.0),
            v(20.0, 10.0),
            v(20.0, 20.0),
            v(0.0, 20.0),
        ],
        neighbors: vec![
            Neighbor::Solid,
            Neighbor::Portal(1),
            Neighbor::Portal(2),
            Neighbor::Solid,
            Neighbor::Solid,
        ],
    };
    let mut b = boxed(20.0, 0.0, 40.0, 10.0, 0.0, 20.0);
    let mut c = boxed(20.0, 10.0, 40.0, 20.0, 0.0, 20.0);
    b.neighbors[2] = Neighbor::Portal(2);
    b.neighbors[3] = Neighbor::Portal(0);
    c.neighbors[0] = Neighbor::Portal(1);
    c.neighbors[3] = Neighbor::Portal(0);
    Level {
        name: "split".into(),
        sectors: vec![a, b, c],
    }
}

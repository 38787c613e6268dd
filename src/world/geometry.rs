use glam::Vec2;

pub type SectorId = u16;

/// Runtime snapshot of one map (immutable after load).
///
/// The sector list is frozen by the loader; nothing adds or removes sectors
/// while a level is live.
#[derive(Debug)]
pub struct Level {
    pub name: String,
    pub sectors: Vec<Sector>,
}

/*----------------------- simple primitives --------------------------*/

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub pos: Vec2,
}

/// What lies on the far side of a sector edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Neighbor {
    /// Impassable, opaque wall.
    Solid,
    /// Shared edge with another sector: traversable and see-through.
    Portal(SectorId),
}

impl Neighbor {
    #[inline]
    pub fn sector(self) -> Option<SectorId> {
        match self {
            Neighbor::Solid => None,
            Neighbor::Portal(id) => Some(id),
        }
    }

    #[inline]
    pub fn is_portal(self) -> bool {
        matches!(self, Neighbor::Portal(_))
    }
}

/// Structural defects that make a sector graph unusable.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GraphError {
    #[error("sector {sector}: only {corners} corners")]
    TooFewCorners { sector: usize, corners: usize },

    #[error("sector {sector}: {corners} corners but {neighbors} edge neighbors")]
    EdgeCountMismatch {
        sector: usize,
        corners: usize,
        neighbors: usize,
    },

    #[error("sector {sector}: floor {floor} is not below ceiling {ceil}")]
    InvertedHeights { sector: usize, floor: f32, ceil: f32 },

    #[error("sector {sector} edge {edge}: neighbor {neighbor} is not a valid sector")]
    BadNeighbor {
        sector: usize,
        edge: usize,
        neighbor: SectorId,
    },
}

/*--------------------------- sectors --------------------------------*/

/// Convex room: a closed polygon plus floor/ceiling heights.
///
/// Corners are wound clockwise in the map's y-down frame, so
/// [`point_side`](crate::world::intersect::point_side) is `>= 0` for every
/// interior point and `< 0` once a point has left through an edge.
#[derive(Clone, Debug)]
pub struct Sector {
    pub floor: f32,
    pub ceil: f32,
    pub vertices: Vec<Vertex>,
    /// `neighbors[i]` describes edge `i` (`vertices[i] → vertices[i + 1]`).
    pub neighbors: Vec<Neighbor>,
}

/// One polygon edge, endpoints resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub index: usize,
    pub a: Vec2,
    pub b: Vec2,
    pub neighbor: Neighbor,
}

impl Edge {
    #[inline]
    pub fn dir(&self) -> Vec2 {
        self.b - self.a
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.dir().length_squared() <= f32::EPSILON
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/

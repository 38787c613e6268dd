use glam::Vec2;

use super::intersect::point_side;
use super::{Edge, GraphError, Level, Neighbor, Sector, SectorId};

// ──────────────────────────────────────────────────────────────────────────
//                       Sector – edge access
// ──────────────────────────────────────────────────────────────────────────
impl Sector {
    /// Number of polygon edges (== number of corners).
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.vertices.len()
    }

    /// Edge `i`, running from corner `i` to corner `i + 1` (wrapping).
    #[inline]
    pub fn edge(&self, i: usize) -> Edge {
        let n = self.vertices.len();
        Edge {
            index: i,
            a: self.vertices[i].pos,
            b: self.vertices[(i + 1) % n].pos,
            neighbor: self.neighbors[i],
        }
    }

    /// All edges in polygon order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.edge_count()).map(|i| self.edge(i))
    }

    /// True when `p` is inside or on the boundary of this (convex) sector.
    pub fn contains(&self, p: Vec2) -> bool {
        self.edges().all(|e| point_side(p, e.a, e.b) >= 0.0)
    }
}

// ──────────────────────────────────────────────────────────────────────────
//                       Level – public helpers
// ──────────────────────────────────────────────────────────────────────────
impl Level {
    #[inline(always)]
    pub fn sector(&self, id: SectorId) -> &Sector {
        &self.sectors[id as usize]
    }

    #[inline]
    pub fn sector_count(&self) -> usize {
        self.sectors.len()
    }

    /// Vertical opening between two sectors: `(lowest passable z, highest
    /// passable z)`.
    #[inline]
    pub fn opening(&self, a: SectorId, b: SectorId) -> (f32, f32) {
        let (a, b) = (self.sector(a), self.sector(b));
        (a.floor.max(b.floor), a.ceil.min(b.ceil))
    }

    /// First sector whose interior contains `p`.
    pub fn locate_sector(&self, p: Vec2) -> Option<SectorId> {
        self.sectors
            .iter()
            .position(|s| s.contains(p))
            .map(|i| i as SectorId)
    }

    /// Count the portal edges of the whole map.
    pub fn portal_count(&self) -> usize {
        self.sectors
            .iter()
            .flat_map(|s| s.neighbors.iter())
            .filter(|n| n.is_portal())
            .count()
    }

    /// Check the structural invariants the resolver and renderer index on.
    pub fn check_invariants(&self) -> Result<(), GraphError> {
        let count = self.sectors.len();
        for (i, s) in self.sectors.iter().enumerate() {
            if s.vertices.len() < 3 {
                return Err(GraphError::TooFewCorners {
                    sector: i,
                    corners: s.vertices.len(),
                });
            }
            if s.vertices.len() != s.neighbors.len() {
                return Err(GraphError::EdgeCountMismatch {
                    sector: i,
                    corners: s.vertices.len(),
                    neighbors: s.neighbors.len(),
                });
            }
            if !(s.floor < s.ceil) {
                return Err(GraphError::InvertedHeights {
                    sector: i,
                    floor: s.floor,
                    ceil: s.ceil,
                });
            }
            for (edge, n) in s.neighbors.iter().enumerate() {
                if let Neighbor::Portal(id) = *n {
                    if id as usize >= count || id as usize == i {
                        return Err(GraphError::BadNeighbor {
                            sector: i,
                            edge,
                            neighbor: id,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Vertex;
    use glam::vec2;

    /// 20×20 box with its right edge opening into a second box.
    fn two_rooms() -> Level {
        let v = |x: f32, y: f32| Vertex { pos: vec2(x, y) };
        Level {
            name: "two".into(),
            sectors: vec![
                Sector {
                    floor: 0.0,
                    ceil: 20.0,
                    vertices: vec![v(0.0, 0.0), v(20.0, 0.0), v(20.0, 20.0), v(0.0, 20.0)],
                    neighbors: vec![
                        Neighbor::Solid,
                        Neighbor::Portal(1),
                        Neighbor::Solid,
                        Neighbor::Solid,
                    ],
                },
                Sector {
                    floor: 4.0,
                    ceil: 16.0,
                    vertices: vec![v(20.0, 0.0), v(40.0, 0.0), v(40.0, 20.0), v(20.0, 20.0)],
                    neighbors: vec![
                        Neighbor::Solid,
                        Neighbor::Solid,
                        Neighbor::Solid,
                        Neighbor::Portal(0),
                    ],
                },
            ],
        }
    }

    #[test]
    fn edges_close_the_polygon() {
        let lvl = two_rooms();
        for s in &lvl.sectors {
            let n = s.vertices.len();
            assert_eq!(s.edges().count(), n);
            for (i, e) in s.edges().enumerate() {
                assert_eq!(e.a, s.vertices[i].pos);
                assert_eq!(e.b, s.vertices[(i + 1) % n].pos);
            }
        }
    }

    #[test]
    fn floors_below_ceilings() {
        let lvl = two_rooms();
        assert!(lvl.sectors.iter().all(|s| s.floor < s.ceil));
        assert!(lvl.check_invariants().is_ok());
    }

    #[test]
    fn portal_edges_coincide() {
        let lvl = two_rooms();
        let a = lvl.sector(0).edge(1);
        let b = lvl.sector(1).edge(3);
        // same segment, opposite direction
        assert_eq!(a.a, b.b);
        assert_eq!(a.b, b.a);
    }

    #[test]
    fn opening_is_overlap_of_both_sectors() {
        let lvl = two_rooms();
        assert_eq!(lvl.opening(0, 1), (4.0, 16.0));
        assert_eq!(lvl.opening(1, 0), (4.0, 16.0));
    }

    #[test]
    fn locate_sector_finds_interiors() {
        let lvl = two_rooms();
        assert_eq!(lvl.locate_sector(vec2(5.0, 5.0)), Some(0));
        assert_eq!(lvl.locate_sector(vec2(30.0, 5.0)), Some(1));
        assert_eq!(lvl.locate_sector(vec2(50.0, 5.0)), None);
        assert_eq!(lvl.portal_count(), 2);
    }

    #[test]
    fn invariant_check_catches_bad_neighbor() {
        let mut lvl = two_rooms();
        lvl.sectors[0].neighbors[1] = Neighbor::Portal(9);
        assert_eq!(
            lvl.check_invariants(),
            Err(GraphError::BadNeighbor {
                sector: 0,
                edge: 1,
                neighbor: 9
            })
        );
    }

    #[test]
    fn invariant_check_catches_inverted_heights() {
        let mut lvl = two_rooms();
        lvl.sectors[1].floor = 16.0;
        assert!(matches!(
            lvl.check_invariants(),
            Err(GraphError::InvertedHeights { sector: 1, .. })
        ));
    }
}

// ──────────────────────────────────────────────────────────────────────────
// map/loader.rs
//
//  *   RawMap  (map::parser)   ──>   world::Level  +  spawned Player
//
// The only place a sector graph is built. Every structural defect is an
// error here so the resolver and renderer can index without checks.
// ──────────────────────────────────────────────────────────────────────────

use std::path::Path;

use glam::Vec2;
use thiserror::Error;

use super::parser::{RawMap, RawSector, SOLID, parse_map};
use crate::{
    map::parser::ParseError,
    world::{
        GraphError, Level, Neighbor, Player, Sector, SectorId, Vertex, intersect::cross,
    },
};

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum MapError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("line {line}: vertex {vertex} does not exist ({count} declared)")]
    BadVertex {
        line: usize,
        vertex: i64,
        count: usize,
    },

    #[error("line {line}: neighbor {neighbor} is not a sector index")]
    BadNeighbor { line: usize, neighbor: i64 },

    #[error("sector {sector}: corners are not wound clockwise")]
    Winding { sector: usize },

    #[error("map has no player record")]
    NoPlayer,

    #[error("player starts in sector {sector}, map has {count}")]
    BadStartSector { sector: i64, count: usize },
}

/*====================================================================*/
/*                       Public API                                   */
/*====================================================================*/

/// Parse and validate map text.
pub fn load_map(text: &str) -> Result<(Level, Player), MapError> {
    build(parse_map(text)?, "unnamed")
}

/// [`load_map`] on a file; the level is named after the file stem.
pub fn load_map_file<P: AsRef<Path>>(path: P) -> Result<(Level, Player), MapError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unnamed".into());
    build(parse_map(&text)?, &name)
}

/*====================================================================*/
/*                       Internal helpers                             */
/*====================================================================*/

fn build(raw: RawMap, name: &str) -> Result<(Level, Player), MapError> {
    let sectors = raw
        .sectors
        .iter()
        .map(|s| build_sector(s, &raw.vertices))
        .collect::<Result<Vec<_>, _>>()?;

    let level = Level {
        name: name.to_string(),
        sectors,
    };
    level.check_invariants()?;

    for (i, s) in level.sectors.iter().enumerate() {
        if signed_area(s) <= 0.0 {
            return Err(MapError::Winding { sector: i });
        }
        for e in s.edges() {
            if e.is_degenerate() {
                log::warn!("sector {i} edge {}: zero length", e.index);
            }
        }
    }
    warn_unmatched_portals(&level);

    let rp = raw.player.ok_or(MapError::NoPlayer)?;
    let sector = SectorId::try_from(rp.sector)
        .ok()
        .filter(|&s| (s as usize) < level.sector_count())
        .ok_or(MapError::BadStartSector {
            sector: rp.sector,
            count: level.sector_count(),
        })?;
    if !level.sector(sector).contains(rp.pos) {
        log::warn!(
            "player start ({}, {}) lies outside sector {sector}",
            rp.pos.x,
            rp.pos.y
        );
    }
    let player = Player::spawn(&level, rp.pos.x, rp.pos.y, rp.angle, sector);

    log::info!(
        "level `{}`: {} sectors, {} vertices, {} portals",
        level.name,
        level.sector_count(),
        raw.vertices.len(),
        level.portal_count()
    );
    Ok((level, player))
}

/// Resolve indices and rotate the corner list so that edge `k` of the model
/// (`corners[k] → corners[k+1]`) is the edge the file attaches neighbor `k`
/// to (the one ending at file corner `k`).
fn build_sector(raw: &RawSector, verts: &[Vec2]) -> Result<Sector, MapError> {
    let line = raw.line;
    let corners = raw
        .corners
        .iter()
        .map(|&v| {
            usize::try_from(v)
                .ok()
                .and_then(|i| verts.get(i))
                .map(|&pos| Vertex { pos })
                .ok_or(MapError::BadVertex {
                    line,
                    vertex: v,
                    count: verts.len(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let neighbors = raw
        .neighbors
        .iter()
        .map(|&n| match n {
            SOLID => Ok(Neighbor::Solid),
            n => SectorId::try_from(n)
                .map(Neighbor::Portal)
                .map_err(|_| MapError::BadNeighbor { line, neighbor: n }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut vertices = corners;
    if !vertices.is_empty() {
        vertices.rotate_right(1);
    }
    Ok(Sector {
        floor: raw.floor,
        ceil: raw.ceil,
        vertices,
        neighbors,
    })
}

/// Twice the polygon area, positive for clockwise corners in the y-down
/// frame.
fn signed_area(s: &Sector) -> f32 {
    s.edges().map(|e| cross(e.a.x, e.a.y, e.b.x, e.b.y)).sum()
}

/// A portal should coincide with an edge of the sector it opens into.
fn warn_unmatched_portals(level: &Level) {
    for (i, s) in level.sectors.iter().enumerate() {
        for e in s.edges() {
            let Neighbor::Portal(n) = e.neighbor else {
                continue;
            };
            let shared = level
                .sector(n)
                .edges()
                .any(|o| (o.a == e.b && o.b == e.a) || (o.a == e.a && o.b == e.b));
            if !shared {
                log::warn!("sector {i} edge {}: portal to {n} has no matching edge", e.index);
            }
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/

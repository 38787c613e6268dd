//! Line-oriented text map format.
//!
//! ```text
//! # comment
//! vertex <y> <x0> <x1> ...                    one vertex per x, shared y
//! sector <floor> <ceil> <v0..vn-1> <n0..nn-1> neighbor -1 / x = solid
//! player <x> <y> <angle> <sector>
//! ```
//!
//! This stage only tokenises; index ranges and geometry are checked by the
//! loader.

use glam::{Vec2, vec2};
use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;
use thiserror::Error;

/// Sentinel the file format uses for "no neighbor".
pub const SOLID: i64 = -1;

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("line {line}: unknown record `{keyword}`")]
    UnknownRecord { line: usize, keyword: String },

    #[error("line {line}: `{token}` is not a number")]
    BadNumber { line: usize, token: String },

    #[error("line {line}: missing {what}")]
    Missing { line: usize, what: &'static str },

    #[error("line {line}: {count} corner/neighbor fields, expected an even count")]
    OddSectorFields { line: usize, count: usize },

    #[error("line {line}: unexpected trailing `{token}`")]
    Trailing { line: usize, token: String },

    #[error("line {line}: second player record")]
    DuplicatePlayer { line: usize },
}

/*─────────────────────────── Raw records ───────────────────────────*/

/// One `sector` record, indices not yet resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct RawSector {
    pub line: usize,
    pub floor: f32,
    pub ceil: f32,
    /// Global vertex indices, in file order.
    pub corners: SmallVec<[i64; 8]>,
    /// `neighbors[k]` belongs to the edge that ends at `corners[k]`.
    pub neighbors: SmallVec<[i64; 8]>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawPlayer {
    pub line: usize,
    pub pos: Vec2,
    pub angle: f32,
    pub sector: i64,
}

/// Everything a map file declares, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawMap {
    pub vertices: Vec<Vec2>,
    pub sectors: Vec<RawSector>,
    pub player: Option<RawPlayer>,
}

/*──────────────────────────── Parsing ──────────────────────────────*/

static RECORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_]+)(?:\s+(.*))?$").unwrap());

type Tokens<'a> = SmallVec<[&'a str; 16]>;

pub fn parse_map(text: &str) -> Result<RawMap, ParseError> {
    let mut map = RawMap::default();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let body = raw.split('#').next().unwrap_or("").trim();
        if body.is_empty() {
            continue;
        }
        let Some(caps) = RECORD.captures(body) else {
            return Err(ParseError::UnknownRecord {
                line,
                keyword: body.split_whitespace().next().unwrap_or(body).to_string(),
            });
        };
        let keyword = &caps[1];
        let fields: Tokens = caps
            .get(2)
            .map(|m| m.as_str().split_whitespace().collect())
            .unwrap_or_default();

        match keyword {
            "vertex" => parse_vertices(line, &fields, &mut map.vertices)?,
            "sector" => map.sectors.push(parse_sector(line, &fields)?),
            "player" => {
                if map.player.is_some() {
                    return Err(ParseError::DuplicatePlayer { line });
                }
                map.player = Some(parse_player(line, &fields)?);
            }
            other => {
                return Err(ParseError::UnknownRecord {
                    line,
                    keyword: other.to_string(),
                });
            }
        }
    }
    Ok(map)
}

fn parse_vertices(line: usize, f: &[&str], out: &mut Vec<Vec2>) -> Result<(), ParseError> {
    let (y, xs) = f.split_first().ok_or(ParseError::Missing { line, what: "y" })?;
    if xs.is_empty() {
        return Err(ParseError::Missing { line, what: "x" });
    }
    let y = float(line, y)?;
    for x in xs {
        out.push(vec2(float(line, x)?, y));
    }
    Ok(())
}

fn parse_sector(line: usize, f: &[&str]) -> Result<RawSector, ParseError> {
    let floor = float(line, f.first().ok_or(ParseError::Missing { line, what: "floor" })?)?;
    let ceil = float(line, f.get(1).ok_or(ParseError::Missing { line, what: "ceiling" })?)?;
    let rest = &f[2..];
    if rest.len() % 2 != 0 {
        return Err(ParseError::OddSectorFields {
            line,
            count: rest.len(),
        });
    }
    let (corners, neighbors) = rest.split_at(rest.len() / 2);
    Ok(RawSector {
        line,
        floor,
        ceil,
        corners: corners
            .iter()
            .map(|t| int(line, t))
            .collect::<Result<_, _>>()?,
        neighbors: neighbors
            .iter()
            .map(|t| neighbor(line, t))
            .collect::<Result<_, _>>()?,
    })
}

fn parse_player(line: usize, f: &[&str]) -> Result<RawPlayer, ParseError> {
    const WHAT: [&str; 4] = ["x", "y", "angle", "sector"];
    if let Some(extra) = f.get(WHAT.len()) {
        return Err(ParseError::Trailing {
            line,
            token: extra.to_string(),
        });
    }
    let field = |i: usize| f.get(i).copied().ok_or(ParseError::Missing { line, what: WHAT[i] });
    Ok(RawPlayer {
        line,
        pos: vec2(float(line, field(0)?)?, float(line, field(1)?)?),
        angle: float(line, field(2)?)?,
        sector: int(line, field(3)?)?,
    })
}

/*──────────────────────────── Tokens ───────────────────────────────*/

fn float(line: usize, t: &str) -> Result<f32, ParseError> {
    t.parse().map_err(|_| ParseError::BadNumber {
        line,
        token: t.to_string(),
    })
}

fn int(line: usize, t: &str) -> Result<i64, ParseError> {
    t.parse().map_err(|_| ParseError::BadNumber {
        line,
        token: t.to_string(),
    })
}

fn neighbor(line: usize, t: &str) -> Result<i64, ParseError> {
    if t.eq_ignore_ascii_case("x") {
        Ok(SOLID)
    } else {
        int(line, t)
    }
}

//! Text map ingestion: [`parser`] tokenises, [`loader`] resolves indices,
//! validates the graph and spawns the player.

mod loader;
pub mod parser;

pub use loader::{MapError, load_map, load_map_file};
pub use parser::{ParseError, RawMap, parse_map};

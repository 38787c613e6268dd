mod camera;
mod geometry;
mod helpers;
pub mod intersect;
mod texture;

pub use geometry::{Edge, GraphError, Level, Neighbor, Sector, SectorId, Vertex};

pub use camera::{Player, PlayerState};

pub use texture::{NO_TEXTURE, Texture, TextureBank, TextureError, TextureId};

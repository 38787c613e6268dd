//! Sector/portal software renderer.
//!
//! * [`world`]    – sector graph, geometry primitives, camera, textures
//! * [`map`]      – text map loader (the only place a graph is built)
//! * [`sim`]      – movement & collision against the sector graph
//! * [`engine`]   – portal traversal that turns the graph into columns
//! * [`renderer`] – presentation back-ends that receive those columns
//! * [`game`]     – one frame = intent → resolve → render

pub mod config;
pub mod engine;
pub mod game;
pub mod map;
pub mod renderer;
pub mod sim;
pub mod world;

#[cfg(test)]
pub(crate) mod testing;

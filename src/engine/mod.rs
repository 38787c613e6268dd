//! Portal renderer.
//!
//! Breadth-first over the sector graph: each [`DrawTask`] draws one sector
//! inside a column range, every visible portal narrows the per-column
//! window and queues its neighbor behind it.

#[allow(clippy::module_inception)]
mod engine;
mod projection;
mod queue;
mod types;
mod walls;

pub use engine::Engine;
pub use projection::{ProjectedEdge, project_edge};
pub use queue::RingQueue;
pub use types::{ClipBands, DrawTask, FrameStats, Screen, Visit};

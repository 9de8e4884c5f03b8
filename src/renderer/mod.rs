//! wgpu pipelines for the three particle/instance systems.
//!
//! Each renderer owns its pipeline, its immutable instance-step attribute
//! buffer, and a small per-frame globals uniform. The engine calls
//! `prepare` once per frame with the broadcast mix/time scalars, then
//! records the draws in back-to-front order (ornaments, foliage, snow).

pub mod foliage;
pub mod geometry;
pub mod ornament;
pub mod snow;

pub use foliage::FoliageRenderer;
pub use ornament::OrnamentRenderer;
pub use snow::SnowRenderer;

//! Host-side animation: easing curves and the formation toggle.
//!
//! The scene has exactly two logical states (scattered and tree-shaped) but
//! a continuous visual parameter. This module keeps the two separate: a
//! discrete [`Formation`] target and a [`FormationMix`] scalar that eases
//! toward it over time. The spatial smoothstep applied inside the shaders
//! is a different curve and lives with the shading math.

pub mod easing;
pub mod formation;

pub use easing::EasingFunction;
pub use formation::{Formation, FormationMix};

// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// GPU / graphics allowances — casts are intentional and safe
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
// Float comparison: graphics math frequently compares against 0.0, 1.0, etc.
#![allow(clippy::float_cmp)]
// Pedantic allowances
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unreadable_literal)]

//! GPU-accelerated decorative evergreen scene renderer built on wgpu.
//!
//! Evergreen renders three particle/instance systems — point-sprite foliage,
//! instanced ornaments, and falling snow — whose positions interpolate
//! between a scattered spherical cloud and an assembled tree cone, driven by
//! a single continuously-animated mix scalar.
//!
//! # Key entry points
//!
//! - [`engine::SceneRenderEngine`] - the main rendering engine
//! - [`scene::Scene`] - the generated attribute sets (foliage, ornaments, snow)
//! - [`animation::FormationMix`] - the host-side formation toggle animator
//! - [`options::Options`] - runtime configuration (scene, camera, lighting)
//!
//! # Architecture
//!
//! All per-point and per-instance attributes are generated once at scene
//! construction and uploaded verbatim into instance-step vertex buffers;
//! they are never mutated afterward. Every frame the engine broadcasts two
//! scalars — the eased formation mix and the elapsed-time clock — and the
//! GPU evaluates each point and instance independently. The [`shading`]
//! module carries a CPU mirror of the shader math so the visual behavior is
//! testable without a rendering context.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod lighting;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod shading;

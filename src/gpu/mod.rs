//! Core GPU plumbing: device/queue ownership and pipeline boilerplate.

pub mod pipeline_helpers;
pub mod render_context;

pub use render_context::{RenderContext, RenderContextError};

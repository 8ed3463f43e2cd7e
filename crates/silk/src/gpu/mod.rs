//! wgpu implementation of the host surface capability.
//!
//! - `context` owns instance/adapter/device/surface wiring: it negotiates a
//!   transparent, anti-aliased swapchain and knows how to reconfigure it on
//!   resize.
//! - `pipeline` compiles the static GLSL pair from [`crate::shader`] into a
//!   render pipeline with the quad vertex buffer and the single uniform bind
//!   group.
//!
//! [`WgpuSurfaceFactory`] is what embedding hosts hand to the lifecycle
//! controller; everything else stays crate-private.

mod context;
mod pipeline;

pub use context::{WgpuSurface, WgpuSurfaceFactory};

//! Render-lifecycle controller for a GPU-shaded animated silk background.
//!
//! The crate manages exactly one full-viewport textured quad driven by a
//! time-varying shader program. The overall flow is:
//!
//! ```text
//!   host (winit window, test fake, ...)
//!          │ SurfaceFactory + FrameScheduler
//!          ▼
//!   SilkView::mount ──▶ RenderContext { surface, scene, uniforms }
//!          │
//!          ├─ visibility_changed ──▶ VisibilityGate ──▶ running flag
//!          ├─ container_resized ──▶ SceneState ──▶ transform uniform
//!          ├─ set_speed / set_color / ... ──▶ live uniform writes
//!          └─ frame ──▶ submit + reschedule while running
//! ```
//!
//! [`SilkView`] owns the single live render context and is the only type
//! with a full lifecycle; the host traits in [`host`] keep it independent of
//! any concrete windowing system, with the production wgpu implementation in
//! [`gpu`].

pub mod color;
pub mod gpu;
pub mod host;
pub mod params;
pub mod scene;
pub mod shader;
pub mod uniforms;
pub mod view;
pub mod visibility;

pub use color::hex_to_normalized_rgb;
pub use gpu::{WgpuSurface, WgpuSurfaceFactory};
pub use host::{FrameError, FrameScheduler, HeadlessFactory, RenderSurface, SurfaceFactory};
pub use params::SilkParams;
pub use scene::{CameraBounds, SceneState};
pub use uniforms::SilkUniforms;
pub use view::{Phase, SilkView};
pub use visibility::{VisibilityGate, VisibilityTransition};

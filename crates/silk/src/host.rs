//! Capability seams between the lifecycle controller and its host.
//!
//! The controller never touches the windowing system or GPU backend
//! directly; it depends on these three traits instead. The production
//! implementations live in [`crate::gpu`] (surfaces) and in the embedding
//! binary (frame scheduling), while tests substitute in-memory fakes and
//! non-rendering hosts use [`HeadlessFactory`].

use anyhow::Result;
use winit::dpi::PhysicalSize;

use crate::uniforms::SilkUniforms;

/// Error raised by per-frame GPU submission.
///
/// Steady-state frame failures are fatal to the animation loop: the
/// controller stops rescheduling and surfaces the error to the host rather
/// than retrying forever.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("failed to acquire surface frame: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// A live GPU-backed render target attached to the host container.
///
/// Dropping the surface detaches and releases it; implementations must not
/// require an explicit teardown call.
pub trait RenderSurface {
    /// Current pixel dimensions.
    fn size(&self) -> PhysicalSize<u32>;

    /// Updates the surface pixel dimensions in one reconfigure, without
    /// triggering any host relayout.
    fn resize(&mut self, size: PhysicalSize<u32>);

    /// Uploads the uniform mirror and draws one frame.
    fn submit(&mut self, uniforms: &SilkUniforms) -> Result<(), FrameError>;
}

/// Creates render surfaces on the host container.
pub trait SurfaceFactory {
    type Surface: RenderSurface;

    /// Whether this host can perform GPU work at all. A `false` here makes
    /// the controller settle into a permanently idle state instead of
    /// erroring (server-side render passes, headless test hosts).
    fn is_available(&self) -> bool {
        true
    }

    /// Allocates a transparent, anti-aliased surface sized to the container.
    ///
    /// Failures propagate to the mount caller; the factory must not hand
    /// back a half-initialized surface.
    fn create(&mut self, size: PhysicalSize<u32>) -> Result<Self::Surface>;
}

/// The host's per-frame callback queue.
///
/// At most one frame is pending at a time; the controller tracks pendency
/// itself and only calls `request_frame` when nothing is scheduled.
pub trait FrameScheduler {
    /// Asks the host to deliver one frame callback.
    fn request_frame(&mut self);

    /// Cancels the pending callback. Only invoked at full teardown; the
    /// visibility path stops cooperatively via the running flag instead.
    fn cancel_pending(&mut self);
}

/// Factory for hosts without any rendering capability.
///
/// Mounting with this factory parks the controller in its idle state; no
/// GPU work happens and nothing is ever created.
#[derive(Debug, Default)]
pub struct HeadlessFactory;

impl SurfaceFactory for HeadlessFactory {
    type Surface = HeadlessSurface;

    fn is_available(&self) -> bool {
        false
    }

    fn create(&mut self, _size: PhysicalSize<u32>) -> Result<Self::Surface> {
        anyhow::bail!("headless host cannot create render surfaces")
    }
}

/// Inert surface type backing [`HeadlessFactory`]; never instantiated.
#[derive(Debug)]
pub struct HeadlessSurface;

impl RenderSurface for HeadlessSurface {
    fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(0, 0)
    }

    fn resize(&mut self, _size: PhysicalSize<u32>) {}

    fn submit(&mut self, _uniforms: &SilkUniforms) -> Result<(), FrameError> {
        Ok(())
    }
}

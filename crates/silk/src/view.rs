//! The render-lifecycle controller.
//!
//! `SilkView` is the only component with a full lifecycle: it owns the one
//! live [`RenderContext`], gates the animation loop on visibility, keeps the
//! surface in sync with the host container's size, and routes parameter
//! updates into live uniforms. Everything asynchronous arrives through three
//! entry points the host wires up: `visibility_changed`, `container_resized`,
//! and `frame`; all three are idempotent with respect to repeated firing.

use anyhow::{Context as AnyhowContext, Result};
use winit::dpi::PhysicalSize;

use crate::color::hex_to_normalized_rgb;
use crate::host::{FrameError, FrameScheduler, RenderSurface, SurfaceFactory};
use crate::params::SilkParams;
use crate::scene::{CameraBounds, SceneState};
use crate::uniforms::SilkUniforms;
use crate::visibility::{VisibilityGate, VisibilityTransition};

/// Per-frame advance of the internally owned animation clock.
const FRAME_TIME_STEP: f32 = 0.1;

/// Lifecycle phase of the controller.
///
/// `Idle` is the permanently parked variant of the mounted state used on
/// hosts without rendering capability: no GPU work, no errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Unmounted,
    Initializing,
    Active,
    Idle,
    Destroyed,
}

/// Everything that lives and dies with the GPU context.
///
/// Exactly one instance exists while the controller is mounted on a capable
/// host; it is destroyed and recreated as a unit, never partially.
struct RenderContext<S: RenderSurface> {
    surface: S,
    scene: SceneState,
    uniforms: SilkUniforms,
}

/// Owns the render lifecycle for one silk background.
pub struct SilkView<F: SurfaceFactory, C: FrameScheduler> {
    factory: F,
    scheduler: C,
    params: SilkParams,
    gate: VisibilityGate,
    phase: Phase,
    running: bool,
    frame_pending: bool,
    container: PhysicalSize<u32>,
    ctx: Option<RenderContext<F::Surface>>,
}

impl<F: SurfaceFactory, C: FrameScheduler> SilkView<F, C> {
    pub fn new(factory: F, scheduler: C) -> Self {
        Self::with_params(factory, scheduler, SilkParams::default())
    }

    pub fn with_params(factory: F, scheduler: C, params: SilkParams) -> Self {
        Self {
            factory,
            scheduler,
            params,
            gate: VisibilityGate::new(),
            phase: Phase::Unmounted,
            running: false,
            frame_pending: false,
            container: PhysicalSize::new(0, 0),
            ctx: None,
        }
    }

    /// Mounts the view on a container of the given pixel size.
    ///
    /// On hosts without rendering capability this parks the view in the idle
    /// phase and returns `Ok`. Surface creation failure propagates and the
    /// view keeps no half-initialized context. Calling `mount` again while
    /// mounted rebuilds the context in place; the old surface is fully
    /// released before the new one is created.
    pub fn mount(&mut self, container: PhysicalSize<u32>) -> Result<()> {
        anyhow::ensure!(
            self.phase != Phase::Destroyed,
            "cannot mount a destroyed silk view"
        );

        self.container = container;
        if !self.factory.is_available() {
            tracing::debug!("host cannot render; silk view staying idle");
            self.phase = Phase::Idle;
            return Ok(());
        }

        self.phase = Phase::Initializing;
        match self.setup_context() {
            Ok(()) => {
                self.phase = Phase::Active;
                tracing::debug!(
                    width = container.width,
                    height = container.height,
                    "silk view mounted"
                );
                Ok(())
            }
            Err(err) => {
                // setup_context dropped any previous surface before failing,
                // so nothing dangles here.
                self.phase = Phase::Unmounted;
                Err(err).context("failed to mount silk view")
            }
        }
    }

    /// Tears the old context down (if any) and builds a fresh one, seeding
    /// uniforms from the cached parameter snapshot.
    fn setup_context(&mut self) -> Result<()> {
        // Never two live surfaces: release before creating.
        drop(self.ctx.take());

        let surface = self.factory.create(self.container)?;
        let scene = SceneState::new(self.container);
        let uniforms = SilkUniforms::from_params(&self.params, scene.transform());
        self.ctx = Some(RenderContext {
            surface,
            scene,
            uniforms,
        });

        // A container can already have its final size before the first
        // resize notification fires, so synchronize eagerly.
        self.sync_size(self.container);
        Ok(())
    }

    /// Unmounts the view: stops scheduling, then releases the surface.
    ///
    /// Terminal and idempotent. The pending frame is cancelled outright
    /// here, unlike the cooperative visibility stop.
    pub fn unmount(&mut self) {
        if self.phase == Phase::Destroyed {
            return;
        }
        self.running = false;
        if self.frame_pending {
            self.scheduler.cancel_pending();
            self.frame_pending = false;
        }
        // Scheduling is stopped above before the surface goes away, so no
        // frame callback can observe a released surface.
        drop(self.ctx.take());
        self.phase = Phase::Destroyed;
        tracing::debug!("silk view destroyed");
    }

    /// Host notification that the render target's viewport intersection
    /// changed. Any positive intersection counts as visible.
    pub fn visibility_changed(&mut self, intersecting: bool) {
        if self.phase != Phase::Active {
            return;
        }
        match self.gate.observe(intersecting) {
            VisibilityTransition::BecameVisible => {
                self.running = true;
                self.schedule_frame();
            }
            VisibilityTransition::BecameHidden => {
                // Cooperative stop: the in-flight frame observes the flag
                // and does not reschedule. Bounded one-frame staleness.
                self.running = false;
            }
            VisibilityTransition::Unchanged => {}
        }
    }

    /// Host notification that the container's box changed size.
    pub fn container_resized(&mut self, size: PhysicalSize<u32>) {
        self.container = size;
        self.sync_size(size);
    }

    fn sync_size(&mut self, size: PhysicalSize<u32>) {
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.surface.resize(size);
            ctx.scene.resize(size);
            ctx.uniforms.transform = ctx.scene.transform();
        }
    }

    /// The scheduled frame callback: advances the clock, submits one frame,
    /// and reschedules while the running flag holds.
    ///
    /// A submission failure is fatal to the loop; the error propagates and
    /// no further frame is scheduled.
    pub fn frame(&mut self) -> Result<(), FrameError> {
        self.frame_pending = false;
        if !self.running {
            return Ok(());
        }
        let Some(ctx) = self.ctx.as_mut() else {
            return Ok(());
        };

        ctx.uniforms.advance_time(FRAME_TIME_STEP);
        match ctx.surface.submit(&ctx.uniforms) {
            Ok(()) => {
                self.schedule_frame();
                Ok(())
            }
            Err(err) => {
                self.running = false;
                tracing::error!(error = %err, "frame submission failed; stopping animation loop");
                Err(err)
            }
        }
    }

    fn schedule_frame(&mut self) {
        if !self.frame_pending {
            self.scheduler.request_frame();
            self.frame_pending = true;
        }
    }

    /// Updates the animation speed, live if a context exists.
    pub fn set_speed(&mut self, value: f32) {
        self.params.speed = value;
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.uniforms.speed = value;
        }
    }

    /// Updates the pattern's spatial frequency, live if a context exists.
    pub fn set_scale(&mut self, value: f32) {
        self.params.scale = value;
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.uniforms.scale = value;
        }
    }

    /// Updates the base tint from a hex string, live if a context exists.
    pub fn set_color(&mut self, value: impl Into<String>) {
        self.params.color = value.into();
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.uniforms.color = hex_to_normalized_rgb(&self.params.color);
        }
    }

    /// Updates the dither noise magnitude, live if a context exists.
    pub fn set_noise_intensity(&mut self, value: f32) {
        self.params.noise_intensity = value;
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.uniforms.noise_intensity = value;
        }
    }

    /// Updates the UV rotation angle (radians), live if a context exists.
    pub fn set_rotation(&mut self, value: f32) {
        self.params.rotation = value;
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.uniforms.rotation = value;
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn params(&self) -> &SilkParams {
        &self.params
    }

    /// Current uniform values, if a context exists.
    pub fn uniforms(&self) -> Option<&SilkUniforms> {
        self.ctx.as_ref().map(|ctx| &ctx.uniforms)
    }

    /// Current camera bounds, if a context exists.
    pub fn camera_bounds(&self) -> Option<CameraBounds> {
        self.ctx.as_ref().map(|ctx| ctx.scene.bounds())
    }

    /// Current quad scale, if a context exists.
    pub fn quad_scale(&self) -> Option<[f32; 3]> {
        self.ctx.as_ref().map(|ctx| ctx.scene.quad_scale())
    }
}

impl<F: SurfaceFactory, C: FrameScheduler> Drop for SilkView<F, C> {
    fn drop(&mut self) {
        self.unmount();
    }
}

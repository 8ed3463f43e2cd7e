use std::sync::Arc;

use anyhow::{anyhow, Result};
use silk::{FrameScheduler, SilkParams, SilkView, WgpuSurfaceFactory};
use tracing::error;
use tracing_subscriber::EnvFilter;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

use crate::cli::{parse_size, Args};

const DEFAULT_WINDOW_SIZE: (u32, u32) = (1280, 720);

/// Drives the silk controller's per-frame callback through winit redraws.
///
/// winit cannot cancel a requested redraw, so `cancel_pending` is a no-op;
/// the controller drops stray callbacks after teardown on its own.
struct WindowScheduler {
    window: Arc<Window>,
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&mut self) {
        self.window.request_redraw();
    }

    fn cancel_pending(&mut self) {}
}

pub fn run(args: Args) -> Result<()> {
    initialise_tracing();

    let params = params_from_args(&args);
    let (width, height) = match args.size.as_deref() {
        Some(value) => parse_size(value)?,
        None => DEFAULT_WINDOW_SIZE,
    };

    let event_loop = EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;
    let window = WindowBuilder::new()
        .with_title("silkview")
        .with_transparent(true)
        .with_inner_size(PhysicalSize::new(width, height))
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create preview window: {err}"))?;
    let window = Arc::new(window);

    let mut view = SilkView::with_params(
        WgpuSurfaceFactory::new(window.clone()),
        WindowScheduler {
            window: window.clone(),
        },
        params,
    );
    view.mount(window.inner_size())?;
    // Freshly created windows are on screen; some platforms never deliver
    // an initial Occluded(false), so seed the gate ourselves.
    view.visibility_changed(true);

    tracing::info!(width, height, "silk preview running");

    event_loop
        .run(move |event, elwt| {
            if let Event::WindowEvent { window_id, event } = event {
                if window_id != window.id() {
                    return;
                }
                match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                        view.unmount();
                        elwt.exit();
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if event.state == ElementState::Pressed
                            && matches!(event.logical_key, Key::Named(NamedKey::Escape))
                        {
                            view.unmount();
                            elwt.exit();
                        }
                    }
                    WindowEvent::Occluded(occluded) => {
                        view.visibility_changed(!occluded);
                    }
                    WindowEvent::Resized(size) => {
                        view.container_resized(size);
                    }
                    WindowEvent::RedrawRequested => {
                        if let Err(err) = view.frame() {
                            error!("frame failed: {err:?}");
                            view.unmount();
                            elwt.exit();
                        }
                    }
                    _ => {}
                }
            }
        })
        .map_err(|err| anyhow!("event loop error: {err}"))
}

fn params_from_args(args: &Args) -> SilkParams {
    let mut params = SilkParams::default();
    if let Some(speed) = args.speed {
        params.speed = speed;
    }
    if let Some(scale) = args.scale {
        params.scale = scale;
    }
    if let Some(ref color) = args.color {
        params.color = color.clone();
    }
    if let Some(noise_intensity) = args.noise_intensity {
        params.noise_intensity = noise_intensity;
    }
    if let Some(rotation) = args.rotation {
        params.rotation = rotation;
    }
    params
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

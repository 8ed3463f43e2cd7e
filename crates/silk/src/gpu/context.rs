use std::sync::Arc;

use anyhow::{anyhow, Context as AnyhowContext, Result};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use wgpu::TextureFormatFeatureFlags;
use winit::dpi::PhysicalSize;

use crate::host::{FrameError, RenderSurface, SurfaceFactory};
use crate::uniforms::SilkUniforms;

use super::pipeline::QuadPipeline;

/// Highest MSAA sample count requested before device negotiation.
const MAX_SAMPLE_COUNT: u32 = 4;

/// Creates [`WgpuSurface`]s on a windowing target.
///
/// The factory keeps the target alive through an `Arc`; surfaces are created
/// against its raw handles, so the target must outlive every surface built
/// from it (the embedding host owns both for the same span).
pub struct WgpuSurfaceFactory<T> {
    target: Arc<T>,
}

impl<T> WgpuSurfaceFactory<T>
where
    T: HasDisplayHandle + HasWindowHandle,
{
    pub fn new(target: Arc<T>) -> Self {
        Self { target }
    }
}

impl<T> SurfaceFactory for WgpuSurfaceFactory<T>
where
    T: HasDisplayHandle + HasWindowHandle,
{
    type Surface = WgpuSurface;

    fn create(&mut self, size: PhysicalSize<u32>) -> Result<Self::Surface> {
        WgpuSurface::new(self.target.as_ref(), size)
    }
}

/// Owns the full wgpu stack for one render target.
///
/// Dropping the surface releases the swapchain, device, and instance; the
/// lifecycle controller relies on that for teardown and re-setup.
pub struct WgpuSurface {
    _instance: wgpu::Instance,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    sample_count: u32,
    pipeline: QuadPipeline,
    multisample_view: Option<wgpu::TextureView>,
}

impl WgpuSurface {
    fn new<T>(target: &T, initial_size: PhysicalSize<u32>) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            flags: wgpu::InstanceFlags::default(),
            memory_budget_thresholds: wgpu::MemoryBudgetThresholds::default(),
            backend_options: wgpu::BackendOptions::default(),
        });

        let window_handle = target
            .window_handle()
            .map_err(|err| anyhow!("failed to acquire window handle: {err}"))?;
        let display_handle = target
            .display_handle()
            .map_err(|err| anyhow!("failed to acquire display handle: {err}"))?;

        // The factory holds the target Arc for at least as long as this
        // surface, which is what makes the raw-handle creation sound.
        let surface = unsafe {
            instance.create_surface_unsafe(wgpu::SurfaceTargetUnsafe::RawHandle {
                raw_display_handle: display_handle.as_raw(),
                raw_window_handle: window_handle.as_raw(),
            })
        }
        .context("failed to create rendering surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("failed to find a suitable GPU adapter")?;

        let adapter_info = adapter.get_info();
        tracing::debug!(
            name = %adapter_info.name,
            backend = ?adapter_info.backend,
            device_type = ?adapter_info.device_type,
            "selected GPU adapter"
        );

        let limits = adapter.limits();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|format| !format.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let sample_count = negotiate_sample_count(&adapter, surface_format);

        let alpha_mode = [
            wgpu::CompositeAlphaMode::PreMultiplied,
            wgpu::CompositeAlphaMode::PostMultiplied,
        ]
        .into_iter()
        .find(|mode| surface_caps.alpha_modes.contains(mode))
        .unwrap_or_else(|| {
            tracing::warn!(
                modes = ?surface_caps.alpha_modes,
                "surface does not support transparent compositing; using first advertised alpha mode"
            );
            surface_caps.alpha_modes[0]
        });

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("silk device"),
            required_features: wgpu::Features::empty(),
            required_limits: limits,
            memory_hints: wgpu::MemoryHints::MemoryUsage,
            trace: wgpu::Trace::default(),
        }))
        .context("failed to create GPU device")?;

        let size = PhysicalSize::new(initial_size.width.max(1), initial_size.height.max(1));
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = QuadPipeline::new(&device, surface_format, sample_count);

        let multisample_view = if sample_count > 1 {
            Some(create_multisample_view(
                &device,
                surface_format,
                size,
                sample_count,
            ))
        } else {
            None
        };

        tracing::debug!(
            width = size.width,
            height = size.height,
            ?surface_format,
            sample_count,
            ?alpha_mode,
            "silk surface ready"
        );

        Ok(Self {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            size,
            sample_count,
            pipeline,
            multisample_view,
        })
    }
}

impl RenderSurface for WgpuSurface {
    fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        if self.sample_count > 1 {
            self.multisample_view = Some(create_multisample_view(
                &self.device,
                self.config.format,
                new_size,
                self.sample_count,
            ));
        }
    }

    fn submit(&mut self, uniforms: &SilkUniforms) -> Result<(), FrameError> {
        self.queue.write_buffer(
            self.pipeline.uniform_buffer(),
            0,
            bytemuck::bytes_of(uniforms),
        );

        let frame = self.surface.get_current_texture()?;
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (attachment_view, resolve_target) = match self.multisample_view.as_ref() {
            Some(msaa_view) => (msaa_view, Some(&frame_view)),
            None => (&frame_view, None),
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("silk frame encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("silk render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: attachment_view,
                    depth_slice: None,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.pipeline.draw(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Picks the highest surface-resolvable MSAA sample count up to
/// [`MAX_SAMPLE_COUNT`], falling back to 1 when the format cannot resolve.
fn negotiate_sample_count(adapter: &wgpu::Adapter, format: wgpu::TextureFormat) -> u32 {
    let format_features = adapter.get_texture_format_features(format);
    if !format_features
        .flags
        .contains(TextureFormatFeatureFlags::MULTISAMPLE_RESOLVE)
    {
        tracing::warn!(?format, "surface format cannot resolve MSAA; disabling");
        return 1;
    }

    format_features
        .flags
        .supported_sample_counts()
        .into_iter()
        .filter(|&count| count <= MAX_SAMPLE_COUNT)
        .max()
        .unwrap_or(1)
}

fn create_multisample_view(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    size: PhysicalSize<u32>,
    sample_count: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("silk msaa color target"),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

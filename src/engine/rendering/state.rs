use crate::rendering::error::*;
use log::info;
use snafu::{OptionExt, ResultExt};
use std::sync::Arc;
use wgpu::{
    CompositeAlphaMode, Device, DeviceDescriptor, Extent3d, Instance, PowerPreference, PresentMode,
    Queue, RequestAdapterOptions, Surface, SurfaceConfiguration, Texture, TextureDescriptor,
    TextureDimension, TextureFormat, TextureUsages, TextureView, TextureViewDescriptor,
};
use winit::dpi::PhysicalSize;
use winit::window::Window;

pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

/// The GPU device and the window surface it draws into.
pub struct State {
    pub surface: Surface<'static>,
    pub device: Device,
    pub queue: Queue,
    pub config: SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    depth_texture: Texture,
    depth_view: TextureView,
}

impl State {
    pub async fn new(window: Arc<Window>) -> Result<State> {
        let size = window.inner_size();
        let instance = Instance::default();
        let surface = instance
            .create_surface(window)
            .context(CreateSurfaceErr)?;

        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                power_preference: PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context(RequestAdapterErr)?;

        let info = adapter.get_info();
        info!("Using {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                label: Some("Jenga Device"),
                ..DeviceDescriptor::default()
            })
            .await
            .context(RequestDeviceErr)?;

        let caps = surface.get_capabilities(&adapter);
        // lighting is computed in linear space and relies on the surface encoding to sRGB
        let format = caps
            .formats
            .iter()
            .copied()
            .find(TextureFormat::is_srgb)
            .or_else(|| caps.formats.first().copied())
            .context(SurfaceUnsupportedErr)?;

        let config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let depth_texture = Self::create_depth_texture(&device, &config);
        let depth_view = depth_texture.create_view(&TextureViewDescriptor::default());

        Ok(State {
            surface,
            device,
            queue,
            config,
            size,
            depth_texture,
            depth_view,
        })
    }

    fn create_depth_texture(device: &Device, config: &SurfaceConfiguration) -> Texture {
        device.create_texture(&TextureDescriptor {
            label: Some("Depth Texture"),
            size: Extent3d {
                width: config.width.max(1),
                height: config.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
    }

    pub fn depth_view(&self) -> &TextureView {
        &self.depth_view
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.reconfigure();
    }

    /// Configures the surface again, e.g. after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = Self::create_depth_texture(&self.device, &self.config);
        self.depth_view = self
            .depth_texture
            .create_view(&TextureViewDescriptor::default());
    }
}

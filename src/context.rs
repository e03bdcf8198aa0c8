//! Window surface, device and queue.
//!
//! Acquiring a GPU context first asks the primary backend set for an adapter
//! without any surface and, when that yields nothing, falls back once to the
//! GL backend. Only then is the window's surface created, exactly once, on
//! the chosen instance: a `<canvas>` keeps whichever context it hands out
//! first, so a WebGPU surface would block the WebGL2 fallback. If neither
//! backend works the scene cannot be shown at all.

use std::sync::Arc;

use winit::window::Window;

use crate::{camera::aspect_ratio, data_structures::texture, error::SetupError};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BackendChoice {
    pub backends: wgpu::Backends,
    pub name: &'static str,
}

#[cfg(target_arch = "wasm32")]
pub const PRIMARY: BackendChoice = BackendChoice {
    backends: wgpu::Backends::BROWSER_WEBGPU,
    name: "WebGPU",
};
#[cfg(target_arch = "wasm32")]
pub const FALLBACK: BackendChoice = BackendChoice {
    backends: wgpu::Backends::GL,
    name: "WebGL2",
};
#[cfg(not(target_arch = "wasm32"))]
pub const PRIMARY: BackendChoice = BackendChoice {
    backends: wgpu::Backends::PRIMARY,
    name: "Vulkan/Metal/DX12",
};
#[cfg(not(target_arch = "wasm32"))]
pub const FALLBACK: BackendChoice = BackendChoice {
    backends: wgpu::Backends::GL,
    name: "OpenGL",
};

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
}

impl Context {
    pub async fn new(window: Arc<Window>) -> Result<Self, SetupError> {
        let size = window.inner_size();

        let choice = choose_backend(probe_adapter).await;
        let (surface, adapter) = acquire(window.clone(), choice)
            .await
            .map_err(|reason| SetupError::ContextUnavailable {
                primary: PRIMARY.name,
                fallback: FALLBACK.name,
                reason,
            })?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                // WebGL doesn't support all of wgpu's features, so if
                // we're building for the web we'll have to disable some.
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::default()
                },
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
                ..Default::default()
            })
            .await
            .map_err(|e| SetupError::ContextUnavailable {
                primary: PRIMARY.name,
                fallback: FALLBACK.name,
                reason: e.to_string(),
            })?;

        let surface_caps = surface.get_capabilities(&adapter);
        // The textures are uploaded as sRGB, so prefer an sRGB surface to
        // keep colours from coming out darker.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| SetupError::ContextUnavailable {
                primary: PRIMARY.name,
                fallback: FALLBACK.name,
                reason: "surface reports no texture formats".to_string(),
            })?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
        })
    }

    pub fn aspect(&self) -> f32 {
        aspect_ratio(self.config.width, self.config.height)
    }

    /// Reconfigures the surface and depth buffer. Zero-sized requests (a
    /// minimised window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = texture::Texture::create_depth_texture(
                &self.device,
                [self.config.width, self.config.height],
                "depth_texture",
            );
        }
    }
}

/// Picks the backend set the surface will be created on.
///
/// `probe` is asked about the primary set only. When it has no adapter the
/// fallback is returned untested; creating its surface is the real test.
pub async fn choose_backend<F>(mut probe: F) -> BackendChoice
where
    F: AsyncFnMut(BackendChoice) -> Result<(), String>,
{
    match probe(PRIMARY).await {
        Ok(()) => PRIMARY,
        Err(reason) => {
            log::warn!(
                "{} not supported ({}), falling back on {}",
                PRIMARY.name,
                reason,
                FALLBACK.name
            );
            FALLBACK
        }
    }
}

fn instance_for(choice: BackendChoice) -> wgpu::Instance {
    wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: choice.backends,
        ..Default::default()
    })
}

/// Looks for any adapter on `choice` without touching the window.
async fn probe_adapter(choice: BackendChoice) -> Result<(), String> {
    instance_for(choice)
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .map(|_| ())
        .map_err(|e| e.to_string())
}

async fn acquire(
    window: Arc<Window>,
    choice: BackendChoice,
) -> Result<(wgpu::Surface<'static>, wgpu::Adapter), String> {
    let instance = instance_for(choice);
    let surface = instance
        .create_surface(window)
        .map_err(|e| e.to_string())?;
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| e.to_string())?;
    Ok((surface, adapter))
}

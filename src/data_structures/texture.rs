//! GPU textures and texture creation utilities.
//!
//! This module provides [`Texture`], a wrapper around WGPU texture resources,
//! and helpers for the depth buffer and for uploading decoded images.

use image::GenericImageView;

/// A GPU texture and its default view.
///
/// Colour textures come from [`from_image`](Self::from_image) and are
/// sampled through [`create_clamped_sampler`]; the depth texture comes from
/// [`create_depth_texture`](Self::create_depth_texture) and is never sampled.
#[derive(Clone, Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl Texture {
    /// Standard depth buffer texture format (32-bit float).
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Create a depth texture for depth-testing during rendering.
    ///
    /// # Arguments
    ///
    /// * `size` is [width, height] of the texture in pixels
    /// * `label` is used as a debug label for the GPU resource
    pub fn create_depth_texture(device: &wgpu::Device, size: [u32; 2], label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[Self::DEPTH_FORMAT],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view }
    }

    /// Upload a decoded image as an sRGB RGBA8 texture.
    ///
    /// Images larger than the device's 2D texture limit (2048 under the
    /// WebGL2 defaults) are downscaled first.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &image::DynamicImage,
        label: Option<&str>,
    ) -> Self {
        let max_dimension = device.limits().max_texture_dimension_2d;
        let downscaled = fit_within(img, max_dimension);
        if downscaled.is_some() {
            log::warn!(
                "Texture {} is {:?}, downscaling to fit {}",
                label.unwrap_or("<unnamed>"),
                img.dimensions(),
                max_dimension
            );
        }
        let img = downscaled.as_ref().unwrap_or(img);
        let dimensions = img.dimensions();
        let rgba = img.to_rgba8();

        let size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            &rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * dimensions.0),
                rows_per_image: Some(dimensions.1),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view }
    }
}

/// A copy of `img` scaled down (keeping its aspect ratio) so neither side
/// exceeds `max_dimension`, or `None` when it already fits.
pub fn fit_within(img: &image::DynamicImage, max_dimension: u32) -> Option<image::DynamicImage> {
    let (width, height) = img.dimensions();
    if width <= max_dimension && height <= max_dimension {
        return None;
    }
    Some(img.resize(
        max_dimension,
        max_dimension,
        image::imageops::FilterType::Triangle,
    ))
}

/// Clamp to the edge on every axis and filter linearly, so each face shows
/// exactly one copy of its image.
pub fn clamped_sampler_descriptor() -> wgpu::SamplerDescriptor<'static> {
    wgpu::SamplerDescriptor {
        label: Some("clamped linear sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    }
}

pub fn create_clamped_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&clamped_sampler_descriptor())
}

use crate::{
    data_structures::texture::{Texture, create_clamped_sampler},
    resources::load_binary,
    scene::Material,
};

/// A decoded image and the id the scene refers to it by.
#[derive(Clone, Debug)]
pub struct ImageSource {
    pub id: String,
    pub image: image::DynamicImage,
}

impl ImageSource {
    pub fn new(id: impl Into<String>, image: image::DynamicImage) -> Self {
        Self {
            id: id.into(),
            image,
        }
    }

    /// A tiny single-colour image.
    pub fn solid(id: impl Into<String>, rgba: [u8; 4]) -> Self {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba(rgba));
        Self::new(id, image::DynamicImage::ImageRgba8(img))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("texture `{0}` is listed more than once")]
    DuplicateId(String),
    #[error("texture `{0}` is not bound at its expected position")]
    Missing(String),
}

/// Texture handles in the order of the image list they were bound from.
///
/// Callers address handles by position; `index_of` maps an id back to that
/// position.
#[derive(Debug)]
pub struct TextureSet<H> {
    ids: Vec<String>,
    handles: Vec<H>,
}

impl<H> TextureSet<H> {
    pub fn get(&self, index: usize) -> Option<&H> {
        self.handles.get(index)
    }

    pub fn by_id(&self, id: &str) -> Option<&H> {
        self.index_of(id).and_then(|i| self.handles.get(i))
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|known| known == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &H)> {
        self.ids.iter().map(String::as_str).zip(self.handles.iter())
    }
}

/// Binds every source through `upload`, keeping the input order.
pub fn bind_textures<H, F>(sources: &[ImageSource], mut upload: F) -> Result<TextureSet<H>, TextureError>
where
    F: FnMut(&ImageSource) -> H,
{
    let mut ids: Vec<String> = Vec::with_capacity(sources.len());
    let mut handles = Vec::with_capacity(sources.len());
    for source in sources {
        if ids.contains(&source.id) {
            return Err(TextureError::DuplicateId(source.id.clone()));
        }
        handles.push(upload(source));
        ids.push(source.id.clone());
    }
    Ok(TextureSet { ids, handles })
}

/// A colour texture, its sampler and the bind group that exposes both to
/// the fragment shader.
#[derive(Debug)]
pub struct SceneTexture {
    pub texture: Texture,
    pub sampler: wgpu::Sampler,
    pub bind_group: wgpu::BindGroup,
}

pub fn texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("texture_bind_group_layout"),
    })
}

/// Uploads one image and wraps it in a bind group for `layout`.
pub fn upload_scene_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    source: &ImageSource,
) -> SceneTexture {
    let texture = Texture::from_image(device, queue, &source.image, Some(&source.id));
    let sampler = create_clamped_sampler(device);
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
        label: Some(&format!("{} bind group", source.id)),
    });
    SceneTexture {
        texture,
        sampler,
        bind_group,
    }
}

/// Loads `<dir>/<id>.png` for every material, in material order.
///
/// A missing or undecodable image is replaced by a solid patch of the
/// material's fallback colour so the scene still renders.
pub async fn load_material_images(dir: &str) -> Vec<ImageSource> {
    let mut sources = Vec::with_capacity(Material::ALL.len());
    for material in Material::ALL {
        let file_name = format!("{}/{}.png", dir, material.id());
        let decoded = match load_binary(&file_name).await {
            Ok(bytes) => image::load_from_memory(&bytes).map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };
        let source = match decoded {
            Ok(img) => ImageSource::new(material.id(), img),
            Err(e) => {
                log::warn!("Texture {file_name} unavailable ({e}), using a solid colour instead.");
                ImageSource::solid(material.id(), material.fallback_colour())
            }
        };
        sources.push(source);
    }
    sources
}

//! One-time shader and pipeline setup.
//!
//! The vertex and fragment stages are compiled as separate modules so a
//! failure can be reported per stage. Creating the bind group and pipeline
//! layouts plays the role of linking (it fixes attribute locations and
//! uniform slots); creating the render pipelines validates the stages
//! against that interface.

use crate::{
    data_structures::texture::Texture,
    error::{SetupError, ShaderStage},
    geometry::{PlaneVertex, Vertex, WallNormal, WallVertex},
    resources::texture::texture_bind_group_layout,
};

pub const VERTEX_SHADER: &str = include_str!("scene_vertex.wgsl");
pub const FRAGMENT_SHADER: &str = include_str!("scene_fragment.wgsl");

/// Vertex attribute locations shared by both pipelines.
pub mod attributes {
    pub const POSITION: u32 = 0;
    pub const TEX_COORDS: u32 = 1;
    pub const NORMAL: u32 = 2;
}

/// Where a uniform lives: bind group index and binding inside the group.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UniformSlot {
    pub group: u32,
    pub binding: u32,
}

pub const VIEW: UniformSlot = UniformSlot { group: 0, binding: 0 };
pub const PROJECTION: UniformSlot = UniformSlot { group: 0, binding: 1 };
pub const WORLD: UniformSlot = UniformSlot { group: 1, binding: 0 };
pub const TEXTURE_GROUP: u32 = 2;

/// Linked scene program: both pipelines and the layouts resources are
/// created against.
#[derive(Debug)]
pub struct ScenePipelines {
    pub wall: wgpu::RenderPipeline,
    pub plane: wgpu::RenderPipeline,
    pub camera_layout: wgpu::BindGroupLayout,
    pub world_layout: wgpu::BindGroupLayout,
    pub texture_layout: wgpu::BindGroupLayout,
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

async fn compile(
    device: &wgpu::Device,
    stage: ShaderStage,
    source: &str,
) -> Result<wgpu::ShaderModule, SetupError> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(match stage {
            ShaderStage::Vertex => "Scene Vertex Shader",
            ShaderStage::Fragment => "Scene Fragment Shader",
        }),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    match scope.pop().await {
        Some(err) => Err(SetupError::ShaderCompile {
            stage,
            log: err.to_string(),
        }),
        None => Ok(module),
    }
}

/// Compiles, links and validates the scene program.
pub async fn setup_scene_pipelines(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<ScenePipelines, SetupError> {
    let vertex = compile(device, ShaderStage::Vertex, vertex_src).await?;
    let fragment = compile(device, ShaderStage::Fragment, fragment_src).await?;

    let link_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[uniform_entry(VIEW.binding), uniform_entry(PROJECTION.binding)],
        label: Some("camera_bind_group_layout"),
    });
    let world_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[uniform_entry(WORLD.binding)],
        label: Some("world_bind_group_layout"),
    });
    let texture_layout = texture_bind_group_layout(device);
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Scene Pipeline Layout"),
        bind_group_layouts: &[&camera_layout, &world_layout, &texture_layout],
        immediate_size: 0,
    });
    if let Some(err) = link_scope.pop().await {
        return Err(SetupError::ProgramLink {
            log: err.to_string(),
        });
    }

    let validate_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let wall = mk_render_pipeline(
        device,
        &layout,
        color_format,
        Stages {
            vertex: &vertex,
            vertex_entry: "vs_wall",
            fragment: &fragment,
        },
        &[WallVertex::desc(), WallNormal::desc()],
        wgpu::PrimitiveTopology::TriangleList,
        "Wall Pipeline",
    );
    let plane = mk_render_pipeline(
        device,
        &layout,
        color_format,
        Stages {
            vertex: &vertex,
            vertex_entry: "vs_plane",
            fragment: &fragment,
        },
        &[PlaneVertex::desc()],
        wgpu::PrimitiveTopology::TriangleStrip,
        "Plane Pipeline",
    );
    if let Some(err) = validate_scope.pop().await {
        return Err(SetupError::ProgramValidate {
            log: err.to_string(),
        });
    }

    log::info!("Scene program linked and validated");
    Ok(ScenePipelines {
        wall,
        plane,
        camera_layout,
        world_layout,
        texture_layout,
    })
}

struct Stages<'a> {
    vertex: &'a wgpu::ShaderModule,
    vertex_entry: &'a str,
    fragment: &'a wgpu::ShaderModule,
}

fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    stages: Stages<'_>,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    topology: wgpu::PrimitiveTopology,
    label: &str,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: stages.vertex,
            entry_point: Some(stages.vertex_entry),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: stages.fragment,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: Texture::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview_mask: None,
    })
}
